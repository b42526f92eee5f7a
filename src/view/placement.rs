//! Object placement and depth-sorted submission
//!
//! `FramePlacer` composes each object's transform against the frame's view
//! matrix and buffers it with its view-space depth. `flush` submits the
//! buffer back to front, a straight painter's sort, and leaves the placer
//! ready for the next frame.

use glam::{EulerRot, Mat4};

use super::{to_radians, to_render_vec};
use crate::platform::assets::ModelHandle;
use crate::platform::present::Presenter;
use crate::sim::fixed::Vec3Fp;

struct Placed {
    depth: f32,
    transform: Mat4,
    model: ModelHandle,
}

pub struct FramePlacer {
    view: Mat4,
    queue: Vec<Placed>,
}

impl FramePlacer {
    pub fn new(view: Mat4) -> Self {
        Self {
            view,
            queue: Vec::with_capacity(64),
        }
    }

    /// Queue one object at a fixed-point world position with a hardware
    /// angle-unit rotation
    pub fn place(&mut self, pos: Vec3Fp, rot: Vec3Fp, model: ModelHandle) {
        let world = Mat4::from_translation(to_render_vec(pos))
            * Mat4::from_euler(
                EulerRot::XYZ,
                to_radians(rot.x),
                to_radians(rot.y),
                to_radians(rot.z),
            );
        let transform = self.view * world;
        // View-space z of the object origin; larger is farther away
        self.queue.push(Placed {
            depth: transform.w_axis.z,
            transform,
            model,
        });
    }

    /// Submit everything back to front and clear the queue
    pub fn flush(&mut self, presenter: &mut dyn Presenter) {
        self.queue
            .sort_by(|a, b| b.depth.total_cmp(&a.depth));
        for placed in self.queue.drain(..) {
            presenter.place_object(placed.transform, placed.model);
        }
    }
}
