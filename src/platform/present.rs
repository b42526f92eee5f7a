//! Presentation surface contract
//!
//! One frame is bracketed by `begin_frame`/`end_frame`; `end_frame` blocks
//! until vsync on real hardware. Objects arrive already transformed into
//! view space from the placement adapter.

use glam::Mat4;

use super::assets::{ImageHandle, ModelHandle};

/// RGB text color
pub type Color = [u8; 3];

pub trait Presenter {
    fn begin_frame(&mut self);
    fn place_object(&mut self, transform: Mat4, model: ModelHandle);
    fn draw_sprite(&mut self, image: ImageHandle, x: i32, y: i32);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);
    fn end_frame(&mut self);
}

/// Recording presenter with no display, for tests and the headless demo
#[derive(Debug, Default)]
pub struct NullPresenter {
    pub frames: u32,
    /// Models submitted since the last `begin_frame`, in order
    pub objects: Vec<ModelHandle>,
    pub transforms: Vec<Mat4>,
    pub sprites: Vec<ImageHandle>,
    pub text: Vec<String>,
}

impl Presenter for NullPresenter {
    fn begin_frame(&mut self) {
        self.objects.clear();
        self.transforms.clear();
        self.sprites.clear();
        self.text.clear();
    }

    fn place_object(&mut self, transform: Mat4, model: ModelHandle) {
        self.objects.push(model);
        self.transforms.push(transform);
    }

    fn draw_sprite(&mut self, image: ImageHandle, _x: i32, _y: i32) {
        self.sprites.push(image);
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _color: Color) {
        self.text.push(text.to_owned());
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_one_frame() {
        let mut presenter = NullPresenter::default();
        presenter.begin_frame();
        presenter.place_object(Mat4::IDENTITY, ModelHandle(3));
        presenter.draw_text("SCORE 0", 8, 8, [255, 255, 255]);
        presenter.end_frame();
        assert_eq!(presenter.frames, 1);
        assert_eq!(presenter.objects, vec![ModelHandle(3)]);
        assert_eq!(presenter.text, vec!["SCORE 0"]);
    }

    #[test]
    fn begin_frame_clears_the_previous_frame() {
        let mut presenter = NullPresenter::default();
        presenter.begin_frame();
        presenter.place_object(Mat4::IDENTITY, ModelHandle(1));
        presenter.end_frame();
        presenter.begin_frame();
        assert!(presenter.objects.is_empty());
        assert_eq!(presenter.frames, 1);
    }
}
