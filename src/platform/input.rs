//! Controller input contract
//!
//! The driver consumes one `InputSnapshot` per frame. Button bits follow the
//! pad hardware layout; sticks report raw 0-255 axes with 128 centered.

/// Pad button bits, one per line in hardware order
pub mod button {
    pub const SELECT: u16 = 0x0001;
    pub const START: u16 = 0x0008;
    pub const UP: u16 = 0x0010;
    pub const RIGHT: u16 = 0x0020;
    pub const DOWN: u16 = 0x0040;
    pub const LEFT: u16 = 0x0080;
    pub const L1: u16 = 0x0400;
    pub const R1: u16 = 0x0800;
    pub const TRIANGLE: u16 = 0x1000;
    pub const CROSS: u16 = 0x4000;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerClass {
    Digital,
    Analog,
    Unsupported,
}

/// One frame's worth of controller state
#[derive(Debug, Clone, Copy)]
pub struct InputSnapshot {
    /// False while no controller is connected
    pub valid: bool,
    pub class: ControllerClass,
    /// Mask of held buttons (1 = pressed)
    pub buttons: u16,
    pub left_stick_x: u8,
    pub left_stick_y: u8,
    pub right_stick_x: u8,
    pub right_stick_y: u8,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            valid: false,
            class: ControllerClass::Unsupported,
            buttons: 0,
            left_stick_x: 128,
            left_stick_y: 128,
            right_stick_x: 128,
            right_stick_y: 128,
        }
    }
}

impl InputSnapshot {
    #[inline]
    pub fn pressed(&self, mask: u16) -> bool {
        self.valid && self.buttons & mask != 0
    }

    /// A controller the game can actually play with
    #[inline]
    pub fn supported(&self) -> bool {
        self.valid && self.class != ControllerClass::Unsupported
    }

    /// Horizontal steering axis, only for analog-class pads
    pub fn stick_x(&self) -> Option<u8> {
        match self.class {
            ControllerClass::Analog if self.valid => Some(self.left_stick_x),
            _ => None,
        }
    }
}

/// Per-frame snapshot provider
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

/// Rising-edge detector over the button mask, for press-once actions
#[derive(Debug, Default)]
pub struct EdgeTracker {
    prev: u16,
}

impl EdgeTracker {
    /// Feed this frame's snapshot; returns the buttons newly pressed
    pub fn update(&mut self, snap: &InputSnapshot) -> u16 {
        let held = if snap.valid { snap.buttons } else { 0 };
        let edges = held & !self.prev;
        self.prev = held;
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digital(buttons: u16) -> InputSnapshot {
        InputSnapshot {
            valid: true,
            class: ControllerClass::Digital,
            buttons,
            ..Default::default()
        }
    }

    #[test]
    fn pressed_requires_validity() {
        let mut snap = digital(button::CROSS);
        assert!(snap.pressed(button::CROSS));
        snap.valid = false;
        assert!(!snap.pressed(button::CROSS));
    }

    #[test]
    fn stick_only_on_analog_pads() {
        let mut snap = digital(0);
        snap.left_stick_x = 200;
        assert_eq!(snap.stick_x(), None);
        snap.class = ControllerClass::Analog;
        assert_eq!(snap.stick_x(), Some(200));
    }

    #[test]
    fn unsupported_pads_are_not_playable() {
        let mut snap = digital(0);
        assert!(snap.supported());
        snap.class = ControllerClass::Unsupported;
        assert!(!snap.supported());
    }

    #[test]
    fn edges_fire_once_per_press() {
        let mut edges = EdgeTracker::default();
        assert_eq!(edges.update(&digital(button::START)), button::START);
        assert_eq!(edges.update(&digital(button::START)), 0);
        assert_eq!(edges.update(&digital(0)), 0);
        assert_eq!(edges.update(&digital(button::START)), button::START);
    }

    #[test]
    fn disconnect_resets_edge_state() {
        let mut edges = EdgeTracker::default();
        edges.update(&digital(button::CROSS));
        // Held through a disconnect reads as a fresh press on reconnect
        edges.update(&InputSnapshot::default());
        assert_eq!(edges.update(&digital(button::CROSS)), button::CROSS);
    }
}
