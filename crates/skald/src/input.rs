//! Pointer state.
//!
//! The [`Pointer`] resource is a per-tick snapshot of the single pointer:
//! position plus pressed/just-pressed/just-released flags. The host's event
//! capture layer feeds it via [`move_to`](Pointer::move_to),
//! [`press`](Pointer::press), and [`release`](Pointer::release); the runtime
//! resets the edge flags exactly once, at the end of the tick that consumed
//! them, so each edge is observed by exactly one tick.

use crate::math::Vec2;

/// Single-pointer snapshot: position and press state.
///
/// - `pressed`: the pointer is currently held down (level)
/// - `just_pressed`: went down this tick (edge)
/// - `just_released`: went up this tick (edge)
#[derive(Debug, Clone, Copy, Default)]
pub struct Pointer {
    position: Vec2,
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer position in surface coordinates.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Returns `true` while the pointer is held down.
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Returns `true` if the pointer went down this tick.
    pub fn just_pressed(&self) -> bool {
        self.just_pressed
    }

    /// Returns `true` if the pointer went up this tick.
    pub fn just_released(&self) -> bool {
        self.just_released
    }

    /// Move the pointer. Does not change press state.
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Report a press from the event layer. Sets the edge only on the
    /// up→down transition.
    pub fn press(&mut self) {
        if !self.pressed {
            self.just_pressed = true;
        }
        self.pressed = true;
    }

    /// Report a release from the event layer. Sets the edge only on the
    /// down→up transition.
    pub fn release(&mut self) {
        if self.pressed {
            self.just_released = true;
        }
        self.pressed = false;
    }

    /// Clear the per-tick edge flags. Called once at the end of each tick.
    pub fn reset_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_edge_once() {
        let mut pointer = Pointer::new();
        pointer.press();
        assert!(pointer.pressed());
        assert!(pointer.just_pressed());

        pointer.reset_edges();
        assert!(pointer.pressed()); // level persists
        assert!(!pointer.just_pressed()); // edge consumed

        // A repeated press event while held is not a new edge.
        pointer.press();
        assert!(!pointer.just_pressed());
    }

    #[test]
    fn release_sets_edge_on_transition() {
        let mut pointer = Pointer::new();
        pointer.press();
        pointer.reset_edges();

        pointer.release();
        assert!(!pointer.pressed());
        assert!(pointer.just_released());

        pointer.reset_edges();
        pointer.release(); // already up
        assert!(!pointer.just_released());
    }

    #[test]
    fn move_keeps_press_state() {
        let mut pointer = Pointer::new();
        pointer.press();
        pointer.move_to(Vec2::new(10.0, 20.0));
        assert_eq!(pointer.position(), Vec2::new(10.0, 20.0));
        assert!(pointer.pressed());
    }
}
