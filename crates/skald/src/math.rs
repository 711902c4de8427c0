//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam)'s `Vec2` so users don't need to
//! depend on it directly. The [`Transform`] type provides position, rotation,
//! and non-uniform scale for every entity with spatial presence.

pub use glam::Vec2;

use serde::{Deserialize, Serialize};

/// A 2D transform: global position, rotation in degrees, non-uniform scale.
///
/// Rotation is stored in degrees because that's the unit authors write; it's
/// converted to radians once, when composing a [`Placement`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform {
    /// Identity transform (origin, no rotation, uniform scale of 1).
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    /// Create a transform at the given position.
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self {
            translation: Vec2::new(x, y),
            ..Self::IDENTITY
        }
    }

    /// Return a copy with the given rotation in degrees.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Return a copy with the given non-uniform scale.
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Compose this transform with a visual kind's own rotation into a
    /// [`Placement`].
    ///
    /// The composition order is `translate ∘ rotate(own + self) ∘ scale`, and
    /// every renderer and every hit test goes through it. If the two ever
    /// diverged, clicks and pixels would disagree.
    pub fn compose(&self, own_rotation: f32) -> Placement {
        Placement {
            translation: self.translation,
            rotation: (own_rotation + self.rotation).to_radians(),
            scale: self.scale,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A composed transform ready to apply: translation, rotation in radians,
/// scale. Produced by [`Transform::compose`].
///
/// Centering is a per-shape policy, not part of the composition — callers
/// offset local points (e.g. by `-size / 2`) before applying.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub translation: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Placement {
    /// Map a local-space point to world space: scale, then rotate, then
    /// translate.
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let scaled = local * self.scale;
        let (sin, cos) = self.rotation.sin_cos();
        Vec2::new(
            scaled.x * cos - scaled.y * sin,
            scaled.x * sin + scaled.y * cos,
        ) + self.translation
    }
}
