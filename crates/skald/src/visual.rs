//! # Visual Kinds — Sprite, Shape, Text
//!
//! The plain-data components that give an entity a visual appearance. Any
//! combination can be attached to one entity; each kind carries its own
//! layer, alpha, and active flag and is collected independently by the draw
//! dispatcher.
//!
//! Shape variants are a tagged union ([`ShapeKind`]) with an explicit
//! discriminant, matched exhaustively in the renderer, the hit tester, and
//! the size resolver — there is no "unknown variant" at runtime.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;
use crate::surface::ImageHandle;

/// An RGBA color with floating-point components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    /// Create a color from RGB (alpha = 1).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Outline settings shared by shapes and text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub enabled: bool,
    pub width: f32,
    pub color: Color,
}

impl Outline {
    /// An enabled outline with the given stroke width and color.
    pub fn new(width: f32, color: Color) -> Self {
        Self {
            enabled: true,
            width,
            color,
        }
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 1.0,
            color: Color::BLACK,
        }
    }
}

/// A 2D sprite. Pair with [`Transform`](crate::math::Transform) to render.
///
/// The image is an opaque handle resolved by the surface — loading happens
/// before the first tick, outside this runtime. Sprites are always
/// center-anchored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sprite {
    pub image: ImageHandle,
    /// Size in surface units.
    pub size: Vec2,
    /// Sprite-local scale, multiplied with the transform's scale.
    pub scale: Vec2,
    pub alpha: f32,
    /// Own rotation in degrees, added to the transform's rotation.
    pub rotation: f32,
    pub layer: i32,
    pub active: bool,
    /// Whether this sprite occludes pointer input on lower layers.
    pub blocks_input: bool,
}

impl Sprite {
    pub fn new(image: ImageHandle, width: f32, height: f32) -> Self {
        Self {
            image,
            size: Vec2::new(width, height),
            scale: Vec2::ONE,
            alpha: 1.0,
            rotation: 0.0,
            layer: 0,
            active: true,
            blocks_input: false,
        }
    }

    pub fn layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn blocks_input(mut self, blocks: bool) -> Self {
        self.blocks_input = blocks;
        self
    }
}

/// The kind and dimensions of a 2D shape primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle {
        size: Vec2,
        /// Corner radius; 0 draws square corners.
        corner_radius: f32,
        /// Own rotation in degrees, added to the transform's rotation.
        rotation: f32,
        /// Whether `size` is anchored at the center (true) or the top-left
        /// corner (false).
        centered: bool,
    },
    Circle {
        radius: f32,
    },
    Triangle {
        points: [Vec2; 3],
        /// Own rotation in degrees, added to the transform's rotation.
        rotation: f32,
        /// Whether the triangle is anchored at its centroid (true) or its
        /// first vertex (false).
        centered: bool,
    },
}

/// A filled, optionally outlined 2D shape. Pair with
/// [`Transform`](crate::math::Transform) to render.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: Color,
    pub outline: Outline,
    pub alpha: f32,
    pub active: bool,
    pub layer: i32,
    /// Whether this shape occludes pointer input on lower layers.
    pub blocks_input: bool,
}

impl Shape {
    /// A center-anchored rectangle.
    pub fn rectangle(width: f32, height: f32) -> Self {
        Self::from_kind(ShapeKind::Rectangle {
            size: Vec2::new(width, height),
            corner_radius: 0.0,
            rotation: 0.0,
            centered: true,
        })
    }

    /// A circle with the given radius. Circles are centered by nature.
    pub fn circle(radius: f32) -> Self {
        Self::from_kind(ShapeKind::Circle { radius })
    }

    /// A centroid-anchored triangle from three points.
    pub fn triangle(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self::from_kind(ShapeKind::Triangle {
            points: [a, b, c],
            rotation: 0.0,
            centered: true,
        })
    }

    fn from_kind(kind: ShapeKind) -> Self {
        Self {
            kind,
            color: Color::WHITE,
            outline: Outline::default(),
            alpha: 1.0,
            active: true,
            layer: 0,
            blocks_input: false,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn outline(mut self, width: f32, color: Color) -> Self {
        self.outline = Outline::new(width, color);
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn blocks_input(mut self, blocks: bool) -> Self {
        self.blocks_input = blocks;
        self
    }

    /// Set the centered convention. No effect on circles, which are centered
    /// by nature.
    pub fn centered(mut self, value: bool) -> Self {
        match &mut self.kind {
            ShapeKind::Rectangle { centered, .. } | ShapeKind::Triangle { centered, .. } => {
                *centered = value;
            }
            ShapeKind::Circle { .. } => {}
        }
        self
    }

    /// Set the shape's own rotation in degrees. No effect on circles.
    pub fn rotation(mut self, degrees: f32) -> Self {
        match &mut self.kind {
            ShapeKind::Rectangle { rotation, .. } | ShapeKind::Triangle { rotation, .. } => {
                *rotation = degrees;
            }
            ShapeKind::Circle { .. } => {}
        }
        self
    }

    /// Set the rectangle's corner radius. No effect on other kinds.
    pub fn corner_radius(mut self, radius: f32) -> Self {
        if let ShapeKind::Rectangle { corner_radius, .. } = &mut self.kind {
            *corner_radius = radius;
        }
        self
    }
}

/// Baseline-centered text. Pair with [`Transform`](crate::math::Transform) to
/// render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    /// Font size in surface units; also the resolved bounding height.
    pub size: f32,
    pub color: Color,
    pub outline: Outline,
    pub alpha: f32,
    pub active: bool,
    pub layer: i32,
    /// Own rotation in degrees, added to the transform's rotation.
    pub rotation: f32,
    /// Maximum rendered width; the measured width is clamped to this.
    pub max_width: f32,
}

impl Text {
    pub fn new(content: impl Into<String>, size: f32) -> Self {
        Self {
            content: content.into(),
            size,
            color: Color::BLACK,
            outline: Outline::default(),
            alpha: 1.0,
            active: true,
            layer: 0,
            rotation: 0.0,
            max_width: f32::MAX,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn outline(mut self, width: f32, color: Color) -> Self {
        self.outline = Outline::new(width, color);
        self
    }

    pub fn layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn max_width(mut self, max_width: f32) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

/// Triangle vertices in local space, relative to the centroid (centered) or
/// to the first vertex (corner-anchored).
///
/// Both the renderer and the hit tester build their local coordinates here,
/// so a triangle is hit exactly where it is drawn.
pub(crate) fn triangle_local_points(points: &[Vec2; 3], centered: bool) -> [Vec2; 3] {
    if centered {
        let centroid = (points[0] + points[1] + points[2]) / 3.0;
        [
            points[0] - centroid,
            points[1] - centroid,
            points[2] - centroid,
        ]
    } else {
        [
            Vec2::ZERO,
            points[1] - points[0],
            points[2] - points[0],
        ]
    }
}
