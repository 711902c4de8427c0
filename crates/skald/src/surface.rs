//! # Surface — The Raster Target
//!
//! The [`Surface`] trait is the runtime's only rendering seam: a 2D raster
//! target with a canvas-style imperative API (save/restore, transform stack,
//! filled and stroked primitives, text measurement, cursor styling). The host
//! supplies an implementation; the runtime never acquires a canvas, scales
//! for DPI, or loads assets itself.
//!
//! Images are referenced by opaque [`ImageHandle`]s. The host resolves
//! handles to decoded images before the first tick — by the time the runtime
//! runs, every referenced image must already exist.
//!
//! [`NullSurface`] is a headless implementation for tests and server-side
//! ticks: it swallows draws and measures text by character count.

use crate::math::Vec2;
use crate::visual::Color;

use serde::{Deserialize, Serialize};

/// An opaque id for a decoded image, resolved by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

/// Pointer cursor styles the runtime can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
}

/// A 2D raster surface with a transform stack.
///
/// Transform calls (`translate`, `rotate`, `scale`) compose onto the current
/// state; `save`/`restore` push and pop it. Draw calls take local
/// coordinates under the current transform, mirroring how the renderers
/// compose placement: translate, then rotate, then scale.
pub trait Surface {
    /// Current viewport size in surface units.
    fn size(&self) -> Vec2;

    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, offset: Vec2);
    /// Rotate the current transform by `radians`.
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, factor: Vec2);

    /// Set the global alpha for subsequent draws (until `restore`).
    fn set_alpha(&mut self, alpha: f32);

    /// Fill a rectangle with optionally rounded corners (`corner_radius` of 0
    /// draws square corners).
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, corner_radius: f32, color: Color);
    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, corner_radius: f32, width: f32, color: Color);

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: Color);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: Color);

    /// Fill text centered on the local origin (horizontally centered,
    /// baseline middle), clamped to `max_width`.
    fn fill_text(&mut self, content: &str, size: f32, max_width: f32, color: Color);
    fn stroke_text(&mut self, content: &str, size: f32, max_width: f32, width: f32, color: Color);

    /// Measured width of `content` at the given font size, unclamped.
    fn measure_text(&self, content: &str, size: f32) -> f32;

    /// Blit an image with its top-left at `origin`, stretched to `size`.
    fn draw_image(&mut self, image: ImageHandle, origin: Vec2, size: Vec2);

    /// Set the pointer cursor style for this frame.
    fn set_cursor(&mut self, cursor: Cursor);
}

/// A surface that draws nothing. Useful for headless ticks and tests.
///
/// Text measurement approximates half an em per character, which is enough
/// for layout code that only needs *a* consistent width.
#[derive(Debug)]
pub struct NullSurface {
    viewport: Vec2,
}

impl NullSurface {
    pub fn new(viewport: Vec2) -> Self {
        Self { viewport }
    }
}

impl Surface for NullSurface {
    fn size(&self) -> Vec2 {
        self.viewport
    }

    fn save(&mut self) {}
    fn restore(&mut self) {}
    fn translate(&mut self, _offset: Vec2) {}
    fn rotate(&mut self, _radians: f32) {}
    fn scale(&mut self, _factor: Vec2) {}
    fn set_alpha(&mut self, _alpha: f32) {}
    fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, _corner_radius: f32, _color: Color) {}
    fn stroke_rect(
        &mut self,
        _origin: Vec2,
        _size: Vec2,
        _corner_radius: f32,
        _width: f32,
        _color: Color,
    ) {
    }
    fn fill_ellipse(&mut self, _center: Vec2, _radii: Vec2, _color: Color) {}
    fn stroke_ellipse(&mut self, _center: Vec2, _radii: Vec2, _width: f32, _color: Color) {}
    fn fill_polygon(&mut self, _points: &[Vec2], _color: Color) {}
    fn stroke_polygon(&mut self, _points: &[Vec2], _width: f32, _color: Color) {}
    fn fill_text(&mut self, _content: &str, _size: f32, _max_width: f32, _color: Color) {}
    fn stroke_text(&mut self, _content: &str, _size: f32, _max_width: f32, _width: f32, _color: Color) {
    }

    fn measure_text(&self, content: &str, size: f32) -> f32 {
        content.chars().count() as f32 * size * 0.5
    }

    fn draw_image(&mut self, _image: ImageHandle, _origin: Vec2, _size: Vec2) {}
    fn set_cursor(&mut self, _cursor: Cursor) {}
}
