//! # Layout — Sizes, Anchoring Conventions, Alignment
//!
//! Three small, interlocking pieces:
//!
//! - [`entity_size`]: an entity's axis-aligned bounding size, dispatched on
//!   its visual kind. The scene's size is the viewport; text is measured by
//!   the surface.
//! - [`entity_centered`]: whether an entity's declared size is anchored at
//!   its geometric center or a corner/first-vertex.
//! - [`alignment_system`]: repositions every aligned child from its parent's
//!   bounding box once per frame, before rendering — the parent's geometry
//!   may change at any time, so aligned positions are recomputed, never
//!   cached.

use serde::{Deserialize, Serialize};

use crate::button::Button;
use crate::ecs::hierarchy::Parent;
use crate::ecs::{Entity, World};
use crate::math::{Transform, Vec2};
use crate::scene::Scene;
use crate::surface::Surface;
use crate::visual::{Shape, ShapeKind, Sprite, Text};

/// Horizontal alignment relative to the parent's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlign {
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// Vertical alignment relative to the parent's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlign {
    #[default]
    None,
    Top,
    Middle,
    Bottom,
}

/// Declarative placement of a child inside its parent's bounding box.
///
/// Attach to an entity that also has a [`Parent`]; the alignment system
/// rewrites the entity's global position every frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Alignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    pub offset: Vec2,
}

impl Alignment {
    pub fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
            offset: Vec2::ZERO,
        }
    }

    /// Centered both ways.
    pub fn center() -> Self {
        Self::new(HorizontalAlign::Center, VerticalAlign::Middle)
    }

    pub fn offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// Resolve an entity's axis-aligned bounding size.
///
/// Returns `None` when the entity carries no sized kind — callers treat that
/// as "skip this entity this frame", not as an error.
pub fn entity_size(world: &World, surface: &dyn Surface, entity: Entity) -> Option<Vec2> {
    if world.has::<Scene>(entity) {
        return Some(surface.size());
    }

    if let Some(sprite) = world.get::<Sprite>(entity) {
        return Some(sprite.size);
    }

    if let Some(shape) = world.get::<Shape>(entity) {
        return Some(match shape.kind {
            ShapeKind::Rectangle { size, .. } => size,
            ShapeKind::Circle { radius } => Vec2::splat(radius * 2.0),
            ShapeKind::Triangle { points, .. } => {
                let min = points[0].min(points[1]).min(points[2]);
                let max = points[0].max(points[1]).max(points[2]);
                max - min
            }
        });
    }

    if let Some(text) = world.get::<Text>(entity) {
        let measured = surface.measure_text(&text.content, text.size);
        return Some(Vec2::new(measured.min(text.max_width), text.size));
    }

    // A bare button still has a press area worth aligning against.
    if let Some(button) = world.get::<Button>(entity) {
        return Some(button.press_area);
    }

    None
}

/// Resolve an entity's anchoring convention: `true` when its declared size is
/// anchored at the geometric center.
pub fn entity_centered(world: &World, entity: Entity) -> bool {
    if world.has::<Scene>(entity) {
        return false; // scenes anchor at the viewport origin
    }

    if let Some(shape) = world.get::<Shape>(entity) {
        return match shape.kind {
            ShapeKind::Rectangle { centered, .. } | ShapeKind::Triangle { centered, .. } => centered,
            ShapeKind::Circle { .. } => true, // centered by nature
        };
    }

    if world.has::<Sprite>(entity) {
        return true;
    }

    true
}

/// Compute an aligned child position from the parent's box.
///
/// Works in corner space: shift a centered parent to its top-left corner,
/// apply the alignment and offset, then shift back if the child itself is
/// center-anchored.
pub(crate) fn aligned_position(
    parent_pos: Vec2,
    parent_size: Vec2,
    child_size: Vec2,
    alignment: &Alignment,
    parent_centered: bool,
    child_centered: bool,
) -> Vec2 {
    let mut pos = parent_pos;

    if parent_centered {
        pos -= parent_size / 2.0;
    }

    match alignment.horizontal {
        HorizontalAlign::None | HorizontalAlign::Left => {}
        HorizontalAlign::Center => pos.x += parent_size.x / 2.0 - child_size.x / 2.0,
        HorizontalAlign::Right => pos.x += parent_size.x - child_size.x,
    }

    match alignment.vertical {
        VerticalAlign::None | VerticalAlign::Top => {}
        VerticalAlign::Middle => pos.y += parent_size.y / 2.0 - child_size.y / 2.0,
        VerticalAlign::Bottom => pos.y += parent_size.y - child_size.y,
    }

    pos += alignment.offset;

    if child_centered {
        pos += child_size / 2.0;
    }

    pos
}

/// Reposition every aligned child from its parent's current bounding box.
///
/// Runs once per frame before rendering, so a frame's layout always reflects
/// the parent position as of the start of that frame. Entities whose size
/// (or whose parent's size) can't be resolved are skipped for the frame.
pub fn alignment_system(world: &mut World, surface: &dyn Surface) {
    for entity in world.entities_with::<Alignment>() {
        if !world.has::<Transform>(entity) {
            continue;
        }
        let Some(parent) = world.get::<Parent>(entity).and_then(|p| p.0) else {
            continue;
        };
        let alignment = *world.get::<Alignment>(entity).unwrap();

        let parent_pos = match world.get_strict::<Transform>(parent) {
            Ok(transform) => transform.translation,
            Err(e) => {
                log::warn!("alignment: {e}");
                continue;
            }
        };

        let Some(parent_size) = entity_size(world, surface, parent) else {
            continue;
        };
        let Some(child_size) = entity_size(world, surface, entity) else {
            continue;
        };

        let new_pos = aligned_position(
            parent_pos,
            parent_size,
            child_size,
            &alignment,
            entity_centered(world, parent),
            entity_centered(world, entity),
        );

        world.get_mut::<Transform>(entity).unwrap().translation = new_pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Active;
    use crate::ecs::hierarchy::Children;
    use crate::surface::{ImageHandle, NullSurface};

    fn node(world: &mut World) -> Entity {
        let e = world.spawn();
        world.insert(e, Transform::IDENTITY);
        world.insert(e, Active(true));
        world.insert(e, Parent(None));
        world.insert(e, Children(Vec::new()));
        e
    }

    #[test]
    fn size_dispatches_on_kind() {
        let mut world = World::new();
        let surface = NullSurface::new(Vec2::new(680.0, 600.0));

        let scene = node(&mut world);
        world.insert(scene, Scene::new("menu"));
        assert_eq!(entity_size(&world, &surface, scene), Some(Vec2::new(680.0, 600.0)));

        let sprite = node(&mut world);
        world.insert(sprite, Sprite::new(ImageHandle(0), 32.0, 16.0));
        assert_eq!(entity_size(&world, &surface, sprite), Some(Vec2::new(32.0, 16.0)));

        let circle = node(&mut world);
        world.insert(circle, Shape::circle(10.0));
        assert_eq!(entity_size(&world, &surface, circle), Some(Vec2::new(20.0, 20.0)));

        let triangle = node(&mut world);
        world.insert(
            triangle,
            Shape::triangle(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(5.0, 6.0)),
        );
        assert_eq!(
            entity_size(&world, &surface, triangle),
            Some(Vec2::new(10.0, 6.0))
        );

        let bare = node(&mut world);
        assert_eq!(entity_size(&world, &surface, bare), None);
    }

    #[test]
    fn text_size_is_measured_and_clamped() {
        let mut world = World::new();
        let surface = NullSurface::new(Vec2::new(680.0, 600.0));

        let text = node(&mut world);
        // NullSurface measures "abcd" at 16px as 32.
        world.insert(text, Text::new("abcd", 16.0));
        assert_eq!(entity_size(&world, &surface, text), Some(Vec2::new(32.0, 16.0)));

        let clamped = node(&mut world);
        world.insert(clamped, Text::new("abcd", 16.0).max_width(20.0));
        assert_eq!(
            entity_size(&world, &surface, clamped),
            Some(Vec2::new(20.0, 16.0))
        );
    }

    #[test]
    fn bare_button_sizes_to_press_area() {
        let mut world = World::new();
        let surface = NullSurface::new(Vec2::new(680.0, 600.0));
        let button = node(&mut world);
        world.insert(button, Button::new(50.0, 30.0));
        assert_eq!(
            entity_size(&world, &surface, button),
            Some(Vec2::new(50.0, 30.0))
        );
    }

    #[test]
    fn centering_conventions() {
        let mut world = World::new();

        let scene = node(&mut world);
        world.insert(scene, Scene::new("menu"));
        assert!(!entity_centered(&world, scene));

        let circle = node(&mut world);
        world.insert(circle, Shape::circle(5.0));
        assert!(entity_centered(&world, circle));

        let corner_rect = node(&mut world);
        world.insert(corner_rect, Shape::rectangle(10.0, 10.0).centered(false));
        assert!(!entity_centered(&world, corner_rect));

        let sprite = node(&mut world);
        world.insert(sprite, Sprite::new(ImageHandle(0), 8.0, 8.0));
        assert!(entity_centered(&world, sprite));

        // Default assumption for unknown kinds.
        let bare = node(&mut world);
        assert!(entity_centered(&world, bare));
    }

    #[test]
    fn centered_child_centers_on_centered_parent() {
        // Parent at (100,100) with centered size 40x40, child 10x10 centered,
        // alignment center/middle → child lands exactly at (100,100).
        let pos = aligned_position(
            Vec2::new(100.0, 100.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(10.0, 10.0),
            &Alignment::center(),
            true,
            true,
        );
        assert_eq!(pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn corner_cases_of_alignment_arithmetic() {
        let parent_pos = Vec2::new(0.0, 0.0);
        let parent_size = Vec2::new(100.0, 50.0);
        let child_size = Vec2::new(10.0, 10.0);

        // Corner-anchored parent, corner-anchored child, bottom-right.
        let pos = aligned_position(
            parent_pos,
            parent_size,
            child_size,
            &Alignment::new(HorizontalAlign::Right, VerticalAlign::Bottom),
            false,
            false,
        );
        assert_eq!(pos, Vec2::new(90.0, 40.0));

        // Offsets apply after alignment.
        let pos = aligned_position(
            parent_pos,
            parent_size,
            child_size,
            &Alignment::new(HorizontalAlign::Left, VerticalAlign::Top).offset(Vec2::new(5.0, 7.0)),
            false,
            false,
        );
        assert_eq!(pos, Vec2::new(5.0, 7.0));

        // `None` leaves the axis at the parent's corner.
        let pos = aligned_position(
            parent_pos,
            parent_size,
            child_size,
            &Alignment::default(),
            false,
            false,
        );
        assert_eq!(pos, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn system_writes_child_transform_every_frame() {
        let mut world = World::new();
        let surface = NullSurface::new(Vec2::new(680.0, 600.0));

        let parent = node(&mut world);
        world.insert(parent, Shape::rectangle(40.0, 40.0));
        world.get_mut::<Transform>(parent).unwrap().translation = Vec2::new(100.0, 100.0);

        let child = node(&mut world);
        world.insert(child, Shape::rectangle(10.0, 10.0));
        world.insert(child, Alignment::center());
        world.set_parent(child, parent).unwrap();

        alignment_system(&mut world, &surface);
        assert_eq!(
            world.get::<Transform>(child).unwrap().translation,
            Vec2::new(100.0, 100.0)
        );

        // Parent moves; the next frame's alignment follows without lag.
        world.get_mut::<Transform>(parent).unwrap().translation = Vec2::new(200.0, 150.0);
        alignment_system(&mut world, &surface);
        assert_eq!(
            world.get::<Transform>(child).unwrap().translation,
            Vec2::new(200.0, 150.0)
        );
    }

    #[test]
    fn system_skips_unsizable_entities() {
        let mut world = World::new();
        let surface = NullSurface::new(Vec2::new(680.0, 600.0));

        let parent = node(&mut world); // no sized kind
        let child = node(&mut world);
        world.insert(child, Shape::rectangle(10.0, 10.0));
        world.insert(child, Alignment::center());
        world.set_parent(child, parent).unwrap();

        let before = world.get::<Transform>(child).unwrap().translation;
        alignment_system(&mut world, &surface);
        assert_eq!(world.get::<Transform>(child).unwrap().translation, before);
    }
}
