//! # Hit Testing — Shape-Accurate Pointer Containment and Occlusion
//!
//! Point-containment tests for every visual kind, evaluated under the same
//! transform composition the renderers use ([`Transform::compose`]): local
//! geometry is scaled, rotated, and translated into world space and the query
//! point is classified there. Whatever the screen shows is exactly what the
//! pointer hits.
//!
//! Conventions, matching the renderers:
//!
//! - Rectangles are tested as axis-aligned boxes of their scaled size
//!   (rectangle own-rotation affects drawing only; the box test stays
//!   axis-aligned).
//! - Circles under non-uniform scale become axis-aligned ellipses.
//! - Triangles are fully transformed (scale, then self + transform rotation,
//!   then translation) and classified with a signed-area test, boundary
//!   inclusive.
//! - Sprites are center-anchored boxes of their sprite-scale × transform-scale
//!   size.
//!
//! [`is_point_occluded`] aggregates these tests into the pointer-occlusion
//! query used by buttons: is any active, input-blocking sprite or shape on a
//! *strictly higher* layer covering this point? Strict comparison means an
//! entity is never occluded by its own layer, only by something drawn after
//! it.

use crate::activity::is_entity_active;
use crate::ecs::{Entity, World};
use crate::math::{Transform, Vec2};
use crate::visual::{triangle_local_points, Shape, ShapeKind, Sprite};

/// Test a point against a sprite's bounding box.
///
/// Sprites are always center-anchored for hit purposes; the box is scaled by
/// both the sprite's own scale and the transform's scale, matching the drawn
/// size.
pub fn sprite_contains(point: Vec2, transform: &Transform, sprite: &Sprite) -> bool {
    let size = sprite.size * sprite.scale * transform.scale;
    let corner = transform.translation - size / 2.0;
    point.x >= corner.x
        && point.x <= corner.x + size.x
        && point.y >= corner.y
        && point.y <= corner.y + size.y
}

/// Test a point against a shape, dispatching on its kind.
pub fn shape_contains(point: Vec2, transform: &Transform, shape: &Shape) -> bool {
    match shape.kind {
        ShapeKind::Rectangle { size, centered, .. } => {
            let scaled = size * transform.scale;
            let mut corner = transform.translation;
            if centered {
                corner -= scaled / 2.0;
            }
            point.x >= corner.x
                && point.x <= corner.x + scaled.x
                && point.y >= corner.y
                && point.y <= corner.y + scaled.y
        }
        ShapeKind::Circle { radius } => {
            // Non-uniform scale turns the circle into an ellipse.
            let radii = Vec2::splat(radius) * transform.scale;
            let delta = point - transform.translation;
            let nx = delta.x / radii.x;
            let ny = delta.y / radii.y;
            nx * nx + ny * ny <= 1.0
        }
        ShapeKind::Triangle {
            points,
            rotation,
            centered,
        } => {
            let local = triangle_local_points(&points, centered);
            let placement = transform.compose(rotation);
            point_in_triangle(
                point,
                placement.apply(local[0]),
                placement.apply(local[1]),
                placement.apply(local[2]),
            )
        }
    }
}

/// Test a point against whatever hit-testable geometry an entity carries
/// (sprite box or shape). `false` for entities with no transform or no
/// geometry.
pub fn point_intersects(world: &World, point: Vec2, entity: Entity) -> bool {
    let Some(transform) = world.get::<Transform>(entity) else {
        return false;
    };
    if let Some(sprite) = world.get::<Sprite>(entity) {
        if sprite_contains(point, transform, sprite) {
            return true;
        }
    }
    if let Some(shape) = world.get::<Shape>(entity) {
        if shape_contains(point, transform, shape) {
            return true;
        }
    }
    false
}

/// Signed-area (barycentric sign) point-in-triangle test, boundary inclusive:
/// the point is inside iff the three sub-triangle areas are not a mix of
/// positive and negative.
fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let area0 = (a.x - p.x) * (b.y - p.y) - (b.x - p.x) * (a.y - p.y);
    let area1 = (b.x - p.x) * (c.y - p.y) - (c.x - p.x) * (b.y - p.y);
    let area2 = (c.x - p.x) * (a.y - p.y) - (a.x - p.x) * (c.y - p.y);
    let has_neg = area0 < 0.0 || area1 < 0.0 || area2 < 0.0;
    let has_pos = area0 > 0.0 || area1 > 0.0 || area2 > 0.0;
    !(has_neg && has_pos)
}

/// Whether any active, input-blocking sprite or shape on a layer strictly
/// greater than `layer` covers `point`.
///
/// Entities that fail activity resolution are logged and treated as not
/// occluding — a malformed entity must not eat pointer input for the rest of
/// the stage.
pub fn is_point_occluded(world: &World, point: Vec2, layer: i32) -> bool {
    for entity in world.entities() {
        let Some(transform) = world.get::<Transform>(entity) else {
            continue;
        };

        if let Some(sprite) = world.get::<Sprite>(entity) {
            if sprite.active
                && sprite.blocks_input
                && sprite.layer > layer
                && entity_is_active(world, entity)
                && sprite_contains(point, transform, sprite)
            {
                return true;
            }
        }

        if let Some(shape) = world.get::<Shape>(entity) {
            if shape.active
                && shape.blocks_input
                && shape.layer > layer
                && entity_is_active(world, entity)
                && shape_contains(point, transform, shape)
            {
                return true;
            }
        }
    }
    false
}

fn entity_is_active(world: &World, entity: Entity) -> bool {
    match is_entity_active(world, entity) {
        Ok(active) => active,
        Err(e) => {
            log::warn!("occlusion: {e}");
            false
        }
    }
}
