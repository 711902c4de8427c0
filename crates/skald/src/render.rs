//! # Render — The Draw Dispatcher
//!
//! Each frame, [`render_system`] walks every entity, collects one
//! `(layer, command)` pair per individually-active visual kind, stable-sorts
//! the pairs by layer, and executes them in order against the surface.
//!
//! ## Per-Frame Flow
//!
//! ```text
//! render_system(world, surface)
//!   │
//!   ├─ 1. Collect ─── for every entity, in spawn order:
//!   │     skip unless activity-resolved active and carrying a Transform
//!   │     Sprite / Shape / Text: push if the kind's own flag is active
//!   │     Button: push a debug quad if show_press_area is set
//!   │
//!   ├─ 2. Sort ─── stable sort ascending by layer
//!   │     ties keep discovery order: draw order within a layer is
//!   │     defined by entity spawn order, and tests depend on it
//!   │
//!   └─ 3. Execute ─── each command re-derives its Placement and issues
//!         kind-specific primitives (save → translate → rotate → scale →
//!         alpha → fill → optional outline → restore)
//! ```
//!
//! Rendering mutates the surface and nothing else — entity state is
//! read-only here. A failed strict lookup inside one command logs a warning
//! and skips that command; the rest of the frame draws normally.

use crate::activity::is_entity_active;
use crate::button::Button;
use crate::ecs::{Entity, World};
use crate::math::{Transform, Vec2};
use crate::surface::Surface;
use crate::visual::{triangle_local_points, Shape, ShapeKind, Sprite, Text};

/// Alpha used for the translucent press-area debug quad.
const PRESS_AREA_ALPHA: f32 = 0.25;

/// One collected draw, executed after sorting.
#[derive(Debug, Clone, Copy)]
enum DrawCommand {
    Sprite(Entity),
    Shape(Entity),
    Text(Entity),
    PressArea(Entity),
}

/// Render one frame: collect, sort by layer, execute.
pub fn render_system(world: &mut World, surface: &mut dyn Surface) {
    let mut commands: Vec<(i32, DrawCommand)> = Vec::new();

    for entity in world.entities() {
        match is_entity_active(world, entity) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                log::warn!("render: {e}");
                continue;
            }
        }
        if !world.has::<Transform>(entity) {
            continue;
        }

        if let Some(sprite) = world.get::<Sprite>(entity) {
            if sprite.active {
                commands.push((sprite.layer, DrawCommand::Sprite(entity)));
            }
        }
        if let Some(shape) = world.get::<Shape>(entity) {
            if shape.active {
                commands.push((shape.layer, DrawCommand::Shape(entity)));
            }
        }
        if let Some(text) = world.get::<Text>(entity) {
            if text.active {
                commands.push((text.layer, DrawCommand::Text(entity)));
            }
        }
        if let Some(button) = world.get::<Button>(entity) {
            if button.show_press_area {
                commands.push((button.layer, DrawCommand::PressArea(entity)));
            }
        }
    }

    // Stable sort: equal layers keep discovery order.
    commands.sort_by_key(|(layer, _)| *layer);

    for &(_, command) in &commands {
        let drawn = match command {
            DrawCommand::Sprite(entity) => draw_sprite(world, surface, entity),
            DrawCommand::Shape(entity) => draw_shape(world, surface, entity),
            DrawCommand::Text(entity) => draw_text(world, surface, entity),
            DrawCommand::PressArea(entity) => draw_press_area(world, surface, entity),
        };
        if let Err(e) = drawn {
            log::warn!("render: {e}");
        }
    }

    #[cfg(feature = "diagnostics")]
    {
        let draw_calls = commands.len() as u32;
        let entities = world.entity_count() as u32;
        if let Some(stats) = world.get_resource_mut::<crate::diag::FrameStats>() {
            stats.draw_calls = draw_calls;
            stats.entities = entities;
        }
    }
}

fn draw_sprite(
    world: &World,
    surface: &mut dyn Surface,
    entity: Entity,
) -> Result<(), crate::error::EngineError> {
    let transform = world.get_strict::<Transform>(entity)?;
    let sprite = world.get_strict::<Sprite>(entity)?;

    let placement = transform.compose(sprite.rotation);
    let size = sprite.size * sprite.scale;

    surface.save();
    surface.translate(placement.translation);
    surface.rotate(placement.rotation);
    surface.scale(placement.scale);
    surface.set_alpha(sprite.alpha);
    surface.draw_image(sprite.image, -size / 2.0, size);
    surface.restore();
    Ok(())
}

fn draw_shape(
    world: &World,
    surface: &mut dyn Surface,
    entity: Entity,
) -> Result<(), crate::error::EngineError> {
    let transform = world.get_strict::<Transform>(entity)?;
    let shape = world.get_strict::<Shape>(entity)?;

    match shape.kind {
        ShapeKind::Rectangle {
            size,
            corner_radius,
            rotation,
            centered,
        } => {
            let placement = transform.compose(rotation);
            let offset = if centered { -size / 2.0 } else { Vec2::ZERO };

            surface.save();
            surface.translate(placement.translation);
            surface.rotate(placement.rotation);
            surface.scale(placement.scale);
            surface.set_alpha(shape.alpha);
            surface.fill_rect(offset, size, corner_radius, shape.color);
            if shape.outline.enabled {
                surface.stroke_rect(
                    offset,
                    size,
                    corner_radius,
                    shape.outline.width,
                    shape.outline.color,
                );
            }
            surface.restore();
        }
        ShapeKind::Circle { radius } => {
            // No rotation: under non-uniform scale the ellipse stays
            // axis-aligned, which is also what the hit test assumes.
            surface.save();
            surface.translate(transform.translation);
            surface.scale(transform.scale);
            surface.set_alpha(shape.alpha);
            surface.fill_ellipse(Vec2::ZERO, Vec2::splat(radius), shape.color);
            if shape.outline.enabled {
                surface.stroke_ellipse(
                    Vec2::ZERO,
                    Vec2::splat(radius),
                    shape.outline.width,
                    shape.outline.color,
                );
            }
            surface.restore();
        }
        ShapeKind::Triangle {
            points,
            rotation,
            centered,
        } => {
            let placement = transform.compose(rotation);
            let local = triangle_local_points(&points, centered);

            surface.save();
            surface.translate(placement.translation);
            surface.rotate(placement.rotation);
            surface.scale(placement.scale);
            surface.set_alpha(shape.alpha);
            surface.fill_polygon(&local, shape.color);
            if shape.outline.enabled {
                surface.stroke_polygon(&local, shape.outline.width, shape.outline.color);
            }
            surface.restore();
        }
    }
    Ok(())
}

fn draw_text(
    world: &World,
    surface: &mut dyn Surface,
    entity: Entity,
) -> Result<(), crate::error::EngineError> {
    let transform = world.get_strict::<Transform>(entity)?;
    let text = world.get_strict::<Text>(entity)?;

    let placement = transform.compose(text.rotation);

    surface.save();
    surface.translate(placement.translation);
    surface.rotate(placement.rotation);
    surface.scale(placement.scale);
    surface.set_alpha(text.alpha);
    surface.fill_text(&text.content, text.size, text.max_width, text.color);
    if text.outline.enabled {
        surface.stroke_text(
            &text.content,
            text.size,
            text.max_width,
            text.outline.width,
            text.outline.color,
        );
    }
    surface.restore();
    Ok(())
}

fn draw_press_area(
    world: &World,
    surface: &mut dyn Surface,
    entity: Entity,
) -> Result<(), crate::error::EngineError> {
    let transform = world.get_strict::<Transform>(entity)?;
    let button = world.get_strict::<Button>(entity)?;

    let placement = transform.compose(0.0);

    surface.save();
    surface.translate(placement.translation);
    surface.rotate(placement.rotation);
    surface.scale(placement.scale);
    surface.set_alpha(PRESS_AREA_ALPHA);
    surface.fill_rect(
        -button.press_area / 2.0,
        button.press_area,
        0.0,
        button.press_area_color,
    );
    surface.restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Active;
    use crate::ecs::hierarchy::{Children, Parent};
    use crate::surface::testing::{Op, RecordingSurface};
    use crate::surface::ImageHandle;
    use crate::visual::Color;

    fn node(world: &mut World, x: f32, y: f32) -> Entity {
        let e = world.spawn();
        world.insert(e, Transform::from_xy(x, y));
        world.insert(e, Active(true));
        world.insert(e, Parent(None));
        world.insert(e, Children(Vec::new()));
        e
    }

    fn rect_at_layer(world: &mut World, layer: i32, width: f32) -> Entity {
        let e = node(world, 0.0, 0.0);
        world.insert(e, Shape::rectangle(width, 10.0).layer(layer));
        e
    }

    fn drawn_widths(surface: &RecordingSurface) -> Vec<f32> {
        surface
            .draws()
            .iter()
            .filter_map(|op| match op {
                Op::FillRect { size, .. } => Some(size.x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn commands_execute_in_ascending_layer_order() {
        let mut world = World::new();
        let mut surface = RecordingSurface::new(Vec2::new(640.0, 480.0));

        // Spawn with layers 3, 1, 2; widths identify them.
        rect_at_layer(&mut world, 3, 30.0);
        rect_at_layer(&mut world, 1, 10.0);
        rect_at_layer(&mut world, 2, 20.0);

        render_system(&mut world, &mut surface);
        assert_eq!(drawn_widths(&surface), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn equal_layers_keep_discovery_order() {
        let mut world = World::new();
        let mut surface = RecordingSurface::new(Vec2::new(640.0, 480.0));

        rect_at_layer(&mut world, 5, 11.0);
        rect_at_layer(&mut world, 5, 22.0);
        rect_at_layer(&mut world, 5, 33.0);

        render_system(&mut world, &mut surface);
        assert_eq!(drawn_widths(&surface), vec![11.0, 22.0, 33.0]);
    }

    #[test]
    fn inactive_entities_and_kinds_are_skipped() {
        let mut world = World::new();
        let mut surface = RecordingSurface::new(Vec2::new(640.0, 480.0));

        let off = rect_at_layer(&mut world, 0, 10.0);
        world.get_mut::<Active>(off).unwrap().0 = false;

        let kind_off = rect_at_layer(&mut world, 0, 20.0);
        world.get_mut::<Shape>(kind_off).unwrap().active = false;

        // Child of an inactive parent.
        let parent = node(&mut world, 0.0, 0.0);
        world.get_mut::<Active>(parent).unwrap().0 = false;
        let child = rect_at_layer(&mut world, 0, 30.0);
        world.set_parent(child, parent).unwrap();

        render_system(&mut world, &mut surface);
        assert!(surface.draws().is_empty());
    }

    #[test]
    fn entity_without_transform_is_skipped() {
        let mut world = World::new();
        let mut surface = RecordingSurface::new(Vec2::new(640.0, 480.0));

        let e = world.spawn();
        world.insert(e, Active(true));
        world.insert(e, Shape::rectangle(10.0, 10.0));

        render_system(&mut world, &mut surface);
        assert!(surface.draws().is_empty());
    }

    #[test]
    fn sprite_draw_composes_translate_rotate_scale() {
        let mut world = World::new();
        let mut surface = RecordingSurface::new(Vec2::new(640.0, 480.0));

        let e = node(&mut world, 100.0, 50.0);
        world.get_mut::<Transform>(e).unwrap().rotation = 45.0;
        world.get_mut::<Transform>(e).unwrap().scale = Vec2::new(2.0, 1.0);
        world.insert(
            e,
            Sprite::new(ImageHandle(7), 10.0, 10.0)
                .rotation(45.0)
                .scale(Vec2::splat(2.0)),
        );

        render_system(&mut world, &mut surface);

        // save, translate, rotate(90° total), scale, alpha, image, restore
        assert_eq!(surface.ops[0], Op::Save);
        assert_eq!(surface.ops[1], Op::Translate(Vec2::new(100.0, 50.0)));
        match surface.ops[2] {
            Op::Rotate(radians) => {
                assert!((radians - std::f32::consts::FRAC_PI_2).abs() < 0.001)
            }
            ref other => panic!("expected rotate, got {other:?}"),
        }
        assert_eq!(surface.ops[3], Op::Scale(Vec2::new(2.0, 1.0)));
        // Sprite-local scale doubles the quad, centered.
        assert_eq!(
            surface.ops[5],
            Op::DrawImage {
                image: ImageHandle(7),
                origin: Vec2::new(-10.0, -10.0),
                size: Vec2::new(20.0, 20.0),
            }
        );
        assert_eq!(surface.ops[6], Op::Restore);
    }

    #[test]
    fn outline_draws_after_fill() {
        let mut world = World::new();
        let mut surface = RecordingSurface::new(Vec2::new(640.0, 480.0));

        let e = node(&mut world, 0.0, 0.0);
        world.insert(
            e,
            Shape::circle(5.0)
                .color(Color::BLUE)
                .outline(2.0, Color::BLACK),
        );

        render_system(&mut world, &mut surface);
        let draws = surface.draws();
        assert!(matches!(draws[0], Op::FillEllipse { .. }));
        assert!(matches!(draws[1], Op::StrokeEllipse { .. }));
    }

    #[test]
    fn triangle_draws_centroid_relative_points() {
        let mut world = World::new();
        let mut surface = RecordingSurface::new(Vec2::new(640.0, 480.0));

        let e = node(&mut world, 0.0, 0.0);
        world.insert(
            e,
            Shape::triangle(
                Vec2::new(0.0, 0.0),
                Vec2::new(3.0, 0.0),
                Vec2::new(0.0, 3.0),
            ),
        );

        render_system(&mut world, &mut surface);
        let draws = surface.draws();
        match &draws[0] {
            Op::FillPolygon { points, .. } => {
                // Centroid (1,1) subtracted from every vertex.
                assert_eq!(points[0], Vec2::new(-1.0, -1.0));
                assert_eq!(points[1], Vec2::new(2.0, -1.0));
                assert_eq!(points[2], Vec2::new(-1.0, 2.0));
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn press_area_debug_quad_renders_translucent() {
        let mut world = World::new();
        let mut surface = RecordingSurface::new(Vec2::new(640.0, 480.0));

        let e = node(&mut world, 10.0, 10.0);
        world.insert(e, Button::new(30.0, 20.0).show_press_area(Color::GREEN));

        render_system(&mut world, &mut surface);
        assert!(surface.ops.contains(&Op::Alpha(0.25)));
        assert_eq!(
            surface.draws()[0],
            &Op::FillRect {
                origin: Vec2::new(-15.0, -10.0),
                size: Vec2::new(30.0, 20.0),
                corner_radius: 0.0,
                color: Color::GREEN,
            }
        );
    }

    #[test]
    fn buttons_without_debug_flag_draw_nothing() {
        let mut world = World::new();
        let mut surface = RecordingSurface::new(Vec2::new(640.0, 480.0));

        let e = node(&mut world, 10.0, 10.0);
        world.insert(e, Button::new(30.0, 20.0));

        render_system(&mut world, &mut surface);
        assert!(surface.draws().is_empty());
    }

    #[test]
    fn mixed_kinds_on_one_entity_each_dispatch() {
        let mut world = World::new();
        let mut surface = RecordingSurface::new(Vec2::new(640.0, 480.0));

        let e = node(&mut world, 0.0, 0.0);
        world.insert(e, Shape::rectangle(10.0, 10.0).layer(1));
        world.insert(e, Text::new("hi", 12.0).layer(2));

        render_system(&mut world, &mut surface);
        let draws = surface.draws();
        assert_eq!(draws.len(), 2);
        assert!(matches!(draws[0], Op::FillRect { .. }));
        assert!(matches!(draws[1], Op::FillText { .. }));
    }
}
