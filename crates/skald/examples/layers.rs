//! Layered shapes — draw order and pointer occlusion, headless.
//!
//! Overlaps a rectangle, a circle, and a triangle on different layers, then
//! queries which of them occlude the point under the "pointer".
//!
//! Run with: `cargo run -p skald --example layers`

use skald::prelude::*;

fn main() {
    skald::diag::init_logger();

    let mut runtime = Runtime::new();
    let mut surface = NullSurface::new(Vec2::new(680.0, 600.0));
    let center = Vec2::new(340.0, 300.0);

    // Backdrop rectangle on layer 0.
    let back = runtime.world.spawn_rectangle(300.0, 300.0, None).unwrap();
    runtime.world.get_mut::<Transform>(back).unwrap().translation = center;
    runtime.world.get_mut::<Shape>(back).unwrap().color = Color::rgb(0.15, 0.15, 0.25);

    // Blocking circle on layer 1 — eats pointer input for anything below.
    let disc = runtime.world.spawn_circle(80.0, None).unwrap();
    runtime.world.get_mut::<Transform>(disc).unwrap().translation = center;
    {
        let shape = runtime.world.get_mut::<Shape>(disc).unwrap();
        shape.color = Color::rgb(0.8, 0.4, 0.2);
        shape.layer = 1;
        shape.blocks_input = true;
    }

    // Outlined triangle on layer 2, centroid-anchored on the same spot.
    let tri = runtime
        .world
        .spawn_triangle(
            Vec2::new(0.0, -60.0),
            Vec2::new(52.0, 30.0),
            Vec2::new(-52.0, 30.0),
            None,
        )
        .unwrap();
    runtime.world.get_mut::<Transform>(tri).unwrap().translation = center;
    {
        let shape = runtime.world.get_mut::<Shape>(tri).unwrap();
        shape.color = Color::rgb(0.9, 0.9, 0.3);
        shape.outline = Outline::new(2.0, Color::BLACK);
        shape.layer = 2;
        shape.blocks_input = true;
    }

    runtime.tick(&mut surface);

    for layer in 0..3 {
        log::info!(
            "point {center} occluded above layer {layer}: {}",
            is_point_occluded(&runtime.world, center, layer)
        );
    }

    #[cfg(feature = "diagnostics")]
    {
        let stats = runtime.world.resource::<FrameStats>();
        log::info!(
            "frame: {} draw calls over {} entities",
            stats.draw_calls,
            stats.entities
        );
    }
}
