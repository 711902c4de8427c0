//! Menu scene — alignment, buttons, and scene transitions, headless.
//!
//! Builds a menu scene with a centered panel and a play button, drives a
//! scripted pointer through hover and click, and switches to the game scene
//! when the button fires. Runs against a [`NullSurface`], so there's nothing
//! to see — watch the log.
//!
//! Run with: `cargo run -p skald --example menu`

use skald::prelude::*;

fn main() {
    skald::diag::init_logger();

    let mut runtime = Runtime::new();
    let mut surface = NullSurface::new(Vec2::new(680.0, 600.0));

    let menu = runtime.world.spawn_scene("menu");
    let _game = runtime.world.spawn_scene("game");

    // Backdrop panel, centered on the viewport.
    let panel = runtime
        .world
        .spawn_rectangle(320.0, 200.0, Some(menu))
        .unwrap();
    runtime.world.get_mut::<Shape>(panel).unwrap().color = Color::rgb(0.12, 0.12, 0.2);
    runtime.world.insert(panel, Alignment::center());

    // Title, top-centered inside the panel.
    let title = runtime.world.spawn_text("SKALD", 32.0, Some(panel)).unwrap();
    runtime.world.get_mut::<Text>(title).unwrap().color = Color::WHITE;
    runtime.world.insert(
        title,
        Alignment::new(HorizontalAlign::Center, VerticalAlign::Top).offset(Vec2::new(0.0, 24.0)),
    );

    // Play button: a visible rectangle plus a press area.
    let play = runtime
        .world
        .spawn_rectangle(160.0, 48.0, Some(panel))
        .unwrap();
    {
        let shape = runtime.world.get_mut::<Shape>(play).unwrap();
        shape.color = Color::rgb(0.2, 0.6, 0.3);
        shape.layer = 1;
    }
    runtime.world.insert(play, Alignment::center());

    let start_game = runtime.register_handler(|entity, world| {
        log::info!("play button {entity} pressed, switching scenes");
        world.resource_mut::<SceneDirectory>().goto("game");
    });
    runtime.world.insert(
        play,
        Button::new(160.0, 48.0)
            .layer(1)
            .change_cursor(true)
            .on_just_pressed(start_game),
    );

    runtime.scenes_mut().goto("menu");

    // Frame 1: menu loads and lays out.
    runtime.tick(&mut surface);

    // Frame 2: pointer glides over the button (panel center = viewport center).
    runtime.pointer_mut().move_to(Vec2::new(340.0, 300.0));
    runtime.tick(&mut surface);

    // Frame 3: click — the handler queues the scene switch.
    runtime.pointer_mut().press();
    runtime.tick(&mut surface);

    // Frame 4: the game scene is live.
    runtime.pointer_mut().release();
    runtime.tick(&mut surface);

    let current = runtime.world.resource::<SceneDirectory>().current();
    log::info!("current scene entity: {current:?}");
}
