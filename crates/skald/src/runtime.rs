//! # Runtime — The Per-Frame Tick
//!
//! [`Runtime`] bundles the ECS [`World`] with the [`Handlers`] registry and
//! owns the frame order. The host loop calls [`tick`](Runtime::tick) once per
//! animation frame with its surface; everything inside runs synchronously,
//! single-threaded, in a fixed sequence:
//!
//! 1. frame timing update
//! 2. scene transition processing (load/unload hooks fire here)
//! 3. alignment — reposition aligned children
//! 4. render — collect, sort by layer, draw
//! 5. buttons — edge detection, then event dispatch through the registry
//! 6. pointer edge reset
//!
//! The order is this function, not a mutable callback list: phases can rely
//! on everything before them in the same tick having fully completed.
//!
//! ## Handlers
//!
//! Scene and button hooks are stored on components as [`HandlerId`]s — plain
//! serializable data. The behavior lives here, in the [`Handlers`] registry:
//! register a closure once, hand its id to as many components as you like.
//! Handlers receive the entity that fired and the whole world; they are
//! opaque, fire-and-forget, and never retried.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::button::button_system;
use crate::ecs::{Entity, World};
use crate::input::Pointer;
use crate::layout::alignment_system;
use crate::render::render_system;
use crate::scene::{process_scene_transitions, SceneDirectory};
use crate::surface::Surface;
use crate::time::Time;

/// Id of a callback registered in [`Handlers`]. Stored on components in
/// place of closures so components stay plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerId(pub u32);

/// Registry of callbacks, resolved by id at dispatch time.
pub struct Handlers {
    next: u32,
    entries: HashMap<u32, Box<dyn FnMut(Entity, &mut World)>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self {
            next: 0,
            entries: HashMap::new(),
        }
    }

    /// Register a callback and get its id.
    pub fn register(&mut self, f: impl FnMut(Entity, &mut World) + 'static) -> HandlerId {
        let id = self.next;
        self.next += 1;
        self.entries.insert(id, Box::new(f));
        HandlerId(id)
    }

    /// Invoke a registered callback. An unknown id logs a warning — stale ids
    /// come from snapshots saved against a different registration order.
    pub fn run(&mut self, id: HandlerId, entity: Entity, world: &mut World) {
        match self.entries.get_mut(&id.0) {
            Some(f) => f(entity, world),
            None => log::warn!("no handler registered for id {}", id.0),
        }
    }
}

impl Default for Handlers {
    fn default() -> Self {
        Self::new()
    }
}

/// The stage runtime: world, handler registry, and the tick order.
pub struct Runtime {
    pub world: World,
    handlers: Handlers,
}

impl Runtime {
    /// Create a runtime with the standard resources installed: [`Pointer`],
    /// [`Time`], and the [`SceneDirectory`].
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(Pointer::new());
        world.insert_resource(Time::new());
        world.insert_resource(SceneDirectory::new());
        #[cfg(feature = "diagnostics")]
        world.insert_resource(crate::diag::FrameStats::default());

        Self {
            world,
            handlers: Handlers::new(),
        }
    }

    /// Register a callback for use as a scene or button hook.
    pub fn register_handler(
        &mut self,
        f: impl FnMut(Entity, &mut World) + 'static,
    ) -> HandlerId {
        self.handlers.register(f)
    }

    /// The pointer snapshot, for the host's event capture layer to feed.
    pub fn pointer_mut(&mut self) -> &mut Pointer {
        self.world.resource_mut::<Pointer>()
    }

    /// The scene directory, for queueing transitions.
    pub fn scenes_mut(&mut self) -> &mut SceneDirectory {
        self.world.resource_mut::<SceneDirectory>()
    }

    /// Run one frame against the given surface.
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        self.world.resource_mut::<Time>().update();

        process_scene_transitions(&mut self.world, &mut self.handlers);

        alignment_system(&mut self.world, surface);
        render_system(&mut self.world, surface);

        let events = button_system(&mut self.world, surface);
        #[cfg(feature = "diagnostics")]
        if let Some(stats) = self.world.get_resource_mut::<crate::diag::FrameStats>() {
            stats.button_events = events.len() as u32;
        }
        for event in events {
            self.handlers.run(event.handler, event.entity, &mut self.world);
        }

        // Each press/release edge is observed by exactly one tick.
        self.world.resource_mut::<Pointer>().reset_edges();
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
