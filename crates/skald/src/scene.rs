//! # Scenes — Root Containers and Transitions
//!
//! A [`Scene`] is a root container entity with a human-readable name and
//! optional load/unload hooks. The [`SceneDirectory`] resource tracks every
//! known scene (unique by creation, lookup by name), which one is currently
//! loaded, and a pending transition queued with
//! [`goto`](SceneDirectory::goto).
//!
//! Transitions are processed at the start of the next tick: the outgoing
//! scene fires its unload hook and goes inactive, the incoming scene goes
//! active and fires its load hook. Because scene activity is absolute
//! (see [`activity`](crate::activity)), flipping the scene's flag is enough
//! to gate its whole subtree.
//!
//! Hooks are registered handler ids, not stored closures — components stay
//! plain data and the behavior lives in the runtime's handler registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::activity::Active;
use crate::ecs::{Entity, World};
use crate::runtime::{HandlerId, Handlers};

/// Marks an entity as a scene root. Scenes own no parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    /// Fired after the scene becomes active.
    pub on_load: Option<HandlerId>,
    /// Fired before the scene goes inactive.
    pub on_unload: Option<HandlerId>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_load: None,
            on_unload: None,
        }
    }

    pub fn on_load(mut self, handler: HandlerId) -> Self {
        self.on_load = Some(handler);
        self
    }

    pub fn on_unload(mut self, handler: HandlerId) -> Self {
        self.on_unload = Some(handler);
        self
    }
}

/// Registry of all known scenes and the currently loaded one.
///
/// Inserted as a world resource by the runtime. Scene entities register here
/// when spawned; names are unique by creation — a duplicate registration
/// keeps the first entry and logs a warning.
#[derive(Debug, Default)]
pub struct SceneDirectory {
    by_name: HashMap<String, Entity>,
    current: Option<Entity>,
    pending: Option<String>,
}

impl SceneDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene entity under a name. Keeps the first registration if
    /// the name is already taken.
    pub fn register(&mut self, name: &str, entity: Entity) {
        if let Some(&existing) = self.by_name.get(name) {
            log::warn!("scene \"{name}\" already registered as {existing}, keeping it");
            return;
        }
        self.by_name.insert(name.to_string(), entity);
    }

    /// Look up a scene entity by name.
    pub fn entity(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).copied()
    }

    /// The currently loaded scene entity, or `None`.
    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    /// Queue a transition to the named scene. Processed at the start of the
    /// next tick.
    pub fn goto(&mut self, name: &str) {
        self.pending = Some(name.to_string());
    }
}

/// Process a pending scene transition, if any.
///
/// Uses the extract/reinsert pattern: the directory is removed from the
/// world while hooks run, then put back.
pub(crate) fn process_scene_transitions(world: &mut World, handlers: &mut Handlers) {
    let Some(mut directory) = world.resource_remove::<SceneDirectory>() else {
        return;
    };

    let Some(target_name) = directory.pending.take() else {
        world.insert_resource(directory);
        return;
    };

    let Some(target) = directory.entity(&target_name) else {
        log::warn!("no scene named \"{target_name}\"");
        world.insert_resource(directory);
        return;
    };

    if directory.current == Some(target) {
        world.insert_resource(directory);
        return;
    }

    // Unload the outgoing scene: hook first, then deactivate.
    if let Some(outgoing) = directory.current {
        let on_unload = world.get::<Scene>(outgoing).and_then(|s| s.on_unload);
        if let Some(handler) = on_unload {
            handlers.run(handler, outgoing, world);
        }
        if let Some(active) = world.get_mut::<Active>(outgoing) {
            active.0 = false;
        }
    }

    // Load the incoming scene: activate, then hook.
    if let Some(active) = world.get_mut::<Active>(target) {
        active.0 = true;
    }
    let on_load = world.get::<Scene>(target).and_then(|s| s.on_load);
    if let Some(handler) = on_load {
        handlers.run(handler, target, world);
    }

    log::info!("scene \"{target_name}\" loaded");
    directory.current = Some(target);
    world.insert_resource(directory);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(world: &mut World, name: &str) -> Entity {
        let e = world.spawn();
        world.insert(e, Active(false));
        world.insert(e, Scene::new(name));
        e
    }

    #[test]
    fn transition_flips_active_flags() {
        let mut world = World::new();
        let mut handlers = Handlers::new();
        let menu = scene(&mut world, "menu");
        let game = scene(&mut world, "game");

        let mut directory = SceneDirectory::new();
        directory.register("menu", menu);
        directory.register("game", game);
        directory.goto("menu");
        world.insert_resource(directory);

        process_scene_transitions(&mut world, &mut handlers);
        assert!(world.get::<Active>(menu).unwrap().0);
        assert_eq!(world.resource::<SceneDirectory>().current(), Some(menu));

        world.resource_mut::<SceneDirectory>().goto("game");
        process_scene_transitions(&mut world, &mut handlers);
        assert!(!world.get::<Active>(menu).unwrap().0);
        assert!(world.get::<Active>(game).unwrap().0);
        assert_eq!(world.resource::<SceneDirectory>().current(), Some(game));
    }

    #[test]
    fn hooks_fire_in_unload_then_load_order() {
        let mut world = World::new();
        let mut handlers = Handlers::new();
        world.insert_resource(Vec::<String>::new());

        let unload = handlers.register(|_, world: &mut World| {
            world.resource_mut::<Vec<String>>().push("unload".into());
        });
        let load = handlers.register(|_, world: &mut World| {
            world.resource_mut::<Vec<String>>().push("load".into());
        });

        let menu = world.spawn();
        world.insert(menu, Active(false));
        world.insert(menu, Scene::new("menu").on_unload(unload));
        let game = world.spawn();
        world.insert(game, Active(false));
        world.insert(game, Scene::new("game").on_load(load));

        let mut directory = SceneDirectory::new();
        directory.register("menu", menu);
        directory.register("game", game);
        directory.current = Some(menu);
        directory.goto("game");
        world.insert_resource(directory);

        process_scene_transitions(&mut world, &mut handlers);
        assert_eq!(*world.resource::<Vec<String>>(), vec!["unload", "load"]);
    }

    #[test]
    fn unknown_scene_is_ignored() {
        let mut world = World::new();
        let mut handlers = Handlers::new();
        let menu = scene(&mut world, "menu");

        let mut directory = SceneDirectory::new();
        directory.register("menu", menu);
        directory.current = Some(menu);
        directory.goto("missing");
        world.insert_resource(directory);

        process_scene_transitions(&mut world, &mut handlers);
        // Current scene unchanged, pending consumed.
        assert_eq!(world.resource::<SceneDirectory>().current(), Some(menu));
    }

    #[test]
    fn duplicate_registration_keeps_the_first() {
        let mut world = World::new();
        let first = scene(&mut world, "menu");
        let second = scene(&mut world, "menu");

        let mut directory = SceneDirectory::new();
        directory.register("menu", first);
        directory.register("menu", second);
        assert_eq!(directory.entity("menu"), Some(first));
    }

    #[test]
    fn goto_same_scene_is_a_noop() {
        let mut world = World::new();
        let mut handlers = Handlers::new();
        world.insert_resource(0u32);
        let count = handlers.register(|_, world: &mut World| {
            *world.resource_mut::<u32>() += 1;
        });

        let menu = world.spawn();
        world.insert(menu, Active(true));
        world.insert(menu, Scene::new("menu").on_load(count));

        let mut directory = SceneDirectory::new();
        directory.register("menu", menu);
        directory.current = Some(menu);
        directory.goto("menu");
        world.insert_resource(directory);

        process_scene_transitions(&mut world, &mut handlers);
        assert_eq!(*world.resource::<u32>(), 0);
        assert!(world.get::<Active>(menu).unwrap().0);
    }
}
