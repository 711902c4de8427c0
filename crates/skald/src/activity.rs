//! # Activity — Effective Enabled State
//!
//! Every spatial entity carries an [`Active`] flag, but the flag alone
//! doesn't decide whether the entity participates in a tick: activity is
//! resolved against the ancestor chain. A disabled subtree is never active,
//! no matter what its descendants say.
//!
//! Scene entities are the exception — their flag is absolute. Scenes are
//! root containers, so the chain walk stops there.

use serde::{Deserialize, Serialize};

use crate::ecs::hierarchy::Parent;
use crate::ecs::{Entity, World};
use crate::error::EngineError;
use crate::scene::Scene;

/// Per-entity enabled flag, interpreted relative to ancestor flags (absolute
/// on scene entities).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Active(pub bool);

/// Resolve an entity's effective enabled state.
///
/// - Scene entity → its own flag, unconditionally.
/// - No parent (or a null parent reference) → its own flag.
/// - Own flag false → false, without consulting ancestors.
/// - Otherwise → the parent's resolved state.
///
/// Fails with [`MissingComponent`](EngineError::MissingComponent) if a
/// visited entity lacks [`Active`]. Cyclic parent chains are rejected at
/// [`set_parent`](World::set_parent), not here; this walk assumes the chain
/// terminates.
pub fn is_entity_active(world: &World, entity: Entity) -> Result<bool, EngineError> {
    let mut current = entity;
    loop {
        if world.has::<Scene>(current) {
            return Ok(world.get_strict::<Active>(current)?.0);
        }
        let active = world.get_strict::<Active>(current)?.0;
        let parent = world.get::<Parent>(current).and_then(|p| p.0);
        match parent {
            None => return Ok(active),
            Some(_) if !active => return Ok(false),
            Some(parent) => current = parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::hierarchy::{Children, Parent};

    fn node(world: &mut World, active: bool) -> Entity {
        let e = world.spawn();
        world.insert(e, Active(active));
        world.insert(e, Parent(None));
        world.insert(e, Children(Vec::new()));
        e
    }

    #[test]
    fn root_uses_own_flag() {
        let mut world = World::new();
        let on = node(&mut world, true);
        let off = node(&mut world, false);
        assert!(is_entity_active(&world, on).unwrap());
        assert!(!is_entity_active(&world, off).unwrap());
    }

    #[test]
    fn disabled_ancestor_disables_subtree() {
        let mut world = World::new();
        let root = node(&mut world, false);
        let child = node(&mut world, true);
        let grandchild = node(&mut world, true);
        world.set_parent(child, root).unwrap();
        world.set_parent(grandchild, child).unwrap();

        // Child's own flag is true, but the root is off.
        assert!(!is_entity_active(&world, child).unwrap());
        assert!(!is_entity_active(&world, grandchild).unwrap());
    }

    #[test]
    fn own_flag_short_circuits_before_ancestors() {
        let mut world = World::new();
        let root = node(&mut world, true);
        let child = node(&mut world, false);
        world.set_parent(child, root).unwrap();

        assert!(!is_entity_active(&world, child).unwrap());
    }

    #[test]
    fn scene_flag_is_absolute() {
        let mut world = World::new();
        let scene_on = node(&mut world, true);
        world.insert(scene_on, Scene::new("menu"));
        let scene_off = node(&mut world, false);
        world.insert(scene_off, Scene::new("game"));

        assert!(is_entity_active(&world, scene_on).unwrap());
        assert!(!is_entity_active(&world, scene_off).unwrap());
    }

    #[test]
    fn child_of_inactive_scene_is_inactive() {
        let mut world = World::new();
        let scene = node(&mut world, false);
        world.insert(scene, Scene::new("menu"));
        let child = node(&mut world, true);
        world.set_parent(child, scene).unwrap();

        assert!(!is_entity_active(&world, child).unwrap());
    }

    #[test]
    fn missing_flag_is_an_error() {
        let mut world = World::new();
        let bare = world.spawn();
        let err = is_entity_active(&world, bare).unwrap_err();
        assert!(matches!(err, EngineError::MissingComponent { .. }));
    }
}
