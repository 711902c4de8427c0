//! # Entity Hierarchies — Parent/Child Relationships
//!
//! Provides the [`Parent`] and [`Children`] components and the `World`
//! operations that keep them consistent. A parent/child edge is always
//! mirrored: if A's parent is B, then B's children list contains A. The
//! runtime never stores one side without the other.
//!
//! Edges store entity ids, not owning references, so removing a subtree is a
//! matter of removing ids — a stale handle can be detected but never
//! dereferenced.
//!
//! ## Edits
//!
//! - [`set_parent`](World::set_parent) unlinks from any previous parent before
//!   linking, rejects parenting a scene entity, and rejects edits that would
//!   make an entity its own ancestor.
//! - [`despawn_recursive`](World::despawn_recursive) removes an entity, its
//!   entire subtree, and the edge in its former parent's children list.

use crate::ecs::entity::Entity;
use crate::ecs::store::World;
use crate::error::EngineError;
use crate::scene::Scene;

/// The entity's parent, if any. `Parent(None)` marks a root that may be
/// linked later.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parent(pub Option<Entity>);

/// The ordered list of child entities. The entity owns the list, not the
/// referenced entities.
#[derive(Debug, Clone, Default)]
pub struct Children(pub Vec<Entity>);

impl World {
    /// Link `child` under `parent`, unlinking it from any previous parent
    /// first.
    ///
    /// Fails if `child` is a scene entity (scenes are root containers) or if
    /// `parent` is a descendant of `child` (the edit would close a cycle and
    /// activity resolution would never terminate). Re-linking to the current
    /// parent is a warning and a no-op.
    pub fn set_parent(&mut self, child: Entity, parent: Entity) -> Result<(), EngineError> {
        assert!(
            self.is_alive(parent),
            "Cannot parent {:?} under dead entity {:?}",
            child,
            parent
        );
        if self.has::<Scene>(child) {
            return Err(EngineError::SceneParented { child, parent });
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(EngineError::HierarchyCycle { child, parent });
        }
        if let Some(children) = self.get::<Children>(parent) {
            if children.0.contains(&child) {
                log::warn!("entity {child} is already a child of {parent}, ignoring");
                return Ok(());
            }
        }

        self.unlink_from_parent(child);

        self.insert(child, Parent(Some(parent)));
        if let Some(children) = self.get_mut::<Children>(parent) {
            children.0.push(child);
        } else {
            self.insert(parent, Children(vec![child]));
        }
        Ok(())
    }

    /// Remove `child` from its parent's children list and null its own
    /// parent reference. No-op for roots.
    pub fn unlink_from_parent(&mut self, child: Entity) {
        let Some(parent) = self.get::<Parent>(child).and_then(|p| p.0) else {
            return;
        };
        if let Some(children) = self.get_mut::<Children>(parent) {
            children.0.retain(|&c| c != child);
        }
        if let Some(parent_ref) = self.get_mut::<Parent>(child) {
            parent_ref.0 = None;
        }
    }

    /// Whether `ancestor` appears on `entity`'s parent chain.
    pub fn is_ancestor(&self, ancestor: Entity, entity: Entity) -> bool {
        let mut current = entity;
        while let Some(parent) = self.get::<Parent>(current).and_then(|p| p.0) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    /// Despawn an entity and all its descendants, unlinking the entity from
    /// its former parent's children list first so no dangling ids remain.
    ///
    /// Returns `true` if the entity was alive and successfully despawned.
    pub fn despawn_recursive(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        self.unlink_from_parent(entity);

        // Collect the subtree via BFS before despawning anything.
        let mut to_despawn = vec![entity];
        let mut i = 0;
        while i < to_despawn.len() {
            let current = to_despawn[i];
            if let Some(children) = self.get::<Children>(current) {
                let child_list: Vec<_> = children.0.clone();
                to_despawn.extend(child_list);
            }
            i += 1;
        }

        for e in to_despawn {
            self.despawn(e);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(world: &mut World) -> Entity {
        let e = world.spawn();
        world.insert(e, Parent(None));
        world.insert(e, Children(Vec::new()));
        e
    }

    #[test]
    fn link_mirrors_both_sides() {
        let mut world = World::new();
        let parent = node(&mut world);
        let child = node(&mut world);

        world.set_parent(child, parent).unwrap();

        assert_eq!(world.get::<Parent>(child).unwrap().0, Some(parent));
        assert_eq!(world.get::<Children>(parent).unwrap().0, vec![child]);
    }

    #[test]
    fn relink_unlinks_from_old_parent() {
        let mut world = World::new();
        let old_parent = node(&mut world);
        let new_parent = node(&mut world);
        let child = node(&mut world);

        world.set_parent(child, old_parent).unwrap();
        world.set_parent(child, new_parent).unwrap();

        // Old parent no longer lists the child.
        assert!(world.get::<Children>(old_parent).unwrap().0.is_empty());
        assert_eq!(world.get::<Children>(new_parent).unwrap().0, vec![child]);
        assert_eq!(world.get::<Parent>(child).unwrap().0, Some(new_parent));
    }

    #[test]
    fn duplicate_link_is_a_noop() {
        let mut world = World::new();
        let parent = node(&mut world);
        let child = node(&mut world);

        world.set_parent(child, parent).unwrap();
        world.set_parent(child, parent).unwrap();

        assert_eq!(world.get::<Children>(parent).unwrap().0, vec![child]);
    }

    #[test]
    fn scene_cannot_be_parented() {
        let mut world = World::new();
        let parent = node(&mut world);
        let scene = node(&mut world);
        world.insert(scene, Scene::new("menu"));

        let err = world.set_parent(scene, parent).unwrap_err();
        assert!(matches!(err, EngineError::SceneParented { .. }));
        assert!(world.get::<Children>(parent).unwrap().0.is_empty());
    }

    #[test]
    fn cycle_is_rejected() {
        let mut world = World::new();
        let a = node(&mut world);
        let b = node(&mut world);
        let c = node(&mut world);

        world.set_parent(b, a).unwrap();
        world.set_parent(c, b).unwrap();

        // a → b → c, now try to close the loop.
        let err = world.set_parent(a, c).unwrap_err();
        assert!(matches!(err, EngineError::HierarchyCycle { .. }));

        // Self-parenting counts too.
        let err = world.set_parent(a, a).unwrap_err();
        assert!(matches!(err, EngineError::HierarchyCycle { .. }));
    }

    #[test]
    fn despawn_recursive_removes_subtree() {
        let mut world = World::new();
        let root = node(&mut world);
        let child = node(&mut world);
        let grandchild = node(&mut world);
        let sibling = node(&mut world);

        world.set_parent(child, root).unwrap();
        world.set_parent(grandchild, child).unwrap();
        world.set_parent(sibling, root).unwrap();

        world.despawn_recursive(child);

        assert!(world.is_alive(root));
        assert!(world.is_alive(sibling));
        assert!(!world.is_alive(child));
        assert!(!world.is_alive(grandchild));
        // Root's children list no longer mentions the removed child.
        assert_eq!(world.get::<Children>(root).unwrap().0, vec![sibling]);
    }

    #[test]
    fn despawn_recursive_on_dead_entity_is_false() {
        let mut world = World::new();
        let e = node(&mut world);
        world.despawn(e);
        assert!(!world.despawn_recursive(e));
    }
}
