//! # Snapshots — Stage Serialization
//!
//! Serialize entities and their components to JSON and load them back,
//! through a registry of type-erased serialize/deserialize function pointers.
//! Register every component type you want included; unregistered components
//! are silently skipped.
//!
//! Hierarchy is encoded structurally: each entity entry carries the ids of
//! its children, and the loader relinks `Parent`/`Children` in a second pass.
//! The link components themselves are never serialized — they hold entity
//! ids, which are only meaningful inside one `World`.
//!
//! ```ignore
//! let mut registry = SnapshotRegistry::new();
//! registry.register::<Transform>();
//! registry.register::<Shape>();
//!
//! let data = save_snapshot(&world, &registry);
//! save_snapshot_to_file(&world, &registry, "stage.json");
//!
//! let entities = load_snapshot(&mut world, &registry, &data);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ecs::hierarchy::{Children, Parent};
use crate::ecs::{Entity, World};

type SerializeFn = fn(&dyn Any) -> Option<serde_json::Value>;
type DeserializeFn = fn(serde_json::Value) -> Option<Box<dyn Any + Send + Sync>>;

struct ComponentFns {
    serialize: SerializeFn,
    deserialize: DeserializeFn,
    short_name: String,
}

/// Maps component types to serialize/deserialize function pointers.
pub struct SnapshotRegistry {
    by_type_id: HashMap<TypeId, ComponentFns>,
    by_name: HashMap<String, TypeId>,
}

impl SnapshotRegistry {
    pub fn new() -> Self {
        Self {
            by_type_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a component type for snapshot serialization.
    pub fn register<T>(&mut self)
    where
        T: Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();
        let short = short_type_name(std::any::type_name::<T>()).to_string();

        let fns = ComponentFns {
            serialize: |any| {
                let val = any.downcast_ref::<T>()?;
                serde_json::to_value(val).ok()
            },
            deserialize: |json| {
                let val: T = serde_json::from_value(json).ok()?;
                Some(Box::new(val))
            },
            short_name: short.clone(),
        };

        self.by_type_id.insert(type_id, fns);
        self.by_name.insert(short, type_id);
    }
}

impl Default for SnapshotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A serialized stage: entities with components and child links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotData {
    pub entities: Vec<SnapshotEntity>,
}

/// One serialized entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntity {
    pub id: u32,
    pub components: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<u32>,
}

/// Save all entities in the world to a [`SnapshotData`], roots first.
pub fn save_snapshot(world: &World, registry: &SnapshotRegistry) -> SnapshotData {
    let skip_types = [TypeId::of::<Parent>(), TypeId::of::<Children>()];

    // First pass: serialize each entity's registered components.
    let mut entity_map: HashMap<u32, SnapshotEntity> = HashMap::new();
    for entity in world.entities() {
        let mut components = HashMap::new();
        for tid in world.component_type_ids(entity) {
            if skip_types.contains(&tid) {
                continue;
            }
            if let Some(fns) = registry.by_type_id.get(&tid) {
                if let Some(any) = world.get_boxed(entity, tid) {
                    if let Some(json) = (fns.serialize)(any) {
                        components.insert(fns.short_name.clone(), json);
                    }
                }
            }
        }
        entity_map.insert(
            entity.index(),
            SnapshotEntity {
                id: entity.index(),
                components,
                children: Vec::new(),
            },
        );
    }

    // Second pass: record child links.
    for entity in world.entities() {
        if let Some(children) = world.get::<Children>(entity) {
            let child_ids: Vec<u32> = children
                .0
                .iter()
                .filter(|&&c| world.is_alive(c))
                .map(|c| c.index())
                .collect();
            if let Some(entry) = entity_map.get_mut(&entity.index()) {
                entry.children = child_ids;
            }
        }
    }

    // Emit roots before children so a reader sees the tree top-down.
    let mut roots = Vec::new();
    let mut linked = Vec::new();
    for entity in world.entities() {
        let has_parent = world.get::<Parent>(entity).map(|p| p.0.is_some()).unwrap_or(false);
        if has_parent {
            linked.push(entity.index());
        } else {
            roots.push(entity.index());
        }
    }
    roots.sort();
    linked.sort();

    let mut entities = Vec::new();
    for id in roots.into_iter().chain(linked) {
        if let Some(entry) = entity_map.remove(&id) {
            entities.push(entry);
        }
    }

    SnapshotData { entities }
}

/// Load entities from a [`SnapshotData`] into the world.
///
/// Returns the spawned entities. Components with unregistered names are
/// skipped.
pub fn load_snapshot(
    world: &mut World,
    registry: &SnapshotRegistry,
    data: &SnapshotData,
) -> Vec<Entity> {
    // First pass: spawn entities and insert their components.
    let mut id_map: HashMap<u32, Entity> = HashMap::new();
    for entry in &data.entities {
        let entity = world.spawn();
        id_map.insert(entry.id, entity);

        for (name, json) in &entry.components {
            let Some(&type_id) = registry.by_name.get(name) else {
                log::warn!("snapshot: unregistered component \"{name}\", skipping");
                continue;
            };
            let fns = &registry.by_type_id[&type_id];
            if let Some(boxed) = (fns.deserialize)(json.clone()) {
                world.insert_boxed(entity, type_id, boxed);
            }
        }

        // Restore the base hierarchy kit; links fill in below.
        world.insert(entity, Parent(None));
        world.insert(entity, Children(Vec::new()));
    }

    // Second pass: relink the hierarchy from the children arrays.
    for entry in &data.entities {
        if entry.children.is_empty() {
            continue;
        }
        let Some(&parent) = id_map.get(&entry.id) else {
            continue;
        };
        let mut child_entities = Vec::new();
        for child_id in &entry.children {
            if let Some(&child) = id_map.get(child_id) {
                world.insert(child, Parent(Some(parent)));
                child_entities.push(child);
            }
        }
        world.insert(parent, Children(child_entities));
    }

    id_map.values().copied().collect()
}

/// Save all entities to a JSON file.
pub fn save_snapshot_to_file(world: &World, registry: &SnapshotRegistry, path: impl AsRef<Path>) {
    let data = save_snapshot(world, registry);
    let json = serde_json::to_string_pretty(&data).expect("Failed to serialize snapshot");
    std::fs::write(path, json).expect("Failed to write snapshot file");
}

/// Load entities from a JSON file.
pub fn load_snapshot_from_file(
    world: &mut World,
    registry: &SnapshotRegistry,
    path: impl AsRef<Path>,
) -> Vec<Entity> {
    let json = std::fs::read_to_string(path).expect("Failed to read snapshot file");
    let data: SnapshotData = serde_json::from_str(&json).expect("Failed to deserialize snapshot");
    load_snapshot(world, registry, &data)
}

fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Active;
    use crate::layout::Alignment;
    use crate::math::{Transform, Vec2};
    use crate::visual::{Shape, ShapeKind, Text};

    fn test_registry() -> SnapshotRegistry {
        let mut registry = SnapshotRegistry::new();
        registry.register::<Transform>();
        registry.register::<Active>();
        registry.register::<Shape>();
        registry.register::<Text>();
        registry.register::<Alignment>();
        registry
    }

    #[test]
    fn round_trip_preserves_components() {
        let registry = test_registry();
        let mut world = World::new();

        let e = world.spawn_circle(12.0, None).unwrap();
        world.get_mut::<Transform>(e).unwrap().translation = Vec2::new(3.0, 4.0);
        world.spawn_text("hello", 14.0, None).unwrap();

        let data = save_snapshot(&world, &registry);
        assert_eq!(data.entities.len(), 2);

        let mut fresh = World::new();
        let loaded = load_snapshot(&mut fresh, &registry, &data);
        assert_eq!(loaded.len(), 2);

        let mut found_circle = false;
        let mut found_text = false;
        for entity in fresh.entities() {
            if let Some(shape) = fresh.get::<Shape>(entity) {
                assert!(matches!(shape.kind, ShapeKind::Circle { radius } if radius == 12.0));
                assert_eq!(
                    fresh.get::<Transform>(entity).unwrap().translation,
                    Vec2::new(3.0, 4.0)
                );
                found_circle = true;
            }
            if let Some(text) = fresh.get::<Text>(entity) {
                assert_eq!(text.content, "hello");
                found_text = true;
            }
        }
        assert!(found_circle);
        assert!(found_text);
    }

    #[test]
    fn round_trip_relinks_hierarchy() {
        let registry = test_registry();
        let mut world = World::new();

        let parent = world.spawn_rectangle(40.0, 40.0, None).unwrap();
        let _child = world.spawn_circle(5.0, Some(parent)).unwrap();

        let data = save_snapshot(&world, &registry);
        // Roots are listed first.
        assert_eq!(data.entities[0].children.len(), 1);

        let mut fresh = World::new();
        load_snapshot(&mut fresh, &registry, &data);

        let mut linked = 0;
        for entity in fresh.entities() {
            if fresh.get::<Parent>(entity).map(|p| p.0.is_some()) == Some(true) {
                let parent = fresh.get::<Parent>(entity).unwrap().0.unwrap();
                assert!(fresh
                    .get::<Children>(parent)
                    .unwrap()
                    .0
                    .contains(&entity));
                linked += 1;
            }
        }
        assert_eq!(linked, 1);
    }

    #[test]
    fn unregistered_components_are_skipped() {
        let mut registry = SnapshotRegistry::new();
        registry.register::<Active>();

        let mut world = World::new();
        let e = world.spawn_circle(5.0, None).unwrap();
        let _ = e;

        let data = save_snapshot(&world, &registry);
        // Shape and Transform were not registered.
        assert_eq!(data.entities[0].components.len(), 1);
        assert!(data.entities[0].components.contains_key("Active"));
    }
}
