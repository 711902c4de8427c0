//! # World — The Central Container
//!
//! The [`World`] owns all entities, components, and resources. It's the single
//! source of truth for the entire stage state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ World                                               │
//! │                                                     │
//! │  EntityAllocator: manages entity id lifecycle        │
//! │                                                     │
//! │  columns: HashMap<TypeId, Column>                   │
//! │    key = component type                             │
//! │    value = Column { entity index → boxed value }    │
//! │                                                     │
//! │  order: Vec<Entity>                                 │
//! │    live entities in spawn order                      │
//! │                                                     │
//! │  resources: HashMap<TypeId, Box<dyn Any>>           │
//! │    singleton data not tied to an entity              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Components live in sparse per-type columns rather than archetype tables.
//! The hot loops of this runtime walk *all* entities once per frame and probe
//! a handful of component kinds per entity, so a map probe per lookup is the
//! simpler storage that fits the access pattern. Entities are an arena of
//! integer ids; hierarchy edges store ids, never owning references.
//!
//! ## Strict vs. optional lookup
//!
//! [`get`](World::get) returns `None` when a component is absent — the caller
//! opted into probing. [`get_strict`](World::get_strict) returns a
//! [`MissingComponent`](crate::error::EngineError::MissingComponent) error —
//! the caller *requires* the component and its absence is a template bug. Per
//! the error model, systems catch strict failures, log them, and skip only
//! the offending entity.
//!
//! ## Resources
//!
//! Resources are "global" data — the pointer snapshot, frame timing, the
//! scene directory. They're stored as type-erased `Box<dyn Any>` in a map.
//! [`resource_remove`](World::resource_remove) supports the extract/reinsert
//! pattern for code that needs a resource and the world mutably at once.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::entity::{Entity, EntityAllocator};
use crate::error::EngineError;

/// A sparse column of components of one type, keyed by entity index.
struct Column {
    data: HashMap<u32, Box<dyn Any + Send + Sync>>,
}

impl Column {
    fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

/// The central container for all stage state.
pub struct World {
    allocator: EntityAllocator,
    /// One column per component type.
    columns: HashMap<TypeId, Column>,
    /// Live entities in spawn order. Systems that iterate "all entities"
    /// depend on this order being stable across a tick.
    order: Vec<Entity>,
    /// Global resources (singletons), keyed by TypeId.
    resources: HashMap<TypeId, Box<dyn Any>>,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            columns: HashMap::new(),
            order: Vec::new(),
            resources: HashMap::new(),
        }
    }

    // ── Spawn / Despawn ──────────────────────────────────────────────

    /// Spawn an entity with no components.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.order.push(entity);
        entity
    }

    /// Despawn an entity, dropping all its components and freeing its id for
    /// reuse. Hierarchy-aware teardown lives in
    /// [`despawn_recursive`](World::despawn_recursive), which unlinks the
    /// entity from its parent and takes its descendants with it — prefer that
    /// for anything that might have hierarchy edges.
    ///
    /// Returns `true` if the entity was alive and successfully despawned.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.allocator.is_alive(entity) {
            return false;
        }
        for column in self.columns.values_mut() {
            column.data.remove(&entity.index);
        }
        self.order.retain(|&e| e != entity);
        self.allocator.deallocate(entity);
        true
    }

    /// Check if an entity is alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Returns the number of alive entities.
    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    /// All live entities, in spawn order.
    pub fn entities(&self) -> Vec<Entity> {
        self.order.clone()
    }

    /// All live entities that have a component of type `T`, in spawn order.
    pub fn entities_with<T: 'static + Send + Sync>(&self) -> Vec<Entity> {
        let Some(column) = self.columns.get(&TypeId::of::<T>()) else {
            return Vec::new();
        };
        self.order
            .iter()
            .filter(|e| column.data.contains_key(&e.index))
            .copied()
            .collect()
    }

    // ── Per-Entity Component Access ──────────────────────────────────

    /// Add a component to an entity. Replaces any existing component of the
    /// same type.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not alive.
    pub fn insert<T: 'static + Send + Sync>(&mut self, entity: Entity, component: T) {
        assert!(
            self.allocator.is_alive(entity),
            "Cannot insert component `{}` on dead entity {:?}",
            std::any::type_name::<T>(),
            entity
        );
        self.columns
            .entry(TypeId::of::<T>())
            .or_insert_with(Column::new)
            .data
            .insert(entity.index, Box::new(component));
    }

    /// Remove a component from an entity.
    ///
    /// Returns `true` if the component was present and removed.
    pub fn remove<T: 'static + Send + Sync>(&mut self, entity: Entity) -> bool {
        if !self.allocator.is_alive(entity) {
            return false;
        }
        self.columns
            .get_mut(&TypeId::of::<T>())
            .and_then(|c| c.data.remove(&entity.index))
            .is_some()
    }

    /// Optional lookup: a shared reference to a component, or `None` if the
    /// entity is dead or doesn't have it.
    pub fn get<T: 'static + Send + Sync>(&self, entity: Entity) -> Option<&T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns
            .get(&TypeId::of::<T>())?
            .data
            .get(&entity.index)?
            .downcast_ref::<T>()
    }

    /// Optional lookup: a mutable reference to a component.
    pub fn get_mut<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .data
            .get_mut(&entity.index)?
            .downcast_mut::<T>()
    }

    /// Strict lookup: a shared reference to a component the entity is
    /// required to carry.
    pub fn get_strict<T: 'static + Send + Sync>(&self, entity: Entity) -> Result<&T, EngineError> {
        self.get::<T>(entity).ok_or(EngineError::MissingComponent {
            entity,
            component: short_type_name(std::any::type_name::<T>()),
        })
    }

    /// Strict lookup: a mutable reference to a required component.
    pub fn get_strict_mut<T: 'static + Send + Sync>(
        &mut self,
        entity: Entity,
    ) -> Result<&mut T, EngineError> {
        if self.get::<T>(entity).is_none() {
            return Err(EngineError::MissingComponent {
                entity,
                component: short_type_name(std::any::type_name::<T>()),
            });
        }
        Ok(self.get_mut::<T>(entity).unwrap())
    }

    /// Check if an entity has a component of type `T`.
    pub fn has<T: 'static + Send + Sync>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    // ── Type-Erased Access (for snapshots) ───────────────────────────

    /// The component TypeIds present on an entity.
    pub(crate) fn component_type_ids(&self, entity: Entity) -> Vec<TypeId> {
        if !self.allocator.is_alive(entity) {
            return Vec::new();
        }
        self.columns
            .iter()
            .filter(|(_, column)| column.data.contains_key(&entity.index))
            .map(|(&tid, _)| tid)
            .collect()
    }

    /// A type-erased reference to a component by TypeId.
    pub(crate) fn get_boxed(&self, entity: Entity, type_id: TypeId) -> Option<&dyn Any> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns
            .get(&type_id)?
            .data
            .get(&entity.index)
            .map(|b| &**b as &dyn Any)
    }

    /// Insert a type-erased component. Used by the snapshot loader, which
    /// doesn't know concrete types at compile time.
    pub(crate) fn insert_boxed(
        &mut self,
        entity: Entity,
        type_id: TypeId,
        boxed: Box<dyn Any + Send + Sync>,
    ) {
        assert!(
            self.allocator.is_alive(entity),
            "Cannot insert component on dead entity {:?}",
            entity
        );
        self.columns
            .entry(type_id)
            .or_insert_with(Column::new)
            .data
            .insert(entity.index, boxed);
    }

    // ── Resources ────────────────────────────────────────────────────

    /// Insert a resource (singleton value). Replaces any existing resource of
    /// the same type.
    pub fn insert_resource<T: 'static>(&mut self, value: T) {
        self.resources.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a shared reference to a resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource hasn't been inserted.
    pub fn resource<T: 'static>(&self) -> &T {
        self.resources
            .get(&TypeId::of::<T>())
            .unwrap_or_else(|| {
                panic!(
                    "Resource `{}` not found. Did you forget to insert it?",
                    std::any::type_name::<T>()
                )
            })
            .downcast_ref::<T>()
            .unwrap()
    }

    /// Get a mutable reference to a resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource hasn't been inserted.
    pub fn resource_mut<T: 'static>(&mut self) -> &mut T {
        self.resources
            .get_mut(&TypeId::of::<T>())
            .unwrap_or_else(|| {
                panic!(
                    "Resource `{}` not found. Did you forget to insert it?",
                    std::any::type_name::<T>()
                )
            })
            .downcast_mut::<T>()
            .unwrap()
    }

    /// Try to get a shared reference to a resource.
    pub fn get_resource<T: 'static>(&self) -> Option<&T> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|r| r.downcast_ref::<T>())
    }

    /// Try to get a mutable reference to a resource.
    pub fn get_resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources
            .get_mut(&TypeId::of::<T>())
            .and_then(|r| r.downcast_mut::<T>())
    }

    /// Check if a resource exists.
    pub fn has_resource<T: 'static>(&self) -> bool {
        self.resources.contains_key(&TypeId::of::<T>())
    }

    /// Remove a resource, taking ownership. Returns `None` if not present.
    ///
    /// Use this for the extract/reinsert pattern when you need to borrow a
    /// resource while also borrowing the world.
    pub fn resource_remove<T: 'static>(&mut self) -> Option<T> {
        self.resources
            .remove(&TypeId::of::<T>())
            .and_then(|r| r.downcast::<T>().ok())
            .map(|b| *b)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the module path from a fully-qualified type name, keeping only the
/// short name (e.g. `skald::math::Transform` → `Transform`).
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}
