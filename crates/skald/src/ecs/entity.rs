//! # Entity — Lightweight Identifiers for Stage Objects
//!
//! An [`Entity`] is just a number — it doesn't "contain" anything. The
//! [`World`](super::store::World) maps entities to their components, and the
//! hierarchy stores entity ids rather than owning references, so tearing down
//! a subtree is a matter of removing ids and can never dangle.
//!
//! ## Design: Generational Indices
//!
//! Indices are recycled when entities are despawned. To keep stale handles
//! from silently pointing at a recycled slot, each index is paired with a
//! **generation** counter that is bumped on every recycle:
//!
//! ```text
//! Entity { index: 5, generation: 0 }  ← original
//! Entity { index: 5, generation: 1 }  ← after recycle
//! ```
//!
//! A stale handle still says `generation: 0`, so lookups fail safely instead
//! of reading another entity's components.

use std::fmt;

/// A lightweight handle to an entity in the [`World`](super::store::World).
///
/// Entities are created via [`World::spawn`](super::store::World::spawn) and
/// destroyed via [`World::despawn`](super::store::World::despawn). A handle is
/// only valid for the `World` that created it, and only while its generation
/// matches.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Slot index in the allocator. Recycled when the entity is despawned.
    pub(crate) index: u32,
    /// Generation counter, bumped each time the slot is reused.
    pub(crate) generation: u32,
}

impl Entity {
    /// Returns the raw index. Useful for diagnostics, not for general use.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation. Useful for diagnostics.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Manages entity id allocation and recycling.
///
/// When spawning: pop from the free list if possible, otherwise grow. When
/// despawning: bump the slot's generation and push the index onto the free
/// list.
pub(crate) struct EntityAllocator {
    /// Generation counter for each slot ever allocated.
    generations: Vec<u32>,
    /// Indices of despawned entities, available for reuse.
    free_list: Vec<u32>,
    /// Total number of slots ever allocated. Also the next fresh index.
    len: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Allocate a new [`Entity`]. Reuses a freed slot if one is available.
    pub fn allocate(&mut self) -> Entity {
        if let Some(index) = self.free_list.pop() {
            // Reuse a recycled slot — generation was already bumped on dealloc.
            let generation = self.generations[index as usize];
            Entity { index, generation }
        } else {
            let index = self.len;
            self.len += 1;
            self.generations.push(0);
            Entity {
                index,
                generation: 0,
            }
        }
    }

    /// Deallocate an entity, making its slot available for reuse.
    ///
    /// Returns `false` if the handle was already stale.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        if idx < self.generations.len() && self.generations[idx] == entity.generation {
            // Bump generation so any remaining handles become stale.
            self.generations[idx] += 1;
            self.free_list.push(entity.index);
            true
        } else {
            false
        }
    }

    /// Check if an entity handle is still valid (not despawned or stale).
    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        idx < self.generations.len() && self.generations[idx] == entity.generation
    }

    /// Returns the number of currently alive entities.
    pub fn alive_count(&self) -> usize {
        (self.len as usize) - self.free_list.len()
    }
}
