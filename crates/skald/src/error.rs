//! Error taxonomy for the scene runtime.
//!
//! Every error here is local to one entity's processing within a tick: the
//! system that hits it logs a warning, skips that entity, and carries on. One
//! malformed entity must never take down rendering or interaction for the
//! rest of the stage.

use std::fmt;

use crate::ecs::Entity;

/// Errors raised by strict component lookups and hierarchy edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A strict lookup found no component of the requested kind on the entity.
    /// Usually means an entity template assembled components inconsistently.
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },
    /// Attempted to parent a scene entity. Scenes are root containers.
    SceneParented { child: Entity, parent: Entity },
    /// Attempted to parent an entity under one of its own descendants.
    HierarchyCycle { child: Entity, parent: Entity },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MissingComponent { entity, component } => {
                write!(f, "entity {entity} is missing required component `{component}`")
            }
            EngineError::SceneParented { child, parent } => {
                write!(f, "cannot parent scene entity {child} under {parent}")
            }
            EngineError::HierarchyCycle { child, parent } => {
                write!(
                    f,
                    "parenting {child} under {parent} would create a hierarchy cycle"
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;

    #[test]
    fn display_names_the_component() {
        let mut world = World::new();
        let e = world.spawn();
        let err = EngineError::MissingComponent {
            entity: e,
            component: "Transform",
        };
        let text = err.to_string();
        assert!(text.contains("Transform"));
        assert!(text.contains("0v0"));
    }
}
