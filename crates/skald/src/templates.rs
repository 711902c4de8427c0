//! # Entity Templates — Sanctioned Component Assemblies
//!
//! Spawn helpers that assemble entities with a consistent component set.
//! Every spatial entity gets the same base kit — [`Transform`], [`Active`],
//! [`Parent`], [`Children`] — so the strict lookups downstream (activity
//! resolution, renderers) can rely on it. Assemble entities by hand and a
//! missing flag becomes a logged `MissingComponent` skip at tick time; go
//! through the templates and it can't happen.

use crate::activity::Active;
use crate::button::Button;
use crate::ecs::hierarchy::{Children, Parent};
use crate::ecs::{Entity, World};
use crate::error::EngineError;
use crate::math::{Transform, Vec2};
use crate::scene::{Scene, SceneDirectory};
use crate::surface::ImageHandle;
use crate::visual::{Shape, Sprite, Text};

impl World {
    /// Spawn a bare spatial entity: transform at the origin, active, no
    /// parent. Links under `parent` if given.
    pub fn spawn_node(&mut self, parent: Option<Entity>) -> Result<Entity, EngineError> {
        let entity = self.spawn();
        self.insert(entity, Transform::IDENTITY);
        self.insert(entity, Active(true));
        self.insert(entity, Parent(None));
        self.insert(entity, Children(Vec::new()));
        if let Some(parent) = parent {
            self.set_parent(entity, parent)?;
        }
        Ok(entity)
    }

    /// Spawn a node carrying a [`Sprite`].
    pub fn spawn_sprite(
        &mut self,
        image: ImageHandle,
        width: f32,
        height: f32,
        parent: Option<Entity>,
    ) -> Result<Entity, EngineError> {
        let entity = self.spawn_node(parent)?;
        self.insert(entity, Sprite::new(image, width, height));
        Ok(entity)
    }

    /// Spawn a node carrying a rectangle [`Shape`].
    pub fn spawn_rectangle(
        &mut self,
        width: f32,
        height: f32,
        parent: Option<Entity>,
    ) -> Result<Entity, EngineError> {
        let entity = self.spawn_node(parent)?;
        self.insert(entity, Shape::rectangle(width, height));
        Ok(entity)
    }

    /// Spawn a node carrying a circle [`Shape`].
    pub fn spawn_circle(
        &mut self,
        radius: f32,
        parent: Option<Entity>,
    ) -> Result<Entity, EngineError> {
        let entity = self.spawn_node(parent)?;
        self.insert(entity, Shape::circle(radius));
        Ok(entity)
    }

    /// Spawn a node carrying a triangle [`Shape`].
    pub fn spawn_triangle(
        &mut self,
        a: Vec2,
        b: Vec2,
        c: Vec2,
        parent: Option<Entity>,
    ) -> Result<Entity, EngineError> {
        let entity = self.spawn_node(parent)?;
        self.insert(entity, Shape::triangle(a, b, c));
        Ok(entity)
    }

    /// Spawn a node carrying a [`Text`].
    pub fn spawn_text(
        &mut self,
        content: &str,
        size: f32,
        parent: Option<Entity>,
    ) -> Result<Entity, EngineError> {
        let entity = self.spawn_node(parent)?;
        self.insert(entity, Text::new(content, size));
        Ok(entity)
    }

    /// Spawn a node carrying a [`Button`] with the given press area.
    pub fn spawn_button(
        &mut self,
        width: f32,
        height: f32,
        parent: Option<Entity>,
    ) -> Result<Entity, EngineError> {
        let entity = self.spawn_node(parent)?;
        self.insert(entity, Button::new(width, height));
        Ok(entity)
    }

    /// Spawn a scene root and register it in the [`SceneDirectory`].
    ///
    /// Scenes spawn inactive; loading one through
    /// [`SceneDirectory::goto`] activates it. Scenes never take a parent.
    pub fn spawn_scene(&mut self, name: &str) -> Entity {
        let entity = self.spawn();
        self.insert(entity, Transform::IDENTITY);
        self.insert(entity, Active(false));
        self.insert(entity, Parent(None));
        self.insert(entity, Children(Vec::new()));
        self.insert(entity, Scene::new(name));

        if !self.has_resource::<SceneDirectory>() {
            self.insert_resource(SceneDirectory::new());
        }
        self.resource_mut::<SceneDirectory>().register(name, entity);
        entity
    }
}
