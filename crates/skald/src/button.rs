//! # Buttons — Hover/Press/Release Edge Detection
//!
//! A [`Button`] gives an entity a rectangular press area and a set of
//! callback hooks. Once per tick, [`button_system`] combines the pointer
//! snapshot with the occlusion query and walks each button through its
//! hover/press states:
//!
//! ```text
//!              pointer enters,            pointer down
//!              not occluded               (while hovered)
//!   ┌──────┐ ───────────────▶ ┌─────────┐ ─────────────▶ ┌─────────┐
//!   │ Idle │                  │ Hovered │                │ Pressed │
//!   └──────┘ ◀─────────────── └─────────┘ ◀───────────── └─────────┘
//!              pointer leaves               pointer up
//!              or occluded
//! ```
//!
//! A pointer sitting inside the press area but covered by a higher-layer,
//! input-blocking shape counts as *outside*: the button releases its hover
//! exactly as if the pointer had left.
//!
//! Callbacks are registered handler ids (see
//! [`Handlers`](crate::runtime::Handlers)), kept on the component as plain
//! data. The system never invokes them — it returns the fired
//! [`ButtonEvent`]s in order and the runtime dispatches them after the walk,
//! so handlers are free to mutate the world.

use serde::{Deserialize, Serialize};

use crate::activity::is_entity_active;
use crate::ecs::{Entity, World};
use crate::hit::is_point_occluded;
use crate::input::Pointer;
use crate::math::{Transform, Vec2};
use crate::runtime::HandlerId;
use crate::surface::{Cursor, Surface};
use crate::visual::Color;

/// An interactive press area with hover/press/release hooks.
///
/// `is_hovered` is runtime state owned by the button system; everything else
/// is configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Button {
    /// Press area size, centered on the entity's transform position and
    /// scaled by the transform's scale.
    pub press_area: Vec2,
    /// Layer used as the occlusion query layer.
    pub layer: i32,
    pub active: bool,
    /// Whether the pointer is currently over this button (and not occluded).
    pub is_hovered: bool,
    /// Request a pointer cursor while hovered.
    pub change_cursor: bool,
    /// Draw the press area as a translucent debug rectangle.
    pub show_press_area: bool,
    pub press_area_color: Color,
    pub on_just_pressed: Option<HandlerId>,
    pub on_press: Option<HandlerId>,
    pub on_just_released: Option<HandlerId>,
    pub on_just_hovered: Option<HandlerId>,
    pub on_hovered: Option<HandlerId>,
    pub on_hover_released: Option<HandlerId>,
}

impl Button {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            press_area: Vec2::new(width, height),
            layer: 0,
            active: true,
            is_hovered: false,
            change_cursor: false,
            show_press_area: false,
            press_area_color: Color::RED,
            on_just_pressed: None,
            on_press: None,
            on_just_released: None,
            on_just_hovered: None,
            on_hovered: None,
            on_hover_released: None,
        }
    }

    pub fn layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn change_cursor(mut self, change: bool) -> Self {
        self.change_cursor = change;
        self
    }

    /// Show the press area as a translucent rectangle in the given color.
    pub fn show_press_area(mut self, color: Color) -> Self {
        self.show_press_area = true;
        self.press_area_color = color;
        self
    }

    pub fn on_just_pressed(mut self, handler: HandlerId) -> Self {
        self.on_just_pressed = Some(handler);
        self
    }

    pub fn on_press(mut self, handler: HandlerId) -> Self {
        self.on_press = Some(handler);
        self
    }

    pub fn on_just_released(mut self, handler: HandlerId) -> Self {
        self.on_just_released = Some(handler);
        self
    }

    pub fn on_just_hovered(mut self, handler: HandlerId) -> Self {
        self.on_just_hovered = Some(handler);
        self
    }

    pub fn on_hovered(mut self, handler: HandlerId) -> Self {
        self.on_hovered = Some(handler);
        self
    }

    pub fn on_hover_released(mut self, handler: HandlerId) -> Self {
        self.on_hover_released = Some(handler);
        self
    }
}

/// A callback that fired during [`button_system`], to be dispatched through
/// the runtime's handler registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub entity: Entity,
    pub handler: HandlerId,
}

/// Evaluate every button against the pointer snapshot.
///
/// Returns the fired events in order: within one button, hover edges come
/// before the hover level, which comes before press/release edges, matching
/// the state machine. Across buttons, iteration order is entity spawn order.
///
/// Side effect: the surface cursor is set to a pointer glyph iff any
/// processed button requests cursor feedback and is currently hovered, and
/// reset to default otherwise.
pub fn button_system(world: &mut World, surface: &mut dyn Surface) -> Vec<ButtonEvent> {
    fn fire(events: &mut Vec<ButtonEvent>, entity: Entity, handler: Option<HandlerId>) {
        if let Some(handler) = handler {
            events.push(ButtonEvent { entity, handler });
        }
    }

    let pointer = *world.resource::<Pointer>();
    let mut events = Vec::new();

    let mut saw_cursor_button = false;
    let mut cursor_hovered = false;

    for entity in world.entities_with::<Button>() {
        let Some(transform) = world.get::<Transform>(entity).copied() else {
            continue;
        };
        let button = *world.get::<Button>(entity).unwrap();
        if button.change_cursor {
            saw_cursor_button = true;
        }

        let active = match is_entity_active(world, entity) {
            Ok(active) => active,
            Err(e) => {
                log::warn!("button: {e}");
                continue;
            }
        };

        // An inactive button behaves like the pointer left it.
        if !active || !button.active {
            if button.is_hovered {
                world.get_mut::<Button>(entity).unwrap().is_hovered = false;
                fire(&mut events, entity, button.on_hover_released);
            }
            continue;
        }

        let half = button.press_area * transform.scale / 2.0;
        let delta = pointer.position() - transform.translation;
        let inside = delta.x.abs() <= half.x && delta.y.abs() <= half.y;
        let hovering = inside && !is_point_occluded(world, pointer.position(), button.layer);

        if hovering {
            if button.change_cursor {
                cursor_hovered = true;
            }
            if !button.is_hovered {
                world.get_mut::<Button>(entity).unwrap().is_hovered = true;
                fire(&mut events, entity, button.on_just_hovered);
            }
            fire(&mut events, entity, button.on_hovered);

            if pointer.just_pressed() {
                fire(&mut events, entity, button.on_just_pressed);
            }
            if pointer.pressed() {
                fire(&mut events, entity, button.on_press);
            }
            if pointer.just_released() {
                fire(&mut events, entity, button.on_just_released);
            }
        } else if button.is_hovered {
            world.get_mut::<Button>(entity).unwrap().is_hovered = false;
            fire(&mut events, entity, button.on_hover_released);
        }
    }

    if saw_cursor_button {
        surface.set_cursor(if cursor_hovered {
            Cursor::Pointer
        } else {
            Cursor::Default
        });
    }

    events
}
