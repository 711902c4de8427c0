//! # Skald — Retained-Mode 2D Scene Runtime
//!
//! A small scene runtime: entities in a parent/child hierarchy, each
//! optionally carrying a visual primitive (sprite, rectangle, circle,
//! triangle, text) and/or a button, rendered once per frame onto an abstract
//! raster [`Surface`](surface::Surface) and hit-tested against a single
//! pointer.
//!
//! Start with `use skald::prelude::*`, build a [`Runtime`](runtime::Runtime),
//! and call [`tick`](runtime::Runtime::tick) once per animation frame.

pub mod activity;
pub mod button;
pub mod diag;
pub mod ecs;
pub mod error;
pub mod hit;
pub mod input;
pub mod layout;
pub mod math;
pub mod prelude;
pub mod render;
pub mod runtime;
pub mod scene;
pub mod snapshot;
pub mod surface;
pub mod templates;
pub mod time;
pub mod visual;
