//! Convenience re-exports — `use skald::prelude::*` for the common items.

pub use crate::activity::{is_entity_active, Active};
pub use crate::button::{button_system, Button, ButtonEvent};
pub use crate::ecs::{Children, Entity, Parent, World};
pub use crate::error::EngineError;
pub use crate::hit::{is_point_occluded, point_intersects, shape_contains, sprite_contains};
pub use crate::input::Pointer;
pub use crate::layout::{
    alignment_system, entity_centered, entity_size, Alignment, HorizontalAlign, VerticalAlign,
};
pub use crate::math::{Placement, Transform, Vec2};
pub use crate::render::render_system;
pub use crate::runtime::{HandlerId, Handlers, Runtime};
pub use crate::scene::{Scene, SceneDirectory};
pub use crate::snapshot::{
    load_snapshot, load_snapshot_from_file, save_snapshot, save_snapshot_to_file, SnapshotData,
    SnapshotRegistry,
};
pub use crate::surface::{Cursor, ImageHandle, NullSurface, Surface};
pub use crate::time::Time;
pub use crate::visual::{Color, Outline, Shape, ShapeKind, Sprite, Text};

#[cfg(feature = "diagnostics")]
pub use crate::diag::FrameStats;
