//! Hierarchy inspector for trellis element trees.
//!
//! Captures a [`FlattenedElementSnapshot`] from an offscreen render pass and
//! projects it as a stack of depth-separated planes that can be rotated and
//! panned.

pub mod config;
pub mod gesture;
pub mod projection;
pub mod snapshot;

pub use config::{ConfigError, InspectorConfig};
pub use gesture::{GestureAction, GestureArbiter, GestureConfig, GestureEvent, GestureState};
pub use projection::{HierarchyProjection, ProjectedPlane, ProjectionConfig, TransformState};
pub use snapshot::{FlattenedElementSnapshot, INSPECTION_VIEW_CLASS, SnapshotStats, ViewSnapshot};
