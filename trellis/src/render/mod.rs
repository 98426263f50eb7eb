//! Rendering: element trees into retained view trees.
//!
//! ```text
//! LayoutResultNode -> NativeViewNode (view-backed only) -> ViewController (reconcile)
//! ```

pub mod controller;
pub mod native;
pub mod surface;

pub use controller::{ReconcileStats, ViewController};
pub use native::NativeViewNode;
pub use surface::{RenderSurface, SURFACE_VIEW_CLASS};
