//! Trellis: declarative element layout over a retained view tree
//!
//! Trellis turns immutable element trees into a retained tree of views:
//! - Pure measurement against size constraints
//! - Single-pass, top-down layout
//! - Reconciliation that reuses views by structural identity
//! - Debugging overlays with a single shared selection
//!
//! # Architecture
//!
//! Elements describe content and, optionally, a backing view. Elements
//! without a backing view are transparent: their children attach to the
//! nearest view-backed ancestor. A `RenderSurface` lays out its element,
//! resolves the view-backed nodes and reconciles them against the views it
//! already owns.
//!
//! # Usage
//!
//! ```ignore
//! use trellis::{DebuggingSession, DebuggingSettings, ElementExt, Label, RenderSurface, Size};
//!
//! let mut surface = RenderSurface::new(
//!     Size::new(320.0, 240.0),
//!     DebuggingSettings::default(),
//!     DebuggingSession::shared(),
//! );
//! surface.set_element(Some(Label::new("hello").into_ref()));
//! surface.update()?;
//! ```

// Core primitives
pub mod primitives;
pub mod error;

// Elements and layout
pub mod element;
pub mod elements;
pub mod layout;

// Retained views and reconciliation
pub mod view;
pub mod render;

// Debugging overlays
pub mod debugging;

pub use primitives::{Color, Insets, Point, Rect, Size};
pub use error::LayoutError;
pub use element::{
    Element, ElementExt, ElementIdentifier, ElementPath, ElementRef, MAX_ELEMENT_DEPTH, RecursedElement,
    element_tree_depth, recursive_element_list,
};
pub use elements::{Axis, CrossAxisAlignment, Inset, Label, Overlay, Panel, Spacer, Stack};
pub use layout::{ElementContent, Layout, LayoutResultNode, SizeConstraint};
pub use view::{View, ViewArena, ViewDescription, ViewDescriptionContext, ViewId, ViewStyle};
pub use render::{NativeViewNode, ReconcileStats, RenderSurface, ViewController};
pub use debugging::{
    DEBUGGING_VIEW_CLASS, DebuggingChanged, DebuggingConfig, DebuggingSession, DebuggingSettings, ElementFrameMode,
    InspectorRequest, OverlayWrapper, SelectionCoordinator, SharedCoordinator,
};
