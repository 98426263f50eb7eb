//! Debugging overlays and the session state behind them.

pub mod config;
pub mod overlay;
pub mod session;
pub mod settings;

pub use config::{DebuggingConfig, ElementFrameMode};
pub use overlay::{DEBUGGING_VIEW_CLASS, OverlayWrapper};
pub use session::{
    DebuggingSession, InspectorRequest, SESSION_EVENT_CAPACITY, SelectionCoordinator, SessionEvent, SharedCoordinator,
    WrapperId,
};
pub use settings::{DebuggingChanged, DebuggingSettings, drain_changes};
