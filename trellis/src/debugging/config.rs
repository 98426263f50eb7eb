//! Debugging configuration supplied by the host.

use serde::{Deserialize, Serialize};

/// Which elements get a visible frame overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementFrameMode {
    #[default]
    None,
    /// Every element, view-backed or not.
    All,
    /// Only elements that have their own backing view.
    ViewBacked,
}

impl ElementFrameMode {
    /// Whether an element gets wrapped in a debugging overlay.
    pub fn wraps(self, is_view_backed: bool) -> bool {
        match self {
            ElementFrameMode::None => false,
            ElementFrameMode::All => true,
            ElementFrameMode::ViewBacked => is_view_backed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebuggingConfig {
    pub element_frames: ElementFrameMode,
    /// Long-pressing a surface requests the hierarchy inspector.
    pub long_press_for_debugger: bool,
    /// Passed through to inspector requests untouched.
    pub explore_element_history: bool,
}

impl DebuggingConfig {
    pub const DISABLED: Self = Self {
        element_frames: ElementFrameMode::None,
        long_press_for_debugger: false,
        explore_element_history: false,
    };

    /// Wrap every element; used by offscreen snapshot surfaces.
    pub fn wrapping_all() -> Self {
        Self {
            element_frames: ElementFrameMode::All,
            ..Self::DISABLED
        }
    }
}
