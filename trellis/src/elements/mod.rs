//! Built-in elements.
//!
//! Only [`Label`] and [`Panel`] are view-backed; the containers are
//! transparent and their children attach to the nearest view-backed ancestor.

pub mod inset;
pub mod label;
pub mod overlay;
pub mod panel;
pub mod spacer;
pub mod stack;

pub use inset::Inset;
pub use label::{BASE_FONT_SIZE, CHAR_WIDTH, LINE_HEIGHT, Label};
pub use overlay::Overlay;
pub use panel::Panel;
pub use spacer::Spacer;
pub use stack::{Axis, CrossAxisAlignment, Stack};
