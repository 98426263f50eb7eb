//! Measurement and layout.
//!
//! ```text
//! Element -> ElementContent::measure(constraint) -> Size
//!         -> LayoutResultNode::build(frame)      -> frames for the whole tree
//! ```
//!
//! Measurement is pure; layout runs top-down in a single pass after the
//! root has been measured.

pub mod cache;
pub mod constraint;
pub mod content;
pub mod result;

pub use cache::{MeasurementCache, MeasurementKey, cached_measurement, clear_thread_cache};
pub use constraint::SizeConstraint;
pub use content::{ElementContent, Layout};
pub use result::LayoutResultNode;
