//! Retained views and the descriptions that build them.

pub mod arena;
pub mod description;

pub use arena::{View, ViewArena, ViewId, ViewStyle};
pub use description::{ViewDescription, ViewDescriptionContext};
