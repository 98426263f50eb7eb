//! Fixed-size empty space.

use crate::element::Element;
use crate::layout::ElementContent;
use crate::primitives::Size;
use crate::view::{ViewDescription, ViewDescriptionContext};

/// Occupies `size` regardless of the constraint (it may overflow).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacer {
    pub size: Size,
}

impl Spacer {
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Element for Spacer {
    fn content(&self) -> ElementContent {
        ElementContent::fixed(self.size)
    }

    fn backing_view_description(&self, _context: &ViewDescriptionContext) -> Option<ViewDescription> {
        None
    }
}
