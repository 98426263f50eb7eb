//! Transparent container stacking children on top of each other.

use crate::element::{Element, ElementRef};
use crate::layout::ElementContent;
use crate::view::{ViewDescription, ViewDescriptionContext};

use super::panel::FillLayout;

/// Every child gets the full bounds; later children are on top.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    pub children: Vec<ElementRef>,
}

impl Overlay {
    pub fn new(children: Vec<ElementRef>) -> Self {
        Self { children }
    }
}

impl Element for Overlay {
    fn content(&self) -> ElementContent {
        ElementContent::composite(FillLayout, self.children.clone())
    }

    fn backing_view_description(&self, _context: &ViewDescriptionContext) -> Option<ViewDescription> {
        None
    }
}
