//! Transparent padding around a single child.

use crate::element::{Element, ElementRef};
use crate::layout::{ElementContent, Layout, SizeConstraint};
use crate::primitives::{Insets, Rect, Size};
use crate::view::{ViewDescription, ViewDescriptionContext};

#[derive(Debug, Clone)]
pub struct Inset {
    pub wrapped: ElementRef,
    pub insets: Insets,
}

impl Inset {
    pub fn new(wrapped: ElementRef, insets: Insets) -> Self {
        Self { wrapped, insets }
    }
}

impl Element for Inset {
    fn content(&self) -> ElementContent {
        ElementContent::composite(InsetLayout { insets: self.insets }, vec![self.wrapped.clone()])
    }

    fn backing_view_description(&self, _context: &ViewDescriptionContext) -> Option<ViewDescription> {
        None
    }
}

/// Measures the child inside the deflated constraint and adds the insets back.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InsetLayout {
    pub insets: Insets,
}

impl Layout for InsetLayout {
    fn measure(&self, constraint: SizeConstraint, children: &[ElementContent]) -> Size {
        let inner = children
            .first()
            .map(|child| child.measure(constraint.inset(&self.insets)))
            .unwrap_or(Size::ZERO);
        Size::new(
            inner.width + self.insets.horizontal(),
            inner.height + self.insets.vertical(),
        )
    }

    fn layout(&self, size: Size, children: &[ElementContent]) -> Vec<Rect> {
        let frame = Rect::from_size(size).inset(&self.insets);
        children.iter().map(|_| frame).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementExt;
    use crate::elements::Spacer;

    #[test]
    fn adds_insets_around_child() {
        let inset = Inset::new(Spacer::new(Size::new(10.0, 20.0)).into_ref(), Insets::new(1.0, 2.0, 3.0, 4.0));
        let size = inset.content().measure(SizeConstraint::UNCONSTRAINED);
        assert_eq!(size, Size::new(16.0, 24.0));

        let frames: Vec<Rect> = inset.content().layout(size).into_iter().map(|(_, f)| f).collect();
        assert_eq!(frames, vec![Rect::new(4.0, 1.0, 10.0, 20.0)]);
    }

    #[test]
    fn deflates_constraint_for_child() {
        let inset = Inset::new(
            crate::elements::Label::new("abcdefghij").into_ref(),
            Insets::uniform(10.0),
        );
        let constraint = SizeConstraint::with_max_width(20.0 + crate::elements::CHAR_WIDTH * 5.5);
        let size = inset.content().measure(constraint);
        assert!((size.width - (20.0 + crate::elements::CHAR_WIDTH * 5.0)).abs() < 1e-3);
        assert_eq!(size.height, 20.0 + 2.0 * crate::elements::LINE_HEIGHT);
    }
}
