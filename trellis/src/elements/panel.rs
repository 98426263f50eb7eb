//! View-backed container with a background and border.

use crate::element::{Element, ElementRef};
use crate::layout::{ElementContent, Layout, SizeConstraint};
use crate::primitives::{Color, Rect, Size};
use crate::view::{ViewDescription, ViewDescriptionContext};

/// A backing view that sizes to its optional child; the child fills it.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub wrapped: Option<ElementRef>,
    pub background: Option<Color>,
    pub border: Option<(f32, Color)>,
    pub corner_radius: f32,
}

impl Panel {
    pub fn new(wrapped: Option<ElementRef>) -> Self {
        Self {
            wrapped,
            ..Self::default()
        }
    }

    pub fn wrapping(wrapped: ElementRef) -> Self {
        Self::new(Some(wrapped))
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border = Some((width, color));
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }
}

impl Element for Panel {
    fn content(&self) -> ElementContent {
        ElementContent::composite(FillLayout, self.wrapped.iter().cloned().collect())
    }

    fn backing_view_description(&self, _context: &ViewDescriptionContext) -> Option<ViewDescription> {
        let background = self.background;
        let border = self.border;
        let corner_radius = self.corner_radius;
        Some(ViewDescription::new("Panel", move |view| {
            view.style.background = background;
            view.style.border_width = border.map(|(width, _)| width).unwrap_or(0.0);
            view.style.border_color = border.map(|(_, color)| color);
            view.style.corner_radius = corner_radius;
        }))
    }
}

/// Every child gets the container's full bounds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FillLayout;

impl Layout for FillLayout {
    fn measure(&self, constraint: SizeConstraint, children: &[ElementContent]) -> Size {
        children
            .iter()
            .map(|child| child.measure(constraint))
            .fold(Size::ZERO, Size::max)
    }

    fn layout(&self, size: Size, children: &[ElementContent]) -> Vec<Rect> {
        children.iter().map(|_| Rect::from_size(size)).collect()
    }
}
