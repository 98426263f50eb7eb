//! Transparent column/row container.
//!
//! Children are placed one after another along the main axis, each offered
//! whatever main-axis extent its predecessors left over, and aligned on the
//! cross axis. Overflow is passed through unclamped.

use crate::element::{Element, ElementRef};
use crate::layout::{ElementContent, Layout, SizeConstraint};
use crate::primitives::{Rect, Size};
use crate::view::{ViewDescription, ViewDescriptionContext};

/// Direction of flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Column: children flow top to bottom.
    Vertical,
    /// Row: children flow left to right.
    Horizontal,
}

/// Alignment on the cross axis (perpendicular to flow).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrossAxisAlignment {
    #[default]
    Start,
    End,
    Center,
    /// Stretch to fill the cross axis.
    Stretch,
}

#[derive(Debug, Clone)]
pub struct Stack {
    pub axis: Axis,
    pub spacing: f32,
    pub alignment: CrossAxisAlignment,
    pub children: Vec<ElementRef>,
}

impl Stack {
    pub fn new(axis: Axis, children: Vec<ElementRef>) -> Self {
        Self {
            axis,
            spacing: 0.0,
            alignment: CrossAxisAlignment::Start,
            children,
        }
    }

    pub fn column(children: Vec<ElementRef>) -> Self {
        Self::new(Axis::Vertical, children)
    }

    pub fn row(children: Vec<ElementRef>) -> Self {
        Self::new(Axis::Horizontal, children)
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn align(mut self, alignment: CrossAxisAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Element for Stack {
    fn content(&self) -> ElementContent {
        ElementContent::composite(
            StackLayout {
                axis: self.axis,
                spacing: self.spacing,
                alignment: self.alignment,
            },
            self.children.clone(),
        )
    }

    fn backing_view_description(&self, _context: &ViewDescriptionContext) -> Option<ViewDescription> {
        None
    }
}

#[derive(Debug, Clone, Copy)]
struct StackLayout {
    axis: Axis,
    spacing: f32,
    alignment: CrossAxisAlignment,
}

impl StackLayout {
    /// (main, cross) components of a size.
    fn split(&self, size: Size) -> (f32, f32) {
        match self.axis {
            Axis::Vertical => (size.height, size.width),
            Axis::Horizontal => (size.width, size.height),
        }
    }

    fn join(&self, main: f32, cross: f32) -> Size {
        match self.axis {
            Axis::Vertical => Size::new(cross, main),
            Axis::Horizontal => Size::new(main, cross),
        }
    }

    /// Measure every child with the main extent its predecessors left over.
    fn measure_children(&self, max: Size, children: &[ElementContent]) -> Vec<Size> {
        let (max_main, max_cross) = self.split(max);
        let mut used = 0.0;
        children
            .iter()
            .enumerate()
            .map(|(i, child)| {
                if i > 0 {
                    used += self.spacing;
                }
                let remaining = (max_main - used).max(0.0);
                let size = child.measure(SizeConstraint::loose(self.join(remaining, max_cross)));
                used += self.split(size).0;
                size
            })
            .collect()
    }
}

impl Layout for StackLayout {
    fn measure(&self, constraint: SizeConstraint, children: &[ElementContent]) -> Size {
        let sizes = self.measure_children(constraint.maximum(), children);
        let gaps = self.spacing * sizes.len().saturating_sub(1) as f32;
        let (main, cross) = sizes.iter().fold((gaps, 0.0f32), |(main, cross), size| {
            let (m, c) = self.split(*size);
            (main + m, cross.max(c))
        });
        let size = self.join(main, cross);
        if constraint.is_overflowed_by(size) {
            tracing::debug!(?size, ?constraint, axis = ?self.axis, "stack overflows its constraint");
        }
        size
    }

    fn layout(&self, size: Size, children: &[ElementContent]) -> Vec<Rect> {
        let (_, cross_extent) = self.split(size);
        let sizes = self.measure_children(size, children);
        let mut offset = 0.0;

        sizes
            .into_iter()
            .map(|child_size| {
                let (main, measured_cross) = self.split(child_size);
                let (cross_offset, cross) = match self.alignment {
                    CrossAxisAlignment::Start => (0.0, measured_cross),
                    CrossAxisAlignment::End => (cross_extent - measured_cross, measured_cross),
                    CrossAxisAlignment::Center => ((cross_extent - measured_cross) / 2.0, measured_cross),
                    CrossAxisAlignment::Stretch => (0.0, cross_extent),
                };
                let frame = match self.axis {
                    Axis::Vertical => Rect::new(cross_offset, offset, cross, main),
                    Axis::Horizontal => Rect::new(offset, cross_offset, main, cross),
                };
                offset += main + self.spacing;
                frame
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementExt;
    use crate::elements::Spacer;

    fn spacer(w: f32, h: f32) -> ElementRef {
        Spacer::new(Size::new(w, h)).into_ref()
    }

    fn frames(stack: &Stack, size: Size) -> Vec<Rect> {
        stack.content().layout(size).into_iter().map(|(_, f)| f).collect()
    }

    #[test]
    fn column_stacks_vertically_with_spacing() {
        let column = Stack::column(vec![spacer(10.0, 10.0), spacer(30.0, 5.0)]).spacing(4.0);
        let size = column.content().measure(SizeConstraint::UNCONSTRAINED);
        assert_eq!(size, Size::new(30.0, 19.0));
        assert_eq!(
            frames(&column, size),
            vec![Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(0.0, 14.0, 30.0, 5.0)]
        );
    }

    #[test]
    fn row_stacks_horizontally() {
        let row = Stack::row(vec![spacer(10.0, 10.0), spacer(30.0, 5.0)]);
        let size = row.content().measure(SizeConstraint::UNCONSTRAINED);
        assert_eq!(size, Size::new(40.0, 10.0));
        assert_eq!(
            frames(&row, size),
            vec![Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(10.0, 0.0, 30.0, 5.0)]
        );
    }

    #[test]
    fn cross_axis_alignment() {
        let children = vec![spacer(10.0, 10.0)];
        let size = Size::new(50.0, 10.0);
        let center = Stack::column(children.clone()).align(CrossAxisAlignment::Center);
        let end = Stack::column(children.clone()).align(CrossAxisAlignment::End);
        let stretch = Stack::column(children).align(CrossAxisAlignment::Stretch);

        assert_eq!(frames(&center, size), vec![Rect::new(20.0, 0.0, 10.0, 10.0)]);
        assert_eq!(frames(&end, size), vec![Rect::new(40.0, 0.0, 10.0, 10.0)]);
        assert_eq!(frames(&stretch, size), vec![Rect::new(0.0, 0.0, 50.0, 10.0)]);
    }

    #[test]
    fn overflow_is_not_clamped() {
        let column = Stack::column(vec![spacer(10.0, 80.0), spacer(10.0, 80.0)]);
        let constraint = SizeConstraint::loose(Size::new(100.0, 100.0));
        let size = column.content().measure(constraint);
        assert_eq!(size, Size::new(10.0, 160.0));
        assert!(constraint.is_overflowed_by(size));
    }

    #[test]
    fn empty_stack_is_zero() {
        let row = Stack::row(Vec::new()).spacing(8.0);
        assert_eq!(row.content().measure(SizeConstraint::UNCONSTRAINED), Size::ZERO);
    }
}
