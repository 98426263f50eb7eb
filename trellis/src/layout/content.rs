//! Element content: the lazy tree node behind every element.
//!
//! Content is either a leaf (a pure measurement function) or a composite (a
//! [`Layout`] plus ordered children). Layout is strictly top-down: a
//! composite measures itself, possibly measuring children to decide, and only
//! then hands out child frames. Children never see each other's frames.

use std::fmt;

use super::constraint::SizeConstraint;
use crate::element::ElementRef;
use crate::primitives::{Rect, Size};

/// Positions the children of a composite element.
pub trait Layout {
    /// Size of the container under `constraint`.
    fn measure(&self, constraint: SizeConstraint, children: &[ElementContent]) -> Size;

    /// Frame of each child (same order as `children`) within a container of `size`.
    fn layout(&self, size: Size, children: &[ElementContent]) -> Vec<Rect>;
}

enum Storage {
    Leaf(Box<dyn Fn(SizeConstraint) -> Size>),
    Composite {
        layout: Box<dyn Layout>,
        children: Vec<ElementRef>,
    },
}

/// Measurement function and ordered children of one element.
pub struct ElementContent {
    storage: Storage,
}

impl ElementContent {
    /// Leaf content measured by `measure`.
    pub fn leaf(measure: impl Fn(SizeConstraint) -> Size + 'static) -> Self {
        Self {
            storage: Storage::Leaf(Box::new(measure)),
        }
    }

    /// Leaf content that always reports `size`, whatever the constraint.
    pub fn fixed(size: Size) -> Self {
        Self::leaf(move |_| size)
    }

    /// Composite content laid out by `layout`.
    pub fn composite(layout: impl Layout + 'static, children: Vec<ElementRef>) -> Self {
        Self {
            storage: Storage::Composite {
                layout: Box::new(layout),
                children,
            },
        }
    }

    pub fn children(&self) -> &[ElementRef] {
        match &self.storage {
            Storage::Leaf(_) => &[],
            Storage::Composite { children, .. } => children,
        }
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Measure this content.
    ///
    /// The result may exceed the constraint's maximum; overflow is passed
    /// through for the caller to surface. Negative or NaN extents are
    /// reported as zero.
    pub fn measure(&self, constraint: SizeConstraint) -> Size {
        let size = match &self.storage {
            Storage::Leaf(measure) => measure(constraint),
            Storage::Composite { layout, children } => {
                let contents = child_contents(children);
                layout.measure(constraint, &contents)
            }
        };
        let size = Size::new(non_negative(size.width), non_negative(size.height));
        if constraint.is_overflowed_by(size) {
            tracing::trace!(?size, ?constraint, "measured size overflows constraint");
        }
        size
    }

    /// Frames for each child within a container of `size`.
    pub fn layout(&self, size: Size) -> Vec<(ElementRef, Rect)> {
        match &self.storage {
            Storage::Leaf(_) => Vec::new(),
            Storage::Composite { layout, children } => {
                let contents = child_contents(children);
                let frames = layout.layout(size, &contents);
                debug_assert_eq!(frames.len(), children.len(), "layout produced wrong frame count");
                children.iter().cloned().zip(frames).collect()
            }
        }
    }
}

impl fmt::Debug for ElementContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.storage {
            Storage::Leaf(_) => f.write_str("ElementContent::Leaf"),
            Storage::Composite { children, .. } => f
                .debug_struct("ElementContent::Composite")
                .field("children", &children.len())
                .finish(),
        }
    }
}

fn child_contents(children: &[ElementRef]) -> Vec<ElementContent> {
    children.iter().map(|child| child.content()).collect()
}

#[inline]
fn non_negative(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementExt;
    use crate::elements::Spacer;

    struct SideBySide;

    impl Layout for SideBySide {
        fn measure(&self, constraint: SizeConstraint, children: &[ElementContent]) -> Size {
            children.iter().fold(Size::ZERO, |acc, child| {
                let size = child.measure(constraint);
                Size::new(acc.width + size.width, acc.height.max(size.height))
            })
        }

        fn layout(&self, size: Size, children: &[ElementContent]) -> Vec<Rect> {
            let mut x = 0.0;
            children
                .iter()
                .map(|child| {
                    let measured = child.measure(SizeConstraint::loose(size));
                    let frame = Rect::new(x, 0.0, measured.width, measured.height);
                    x += measured.width;
                    frame
                })
                .collect()
        }
    }

    #[test]
    fn leaf_measures_with_function() {
        let content = ElementContent::leaf(|c| Size::new(c.max_width().min(50.0), 10.0));
        let size = content.measure(SizeConstraint::with_max_width(20.0));
        assert_eq!(size, Size::new(20.0, 10.0));
        assert!(content.children().is_empty());
        assert!(content.layout(size).is_empty());
    }

    #[test]
    fn negative_and_nan_sizes_become_zero() {
        let content = ElementContent::leaf(|_| Size::new(-4.0, f32::NAN));
        assert_eq!(content.measure(SizeConstraint::UNCONSTRAINED), Size::ZERO);
    }

    #[test]
    fn overflow_is_passed_through() {
        let content = ElementContent::fixed(Size::new(300.0, 300.0));
        let size = content.measure(SizeConstraint::loose(Size::new(100.0, 100.0)));
        assert_eq!(size, Size::new(300.0, 300.0));
    }

    #[test]
    fn composite_measures_and_lays_out_children() {
        let content = ElementContent::composite(
            SideBySide,
            vec![
                Spacer::new(Size::new(10.0, 5.0)).into_ref(),
                Spacer::new(Size::new(20.0, 8.0)).into_ref(),
            ],
        );
        let size = content.measure(SizeConstraint::UNCONSTRAINED);
        assert_eq!(size, Size::new(30.0, 8.0));

        let frames: Vec<Rect> = content.layout(size).into_iter().map(|(_, f)| f).collect();
        assert_eq!(frames, vec![Rect::new(0.0, 0.0, 10.0, 5.0), Rect::new(10.0, 0.0, 20.0, 8.0)]);
    }

    #[test]
    fn measurement_is_deterministic() {
        let content = ElementContent::composite(
            SideBySide,
            vec![Spacer::new(Size::new(7.5, 3.25)).into_ref()],
        );
        let c = SizeConstraint::loose(Size::new(40.0, 40.0));
        assert_eq!(content.measure(c), content.measure(c));
    }
}
