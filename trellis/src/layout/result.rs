//! Result of a full layout pass over an element tree.

use crate::element::{ElementIdentifier, ElementRef, MAX_ELEMENT_DEPTH, element_tree_depth};
use crate::error::LayoutError;
use crate::primitives::Rect;

/// One laid-out element with its children.
#[derive(Debug, Clone)]
pub struct LayoutResultNode {
    pub identifier: ElementIdentifier,
    pub element: ElementRef,
    /// Frame relative to the parent node (the root's frame is given by the caller).
    pub frame: Rect,
    pub children: Vec<LayoutResultNode>,
}

impl LayoutResultNode {
    /// Lay out `element` and its whole subtree into `frame`.
    ///
    /// Containers measure their subtrees recursively, so the depth limit is
    /// checked over the whole tree before anything is measured.
    pub fn build(element: &ElementRef, frame: Rect) -> Result<Self, LayoutError> {
        element_tree_depth(element)?;
        let identifier = ElementIdentifier::new(element.kind(), 0);
        Self::build_at(identifier, element.clone(), frame, 0)
    }

    fn build_at(
        identifier: ElementIdentifier,
        element: ElementRef,
        frame: Rect,
        depth: usize,
    ) -> Result<Self, LayoutError> {
        if depth > MAX_ELEMENT_DEPTH {
            return Err(LayoutError::DepthExceeded {
                depth,
                limit: MAX_ELEMENT_DEPTH,
            });
        }

        let placed = element.content().layout(frame.size());
        let siblings: Vec<ElementRef> = placed.iter().map(|(child, _)| child.clone()).collect();
        let identifiers = ElementIdentifier::for_siblings(&siblings);

        let children = placed
            .into_iter()
            .zip(identifiers)
            .map(|((child, child_frame), child_id)| Self::build_at(child_id, child, child_frame, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            identifier,
            element,
            frame,
            children,
        })
    }

    /// Union of all descendant frames, in this node's coordinate space.
    pub fn subtree_extent(&self) -> Option<Rect> {
        self.children
            .iter()
            .map(|child| {
                let own = child.frame;
                match child.subtree_extent() {
                    Some(inner) => own.union(&inner.translate(own.origin())),
                    None => own,
                }
            })
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(LayoutResultNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::element::{Element, ElementExt};
    use crate::elements::{Inset, Label, Spacer, Stack};
    use crate::layout::ElementContent;
    use crate::primitives::{Insets, Size};
    use crate::view::{ViewDescription, ViewDescriptionContext};

    #[derive(Debug)]
    struct CountingLeaf(Rc<Cell<usize>>);

    impl Element for CountingLeaf {
        fn content(&self) -> ElementContent {
            let count = self.0.clone();
            ElementContent::leaf(move |_| {
                count.set(count.get() + 1);
                Size::new(1.0, 1.0)
            })
        }

        fn backing_view_description(&self, _context: &ViewDescriptionContext) -> Option<ViewDescription> {
            None
        }
    }

    #[test]
    fn builds_every_node_top_down() {
        let root = Stack::column(vec![
            Spacer::new(Size::new(20.0, 10.0)).into_ref(),
            Inset::new(Spacer::new(Size::new(20.0, 10.0)).into_ref(), Insets::uniform(5.0)).into_ref(),
        ])
        .into_ref();

        let node = LayoutResultNode::build(&root, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert_eq!(node.node_count(), 4);
        assert_eq!(node.children[0].frame, Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(node.children[1].frame, Rect::new(0.0, 10.0, 30.0, 20.0));
        assert_eq!(node.children[1].children[0].frame, Rect::new(5.0, 5.0, 20.0, 10.0));
    }

    #[test]
    fn identifiers_index_same_kind_siblings() {
        let root = Stack::row(vec![
            Label::new("a").into_ref(),
            Spacer::new(Size::ZERO).into_ref(),
            Label::new("b").into_ref(),
        ])
        .into_ref();
        let node = LayoutResultNode::build(&root, Rect::new(0.0, 0.0, 200.0, 40.0)).unwrap();
        let ids: Vec<String> = node.children.iter().map(|c| c.identifier.to_string()).collect();
        assert_eq!(ids, vec!["Label.0", "Spacer.0", "Label.1"]);
    }

    #[test]
    fn subtree_extent_includes_grandchildren() {
        let root = Inset::new(
            Inset::new(Spacer::new(Size::new(10.0, 10.0)).into_ref(), Insets::uniform(5.0)).into_ref(),
            Insets::uniform(5.0),
        )
        .into_ref();
        let node = LayoutResultNode::build(&root, Rect::new(0.0, 0.0, 30.0, 30.0)).unwrap();
        assert_eq!(node.subtree_extent(), Some(Rect::new(5.0, 5.0, 20.0, 20.0)));
        assert_eq!(node.children[0].children[0].subtree_extent(), None);
    }

    #[test]
    fn depth_is_rejected_before_measuring() {
        let measured = Rc::new(Cell::new(0));
        let mut element: ElementRef = CountingLeaf(measured.clone()).into_ref();
        for _ in 0..=MAX_ELEMENT_DEPTH {
            element = Stack::column(vec![element]).into_ref();
        }

        let err = LayoutResultNode::build(&element, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap_err();
        assert!(matches!(err, LayoutError::DepthExceeded { .. }));
        assert_eq!(measured.get(), 0);
    }

    #[test]
    fn shallow_stacks_still_measure() {
        let measured = Rc::new(Cell::new(0));
        let element = Stack::column(vec![CountingLeaf(measured.clone()).into_ref()]).into_ref();
        LayoutResultNode::build(&element, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert!(measured.get() > 0);
    }
}
