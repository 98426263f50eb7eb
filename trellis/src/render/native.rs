//! View-backed projection of a layout result.
//!
//! Transparent elements disappear here: their children are hoisted into the
//! nearest view-backed ancestor with frames offset accordingly, and their
//! identifiers prefix the hoisted children's paths.

use crate::element::{ElementPath, ElementRef};
use crate::layout::LayoutResultNode;
use crate::primitives::{Point, Rect};
use crate::view::{ViewDescription, ViewDescriptionContext};

/// One view-backed element, ready for reconciliation.
#[derive(Debug, Clone)]
pub struct NativeViewNode {
    pub element: ElementRef,
    /// Path from the nearest view-backed ancestor (exclusive) to this element.
    pub path: ElementPath,
    pub description: ViewDescription,
    /// Frame within the ancestor's content view.
    pub frame: Rect,
    pub children: Vec<NativeViewNode>,
}

impl NativeViewNode {
    /// Resolve a layout tree into top-level view-backed nodes.
    ///
    /// `decorate` sees every element with the description it produced and
    /// returns the description to use (this is where debugging wrappers are
    /// added).
    pub fn resolve(
        root: &LayoutResultNode,
        decorate: &mut dyn FnMut(&ElementRef, Option<ViewDescription>) -> Option<ViewDescription>,
    ) -> Vec<NativeViewNode> {
        let mut out = Vec::new();
        resolve_into(root, &ElementPath::new(), Point::ORIGIN, decorate, &mut out);
        out
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NativeViewNode::node_count).sum::<usize>()
    }
}

fn resolve_into(
    node: &LayoutResultNode,
    prefix: &ElementPath,
    offset: Point,
    decorate: &mut dyn FnMut(&ElementRef, Option<ViewDescription>) -> Option<ViewDescription>,
    out: &mut Vec<NativeViewNode>,
) {
    let path = prefix.appending(node.identifier);
    let frame = node.frame.translate(offset);
    let context = ViewDescriptionContext {
        bounds: Rect::from_size(frame.size()),
        subtree_extent: node.subtree_extent(),
    };
    let description = decorate(&node.element, node.element.backing_view_description(&context));

    match description {
        Some(description) => {
            let mut children = Vec::new();
            for child in &node.children {
                resolve_into(child, &ElementPath::new(), Point::ORIGIN, decorate, &mut children);
            }
            out.push(NativeViewNode {
                element: node.element.clone(),
                path,
                description,
                frame,
                children,
            });
        }
        None => {
            for child in &node.children {
                resolve_into(child, &path, frame.origin(), decorate, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementExt;
    use crate::elements::{Inset, Label, Panel, Spacer, Stack};
    use crate::primitives::{Insets, Size};

    fn keep(_: &ElementRef, description: Option<ViewDescription>) -> Option<ViewDescription> {
        description
    }

    #[test]
    fn transparent_elements_hoist_children() {
        let root = Inset::new(
            Stack::row(vec![
                Label::new("a").into_ref(),
                Spacer::new(Size::new(10.0, 10.0)).into_ref(),
                Label::new("b").into_ref(),
            ])
            .into_ref(),
            Insets::uniform(10.0),
        )
        .into_ref();
        let layout = LayoutResultNode::build(&root, Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
        let nodes = NativeViewNode::resolve(&layout, &mut keep);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].frame.origin(), Point::new(10.0, 10.0));
        assert_eq!(nodes[0].path.to_string(), "Inset.0/Stack.0/Label.0");
        assert_eq!(nodes[1].path.to_string(), "Inset.0/Stack.0/Label.1");
        let expected_x = 10.0 + nodes[0].frame.width + 10.0;
        assert!((nodes[1].frame.x - expected_x).abs() < 1e-4);
    }

    #[test]
    fn view_backed_nodes_nest_with_local_frames() {
        let root = Panel::wrapping(
            Inset::new(Label::new("x").into_ref(), Insets::uniform(4.0)).into_ref(),
        )
        .into_ref();
        let layout = LayoutResultNode::build(&root, Rect::new(0.0, 0.0, 50.0, 30.0)).unwrap();
        let nodes = NativeViewNode::resolve(&layout, &mut keep);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].description.view_class(), "Panel");
        assert_eq!(nodes[0].node_count(), 2);
        let label = &nodes[0].children[0];
        assert_eq!(label.frame, Rect::new(4.0, 4.0, 42.0, 22.0));
        assert_eq!(label.path.to_string(), "Inset.0/Label.0");
    }

    #[test]
    fn decorate_sees_every_element() {
        let root = Stack::column(vec![Label::new("a").into_ref(), Spacer::new(Size::ZERO).into_ref()]).into_ref();
        let layout = LayoutResultNode::build(&root, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let mut seen = 0;
        let nodes = NativeViewNode::resolve(&layout, &mut |_, description| {
            seen += 1;
            description
        });
        assert_eq!(seen, 3);
        assert_eq!(nodes.len(), 1);
    }
}
