//! Reconciliation of view-backed nodes against retained views.
//!
//! A controller owns one backing view and the controllers of the views
//! attached to its content view. Updating matches new nodes to existing
//! controllers by element path and reuse key; anything left over is torn down.

use crate::element::{ElementPath, ElementRef};
use crate::view::{ViewArena, ViewDescription, ViewId};

use super::native::NativeViewNode;

/// Counts from one reconcile pass, in controllers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub reused: usize,
    pub removed: usize,
}

#[derive(Debug)]
pub struct ViewController {
    view: ViewId,
    description: ViewDescription,
    element: ElementRef,
    children: Vec<(ElementPath, ViewController)>,
}

impl ViewController {
    /// Build a fresh view for `node` and its whole subtree. The view is left
    /// detached; the caller attaches it.
    pub fn build(node: &NativeViewNode, arena: &mut ViewArena, stats: &mut ReconcileStats) -> Self {
        let view = node.description.build(arena);
        stats.created += 1;
        let mut controller = Self {
            view,
            description: node.description.clone(),
            element: node.element.clone(),
            children: Vec::new(),
        };
        controller.configure(node, arena, stats);
        controller
    }

    /// Bring the existing view in line with `node`.
    pub fn update(&mut self, node: &NativeViewNode, arena: &mut ViewArena, stats: &mut ReconcileStats) {
        stats.reused += 1;
        self.description = node.description.clone();
        self.element = node.element.clone();
        self.configure(node, arena, stats);
    }

    fn configure(&mut self, node: &NativeViewNode, arena: &mut ViewArena, stats: &mut ReconcileStats) {
        arena.set_frame(self.view, node.frame);
        self.description.apply(arena, self.view);
        let content = self.description.content_view(arena, self.view);
        let existing = std::mem::take(&mut self.children);
        self.children = reconcile_children(arena, content, existing, &node.children, stats);
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn description(&self) -> &ViewDescription {
        &self.description
    }

    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    pub fn children(&self) -> impl Iterator<Item = &ViewController> {
        self.children.iter().map(|(_, child)| child)
    }

    /// Pre-order walk over this controller and its descendants.
    pub fn visit(&self, f: &mut dyn FnMut(&ViewController)) {
        f(self);
        for (_, child) in &self.children {
            child.visit(f);
        }
    }

    /// Re-run every description's apply step without touching structure.
    pub fn reapply(&self, arena: &mut ViewArena) {
        self.visit(&mut |controller| controller.description.apply(arena, controller.view));
    }

    /// Number of controllers in this subtree, including `self`.
    pub fn controller_count(&self) -> usize {
        1 + self.children().map(ViewController::controller_count).sum::<usize>()
    }
}

/// Match `nodes` against `existing` controllers under `content`.
///
/// Subviews end up in node order. Unmatched controllers have their views
/// destroyed.
pub(crate) fn reconcile_children(
    arena: &mut ViewArena,
    content: ViewId,
    mut existing: Vec<(ElementPath, ViewController)>,
    nodes: &[NativeViewNode],
    stats: &mut ReconcileStats,
) -> Vec<(ElementPath, ViewController)> {
    let mut next = Vec::with_capacity(nodes.len());

    for node in nodes {
        let reusable = existing
            .iter()
            .position(|(path, controller)| *path == node.path && controller.description.can_reuse(&node.description));

        let controller = match reusable {
            Some(index) => {
                let (_, mut controller) = existing.remove(index);
                controller.update(node, arena, stats);
                controller
            }
            None => ViewController::build(node, arena, stats),
        };

        arena.add_subview(content, controller.view);
        next.push((node.path.clone(), controller));
    }

    for (path, stale) in existing {
        tracing::trace!(%path, view = ?stale.view, "removing stale view");
        stats.removed += stale.controller_count();
        arena.remove(stale.view);
    }

    next
}
