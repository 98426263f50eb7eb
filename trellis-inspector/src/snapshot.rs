//! Flattened, depth-tagged capture of a rendered element hierarchy.
//!
//! The element is rendered once on an offscreen surface that wraps every
//! element in a debugging view. The wrapper views are then recorded in view
//! tree pre-order and moved under an inspection-only root, so the entries
//! stay renderable after the scratch surface is gone.

use trellis::{
    DEBUGGING_VIEW_CLASS, ElementRef, LayoutError, RecursedElement, Rect, RenderSurface, Size, SizeConstraint, View,
    ViewArena, ViewId, recursive_element_list,
};

/// View class of the parent every captured wrapper is moved under.
pub const INSPECTION_VIEW_CLASS: &str = "InspectionRoot";

/// One captured debugging wrapper.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub element: ElementRef,
    /// The wrapper view, now a direct subview of the inspection root.
    pub view: ViewId,
    /// Frame in the coordinate space of the snapshot root.
    pub frame: Rect,
    /// Depth in the view tree; the root's subviews are at 0.
    pub hierarchy_depth: usize,
}

/// Bookkeeping from the detach step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotStats {
    pub detached: usize,
    /// Subviews still attached to the scratch root after detaching.
    pub scratch_subviews_remaining: usize,
}

#[derive(Debug)]
pub struct FlattenedElementSnapshot {
    element: ElementRef,
    size: Size,
    entries: Vec<ViewSnapshot>,
    arena: ViewArena,
    inspection_root: ViewId,
    stats: SnapshotStats,
}

impl FlattenedElementSnapshot {
    /// Measure `element` under `constraint`, render it offscreen and capture
    /// every wrapper view.
    pub fn new(element: ElementRef, constraint: SizeConstraint) -> Result<Self, LayoutError> {
        // Validates the depth before the surface lays anything out.
        recursive_element_list(&element)?;
        let size = element.content().measure(constraint);

        let mut surface = RenderSurface::offscreen(size);
        surface.set_element(Some(element.clone()));
        surface.update()?;

        let wrapped = surface.wrapped_elements();
        let scratch_root = surface.root();
        let arena = surface.arena();
        let entries: Vec<ViewSnapshot> = arena
            .descendants(scratch_root)
            .into_iter()
            .filter(|(view, _)| arena.get(*view).is_some_and(|v| v.class == DEBUGGING_VIEW_CLASS))
            .filter_map(|(view, hierarchy_depth)| {
                Some(ViewSnapshot {
                    element: wrapped.get(&view)?.clone(),
                    view,
                    frame: arena.convert_to_ancestor(view, scratch_root)?,
                    hierarchy_depth,
                })
            })
            .collect();

        let (mut arena, scratch_root) = surface.into_parts();
        let (inspection_root, stats) = detach(&mut arena, scratch_root, size, &entries);

        tracing::debug!(
            entries = entries.len(),
            ?size,
            remaining = stats.scratch_subviews_remaining,
            "captured flattened snapshot"
        );

        Ok(Self {
            element,
            size,
            entries,
            arena,
            inspection_root,
            stats,
        })
    }

    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    /// Measured size of the root element.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn entries(&self) -> &[ViewSnapshot] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deepest recorded hierarchy depth.
    pub fn max_depth(&self) -> usize {
        self.entries.iter().map(|e| e.hierarchy_depth).max().unwrap_or(0)
    }

    /// Arena holding the captured views.
    pub fn arena(&self) -> &ViewArena {
        &self.arena
    }

    pub fn inspection_root(&self) -> ViewId {
        self.inspection_root
    }

    pub fn stats(&self) -> SnapshotStats {
        self.stats
    }

    /// Every element of the captured tree with its element depth, including
    /// elements without a view.
    pub fn element_outline(&self) -> Result<Vec<RecursedElement>, LayoutError> {
        recursive_element_list(&self.element)
    }
}

/// Move every captured wrapper under a fresh inspection root, then drop the
/// scratch root.
fn detach(arena: &mut ViewArena, scratch_root: ViewId, size: Size, entries: &[ViewSnapshot]) -> (ViewId, SnapshotStats) {
    let mut root_view = View::new(INSPECTION_VIEW_CLASS);
    root_view.frame = Rect::from_size(size);
    root_view.is_interactive = false;
    let inspection_root = arena.insert(root_view);

    let mut detached = 0;
    for entry in entries {
        if arena.add_subview(inspection_root, entry.view) {
            arena.set_frame(entry.view, entry.frame);
            detached += 1;
        }
    }

    let scratch_subviews_remaining = arena.subviews(scratch_root).len();
    if scratch_subviews_remaining > 0 {
        tracing::warn!(remaining = scratch_subviews_remaining, "scratch root still has subviews");
    }
    arena.remove(scratch_root);

    (
        inspection_root,
        SnapshotStats {
            detached,
            scratch_subviews_remaining,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis::{ElementExt, Label, Spacer};

    #[test]
    fn single_leaf_is_one_entry() {
        let snapshot =
            FlattenedElementSnapshot::new(Spacer::new(Size::new(20.0, 10.0)).into_ref(), SizeConstraint::UNCONSTRAINED)
                .unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.size(), Size::new(20.0, 10.0));
        assert_eq!(snapshot.entries()[0].frame, Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(snapshot.stats().detached, 1);
    }

    #[test]
    fn captured_views_stay_alive_under_inspection_root() {
        let snapshot = FlattenedElementSnapshot::new(Label::new("hi").into_ref(), SizeConstraint::UNCONSTRAINED).unwrap();
        let arena = snapshot.arena();
        let entry = &snapshot.entries()[0];

        assert!(arena.is_alive(entry.view));
        assert_eq!(arena.superview(entry.view), Some(snapshot.inspection_root()));
        // The wrapped label view travels with its wrapper.
        let inner = arena.subviews(entry.view)[0];
        assert_eq!(arena.get(inner).map(|v| v.class), Some("Label"));
    }

    #[test]
    fn outline_includes_every_element() {
        let snapshot = FlattenedElementSnapshot::new(Label::new("x").into_ref(), SizeConstraint::UNCONSTRAINED).unwrap();
        assert_eq!(snapshot.element_outline().unwrap().len(), 1);
        assert_eq!(snapshot.max_depth(), 0);
    }
}
