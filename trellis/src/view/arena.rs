//! Retained view tree stored in a generational arena.
//!
//! Views are plain records (class, frame, style) standing in for native
//! toolkit views. Each view has at most one superview and an ordered list of
//! subviews; later subviews draw on top and win hit tests.

use crate::primitives::{Color, Point, Rect};

/// Generational handle to a view in a [`ViewArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewId(u32, u32);

impl ViewId {
    fn new(index: u32, generation: u32) -> Self {
        Self(index, generation)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Visual properties pushed onto a view by its description.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewStyle {
    pub background: Option<Color>,
    pub border_width: f32,
    pub border_color: Option<Color>,
    pub corner_radius: f32,
    pub alpha: f32,
}

impl Default for ViewStyle {
    fn default() -> Self {
        Self {
            background: None,
            border_width: 0.0,
            border_color: None,
            corner_radius: 0.0,
            alpha: 1.0,
        }
    }
}

/// A retained view.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// View class name; descriptions with the same class may reuse the view.
    pub class: &'static str,
    /// Frame in the superview's coordinate space.
    pub frame: Rect,
    pub style: ViewStyle,
    pub text: Option<String>,
    pub is_hidden: bool,
    /// Whether the view takes part in hit testing.
    pub is_interactive: bool,
}

impl View {
    pub fn new(class: &'static str) -> Self {
        Self {
            class,
            frame: Rect::ZERO,
            style: ViewStyle::default(),
            text: None,
            is_hidden: false,
            is_interactive: true,
        }
    }

    /// The view's own coordinate space: its frame moved to the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.frame.size())
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    view: View,
    superview: Option<ViewId>,
    subviews: Vec<ViewId>,
}

/// Owner of every view in one tree (or several detached trees).
#[derive(Debug, Default)]
pub struct ViewArena {
    slots: Vec<Option<Slot>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl ViewArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached view.
    pub fn insert(&mut self, view: View) -> ViewId {
        let index = match self.free_list.pop() {
            Some(index) => index,
            None => {
                self.slots.push(None);
                self.generations.push(0);
                self.slots.len() - 1
            }
        };
        self.generations[index] += 1;
        let generation = self.generations[index];
        self.slots[index] = Some(Slot {
            generation,
            view,
            superview: None,
            subviews: Vec::new(),
        });
        ViewId::new(index as u32, generation)
    }

    pub fn is_alive(&self, id: ViewId) -> bool {
        self.slot(id).is_some()
    }

    /// Number of live views.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.slot(id).map(|slot| &slot.view)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.slot_mut(id).map(|slot| &mut slot.view)
    }

    pub fn superview(&self, id: ViewId) -> Option<ViewId> {
        self.slot(id).and_then(|slot| slot.superview)
    }

    /// Ordered subviews; empty for dead ids.
    pub fn subviews(&self, id: ViewId) -> &[ViewId] {
        self.slot(id).map(|slot| slot.subviews.as_slice()).unwrap_or(&[])
    }

    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        if let Some(view) = self.get_mut(id) {
            view.frame = frame;
        }
    }

    /// Append `child` as the topmost subview of `parent`, detaching it from
    /// its current superview first.
    ///
    /// Returns false (and changes nothing) if either view is dead or the move
    /// would make a view its own ancestor.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) || self.is_ancestor(child, parent) {
            tracing::warn!(?parent, ?child, "rejected add_subview");
            return false;
        }
        self.remove_from_superview(child);
        if let Some(slot) = self.slot_mut(parent) {
            slot.subviews.push(child);
        }
        if let Some(slot) = self.slot_mut(child) {
            slot.superview = Some(parent);
        }
        true
    }

    /// Detach `id` from its superview. The view and its subtree stay alive.
    pub fn remove_from_superview(&mut self, id: ViewId) {
        let Some(parent) = self.superview(id) else {
            return;
        };
        if let Some(slot) = self.slot_mut(parent) {
            slot.subviews.retain(|sub| *sub != id);
        }
        if let Some(slot) = self.slot_mut(id) {
            slot.superview = None;
        }
    }

    /// Destroy `id` and its whole subtree. Returns the number of views freed.
    pub fn remove(&mut self, id: ViewId) -> usize {
        if !self.is_alive(id) {
            return 0;
        }
        self.remove_from_superview(id);

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(slot) = self.slots[next.index()].take() {
                stack.extend(slot.subviews);
                self.free_list.push(next.index());
                removed += 1;
            }
        }
        removed
    }

    /// Whether `ancestor` is `id` or one of its superviews.
    pub fn is_ancestor(&self, ancestor: ViewId, id: ViewId) -> bool {
        let mut current = Some(id);
        while let Some(view) = current {
            if view == ancestor {
                return true;
            }
            current = self.superview(view);
        }
        false
    }

    /// Number of superviews between `id` and the top of its tree.
    pub fn depth(&self, id: ViewId) -> usize {
        let mut depth = 0;
        let mut current = self.superview(id);
        while let Some(view) = current {
            depth += 1;
            current = self.superview(view);
        }
        depth
    }

    /// `id`'s bounds expressed in `ancestor`'s coordinate space.
    ///
    /// Returns `None` when `ancestor` is not above `id`.
    pub fn convert_to_ancestor(&self, id: ViewId, ancestor: ViewId) -> Option<Rect> {
        let mut rect = self.get(id)?.bounds();
        let mut current = id;
        while current != ancestor {
            let frame = self.get(current)?.frame;
            rect = rect.translate(frame.origin());
            current = self.superview(current)?;
        }
        Some(rect)
    }

    /// Depth-first pre-order walk below `root` (excluded).
    ///
    /// Depths are relative to `root`'s subviews, which are at depth 0.
    pub fn descendants(&self, root: ViewId) -> Vec<(ViewId, usize)> {
        let mut out = Vec::new();
        let mut stack: Vec<(ViewId, usize)> = self.subviews(root).iter().rev().map(|id| (*id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            for sub in self.subviews(id).iter().rev() {
                stack.push((*sub, depth + 1));
            }
        }
        out
    }

    /// Deepest visible, interactive view under `point` (in `root`'s own
    /// coordinates). Later subviews are on top.
    pub fn hit_test(&self, root: ViewId, point: Point) -> Option<ViewId> {
        let view = self.get(root)?;
        if view.is_hidden || !view.bounds().contains(point) {
            return None;
        }
        for sub in self.subviews(root).iter().rev() {
            let Some(child) = self.get(*sub) else { continue };
            let local = point - child.frame.origin();
            if let Some(hit) = self.hit_test(*sub, local) {
                return Some(hit);
            }
        }
        view.is_interactive.then_some(root)
    }

    // --- internals ---

    fn slot(&self, id: ViewId) -> Option<&Slot> {
        self.slots
            .get(id.index())?
            .as_ref()
            .filter(|slot| slot.generation == id.1)
    }

    fn slot_mut(&mut self, id: ViewId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index())?
            .as_mut()
            .filter(|slot| slot.generation == id.1)
    }
}
