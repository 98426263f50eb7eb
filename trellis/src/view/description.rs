//! View descriptions: how to build and configure an element's backing view.
//!
//! A description owns no view. The reconciler calls [`ViewDescription::build`]
//! when no reusable view exists, [`ViewDescription::apply`] on every update,
//! and [`ViewDescription::content_view`] to find where children attach.

use std::fmt;
use std::rc::Rc;

use super::arena::{View, ViewArena, ViewId};
use crate::primitives::Rect;

/// Geometry handed to an element when it is asked for a description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewDescriptionContext {
    /// The element's bounds (origin at zero).
    pub bounds: Rect,
    /// Union of all descendant frames, in the element's coordinate space.
    pub subtree_extent: Option<Rect>,
}

type BuildFn = Rc<dyn Fn(&mut ViewArena) -> ViewId>;
type ContentViewFn = Rc<dyn Fn(&ViewArena, ViewId) -> ViewId>;
type ApplyFn = Rc<dyn Fn(&mut ViewArena, ViewId)>;

/// Factory and configuration for one backing view.
#[derive(Clone)]
pub struct ViewDescription {
    view_class: &'static str,
    wrapped_class: Option<&'static str>,
    build: BuildFn,
    content_view: ContentViewFn,
    apply: ApplyFn,
}

impl ViewDescription {
    /// A plain view of `class`; `configure` runs on every apply.
    pub fn new(class: &'static str, configure: impl Fn(&mut View) + 'static) -> Self {
        Self {
            view_class: class,
            wrapped_class: None,
            build: Rc::new(move |arena| arena.insert(View::new(class))),
            content_view: Rc::new(|_, view| view),
            apply: Rc::new(move |arena, view| {
                if let Some(view) = arena.get_mut(view) {
                    configure(view);
                }
            }),
        }
    }

    /// Replace the factory.
    pub fn with_build(mut self, build: impl Fn(&mut ViewArena) -> ViewId + 'static) -> Self {
        self.build = Rc::new(build);
        self
    }

    /// Replace content-view resolution (defaults to the built view itself).
    pub fn with_content_view(mut self, content_view: impl Fn(&ViewArena, ViewId) -> ViewId + 'static) -> Self {
        self.content_view = Rc::new(content_view);
        self
    }

    /// Replace the apply step with one that sees the whole arena.
    pub fn with_apply(mut self, apply: impl Fn(&mut ViewArena, ViewId) + 'static) -> Self {
        self.apply = Rc::new(apply);
        self
    }

    /// Mark this description as wrapping views of another class.
    pub fn with_wrapped_class(mut self, wrapped_class: Option<&'static str>) -> Self {
        self.wrapped_class = wrapped_class;
        self
    }

    pub fn view_class(&self) -> &'static str {
        self.view_class
    }

    pub fn wrapped_class(&self) -> Option<&'static str> {
        self.wrapped_class
    }

    /// Whether a view built from `other` can be reused for `self`.
    pub fn can_reuse(&self, other: &ViewDescription) -> bool {
        self.view_class == other.view_class && self.wrapped_class == other.wrapped_class
    }

    /// Build a new, detached view.
    pub fn build(&self, arena: &mut ViewArena) -> ViewId {
        (self.build)(arena)
    }

    /// Where children of `view` attach.
    pub fn content_view(&self, arena: &ViewArena, view: ViewId) -> ViewId {
        (self.content_view)(arena, view)
    }

    /// Push the current configuration onto `view`. Idempotent.
    pub fn apply(&self, arena: &mut ViewArena, view: ViewId) {
        (self.apply)(arena, view)
    }
}

impl fmt::Debug for ViewDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewDescription")
            .field("view_class", &self.view_class)
            .field("wrapped_class", &self.wrapped_class)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Color;

    #[test]
    fn build_then_apply_configures_view() {
        let description = ViewDescription::new("Swatch", |view| {
            view.style.background = Some(Color::WHITE);
        });
        let mut arena = ViewArena::new();
        let view = description.build(&mut arena);
        assert_eq!(arena.get(view).map(|v| v.class), Some("Swatch"));
        assert_eq!(arena.get(view).and_then(|v| v.style.background), None);

        description.apply(&mut arena, view);
        description.apply(&mut arena, view);
        assert_eq!(arena.get(view).and_then(|v| v.style.background), Some(Color::WHITE));
        assert_eq!(description.content_view(&arena, view), view);
    }

    #[test]
    fn custom_content_view() {
        let description = ViewDescription::new("Scroller", |_| {})
            .with_build(|arena| {
                let outer = arena.insert(View::new("Scroller"));
                let inner = arena.insert(View::new("ScrollContent"));
                arena.add_subview(outer, inner);
                outer
            })
            .with_content_view(|arena, view| arena.subviews(view).first().copied().unwrap_or(view));

        let mut arena = ViewArena::new();
        let outer = description.build(&mut arena);
        let content = description.content_view(&arena, outer);
        assert_ne!(content, outer);
        assert_eq!(arena.get(content).map(|v| v.class), Some("ScrollContent"));
    }

    #[test]
    fn reuse_requires_matching_classes() {
        let label = ViewDescription::new("Label", |_| {});
        let other_label = ViewDescription::new("Label", |_| {});
        let panel = ViewDescription::new("Panel", |_| {});
        let wrapped = ViewDescription::new("Label", |_| {}).with_wrapped_class(Some("Panel"));

        assert!(label.can_reuse(&other_label));
        assert!(!label.can_reuse(&panel));
        assert!(!label.can_reuse(&wrapped));
    }
}
