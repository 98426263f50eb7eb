//! Debugging overlay: a selectable bordered view around an element.
//!
//! The wrapper view hosts the element's own backing view (if any) as its
//! first subview and forwards content-view resolution and apply calls to the
//! wrapped description unchanged. On top of that it draws a frame outline
//! and a selection highlight, and routes taps to the session coordinator.

use crate::element::ElementRef;
use crate::primitives::{Color, Rect};
use crate::view::{View, ViewArena, ViewDescription, ViewId};

use super::config::{DebuggingConfig, ElementFrameMode};
use super::session::{InspectorRequest, SelectionCoordinator, SharedCoordinator, WrapperId};

/// View class of every debugging wrapper view.
pub const DEBUGGING_VIEW_CLASS: &str = "DebuggingElementView";

const FRAME_BORDER_WIDTH: f32 = 1.0;
const SELECTED_BORDER_WIDTH: f32 = 2.0;

pub struct OverlayWrapper {
    wrapped: Option<ViewDescription>,
    coordinator: SharedCoordinator,
    show_frame: bool,
}

impl OverlayWrapper {
    pub fn new(wrapped: Option<ViewDescription>, coordinator: SharedCoordinator, config: DebuggingConfig) -> Self {
        Self {
            wrapped,
            coordinator,
            show_frame: config.element_frames != ElementFrameMode::None,
        }
    }

    /// The wrapper's own description.
    pub fn into_description(self) -> ViewDescription {
        let Self {
            wrapped,
            coordinator,
            show_frame,
        } = self;
        let wrapped_class = wrapped.as_ref().map(ViewDescription::view_class);
        let for_build = wrapped.clone();
        let for_content = wrapped.clone();

        ViewDescription::new(DEBUGGING_VIEW_CLASS, |_| {})
            .with_wrapped_class(wrapped_class)
            .with_build(move |arena| {
                let wrapper = arena.insert(View::new(DEBUGGING_VIEW_CLASS));
                if let Some(inner) = &for_build {
                    let inner_view = inner.build(arena);
                    arena.add_subview(wrapper, inner_view);
                }
                wrapper
            })
            .with_content_view(move |arena, view| match &for_content {
                Some(inner) => match arena.subviews(view).first() {
                    Some(inner_view) => inner.content_view(arena, *inner_view),
                    None => view,
                },
                None => view,
            })
            .with_apply(move |arena, view| {
                if let Some(inner) = &wrapped {
                    if let Some(inner_view) = arena.subviews(view).first().copied() {
                        let bounds = arena.get(view).map(View::bounds).unwrap_or(Rect::ZERO);
                        arena.set_frame(inner_view, bounds);
                        inner.apply(arena, inner_view);
                    }
                }
                let selected = coordinator.borrow().selected() == Some(view);
                apply_overlay_style(arena, view, selected, show_frame);
            })
    }

    /// Handle a tap on `request.wrapper`.
    ///
    /// Tapping the selected wrapper toggles its disclosure. Tapping any other
    /// wrapper deselects the current one (dismissing its inspector) before
    /// selecting the new one and presenting its inspector.
    pub fn activate(coordinator: &mut dyn SelectionCoordinator, request: InspectorRequest) {
        let Some(wrapper) = request.wrapper else {
            coordinator.present_inspector(request);
            return;
        };

        match coordinator.selected() {
            Some(current) if current == wrapper => {
                if coordinator.is_presenting() {
                    coordinator.dismiss_inspector();
                } else {
                    coordinator.present_inspector(request);
                }
            }
            previous => {
                if previous.is_some() {
                    if coordinator.is_presenting() {
                        coordinator.dismiss_inspector();
                    }
                    coordinator.set_selected(None);
                }
                coordinator.set_selected(Some(wrapper));
                coordinator.present_inspector(request);
            }
        }
    }

    /// Request for inspecting `element` through `wrapper`.
    pub fn request(wrapper: WrapperId, element: ElementRef, config: DebuggingConfig) -> InspectorRequest {
        InspectorRequest {
            wrapper: Some(wrapper),
            element,
            explore_element_history: config.explore_element_history,
        }
    }
}

fn apply_overlay_style(arena: &mut ViewArena, view: ViewId, selected: bool, show_frame: bool) {
    let Some(view) = arena.get_mut(view) else {
        return;
    };
    view.is_interactive = true;
    view.style.background = selected.then_some(Color::DEBUG_SELECTION);
    view.style.border_color = (selected || show_frame).then_some(Color::DEBUG_FRAME);
    view.style.border_width = if selected {
        SELECTED_BORDER_WIDTH
    } else if show_frame {
        FRAME_BORDER_WIDTH
    } else {
        0.0
    };
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::debugging::session::{DebuggingSession, SessionEvent};
    use crate::element::ElementExt;
    use crate::elements::{Label, Spacer};
    use crate::primitives::Size;

    fn wrapper_ids(count: usize) -> Vec<WrapperId> {
        let mut arena = ViewArena::new();
        (0..count).map(|_| arena.insert(View::new(DEBUGGING_VIEW_CLASS))).collect()
    }

    fn request(wrapper: WrapperId) -> InspectorRequest {
        OverlayWrapper::request(wrapper, Spacer::new(Size::ZERO).into_ref(), DebuggingConfig::default())
    }

    /// Records calls and checks the single-selection invariant on every one.
    #[derive(Default)]
    struct RecordingCoordinator {
        selected: Option<WrapperId>,
        presenting: bool,
        calls: Vec<String>,
    }

    impl SelectionCoordinator for RecordingCoordinator {
        fn selected(&self) -> Option<WrapperId> {
            self.selected
        }

        fn set_selected(&mut self, wrapper: Option<WrapperId>) {
            assert!(
                wrapper.is_none() || self.selected.is_none(),
                "selected a wrapper while another was still selected"
            );
            self.calls.push(format!("select {}", wrapper.is_some()));
            self.selected = wrapper;
        }

        fn is_presenting(&self) -> bool {
            self.presenting
        }

        fn present_inspector(&mut self, _request: InspectorRequest) {
            self.calls.push("present".into());
            self.presenting = true;
        }

        fn dismiss_inspector(&mut self) {
            self.calls.push("dismiss".into());
            self.presenting = false;
        }
    }

    #[test]
    fn selecting_another_deselects_first() {
        let ids = wrapper_ids(2);
        let mut coordinator = RecordingCoordinator::default();

        OverlayWrapper::activate(&mut coordinator, request(ids[0]));
        OverlayWrapper::activate(&mut coordinator, request(ids[1]));

        assert_eq!(coordinator.selected, Some(ids[1]));
        assert_eq!(
            coordinator.calls,
            vec!["select true", "present", "dismiss", "select false", "select true", "present"]
        );
    }

    #[test]
    fn reselecting_toggles_disclosure() {
        let ids = wrapper_ids(1);
        let session = DebuggingSession::shared();
        {
            let mut s = session.borrow_mut();
            OverlayWrapper::activate(&mut *s, request(ids[0]));
            OverlayWrapper::activate(&mut *s, request(ids[0]));
            assert!(!s.is_presenting());
            assert_eq!(s.selected(), Some(ids[0]));
            OverlayWrapper::activate(&mut *s, request(ids[0]));
            assert!(s.is_presenting());
        }
        assert_eq!(
            session.borrow().events(),
            &[
                SessionEvent::Selected(ids[0]),
                SessionEvent::Presented(Some(ids[0])),
                SessionEvent::Dismissed(Some(ids[0])),
                SessionEvent::Presented(Some(ids[0])),
            ]
        );
    }

    #[test]
    fn at_most_one_selected_across_toggles() {
        let ids = wrapper_ids(3);
        let mut session = DebuggingSession::new();
        let sequence = [0, 1, 1, 2, 0, 0, 2, 1];
        for index in sequence {
            OverlayWrapper::activate(&mut session, request(ids[index]));
            assert_eq!(session.selected(), Some(ids[index]));
        }

        // Replaying the event log never shows two live selections.
        let mut live = 0i32;
        for event in session.events() {
            match event {
                SessionEvent::Selected(_) => live += 1,
                SessionEvent::Deselected(_) => live -= 1,
                _ => {}
            }
            assert!((0..=1).contains(&live));
        }
    }

    #[test]
    fn deselect_precedes_new_disclosure() {
        let ids = wrapper_ids(2);
        let mut session = DebuggingSession::new();
        OverlayWrapper::activate(&mut session, request(ids[0]));
        session.take_events();
        OverlayWrapper::activate(&mut session, request(ids[1]));
        assert_eq!(
            session.events(),
            &[
                SessionEvent::Dismissed(Some(ids[0])),
                SessionEvent::Deselected(ids[0]),
                SessionEvent::Selected(ids[1]),
                SessionEvent::Presented(Some(ids[1])),
            ]
        );
    }

    #[test]
    fn wrapper_forwards_to_wrapped_description() {
        let label = Label::new("hi");
        let context = crate::view::ViewDescriptionContext {
            bounds: Rect::ZERO,
            subtree_extent: None,
        };
        let inner = crate::element::Element::backing_view_description(&label, &context);
        let session: SharedCoordinator = Rc::new(RefCell::new(DebuggingSession::new()));
        let description = OverlayWrapper::new(inner, session, DebuggingConfig::wrapping_all()).into_description();

        assert_eq!(description.view_class(), DEBUGGING_VIEW_CLASS);
        assert_eq!(description.wrapped_class(), Some("Label"));

        let mut arena = ViewArena::new();
        let wrapper = description.build(&mut arena);
        arena.set_frame(wrapper, Rect::new(5.0, 5.0, 40.0, 18.0));
        description.apply(&mut arena, wrapper);

        let inner_view = arena.subviews(wrapper)[0];
        let inner = arena.get(inner_view).unwrap();
        assert_eq!(inner.class, "Label");
        assert_eq!(inner.text.as_deref(), Some("hi"));
        assert_eq!(inner.frame, Rect::new(0.0, 0.0, 40.0, 18.0));
        assert_eq!(description.content_view(&arena, wrapper), inner_view);

        let outer = arena.get(wrapper).unwrap();
        assert_eq!(outer.style.border_width, FRAME_BORDER_WIDTH);
        assert_eq!(outer.style.background, None);
    }

    #[test]
    fn selection_drives_highlight() {
        let session = DebuggingSession::shared();
        let shared: SharedCoordinator = session.clone();
        let description = OverlayWrapper::new(None, shared, DebuggingConfig::default()).into_description();

        let mut arena = ViewArena::new();
        let wrapper = description.build(&mut arena);
        description.apply(&mut arena, wrapper);
        assert_eq!(arena.get(wrapper).unwrap().style.border_width, 0.0);
        assert_eq!(description.content_view(&arena, wrapper), wrapper);

        session.borrow_mut().set_selected(Some(wrapper));
        description.apply(&mut arena, wrapper);
        let style = &arena.get(wrapper).unwrap().style;
        assert_eq!(style.border_width, SELECTED_BORDER_WIDTH);
        assert_eq!(style.background, Some(Color::DEBUG_SELECTION));
    }
}
