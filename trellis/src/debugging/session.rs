//! Selection state shared by the overlay wrappers of one surface.
//!
//! At most one wrapper is selected at a time. The state lives in a
//! coordinator object handed to every wrapper, so tests can substitute their
//! own implementation of [`SelectionCoordinator`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::element::ElementRef;
use crate::view::ViewId;

/// Identity of an overlay wrapper: its wrapper view.
pub type WrapperId = ViewId;

/// Request to present the inspector modally for one element.
#[derive(Debug, Clone)]
pub struct InspectorRequest {
    /// The wrapper that asked, if the request came from a selection.
    pub wrapper: Option<WrapperId>,
    pub element: ElementRef,
    pub explore_element_history: bool,
}

/// Session state the overlay wrappers drive.
pub trait SelectionCoordinator {
    fn selected(&self) -> Option<WrapperId>;

    fn set_selected(&mut self, wrapper: Option<WrapperId>);

    /// Whether an inspector is currently disclosed.
    fn is_presenting(&self) -> bool;

    fn present_inspector(&mut self, request: InspectorRequest);

    fn dismiss_inspector(&mut self);
}

pub type SharedCoordinator = Rc<RefCell<dyn SelectionCoordinator>>;

/// Transitions a [`DebuggingSession`] keeps before dropping the oldest.
pub const SESSION_EVENT_CAPACITY: usize = 256;

/// Observable session transitions, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Selected(WrapperId),
    Deselected(WrapperId),
    Presented(Option<WrapperId>),
    Dismissed(Option<WrapperId>),
}

/// The default coordinator: remembers the selection and the presented request.
///
/// Transitions are logged for observers; only the most recent
/// [`SESSION_EVENT_CAPACITY`] are kept. Drain them with `take_events`.
#[derive(Debug, Default)]
pub struct DebuggingSession {
    selected: Option<WrapperId>,
    presented: Option<InspectorRequest>,
    events: Vec<SessionEvent>,
}

impl DebuggingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session behind the shared handle wrappers expect.
    pub fn shared() -> Rc<RefCell<DebuggingSession>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn presented(&self) -> Option<&InspectorRequest> {
        self.presented.as_ref()
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn record(&mut self, event: SessionEvent) {
        if self.events.len() >= SESSION_EVENT_CAPACITY {
            self.events.remove(0);
        }
        self.events.push(event);
    }
}

impl SelectionCoordinator for DebuggingSession {
    fn selected(&self) -> Option<WrapperId> {
        self.selected
    }

    fn set_selected(&mut self, wrapper: Option<WrapperId>) {
        if self.selected == wrapper {
            return;
        }
        if let Some(previous) = self.selected.take() {
            self.record(SessionEvent::Deselected(previous));
        }
        if let Some(next) = wrapper {
            self.record(SessionEvent::Selected(next));
        }
        self.selected = wrapper;
    }

    fn is_presenting(&self) -> bool {
        self.presented.is_some()
    }

    fn present_inspector(&mut self, request: InspectorRequest) {
        tracing::debug!(element = ?request.element, "presenting inspector");
        self.record(SessionEvent::Presented(request.wrapper));
        self.presented = Some(request);
    }

    fn dismiss_inspector(&mut self) {
        if let Some(request) = self.presented.take() {
            self.record(SessionEvent::Dismissed(request.wrapper));
        }
    }
}
