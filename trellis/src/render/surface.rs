//! Host root that renders one element into a retained view tree.

use std::collections::HashMap;

use tokio::sync::broadcast;

use crate::debugging::{
    DEBUGGING_VIEW_CLASS, DebuggingChanged, DebuggingConfig, DebuggingSession, DebuggingSettings, InspectorRequest,
    OverlayWrapper, SelectionCoordinator, SharedCoordinator, WrapperId, drain_changes,
};
use crate::element::{ElementPath, ElementRef};
use crate::error::LayoutError;
use crate::layout::LayoutResultNode;
use crate::primitives::{Point, Rect, Size};
use crate::view::{View, ViewArena, ViewDescription, ViewId};

use super::controller::{ReconcileStats, ViewController, reconcile_children};
use super::native::NativeViewNode;

/// View class of a surface's root view.
pub const SURFACE_VIEW_CLASS: &str = "RenderSurface";

/// Owns a view arena, a root view and the controllers under it.
pub struct RenderSurface {
    arena: ViewArena,
    root: ViewId,
    size: Size,
    element: Option<ElementRef>,
    children: Vec<(ElementPath, ViewController)>,
    settings: DebuggingSettings,
    changes: broadcast::Receiver<DebuggingChanged>,
    /// Overrides the shared settings (offscreen snapshot surfaces).
    forced_config: Option<DebuggingConfig>,
    coordinator: SharedCoordinator,
}

impl RenderSurface {
    pub fn new(size: Size, settings: DebuggingSettings, coordinator: SharedCoordinator) -> Self {
        let mut arena = ViewArena::new();
        let mut root_view = View::new(SURFACE_VIEW_CLASS);
        root_view.frame = Rect::from_size(size);
        root_view.is_interactive = false;
        let root = arena.insert(root_view);
        let changes = settings.subscribe();

        Self {
            arena,
            root,
            size,
            element: None,
            children: Vec::new(),
            settings,
            changes,
            forced_config: None,
            coordinator,
        }
    }

    /// A surface that wraps every element regardless of shared settings,
    /// with a private selection session.
    pub fn offscreen(size: Size) -> Self {
        let mut surface = Self::new(size, DebuggingSettings::default(), DebuggingSession::shared());
        surface.forced_config = Some(DebuggingConfig::wrapping_all());
        surface
    }

    /// Replace the rendered element. Takes effect on the next [`update`](Self::update).
    pub fn set_element(&mut self, element: Option<ElementRef>) {
        self.element = element;
    }

    pub fn element(&self) -> Option<&ElementRef> {
        self.element.as_ref()
    }

    /// Resize the root view. Takes effect on the next [`update`](Self::update).
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.arena.set_frame(self.root, Rect::from_size(size));
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Configuration in effect for the next render.
    pub fn debugging_config(&self) -> DebuggingConfig {
        self.forced_config.unwrap_or_else(|| self.settings.config())
    }

    pub fn settings(&self) -> &DebuggingSettings {
        &self.settings
    }

    pub fn coordinator(&self) -> &SharedCoordinator {
        &self.coordinator
    }

    /// Lay out the current element and reconcile the view tree against it.
    pub fn update(&mut self) -> Result<ReconcileStats, LayoutError> {
        let mut stats = ReconcileStats::default();
        let nodes = match &self.element {
            Some(element) => {
                let layout = LayoutResultNode::build(element, Rect::from_size(self.size))?;
                let config = self.debugging_config();
                let coordinator = self.coordinator.clone();
                NativeViewNode::resolve(&layout, &mut |_, description| {
                    decorate(description, &coordinator, config)
                })
            }
            None => Vec::new(),
        };

        let selected = self.rendered_selection();
        let existing = std::mem::take(&mut self.children);
        self.children = reconcile_children(&mut self.arena, self.root, existing, &nodes, &mut stats);
        if let Some(wrapper) = selected {
            self.release_if_removed(wrapper);
        }
        tracing::debug!(
            created = stats.created,
            reused = stats.reused,
            removed = stats.removed,
            "reconciled surface"
        );
        Ok(stats)
    }

    /// Re-render if the shared settings changed since the last poll.
    pub fn poll_debugging_changes(&mut self) -> Result<bool, LayoutError> {
        if !drain_changes(&mut self.changes) {
            return Ok(false);
        }
        tracing::debug!(config = ?self.debugging_config(), "debugging settings changed");
        self.update()?;
        Ok(true)
    }

    pub fn arena(&self) -> &ViewArena {
        &self.arena
    }

    pub fn root(&self) -> ViewId {
        self.root
    }

    /// Root-level controllers in element order.
    pub fn controllers(&self) -> impl Iterator<Item = &ViewController> {
        self.children.iter().map(|(_, controller)| controller)
    }

    /// The controller that owns `view`, if any.
    pub fn controller_for(&self, view: ViewId) -> Option<&ViewController> {
        let mut stack: Vec<&ViewController> = self.controllers().collect();
        while let Some(controller) = stack.pop() {
            if controller.view() == view {
                return Some(controller);
            }
            stack.extend(controller.children());
        }
        None
    }

    /// Deepest interactive view under `point` (root coordinates).
    pub fn hit_test(&self, point: Point) -> Option<ViewId> {
        self.arena.hit_test(self.root, point)
    }

    /// Every debugging wrapper view currently rendered, with its element.
    pub fn wrapped_elements(&self) -> HashMap<WrapperId, ElementRef> {
        let mut wrapped = HashMap::new();
        for controller in self.controllers() {
            controller.visit(&mut |c| {
                if c.description().view_class() == DEBUGGING_VIEW_CLASS {
                    wrapped.insert(c.view(), c.element().clone());
                }
            });
        }
        wrapped
    }

    /// Activate the innermost debugging wrapper under `point`.
    ///
    /// Returns the wrapper that handled the tap.
    pub fn tap(&mut self, point: Point) -> Option<WrapperId> {
        let wrapped = self.wrapped_elements();
        let mut current = self.hit_test(point);
        let (wrapper, element) = loop {
            let view = current?;
            if let Some(element) = wrapped.get(&view) {
                break (view, element.clone());
            }
            current = self.arena.superview(view);
        };

        let request = OverlayWrapper::request(wrapper, element, self.debugging_config());
        OverlayWrapper::activate(&mut *self.coordinator.borrow_mut(), request);
        self.reapply();
        Some(wrapper)
    }

    /// Request the inspector for the root element, if long-press is enabled.
    pub fn long_press(&mut self, point: Point) -> Option<InspectorRequest> {
        let config = self.debugging_config();
        if !config.long_press_for_debugger || !self.arena.get(self.root)?.bounds().contains(point) {
            return None;
        }
        let request = InspectorRequest {
            wrapper: None,
            element: self.element.clone()?,
            explore_element_history: config.explore_element_history,
        };
        OverlayWrapper::activate(&mut *self.coordinator.borrow_mut(), request.clone());
        Some(request)
    }

    /// The coordinator's selection, if it is one of this surface's wrappers.
    fn rendered_selection(&self) -> Option<WrapperId> {
        let selected = self.coordinator.borrow().selected()?;
        self.wrapped_elements().contains_key(&selected).then_some(selected)
    }

    /// Deselect `wrapper` and dismiss its inspector once its view is gone.
    fn release_if_removed(&self, wrapper: WrapperId) {
        if self.wrapped_elements().contains_key(&wrapper) {
            return;
        }
        tracing::debug!(?wrapper, "selected wrapper was removed");
        let mut coordinator = self.coordinator.borrow_mut();
        if coordinator.selected() == Some(wrapper) {
            coordinator.dismiss_inspector();
            coordinator.set_selected(None);
        }
    }

    fn reapply(&mut self) {
        for (_, controller) in &self.children {
            controller.reapply(&mut self.arena);
        }
    }

    /// Give up the rendered views, keeping the arena.
    pub fn into_parts(self) -> (ViewArena, ViewId) {
        (self.arena, self.root)
    }
}

fn decorate(
    description: Option<ViewDescription>,
    coordinator: &SharedCoordinator,
    config: DebuggingConfig,
) -> Option<ViewDescription> {
    if !config.element_frames.wraps(description.is_some()) {
        return description;
    }
    Some(OverlayWrapper::new(description, coordinator.clone(), config).into_description())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debugging::ElementFrameMode;
    use crate::element::ElementExt;
    use crate::elements::{Label, Panel, Spacer, Stack};

    fn surface_with(element: ElementRef, config: DebuggingConfig) -> RenderSurface {
        let mut surface = RenderSurface::new(
            Size::new(200.0, 100.0),
            DebuggingSettings::new(config),
            DebuggingSession::shared(),
        );
        surface.set_element(Some(element));
        surface.update().unwrap();
        surface
    }

    #[test]
    fn empty_surface_has_no_subviews() {
        let mut surface = RenderSurface::offscreen(Size::new(10.0, 10.0));
        let stats = surface.update().unwrap();
        assert_eq!(stats, ReconcileStats::default());
        assert!(surface.arena().subviews(surface.root()).is_empty());
    }

    #[test]
    fn view_backed_mode_skips_transparent_elements() {
        let config = DebuggingConfig {
            element_frames: ElementFrameMode::ViewBacked,
            ..DebuggingConfig::DISABLED
        };
        let element = Stack::column(vec![Label::new("a").into_ref(), Spacer::new(Size::new(5.0, 5.0)).into_ref()]).into_ref();
        let surface = surface_with(element, config);
        assert_eq!(surface.wrapped_elements().len(), 1);
    }

    #[test]
    fn tap_selects_innermost_wrapper() {
        let element = Panel::wrapping(Label::new("hello").into_ref()).into_ref();
        let mut surface = surface_with(element, DebuggingConfig::wrapping_all());
        assert_eq!(surface.wrapped_elements().len(), 2);

        let tapped = surface.tap(Point::new(2.0, 2.0)).unwrap();
        assert_eq!(surface.coordinator().borrow().selected(), Some(tapped));
        let wrapped = surface.wrapped_elements();
        assert!(wrapped[&tapped].kind().ends_with("Label"));

        let style = &surface.arena().get(tapped).unwrap().style;
        assert_eq!(style.background, Some(crate::primitives::Color::DEBUG_SELECTION));
    }

    #[test]
    fn tap_outside_content_is_ignored() {
        let element = Spacer::new(Size::new(10.0, 10.0)).into_ref();
        let mut surface = surface_with(element, DebuggingConfig::DISABLED);
        assert_eq!(surface.tap(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn long_press_requires_opt_in() {
        let element = Label::new("x").into_ref();
        let mut disabled = surface_with(element.clone(), DebuggingConfig::DISABLED);
        assert!(disabled.long_press(Point::new(1.0, 1.0)).is_none());

        let config = DebuggingConfig {
            long_press_for_debugger: true,
            explore_element_history: true,
            ..DebuggingConfig::DISABLED
        };
        let mut enabled = surface_with(element, config);
        let request = enabled.long_press(Point::new(1.0, 1.0)).unwrap();
        assert!(request.wrapper.is_none());
        assert!(request.explore_element_history);
        assert!(enabled.coordinator().borrow().is_presenting());
    }

    #[test]
    fn removing_the_selected_wrapper_clears_selection() {
        let element = Panel::wrapping(Label::new("hello").into_ref()).into_ref();
        let mut surface = surface_with(element, DebuggingConfig::wrapping_all());
        let tapped = surface.tap(Point::new(2.0, 2.0)).unwrap();
        assert!(surface.coordinator().borrow().is_presenting());

        surface.set_element(Some(Spacer::new(Size::new(5.0, 5.0)).into_ref()));
        surface.update().unwrap();

        assert!(!surface.arena().is_alive(tapped));
        let coordinator = surface.coordinator().borrow();
        assert_eq!(coordinator.selected(), None);
        assert!(!coordinator.is_presenting());
    }

    #[test]
    fn surviving_selection_is_kept() {
        let element = Panel::wrapping(Label::new("hello").into_ref()).into_ref();
        let mut surface = surface_with(element, DebuggingConfig::wrapping_all());
        let tapped = surface.tap(Point::new(2.0, 2.0)).unwrap();

        surface.set_element(Some(Panel::wrapping(Label::new("again").into_ref()).into_ref()));
        surface.update().unwrap();

        assert!(surface.arena().is_alive(tapped));
        assert_eq!(surface.coordinator().borrow().selected(), Some(tapped));
    }
}
