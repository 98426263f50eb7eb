//! 3D projection of a flattened snapshot as depth-separated planes.
//!
//! Each captured view becomes a plane centred on the container and pushed
//! toward the viewer by `depth * layer_spacing`. Rotation and translation
//! come from gestures; the uniform scale is derived so every projected plane
//! fits inside the container.

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use trellis::{Point, Rect, Size, ViewId};

use crate::gesture::{GestureAction, GestureArbiter, GestureConfig, GestureEvent};
use crate::snapshot::FlattenedElementSnapshot;

/// Largest scale the fit computation will produce.
const MAX_SCALE: f32 = 1.0;
/// Floor for the homogeneous w of a projected point.
const MIN_W: f32 = 1e-4;
/// The eye sits at least this many snapshot radii from the z = 0 plane.
const EYE_RADIUS_MARGIN: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Distance along z between consecutive hierarchy depths.
    pub layer_spacing: f32,
    /// Larger values make drags rotate less.
    pub rotation_damping: f32,
    /// Distance from the eye to the z = 0 plane. Raised per snapshot so
    /// that no rotation can carry a plane past the eye.
    pub eye_distance: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            layer_spacing: 24.0,
            rotation_damping: 1.0,
            eye_distance: 1600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// Radians about the horizontal axis.
    pub rotation_x: f32,
    /// Radians about the vertical axis.
    pub rotation_y: f32,
    pub translation: Point,
    /// Derived by the fit computation, never set directly.
    pub scale: f32,
}

impl TransformState {
    pub const DEFAULT: Self = Self {
        rotation_x: -0.35,
        rotation_y: 0.6,
        translation: Point::ORIGIN,
        scale: 1.0,
    };
}

impl Default for TransformState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One captured view after projection into container space.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPlane {
    pub view: ViewId,
    pub depth: usize,
    /// Frame in snapshot coordinates.
    pub frame: Rect,
    /// Projected corners, clockwise from the top left.
    pub corners: [Point; 4],
    /// Axis-aligned bounds of `corners`.
    pub bounds: Rect,
}

pub struct HierarchyProjection {
    snapshot: FlattenedElementSnapshot,
    container: Size,
    config: ProjectionConfig,
    transform: TransformState,
    gestures: GestureConfig,
    arbiter: GestureArbiter,
    /// `config.eye_distance`, raised to clear the snapshot's radius.
    eye_distance: f32,
    planes: Vec<ProjectedPlane>,
}

impl HierarchyProjection {
    pub fn new(
        snapshot: FlattenedElementSnapshot,
        container: Size,
        config: ProjectionConfig,
        gestures: GestureConfig,
    ) -> Self {
        let eye_distance = config.eye_distance.max(EYE_RADIUS_MARGIN * radius(&snapshot, &config));
        let mut projection = Self {
            snapshot,
            container,
            config,
            transform: TransformState::DEFAULT,
            gestures,
            arbiter: GestureArbiter::new(gestures),
            eye_distance,
            planes: Vec::new(),
        };
        projection.refit();
        projection
    }

    pub fn snapshot(&self) -> &FlattenedElementSnapshot {
        &self.snapshot
    }

    pub fn container_size(&self) -> Size {
        self.container
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn fit_scale(&self) -> f32 {
        self.transform.scale
    }

    pub fn planes(&self) -> &[ProjectedPlane] {
        &self.planes
    }

    pub fn arbiter(&self) -> &GestureArbiter {
        &self.arbiter
    }

    /// Feed a gesture event through the arbiter and apply the result.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> GestureAction {
        let action = self.arbiter.handle(event);
        match action {
            GestureAction::Rotate(delta) => self.rotate(delta),
            GestureAction::Pan(delta) => self.translate(delta),
            GestureAction::None => {}
        }
        action
    }

    /// Rotate by a drag of `delta` points.
    pub fn rotate(&mut self, delta: Point) {
        let width = self.container.width;
        if width <= 0.0 || self.config.rotation_damping <= 0.0 {
            return;
        }
        self.transform.rotation_y += delta.x / width / self.config.rotation_damping;
        self.transform.rotation_x -= delta.y / width / self.config.rotation_damping;
        self.refit();
    }

    pub fn translate(&mut self, delta: Point) {
        self.transform.translation = self.transform.translation + delta;
        self.refit();
    }

    pub fn reset(&mut self) {
        self.transform = TransformState::DEFAULT;
        self.arbiter = GestureArbiter::new(self.gestures);
        self.refit();
    }

    pub fn set_container_size(&mut self, container: Size) {
        self.container = container;
        self.refit();
    }

    /// Project once at unit scale to measure, then again at the fitted scale.
    fn refit(&mut self) {
        let unscaled = self.project(1.0);
        let union = unscaled.iter().map(|plane| plane.bounds).reduce(|a, b| a.union(&b));
        let scale = self.scale_to_fit(union);
        self.transform.scale = scale;
        self.planes = self.project(scale);
        tracing::trace!(scale, planes = self.planes.len(), "refit projection");
    }

    /// Largest scale about the container centre that keeps `union` inside
    /// the container. Axes with no extent do not limit it.
    fn scale_to_fit(&self, union: Option<Rect>) -> f32 {
        let Some(union) = union else {
            return MAX_SCALE;
        };
        let center = Rect::from_size(self.container).center();
        let axis_limit = |half: f32, low: f32, high: f32, mid: f32| {
            let reach = (mid - low).max(high - mid);
            (half > 0.0 && reach > f32::EPSILON && reach.is_finite()).then(|| half / reach)
        };
        [
            axis_limit(self.container.width / 2.0, union.x, union.right(), center.x),
            axis_limit(self.container.height / 2.0, union.y, union.bottom(), center.y),
        ]
        .into_iter()
        .flatten()
        .fold(MAX_SCALE, f32::min)
    }

    fn matrix(&self, scale: f32) -> Mat4 {
        let center = Rect::from_size(self.container).center();
        let translation = self.transform.translation;
        let mut perspective = Mat4::IDENTITY;
        perspective.z_axis.w = -1.0 / self.eye_distance;

        Mat4::from_translation(Vec3::new(center.x, center.y, 0.0))
            * Mat4::from_scale(Vec3::new(scale, scale, 1.0))
            * Mat4::from_translation(Vec3::new(translation.x, translation.y, 0.0))
            * perspective
            * Mat4::from_rotation_x(self.transform.rotation_x)
            * Mat4::from_rotation_y(self.transform.rotation_y)
    }

    /// One plane per snapshot entry, in entry order.
    fn project(&self, scale: f32) -> Vec<ProjectedPlane> {
        let matrix = self.matrix(scale);

        self.snapshot
            .entries()
            .iter()
            .map(|entry| {
                let z = entry.hierarchy_depth as f32 * self.config.layer_spacing;
                let corners = local_corners(&self.snapshot, entry.frame, z)
                    .map(|corner| project_point(matrix, corner));
                ProjectedPlane {
                    view: entry.view,
                    depth: entry.hierarchy_depth,
                    frame: entry.frame,
                    corners,
                    bounds: bounds_of(corners),
                }
            })
            .collect()
    }
}

/// Corners of `frame` relative to the snapshot centre, lifted to `z`.
fn local_corners(snapshot: &FlattenedElementSnapshot, frame: Rect, z: f32) -> [Vec4; 4] {
    let size = snapshot.size();
    let offset = Point::new(size.width / 2.0, size.height / 2.0);
    frame.corners().map(|corner| {
        let local = corner - offset;
        Vec4::new(local.x, local.y, z, 1.0)
    })
}

/// Distance from the snapshot centre to its farthest plane corner.
fn radius(snapshot: &FlattenedElementSnapshot, config: &ProjectionConfig) -> f32 {
    snapshot
        .entries()
        .iter()
        .flat_map(|entry| {
            let z = entry.hierarchy_depth as f32 * config.layer_spacing;
            local_corners(snapshot, entry.frame, z)
        })
        .map(|corner| corner.truncate().length())
        .filter(|length| length.is_finite())
        .fold(0.0, f32::max)
}

fn bounds_of([first, rest @ ..]: [Point; 4]) -> Rect {
    let (min, max) = rest.iter().fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}

fn project_point(matrix: Mat4, point: Vec4) -> Point {
    let clip = matrix * point;
    let w = clip.w.max(MIN_W);
    Point::new(clip.x / w, clip.y / w)
}
