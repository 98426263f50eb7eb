//! trellis-inspect: render a sample element tree and log its 3D projection.
//!
//! Usage: `trellis-inspect [config.json]`. Set `RUST_LOG=debug` to see
//! reconcile and snapshot details.

use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use trellis::{
    Color, CrossAxisAlignment, DebuggingSession, DebuggingSettings, ElementExt, ElementRef, Inset, Insets, Label, Panel,
    Point, RenderSurface, Size, SizeConstraint, Stack,
};
use trellis_inspector::{FlattenedElementSnapshot, GestureEvent, HierarchyProjection, InspectorConfig};

fn sample_tree() -> ElementRef {
    let row = |name: &str, value: &str| {
        Stack::row(vec![Label::new(name).into_ref(), Label::new(value).into_ref()])
            .spacing(12.0)
            .into_ref()
    };

    Panel::wrapping(
        Inset::new(
            Stack::column(vec![
                Label::new("Inspector demo").font_size(18.0).into_ref(),
                Panel::wrapping(
                    Inset::new(
                        Stack::column(vec![row("width", "320"), row("height", "240")])
                            .spacing(4.0)
                            .into_ref(),
                        Insets::uniform(8.0),
                    )
                    .into_ref(),
                )
                .background(Color::rgb8(0xf4, 0xf4, 0xf4))
                .border(1.0, Color::rgb8(0xcc, 0xcc, 0xcc))
                .corner_radius(6.0)
                .into_ref(),
            ])
            .spacing(10.0)
            .align(CrossAxisAlignment::Stretch)
            .into_ref(),
            Insets::uniform(16.0),
        )
        .into_ref(),
    )
    .background(Color::WHITE)
    .into_ref()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => InspectorConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => InspectorConfig::default(),
    };
    tracing::info!(?config, "starting trellis-inspect");

    let element = sample_tree();

    // Live surface driven by the configured debugging settings.
    let settings = DebuggingSettings::new(config.debugging);
    let mut surface = RenderSurface::new(Size::new(320.0, 240.0), settings.clone(), DebuggingSession::shared());
    surface.set_element(Some(element.clone()));
    let stats = surface.update().context("rendering sample tree")?;
    tracing::info!(?stats, views = surface.arena().len(), "rendered live surface");

    settings.set(trellis::DebuggingConfig {
        long_press_for_debugger: true,
        ..trellis::DebuggingConfig::wrapping_all()
    });
    surface.poll_debugging_changes()?;
    if let Some(wrapper) = surface.tap(Point::new(40.0, 30.0)) {
        tracing::info!(?wrapper, "selected wrapper");
    }
    if let Some(request) = surface.long_press(Point::new(1.0, 1.0)) {
        tracing::info!(element = ?request.element.kind(), "inspector requested");
    }

    let snapshot = FlattenedElementSnapshot::new(element, SizeConstraint::loose(Size::new(800.0, 600.0)))
        .context("capturing snapshot")?;
    for entry in snapshot.element_outline()? {
        tracing::debug!(depth = entry.depth, kind = entry.element.kind(), "element");
    }
    tracing::info!(
        entries = snapshot.len(),
        max_depth = snapshot.max_depth(),
        stats = ?snapshot.stats(),
        "captured snapshot"
    );

    let mut projection = HierarchyProjection::new(snapshot, Size::new(480.0, 360.0), config.projection, config.gesture);
    let drag = [
        GestureEvent::Began { touches: 1 },
        GestureEvent::Moved {
            touches: 1,
            delta: Point::new(60.0, -20.0),
            elapsed: Duration::from_millis(16),
        },
        GestureEvent::Ended,
        GestureEvent::Began { touches: 2 },
        GestureEvent::Moved {
            touches: 2,
            delta: Point::new(-30.0, 15.0),
            elapsed: Duration::from_millis(16),
        },
        GestureEvent::Ended,
    ];
    for event in drag {
        let action = projection.handle_gesture(event);
        tracing::debug!(?event, ?action, state = ?projection.arbiter().state(), "gesture");
    }

    let transform = projection.transform();
    tracing::info!(
        rotation_x = transform.rotation_x,
        rotation_y = transform.rotation_y,
        scale = transform.scale,
        "projection transform"
    );
    for plane in projection.planes() {
        tracing::info!(depth = plane.depth, bounds = ?plane.bounds, "plane");
    }

    Ok(())
}
