//! Monospace text label.

use crate::element::Element;
use crate::layout::{ElementContent, MeasurementKey, SizeConstraint, cached_measurement};
use crate::primitives::Size;
use crate::view::{ViewDescription, ViewDescriptionContext};

// Monospace metrics at the base font size; other sizes scale linearly.
pub const CHAR_WIDTH: f32 = 8.4;
pub const LINE_HEIGHT: f32 = 18.0;
pub const BASE_FONT_SIZE: f32 = 14.0;

/// A view-backed run of text that wraps to the available width.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font_size: f32,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: BASE_FONT_SIZE,
        }
    }

    pub fn font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Size of `text` under `constraint`, wrapping at character granularity.
    ///
    /// When not even one glyph fits the maximum width the label overflows
    /// rather than collapsing.
    pub fn measure_text(text: &str, font_size: f32, constraint: SizeConstraint) -> Size {
        let scale = font_size / BASE_FONT_SIZE;
        let char_width = CHAR_WIDTH * scale;
        let line_height = LINE_HEIGHT * scale;

        let per_line = if constraint.has_bounded_width() && char_width > 0.0 {
            ((constraint.max_width() / char_width).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let mut widest = 0usize;
        let mut lines = 0usize;
        for line in text.split('\n') {
            let chars = line.chars().count();
            widest = widest.max(chars.min(per_line));
            lines += chars.div_ceil(per_line).max(1);
        }

        Size::new(widest as f32 * char_width, lines as f32 * line_height)
    }
}

impl Element for Label {
    fn content(&self) -> ElementContent {
        let text = self.text.clone();
        let font_size = self.font_size;
        ElementContent::leaf(move |constraint| {
            let key = MeasurementKey::new(&(text.as_str(), font_size.to_bits()), constraint);
            cached_measurement(key, || Label::measure_text(&text, font_size, constraint))
        })
    }

    fn backing_view_description(&self, _context: &ViewDescriptionContext) -> Option<ViewDescription> {
        let text = self.text.clone();
        Some(ViewDescription::new("Label", move |view| {
            view.text = Some(text.clone());
        }))
    }
}
