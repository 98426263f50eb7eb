//! Size constraints for constraint-based measurement.
//!
//! Constraints flow down the element tree, specifying the min/max extents an
//! element may occupy on each axis. An axis with an infinite maximum is
//! unconstrained.

use std::hash::{Hash, Hasher};

use crate::primitives::{Insets, Size};

/// Bounds handed to an element when it is measured.
///
/// Invariant: `0 <= min <= max` on both axes. The constructors enforce this,
/// so a `SizeConstraint` is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeConstraint {
    min_width: f32,
    max_width: f32,
    min_height: f32,
    max_height: f32,
}

impl SizeConstraint {
    /// No minimum, infinite maximum on both axes.
    pub const UNCONSTRAINED: Self = Self {
        min_width: 0.0,
        max_width: f32::INFINITY,
        min_height: 0.0,
        max_height: f32::INFINITY,
    };

    pub const fn unconstrained() -> Self {
        Self::UNCONSTRAINED
    }

    /// Create a constraint from explicit bounds.
    ///
    /// Negative or NaN minimums become zero; a maximum below the minimum is
    /// raised to it; a NaN maximum is treated as unconstrained.
    pub fn new(min: Size, max: Size) -> Self {
        let min_width = sanitize_min(min.width);
        let min_height = sanitize_min(min.height);
        Self {
            min_width,
            max_width: sanitize_max(max.width).max(min_width),
            min_height,
            max_height: sanitize_max(max.height).max(min_height),
        }
    }

    /// Exactly `size` on both axes.
    #[inline]
    pub fn tight(size: Size) -> Self {
        Self::new(size, size)
    }

    /// Anything from zero up to `max`.
    #[inline]
    pub fn loose(max: Size) -> Self {
        Self::new(Size::ZERO, max)
    }

    /// For width-first layout (e.g., text wrapping).
    #[inline]
    pub fn with_max_width(max_width: f32) -> Self {
        Self::new(Size::ZERO, Size::new(max_width, f32::INFINITY))
    }

    /// For height-first layout.
    #[inline]
    pub fn with_max_height(max_height: f32) -> Self {
        Self::new(Size::ZERO, Size::new(f32::INFINITY, max_height))
    }

    #[inline]
    pub fn min_width(&self) -> f32 {
        self.min_width
    }

    #[inline]
    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    #[inline]
    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    #[inline]
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    #[inline]
    pub fn minimum(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    /// The maximum size; unconstrained axes report infinity.
    #[inline]
    pub fn maximum(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    /// Clamp a size to these bounds.
    #[inline]
    pub fn constrain(&self, size: Size) -> Size {
        debug_assert!(!size.width.is_nan(), "NaN width in measurement");
        debug_assert!(!size.height.is_nan(), "NaN height in measurement");
        Size {
            width: size.width.clamp(self.min_width, self.max_width),
            height: size.height.clamp(self.min_height, self.max_height),
        }
    }

    /// Whether `size` exceeds the maximum on either axis.
    #[inline]
    pub fn is_overflowed_by(&self, size: Size) -> bool {
        size.width > self.max_width || size.height > self.max_height
    }

    #[inline]
    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    #[inline]
    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    /// Whether these are tight constraints (min == max).
    #[inline]
    pub fn is_tight(&self) -> bool {
        self.min_width == self.max_width && self.min_height == self.max_height
    }

    /// Shrink by insets. Unconstrained axes stay unconstrained.
    pub fn inset(&self, insets: &Insets) -> Self {
        Self::new(
            Size::new(
                self.min_width - insets.horizontal(),
                self.min_height - insets.vertical(),
            ),
            Size::new(
                (self.max_width - insets.horizontal()).max(0.0),
                (self.max_height - insets.vertical()).max(0.0),
            ),
        )
    }

    /// Same bounds with the minimum dropped to zero.
    pub fn loosened(&self) -> Self {
        Self::loose(self.maximum())
    }
}

impl Default for SizeConstraint {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

impl Eq for SizeConstraint {}

// Constructors reject NaN, so bitwise hashing agrees with `PartialEq` except
// for +0.0/-0.0, which only costs a cache miss.
impl Hash for SizeConstraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.min_width.to_bits().hash(state);
        self.max_width.to_bits().hash(state);
        self.min_height.to_bits().hash(state);
        self.max_height.to_bits().hash(state);
    }
}

fn sanitize_min(value: f32) -> f32 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

fn sanitize_max(value: f32) -> f32 {
    if value.is_nan() {
        f32::INFINITY
    } else {
        value.max(0.0)
    }
}
