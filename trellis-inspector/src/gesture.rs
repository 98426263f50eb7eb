//! Exclusive rotate/pan arbitration for the hierarchy visualization.
//!
//! Rotation has priority. A gesture becomes a pan only once rotation has
//! failed: more than one touch, or no movement before the rotation timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use trellis::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Rotating,
    Panning,
}

/// Raw touch input, already reduced to one event per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Began { touches: usize },
    Moved {
        touches: usize,
        /// Movement since the previous event.
        delta: Point,
        /// Time since `Began`.
        elapsed: Duration,
    },
    Ended,
    Cancelled,
}

/// What the projection should do with an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    None,
    Rotate(Point),
    Pan(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// A single touch must start moving within this window to rotate.
    #[serde(with = "millis")]
    pub rotation_timeout: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            rotation_timeout: Duration::from_millis(300),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureArbiter {
    config: GestureConfig,
    state: GestureState,
    /// Touch count of a gesture that began but has not moved yet.
    pending: Option<usize>,
}

impl GestureArbiter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle(&mut self, event: GestureEvent) -> GestureAction {
        match event {
            GestureEvent::Began { touches } => {
                if self.state == GestureState::Idle {
                    self.pending = Some(touches);
                }
                GestureAction::None
            }
            GestureEvent::Moved {
                touches,
                delta,
                elapsed,
            } => match self.state {
                GestureState::Rotating => GestureAction::Rotate(delta),
                GestureState::Panning => GestureAction::Pan(delta),
                GestureState::Idle => {
                    let Some(began_with) = self.pending.take() else {
                        return GestureAction::None;
                    };
                    let single = began_with.max(touches) == 1;
                    if single && elapsed < self.config.rotation_timeout {
                        self.transition(GestureState::Rotating);
                        GestureAction::Rotate(delta)
                    } else {
                        tracing::trace!(touches, ?elapsed, "rotation failed");
                        self.transition(GestureState::Panning);
                        GestureAction::Pan(delta)
                    }
                }
            },
            GestureEvent::Ended | GestureEvent::Cancelled => {
                self.pending = None;
                self.transition(GestureState::Idle);
                GestureAction::None
            }
        }
    }

    fn transition(&mut self, next: GestureState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "gesture state");
            self.state = next;
        }
    }
}
