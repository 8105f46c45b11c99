//! Per-tick signals and snapshots emitted by a lock session.

use serde::{Deserialize, Serialize};

use crate::enums::{EndReason, OutputPin, SessionState};
use crate::types::{ActorId, Rotator};

/// Additive pitch/yaw correction applied in one tick (degrees).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationDelta {
    pub pitch: f64,
    pub yaw: f64,
}

impl RotationDelta {
    pub fn is_zero(&self) -> bool {
        self.pitch == 0.0 && self.yaw == 0.0
    }
}

/// Result of a tick that rotated the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationUpdate {
    /// Controller orientation after both corrections.
    pub rotation: Rotator,
    /// Angle between the view and the target before correction (degrees).
    pub angle: f64,
    /// Hard correction, present only when the clamp angle was reached.
    pub hard: Option<RotationDelta>,
    /// Soft correction.
    pub soft: RotationDelta,
}

/// What one tick of an active session produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Target within the soft angle; orientation untouched.
    NoOp,
    /// Orientation corrected toward the target.
    Updated(RotationUpdate),
    /// The session ended this tick.
    Terminated(EndReason),
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Terminated(_))
    }
}

/// Serializable view of a session after a tick, for tools and UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockSnapshot {
    pub tick: u64,
    pub state: SessionState,
    pub target: Option<ActorId>,
    /// Camera-to-target distance, when a target is held.
    pub distance: Option<f64>,
    pub control_rotation: Rotator,
    pub outcome: Option<TickOutcome>,
    pub end_reason: Option<EndReason>,
    /// Pins fired by the four-pin front end this tick.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pins: Vec<OutputPin>,
}
