//! Enumeration types used throughout the lock pipeline.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a lock session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Created, selection not yet run.
    #[default]
    Idle,
    /// Running the one-shot target selection pass.
    Selecting,
    /// Holding a target and rotating toward it every tick.
    Active,
    /// Terminal. The session is discarded by its owner.
    Ended,
}

/// Why a session reached `Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// Selection found nothing eligible.
    NoEligibleTarget,
    /// The target reference no longer resolves (destroyed, despawned).
    LostTarget,
    /// The target moved beyond the lock radius.
    OutOfRange,
    /// Continuous line-of-sight check failed from both camera and owner.
    LostSight,
    /// The camera stopped resolving mid-session.
    LostCamera,
    /// Explicit stop or cancel from the caller.
    Stopped,
}

/// Input pins of the four-pin front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPin {
    Start,
    Cancel,
}

/// Output pins of the four-pin front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputPin {
    /// Fired on the first update of a session that holds a target.
    OnStarted,
    /// Fired on every later update while the session holds a target.
    OnUpdated,
    /// Fired once when the session ends for any reason.
    OnCancelled,
}
