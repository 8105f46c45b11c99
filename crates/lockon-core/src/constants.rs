//! Tuning constants and configuration defaults.

/// Upper bound on the delta time fed to the convergence law (seconds).
/// Frame stalls longer than this are treated as this long.
pub const MAX_TICK_DELTA_SECS: f64 = 0.1;

// --- Line of sight ---

/// Offset of each probe point from the probed location along the origin's axes.
pub const LOS_PROBE_DISTANCE: f64 = 75.0;

/// Probe points per end: the location itself plus ± offsets on three axes.
pub const LOS_PROBES_PER_END: usize = 7;

/// Number of unblocked rays (out of 7 × 7) required to declare visibility.
pub const LOS_REQUIRED_CLEAR_RAYS: usize = 2;

// --- Configuration defaults ---

/// Default hard clamp angle (degrees).
pub const DEFAULT_MAX_ANGLE_TO_TARGET: f64 = 40.0;

/// Default angle at which soft correction starts (degrees).
pub const DEFAULT_ANGLE_TO_START_LERP: f64 = 15.0;

/// Default soft rotation gain. 1 takes roughly a second to converge.
pub const DEFAULT_ROTATE_SPEED: f64 = 4.0;

/// Default gain of the hard correction.
pub const DEFAULT_HARD_ROTATE_SPEED_MULTIPLIER: f64 = 10.0;

/// Default lock radius (world units).
pub const DEFAULT_MAX_DISTANCE_TO_START_TARGET_LOCK: f64 = 1500.0;

/// Degrees by which the hard correction may engage before the clamp angle.
/// A lead of 1 engages hard correction one degree early.
pub const DEFAULT_HARD_ROTATION_LEAD_DEG: f64 = 0.0;
