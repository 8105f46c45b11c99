//! Per-session lock configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::LockError;
use crate::types::ClassTag;

/// Immutable configuration of one lock session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Angle (degrees) the view should not overstep; hard correction engages here.
    pub max_angle_to_target: f64,
    /// Angle (degrees) at which the view starts to ease back toward the target.
    pub angle_to_start_lerp: f64,
    /// Soft rotation gain. Very high values overshoot.
    pub rotate_speed: f64,
    /// Gain of the hard correction, independent of `rotate_speed`.
    pub hard_rotate_speed_multiplier: f64,
    /// Lock radius in world units, used for selection and for dropping the lock.
    pub max_distance_to_start_target_lock: f64,
    /// Require line of sight when choosing the target.
    pub do_line_of_sight_check: bool,
    /// Drop the lock as soon as line of sight is lost.
    pub continuous_line_of_sight_check: bool,
    /// Classes eligible as targets.
    pub lockable_classes: Vec<ClassTag>,
    /// Marker kind to spawn on the locked target, if any.
    pub visualize_marker: Option<ClassTag>,
    /// Probe offset of the line-of-sight ray battery.
    pub line_of_sight_probe_distance: f64,
    /// Degrees before `max_angle_to_target` at which hard correction engages.
    pub hard_rotation_lead_deg: f64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            max_angle_to_target: DEFAULT_MAX_ANGLE_TO_TARGET,
            angle_to_start_lerp: DEFAULT_ANGLE_TO_START_LERP,
            rotate_speed: DEFAULT_ROTATE_SPEED,
            hard_rotate_speed_multiplier: DEFAULT_HARD_ROTATE_SPEED_MULTIPLIER,
            max_distance_to_start_target_lock: DEFAULT_MAX_DISTANCE_TO_START_TARGET_LOCK,
            do_line_of_sight_check: false,
            continuous_line_of_sight_check: false,
            lockable_classes: Vec::new(),
            visualize_marker: None,
            line_of_sight_probe_distance: LOS_PROBE_DISTANCE,
            hard_rotation_lead_deg: DEFAULT_HARD_ROTATION_LEAD_DEG,
        }
    }
}

impl LockConfig {
    /// Builder-style helper for the common case of a single lockable class.
    pub fn with_class(mut self, class: impl Into<ClassTag>) -> Self {
        self.lockable_classes.push(class.into());
        self
    }

    /// Reject values that would make the convergence law invert or go NaN.
    pub fn validate(&self) -> Result<(), LockError> {
        let finite = [
            ("max_angle_to_target", self.max_angle_to_target),
            ("angle_to_start_lerp", self.angle_to_start_lerp),
            ("rotate_speed", self.rotate_speed),
            (
                "hard_rotate_speed_multiplier",
                self.hard_rotate_speed_multiplier,
            ),
            (
                "max_distance_to_start_target_lock",
                self.max_distance_to_start_target_lock,
            ),
            (
                "line_of_sight_probe_distance",
                self.line_of_sight_probe_distance,
            ),
            ("hard_rotation_lead_deg", self.hard_rotation_lead_deg),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(LockError::invalid(field, "must be finite"));
            }
        }

        if self.max_distance_to_start_target_lock <= 0.0 {
            return Err(LockError::invalid(
                "max_distance_to_start_target_lock",
                "must be greater than zero",
            ));
        }
        for (field, angle) in [
            ("max_angle_to_target", self.max_angle_to_target),
            ("angle_to_start_lerp", self.angle_to_start_lerp),
        ] {
            if !(0.0..=180.0).contains(&angle) {
                return Err(LockError::invalid(field, "must be within [0, 180] degrees"));
            }
        }
        if self.angle_to_start_lerp > self.max_angle_to_target {
            return Err(LockError::invalid(
                "angle_to_start_lerp",
                format!(
                    "({}) must not exceed max_angle_to_target ({})",
                    self.angle_to_start_lerp, self.max_angle_to_target
                ),
            ));
        }
        if self.rotate_speed <= 0.0 {
            return Err(LockError::invalid("rotate_speed", "must be greater than zero"));
        }
        if self.hard_rotate_speed_multiplier <= 0.0 {
            return Err(LockError::invalid(
                "hard_rotate_speed_multiplier",
                "must be greater than zero",
            ));
        }
        if self.line_of_sight_probe_distance < 0.0 {
            return Err(LockError::invalid(
                "line_of_sight_probe_distance",
                "must not be negative",
            ));
        }
        if self.hard_rotation_lead_deg < 0.0 {
            return Err(LockError::invalid(
                "hard_rotation_lead_deg",
                "must not be negative",
            ));
        }
        Ok(())
    }

    /// Angle at which hard correction engages, after the lead is applied.
    pub fn hard_threshold(&self) -> f64 {
        self.max_angle_to_target - self.hard_rotation_lead_deg
    }
}
