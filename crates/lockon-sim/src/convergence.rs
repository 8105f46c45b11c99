//! Per-tick rotation convergence law.
//!
//! Pure function over plain data: given the camera, the target, and the
//! current controller orientation, decide whether the lock must end, whether
//! anything needs to change, and by how much.
//!
//! Two corrections may apply in one tick:
//! - soft: once the target is `angle_to_start_lerp` or more off-axis, ease the
//!   view toward the point that would put the target back on that boundary,
//!   scaled by `rotate_speed`;
//! - hard: once the target reaches the clamp angle, additionally pull the view
//!   toward the point that would put the target back on the clamp boundary,
//!   scaled by `hard_rotate_speed_multiplier`.
//!
//! Hard is applied first and soft is computed against the result, so the two
//! deltas are additive.

use glam::DVec3;
use tracing::{debug, trace};

use lockon_core::config::LockConfig;
use lockon_core::constants::MAX_TICK_DELTA_SECS;
use lockon_core::enums::EndReason;
use lockon_core::events::{RotationDelta, RotationUpdate, TickOutcome};
use lockon_core::types::Rotator;

use crate::geometry::{angle_between, look_at, project_onto, shortest_rotation_delta};

/// Inputs for one tick of an active lock.
#[derive(Debug, Clone, Copy)]
pub struct ConvergenceContext {
    pub camera_position: DVec3,
    pub camera_forward: DVec3,
    pub target_position: DVec3,
    pub control_rotation: Rotator,
    /// Elapsed time since the previous tick (seconds, unclamped).
    pub delta_secs: f64,
    /// Result of the continuous line-of-sight check, `None` when disabled.
    pub line_of_sight: Option<bool>,
}

/// Clamp a frame delta into `[0, MAX_TICK_DELTA_SECS]`.
pub fn clamp_delta(delta_secs: f64) -> f64 {
    if delta_secs.is_nan() {
        return 0.0;
    }
    delta_secs.clamp(0.0, MAX_TICK_DELTA_SECS)
}

/// Evaluate one tick. Never returns `Terminated(LostTarget)`; resolving the
/// target is the caller's job.
pub fn evaluate(ctx: &ConvergenceContext, config: &LockConfig) -> TickOutcome {
    let dt = clamp_delta(ctx.delta_secs);

    if ctx.line_of_sight == Some(false) {
        return TickOutcome::Terminated(EndReason::LostSight);
    }

    let target_direction = ctx.target_position - ctx.camera_position;
    let distance = target_direction.length();
    if distance > config.max_distance_to_start_target_lock {
        return TickOutcome::Terminated(EndReason::OutOfRange);
    }

    // Camera look axis scaled to the target's depth.
    let camera_direction = ctx.camera_forward.normalize_or_zero() * distance;
    let Some(angle) = angle_between(target_direction, camera_direction) else {
        return TickOutcome::NoOp;
    };
    if angle < config.angle_to_start_lerp {
        return TickOutcome::NoOp;
    }

    let projected = project_onto(target_direction, camera_direction);
    let lateral = (ctx.target_position - (projected + ctx.camera_position)).normalize_or_zero();
    let along_axis = ctx.camera_position + projected;

    let soft_offset = arc_offset(angle - config.angle_to_start_lerp) * distance;
    let hard_offset = arc_offset(angle - config.max_angle_to_target) * distance;
    let soft_target = look_at(ctx.camera_position, along_axis + lateral * soft_offset);
    let hard_target = look_at(ctx.camera_position, along_axis + lateral * hard_offset);

    let mut rotation = ctx.control_rotation;

    let hard = if angle >= config.hard_threshold() {
        let delta = correction(
            hard_target,
            rotation,
            dt * config.hard_rotate_speed_multiplier,
        );
        rotation = rotation.add_pitch_yaw(delta.pitch, delta.yaw);
        debug!(angle, pitch = delta.pitch, yaw = delta.yaw, "hard correction");
        Some(delta)
    } else {
        None
    };

    let soft = correction(soft_target, rotation, config.rotate_speed * dt);
    rotation = rotation.add_pitch_yaw(soft.pitch, soft.yaw);

    trace!(
        angle,
        distance,
        soft_pitch = soft.pitch,
        soft_yaw = soft.yaw,
        "soft correction"
    );

    TickOutcome::Updated(RotationUpdate {
        rotation: rotation.normalized(),
        angle,
        hard,
        soft,
    })
}

/// `asin` of an angle excess in radians, saturating past ±1 rad.
fn arc_offset(excess_deg: f64) -> f64 {
    excess_deg.to_radians().clamp(-1.0, 1.0).asin()
}

fn correction(target: Rotator, current: Rotator, gain: f64) -> RotationDelta {
    RotationDelta {
        pitch: shortest_rotation_delta(target.pitch, current.pitch) * gain,
        yaw: shortest_rotation_delta(target.yaw, current.yaw) * gain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    /// Camera at the origin looking down +X, target `angle_deg` to the right at `distance`.
    fn context(angle_deg: f64, distance: f64, delta_secs: f64) -> ConvergenceContext {
        let (s, c) = angle_deg.to_radians().sin_cos();
        ConvergenceContext {
            camera_position: DVec3::ZERO,
            camera_forward: DVec3::X,
            target_position: DVec3::new(c * distance, s * distance, 0.0),
            control_rotation: Rotator::ZERO,
            delta_secs,
            line_of_sight: None,
        }
    }

    fn updated(outcome: TickOutcome) -> RotationUpdate {
        match outcome {
            TickOutcome::Updated(update) => update,
            other => panic!("expected Updated, got {other:?}"),
        }
    }

    #[test]
    fn test_clamp_delta() {
        assert_eq!(clamp_delta(0.016), 0.016);
        assert_eq!(clamp_delta(10.0), MAX_TICK_DELTA_SECS);
        assert_eq!(clamp_delta(-1.0), 0.0);
        assert_eq!(clamp_delta(f64::NAN), 0.0);
    }

    #[test]
    fn test_inside_soft_angle_is_noop() {
        let outcome = evaluate(&context(10.0, 500.0, 0.016), &LockConfig::default());
        assert_eq!(outcome, TickOutcome::NoOp);
    }

    #[test]
    fn test_soft_only_between_thresholds() {
        let update = updated(evaluate(&context(20.0, 500.0, 0.016), &LockConfig::default()));
        assert!(update.hard.is_none());
        assert!(!update.soft.is_zero());
        // Target is to the right: yaw increases, pitch stays level.
        assert!(update.soft.yaw > 0.0);
        assert!(update.soft.pitch.abs() < EPS);
        assert!((update.angle - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_soft_target_brings_target_back_to_lerp_boundary() {
        // With gain 1/dt the soft delta equals the full offset to the soft look-at point.
        let config = LockConfig {
            rotate_speed: 10.0,
            ..Default::default()
        };
        let update = updated(evaluate(&context(20.0, 500.0, 0.1), &config));
        let expected = (0.0872664626f64.asin() / 20f64.to_radians().cos()).atan().to_degrees();
        assert!(
            (update.soft.yaw - expected).abs() < 1e-6,
            "soft yaw {} expected {expected}",
            update.soft.yaw
        );
    }

    #[test]
    fn test_hard_and_soft_past_clamp_angle() {
        let update = updated(evaluate(&context(45.0, 500.0, 0.016), &LockConfig::default()));
        let hard = update.hard.expect("hard correction at 45 degrees");
        assert!(hard.yaw > 0.0);
        assert!(update.soft.yaw > 0.0);
        let total = hard.yaw + update.soft.yaw;
        assert!((update.rotation.yaw - total).abs() < 1e-9);
    }

    #[test]
    fn test_hard_threshold_lead_edges() {
        // Half a degree short of the clamp angle.
        let ctx = context(39.5, 500.0, 0.016);

        let inclusive = LockConfig::default();
        assert!(updated(evaluate(&ctx, &inclusive)).hard.is_none());

        let one_degree_lead = LockConfig {
            hard_rotation_lead_deg: 1.0,
            ..Default::default()
        };
        assert!(updated(evaluate(&ctx, &one_degree_lead)).hard.is_some());

        // Just past the clamp angle engages with either setting.
        let on_edge = context(40.0001, 500.0, 0.016);
        assert!(updated(evaluate(&on_edge, &inclusive)).hard.is_some());
    }

    #[test]
    fn test_hard_threshold_is_inclusive() {
        let ctx = context(39.0, 500.0, 0.016);
        // Place the threshold exactly on the measured angle, with and without a lead.
        let angle = updated(evaluate(&ctx, &LockConfig::default())).angle;
        assert!((angle - 39.0).abs() < 1e-9);

        let no_lead = LockConfig {
            max_angle_to_target: angle,
            ..Default::default()
        };
        let one_degree_lead = LockConfig {
            max_angle_to_target: angle + 1.0,
            hard_rotation_lead_deg: 1.0,
            ..Default::default()
        };
        assert_eq!(no_lead.hard_threshold(), angle);
        assert_eq!(one_degree_lead.hard_threshold(), angle);
        assert!(updated(evaluate(&ctx, &no_lead)).hard.is_some());
        assert!(updated(evaluate(&ctx, &one_degree_lead)).hard.is_some());

        // Just under 39 degrees stays soft with the default clamp and a one degree lead.
        let under = context(38.999, 500.0, 0.016);
        let lead_only = LockConfig {
            hard_rotation_lead_deg: 1.0,
            ..Default::default()
        };
        assert!(updated(evaluate(&under, &lead_only)).hard.is_none());
        assert!(updated(evaluate(&context(39.001, 500.0, 0.016), &lead_only))
            .hard
            .is_some());
    }

    #[test]
    fn test_delta_time_clamped() {
        let config = LockConfig::default();
        let a = updated(evaluate(&context(45.0, 500.0, 0.1), &config));
        let b = updated(evaluate(&context(45.0, 500.0, 10.0), &config));
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_terminates() {
        let outcome = evaluate(&context(0.0, 1500.5, 0.016), &LockConfig::default());
        assert_eq!(outcome, TickOutcome::Terminated(EndReason::OutOfRange));
        // Range is checked even when no correction would be needed.
        let outcome = evaluate(&context(5.0, 2000.0, 0.016), &LockConfig::default());
        assert_eq!(outcome, TickOutcome::Terminated(EndReason::OutOfRange));
    }

    #[test]
    fn test_lost_sight_terminates_first() {
        let mut ctx = context(20.0, 5000.0, 0.016);
        ctx.line_of_sight = Some(false);
        let outcome = evaluate(&ctx, &LockConfig::default());
        assert_eq!(outcome, TickOutcome::Terminated(EndReason::LostSight));

        ctx.line_of_sight = Some(true);
        let outcome = evaluate(&ctx, &LockConfig::default());
        assert_eq!(outcome, TickOutcome::Terminated(EndReason::OutOfRange));
    }

    #[test]
    fn test_target_above_pitches_up() {
        let ctx = ConvergenceContext {
            camera_position: DVec3::ZERO,
            camera_forward: DVec3::X,
            target_position: DVec3::new(300.0, 0.0, 200.0),
            control_rotation: Rotator::ZERO,
            delta_secs: 0.016,
            line_of_sight: None,
        };
        let update = updated(evaluate(&ctx, &LockConfig::default()));
        assert!(update.soft.pitch > 0.0);
        assert!(update.soft.yaw.abs() < EPS);
    }

    #[test]
    fn test_wraps_across_zero_yaw() {
        // Controller at yaw 350 looking slightly left of +X; target to the right of +X.
        let control = Rotator::from_pitch_yaw(0.0, 350.0);
        let ctx = ConvergenceContext {
            camera_position: DVec3::ZERO,
            camera_forward: control.forward(),
            target_position: Rotator::from_pitch_yaw(0.0, 20.0).forward() * 400.0,
            control_rotation: control,
            delta_secs: 0.05,
            line_of_sight: None,
        };
        let update = updated(evaluate(&ctx, &LockConfig::default()));
        // Rotates forward through 0 instead of the long way round.
        assert!(update.soft.yaw > 0.0 && update.soft.yaw < 30.0);
        assert!(update.hard.is_none());
    }

    #[test]
    fn test_target_behind_does_not_produce_nan() {
        let ctx = context(180.0, 500.0, 0.016);
        let update = updated(evaluate(&ctx, &LockConfig::default()));
        assert!(update.rotation.yaw.is_finite());
        assert!(update.rotation.pitch.is_finite());
    }

    #[test]
    fn test_target_at_camera_is_noop() {
        let mut ctx = context(0.0, 0.0, 0.016);
        ctx.target_position = DVec3::ZERO;
        assert_eq!(evaluate(&ctx, &LockConfig::default()), TickOutcome::NoOp);
    }
}
