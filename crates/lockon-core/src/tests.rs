//! Tests for core types, configuration validation, and serialization.

use glam::DVec3;

use crate::config::LockConfig;
use crate::enums::*;
use crate::error::LockError;
use crate::events::{RotationDelta, RotationUpdate, TickOutcome};
use crate::types::{ClassTag, Pose, Rotator};

const EPS: f64 = 1e-9;

fn assert_vec_eq(a: DVec3, b: DVec3) {
    assert!(
        (a - b).length() < 1e-9,
        "vectors differ: {a:?} vs {b:?}"
    );
}

// ---- Rotator ----

#[test]
fn test_rotator_zero_axes() {
    let r = Rotator::ZERO;
    assert_vec_eq(r.forward(), DVec3::X);
    assert_vec_eq(r.right(), DVec3::Y);
    assert_vec_eq(r.up(), DVec3::Z);
}

#[test]
fn test_rotator_yaw_90_faces_right() {
    let r = Rotator::from_pitch_yaw(0.0, 90.0);
    assert_vec_eq(r.forward(), DVec3::Y);
    assert_vec_eq(r.right(), -DVec3::X);
    assert_vec_eq(r.up(), DVec3::Z);
}

#[test]
fn test_rotator_pitch_up_tilts_forward_and_up() {
    let r = Rotator::from_pitch_yaw(90.0, 0.0);
    assert_vec_eq(r.forward(), DVec3::Z);
    assert_vec_eq(r.up(), -DVec3::X);
}

#[test]
fn test_rotator_axes_orthonormal_with_roll() {
    let r = Rotator::new(23.0, -71.0, 40.0);
    let (f, rt, u) = (r.forward(), r.right(), r.up());
    assert!((f.length() - 1.0).abs() < EPS);
    assert!((rt.length() - 1.0).abs() < EPS);
    assert!((u.length() - 1.0).abs() < EPS);
    assert!(f.dot(rt).abs() < EPS);
    assert!(f.dot(u).abs() < EPS);
    assert!(rt.dot(u).abs() < EPS);
}

#[test]
fn test_from_direction_inverts_forward() {
    for (pitch, yaw) in [(0.0, 0.0), (30.0, 45.0), (-60.0, 170.0), (10.0, -120.0)] {
        let r = Rotator::from_pitch_yaw(pitch, yaw);
        let back = Rotator::from_direction(r.forward() * 250.0);
        assert!((back.pitch - pitch).abs() < 1e-9, "pitch {pitch} -> {}", back.pitch);
        assert!((back.yaw - yaw).abs() < 1e-9, "yaw {yaw} -> {}", back.yaw);
    }
}

#[test]
fn test_from_direction_zero_is_zero() {
    assert_eq!(Rotator::from_direction(DVec3::ZERO), Rotator::ZERO);
}

#[test]
fn test_normalized_wraps() {
    let r = Rotator::new(350.0, -10.0, 190.0).normalized();
    assert!((r.pitch - -10.0).abs() < EPS);
    assert!((r.yaw - 350.0).abs() < EPS);
    assert!((r.roll - -170.0).abs() < EPS);

    let r = Rotator::new(-180.0, 720.0, 0.0).normalized();
    assert!((r.pitch - 180.0).abs() < EPS);
    assert!(r.yaw.abs() < EPS);
}

#[test]
fn test_pose_distance() {
    let pose = Pose::new(DVec3::new(1.0, 2.0, 3.0), Rotator::ZERO);
    assert!((pose.distance_to(DVec3::new(4.0, 6.0, 3.0)) - 5.0).abs() < EPS);
}

// ---- Config ----

#[test]
fn test_default_config_is_valid() {
    let config = LockConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.max_angle_to_target, 40.0);
    assert_eq!(config.angle_to_start_lerp, 15.0);
    assert_eq!(config.rotate_speed, 4.0);
    assert_eq!(config.hard_rotate_speed_multiplier, 10.0);
    assert_eq!(config.max_distance_to_start_target_lock, 1500.0);
    assert_eq!(config.line_of_sight_probe_distance, 75.0);
    assert_eq!(config.hard_threshold(), 40.0);
}

#[test]
fn test_config_rejects_inverted_angles() {
    let config = LockConfig {
        angle_to_start_lerp: 50.0,
        ..Default::default()
    };
    match config.validate() {
        Err(LockError::ConfigurationInvalid { field, .. }) => {
            assert_eq!(field, "angle_to_start_lerp")
        }
        other => panic!("expected ConfigurationInvalid, got {other:?}"),
    }
}

#[test]
fn test_config_rejects_non_positive_radius() {
    for radius in [0.0, -5.0] {
        let config = LockConfig {
            max_distance_to_start_target_lock: radius,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LockError::ConfigurationInvalid {
                field: "max_distance_to_start_target_lock",
                ..
            })
        ));
    }
}

#[test]
fn test_config_rejects_nan_and_bad_gains() {
    let nan = LockConfig {
        rotate_speed: f64::NAN,
        ..Default::default()
    };
    assert!(nan.validate().is_err());

    let zero_gain = LockConfig {
        hard_rotate_speed_multiplier: 0.0,
        ..Default::default()
    };
    assert!(zero_gain.validate().is_err());

    let wide = LockConfig {
        max_angle_to_target: 200.0,
        ..Default::default()
    };
    assert!(wide.validate().is_err());
}

#[test]
fn test_config_equal_angles_allowed() {
    let config = LockConfig {
        max_angle_to_target: 20.0,
        angle_to_start_lerp: 20.0,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_serde_partial_document_uses_defaults() {
    let json = r#"{ "max_angle_to_target": 30.0, "lockable_classes": ["Enemy", "Boss"] }"#;
    let config: LockConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.max_angle_to_target, 30.0);
    assert_eq!(config.angle_to_start_lerp, 15.0);
    assert_eq!(
        config.lockable_classes,
        vec![ClassTag::new("Enemy"), ClassTag::new("Boss")]
    );
    assert!(config.visualize_marker.is_none());
}

#[test]
fn test_config_serde_roundtrip() {
    let config = LockConfig {
        do_line_of_sight_check: true,
        visualize_marker: Some(ClassTag::new("Reticle")),
        ..LockConfig::default().with_class("Enemy")
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: LockConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}

// ---- Signals ----

#[test]
fn test_tick_outcome_serde() {
    let outcomes = vec![
        TickOutcome::NoOp,
        TickOutcome::Terminated(EndReason::OutOfRange),
        TickOutcome::Updated(RotationUpdate {
            rotation: Rotator::from_pitch_yaw(1.0, 2.0),
            angle: 20.0,
            hard: None,
            soft: RotationDelta {
                pitch: 0.1,
                yaw: 0.2,
            },
        }),
    ];
    for outcome in outcomes {
        let json = serde_json::to_string(&outcome).unwrap();
        let back: TickOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
    assert!(TickOutcome::Terminated(EndReason::Stopped).is_terminal());
    assert!(!TickOutcome::NoOp.is_terminal());
}

#[test]
fn test_error_messages_name_the_field() {
    let err = LockError::invalid("rotate_speed", "must be greater than zero");
    assert_eq!(
        err.to_string(),
        "invalid configuration: rotate_speed must be greater than zero"
    );
    let err = LockError::MissingCollaborator("camera");
    assert_eq!(err.to_string(), "missing collaborator: camera");
}
