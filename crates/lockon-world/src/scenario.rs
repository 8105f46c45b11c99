//! JSON scenario definitions for the arena.
//!
//! A scenario describes the lock configuration, the player, hand-placed
//! actors and occluders, an optional seeded scatter of extra actors, and how
//! long to run.

use std::path::Path;

use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use lockon_core::config::LockConfig;
use lockon_core::error::LockError;
use lockon_core::types::{ClassTag, Rotator};

use crate::components::Occluder;

fn default_ticks() -> u64 {
    300
}

fn default_tick_delta() -> f64 {
    1.0 / 60.0
}

fn default_toggles() -> Vec<u64> {
    vec![0]
}

fn default_actor_radius() -> f64 {
    30.0
}

fn default_camera_offset() -> DVec3 {
    DVec3::new(0.0, 0.0, 60.0)
}

/// Which front end the scheduled presses drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontEnd {
    /// Each press toggles the lock ability.
    #[default]
    Toggle,
    /// Each press fires `Start`, or `Cancel` while the action is running.
    Latent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lock: LockConfig,
    #[serde(default)]
    pub front_end: FrontEnd,
    #[serde(default)]
    pub player: PlayerSpec,
    #[serde(default)]
    pub actors: Vec<ActorSpec>,
    #[serde(default)]
    pub occluders: Vec<OccluderSpec>,
    #[serde(default)]
    pub scatter: Option<ScatterSpec>,
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Seconds per tick.
    #[serde(default = "default_tick_delta")]
    pub tick_delta: f64,
    /// Ticks on which the lock input is pressed.
    #[serde(default = "default_toggles")]
    pub toggles: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    #[serde(default)]
    pub position: DVec3,
    /// Initial look direction (degrees).
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub yaw: f64,
    #[serde(default = "default_camera_offset")]
    pub camera_offset: DVec3,
}

impl Default for PlayerSpec {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            camera_offset: default_camera_offset(),
        }
    }
}

impl PlayerSpec {
    pub fn rotation(&self) -> Rotator {
        Rotator::from_pitch_yaw(self.pitch, self.yaw)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorSpec {
    pub class: ClassTag,
    pub position: DVec3,
    #[serde(default)]
    pub velocity: DVec3,
    #[serde(default = "default_actor_radius")]
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccluderSpec {
    pub position: DVec3,
    #[serde(flatten)]
    pub shape: Occluder,
}

/// Extra actors placed at random on a ring around the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub class: ClassTag,
    pub count: usize,
    pub min_distance: f64,
    pub max_distance: f64,
    pub seed: u64,
}

impl ScatterSpec {
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, LockError> {
        let scenario: Scenario =
            serde_json::from_str(json).map_err(|e| LockError::ScenarioParse(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, LockError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, LockError> {
        serde_json::to_string_pretty(self).map_err(|e| LockError::ScenarioParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), LockError> {
        self.lock.validate()?;
        if !(self.tick_delta.is_finite() && self.tick_delta >= 0.0) {
            return Err(LockError::invalid("tick_delta", "must be finite and non-negative"));
        }
        if let Some(scatter) = &self.scatter {
            if !(scatter.min_distance >= 0.0 && scatter.max_distance >= scatter.min_distance) {
                return Err(LockError::invalid(
                    "scatter",
                    "distances must satisfy 0 <= min_distance <= max_distance",
                ));
            }
        }
        Ok(())
    }

    /// A small arena with three enemies: one strafing, one standing further
    /// ahead, and the nearest hidden behind a wall.
    pub fn sample() -> Self {
        let enemy = ClassTag::new("Enemy");
        Self {
            name: "sample".into(),
            lock: LockConfig {
                do_line_of_sight_check: true,
                continuous_line_of_sight_check: true,
                visualize_marker: Some(ClassTag::new("LockReticle")),
                ..LockConfig::default().with_class(enemy.clone())
            },
            front_end: FrontEnd::Toggle,
            player: PlayerSpec::default(),
            actors: vec![
                ActorSpec {
                    class: enemy.clone(),
                    position: DVec3::new(700.0, 250.0, 60.0),
                    velocity: DVec3::new(0.0, 120.0, 0.0),
                    radius: default_actor_radius(),
                },
                ActorSpec {
                    class: enemy.clone(),
                    position: DVec3::new(1100.0, -150.0, 60.0),
                    velocity: DVec3::ZERO,
                    radius: default_actor_radius(),
                },
                ActorSpec {
                    class: enemy,
                    position: DVec3::new(450.0, 0.0, 60.0),
                    velocity: DVec3::ZERO,
                    radius: default_actor_radius(),
                },
            ],
            occluders: vec![OccluderSpec {
                position: DVec3::new(300.0, 0.0, 60.0),
                shape: Occluder::Box {
                    half_extents: DVec3::new(20.0, 150.0, 200.0),
                },
            }],
            scatter: None,
            ticks: default_ticks(),
            tick_delta: default_tick_delta(),
            toggles: default_toggles(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{ "lock": { "lockable_classes": ["Enemy"] } }"#;
        let scenario = Scenario::from_json(json).unwrap();
        assert_eq!(scenario.ticks, 300);
        assert_eq!(scenario.toggles, vec![0]);
        assert_eq!(scenario.lock.max_angle_to_target, 40.0);
        assert_eq!(scenario.player.camera_offset, DVec3::new(0.0, 0.0, 60.0));
        assert_eq!(scenario.front_end, FrontEnd::Toggle);
        assert!(scenario.actors.is_empty());
    }

    #[test]
    fn test_occluder_shapes_parse() {
        let json = r#"{
            "occluders": [
                { "position": [100.0, 0.0, 0.0], "shape": "sphere", "radius": 25.0 },
                { "position": [200.0, 0.0, 0.0], "shape": "box", "half_extents": [5.0, 50.0, 50.0] }
            ]
        }"#;
        let scenario = Scenario::from_json(json).unwrap();
        assert_eq!(scenario.occluders[0].shape, Occluder::Sphere { radius: 25.0 });
        assert_eq!(
            scenario.occluders[1].shape,
            Occluder::Box {
                half_extents: DVec3::new(5.0, 50.0, 50.0)
            }
        );
    }

    #[test]
    fn test_front_end_parses() {
        let scenario = Scenario::from_json(r#"{ "front_end": "latent" }"#).unwrap();
        assert_eq!(scenario.front_end, FrontEnd::Latent);
        assert!(matches!(
            Scenario::from_json(r#"{ "front_end": "gamepad" }"#),
            Err(LockError::ScenarioParse(_))
        ));
    }

    #[test]
    fn test_invalid_lock_config_rejected() {
        let json = r#"{ "lock": { "angle_to_start_lerp": 60.0 } }"#;
        assert!(matches!(
            Scenario::from_json(json),
            Err(LockError::ConfigurationInvalid { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Scenario::from_json("{ not json"),
            Err(LockError::ScenarioParse(_))
        ));
    }

    #[test]
    fn test_sample_survives_json() {
        let json = Scenario::sample().to_json_pretty().unwrap();
        let parsed = Scenario::from_json(&json).unwrap();
        assert_eq!(parsed.actors.len(), 3);
        assert_eq!(parsed.lock, Scenario::sample().lock);
    }
}
