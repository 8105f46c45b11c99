//! Fundamental geometric and identity types.
//!
//! World axes: +X forward, +Y right, +Z up. All angles are degrees.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Opaque identity of a world object (camera, owner, candidate, marker host).
/// Hosts map their own entity handles onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

/// Type tag used to filter lockable candidates and to name marker kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassTag(pub String);

impl ClassTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Handle to a spawned visualization marker.
///
/// Not `Clone`: exactly one owner (the session that spawned it) hands it back
/// to the spawner for destruction.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Orientation as pitch/yaw/roll in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    /// Rotation about the right axis. Positive looks up.
    pub pitch: f64,
    /// Rotation about the up axis. Positive turns right.
    pub yaw: f64,
    /// Rotation about the forward axis.
    pub roll: f64,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn from_pitch_yaw(pitch: f64, yaw: f64) -> Self {
        Self::new(pitch, yaw, 0.0)
    }

    /// Rotation that points the forward axis along `direction` (roll = 0).
    /// A zero vector yields `Rotator::ZERO`.
    pub fn from_direction(direction: DVec3) -> Self {
        if direction == DVec3::ZERO {
            return Self::ZERO;
        }
        let yaw = direction.y.atan2(direction.x).to_degrees();
        let pitch = direction
            .z
            .atan2((direction.x * direction.x + direction.y * direction.y).sqrt())
            .to_degrees();
        Self::from_pitch_yaw(pitch, yaw)
    }

    /// Unit forward (X) axis of the rotation matrix.
    pub fn forward(&self) -> DVec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        DVec3::new(cp * cy, cp * sy, sp)
    }

    /// Unit right (Y) axis of the rotation matrix.
    pub fn right(&self) -> DVec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sr, cr) = self.roll.to_radians().sin_cos();
        DVec3::new(sr * sp * cy - cr * sy, sr * sp * sy + cr * cy, -sr * cp)
    }

    /// Unit up (Z) axis of the rotation matrix.
    pub fn up(&self) -> DVec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sr, cr) = self.roll.to_radians().sin_cos();
        DVec3::new(-(cr * sp * cy + sr * sy), cy * sr - cr * sp * sy, cr * cp)
    }

    /// Add pitch/yaw deltas, leaving roll untouched.
    pub fn add_pitch_yaw(self, pitch: f64, yaw: f64) -> Self {
        Self {
            pitch: self.pitch + pitch,
            yaw: self.yaw + yaw,
            roll: self.roll,
        }
    }

    /// Yaw wrapped to `[0, 360)`, pitch and roll wrapped to `(-180, 180]`.
    pub fn normalized(self) -> Self {
        Self {
            pitch: wrap_signed(self.pitch),
            yaw: self.yaw.rem_euclid(360.0),
            roll: wrap_signed(self.roll),
        }
    }
}

fn wrap_signed(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Position and orientation of an actor or camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub rotation: Rotator,
}

impl Pose {
    pub fn new(position: DVec3, rotation: Rotator) -> Self {
        Self { position, rotation }
    }

    pub fn forward(&self) -> DVec3 {
        self.rotation.forward()
    }

    pub fn right(&self) -> DVec3 {
        self.rotation.right()
    }

    pub fn up(&self) -> DVec3 {
        self.rotation.up()
    }

    /// Euclidean distance to a point.
    pub fn distance_to(&self, point: DVec3) -> f64 {
        self.position.distance(point)
    }
}
