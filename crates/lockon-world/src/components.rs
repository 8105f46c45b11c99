//! ECS components for hecs entities.
//!
//! Components are plain data. Every actor carries a `lockon_core::types::Pose`
//! as its transform; the rest of the behavior lives in systems and in the
//! collaborator impls on `Arena`.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use lockon_core::types::{ActorId, ClassTag};

/// Class used by sphere-overlap queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorClass(pub ClassTag);

/// Overlap extent. Actors without one are treated as points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub radius: f64,
}

/// Shape that blocks visibility rays, centered on the entity's pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Occluder {
    Sphere { radius: f64 },
    /// Axis-aligned box.
    Box { half_extents: DVec3 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub DVec3);

/// A camera mounted on an owner actor. The rig follows the owner's position
/// and takes its rotation from the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub owner: ActorId,
    /// Offset from the owner's position (world space).
    pub offset: DVec3,
}

/// Cosmetic lock marker snapped to another actor.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: ClassTag,
    pub attached_to: ActorId,
}
