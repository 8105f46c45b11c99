//! Collaborator contracts the host world provides to the lock core.
//!
//! The core never owns actors, physics, or the controller. It reads poses,
//! runs overlap and ray queries, writes the control rotation, and asks for a
//! marker to be spawned or destroyed. Everything runs on the host's tick
//! thread; no trait here is expected to be `Send`.

use glam::DVec3;

use crate::types::{ActorId, ClassTag, MarkerHandle, Pose, Rotator};

/// Pose and relationship lookups.
pub trait ActorLookup {
    /// Current pose, or `None` when the actor no longer exists.
    fn pose(&self, actor: ActorId) -> Option<Pose>;

    /// Camera attached to an owner actor, if it has one.
    fn camera_of(&self, owner: ActorId) -> Option<ActorId>;

    /// Actor that owns a camera, if any.
    fn owner_of(&self, camera: ActorId) -> Option<ActorId>;

    fn is_valid(&self, actor: ActorId) -> bool {
        self.pose(actor).is_some()
    }
}

/// Sphere overlap over dynamic and static objects.
pub trait SpatialQuery {
    /// All actors of `class` fully or partially inside the sphere. Order is unspecified.
    fn sphere_overlap(&self, center: DVec3, radius: f64, class: &ClassTag) -> Vec<ActorId>;
}

/// Single-segment visibility query.
pub trait RayQuery {
    /// True if something not in `ignore` blocks the segment `from -> to`.
    fn trace(&self, from: DVec3, to: DVec3, ignore: &[ActorId]) -> bool;
}

/// Read/write access to the controlled subject's look direction.
pub trait OrientationSink {
    fn control_rotation(&self) -> Rotator;
    fn set_control_rotation(&mut self, rotation: Rotator);
}

/// Spawns and destroys the cosmetic lock marker.
pub trait MarkerSpawner {
    /// Spawn a marker of `kind` snapped to `attach_to`. `None` if the kind is unknown
    /// or the target vanished.
    fn spawn_marker(&mut self, kind: &ClassTag, attach_to: ActorId) -> Option<MarkerHandle>;

    fn destroy_marker(&mut self, marker: MarkerHandle);
}

/// Everything a session needs from the world, apart from the controller.
pub trait LockHost: ActorLookup + SpatialQuery + RayQuery + MarkerSpawner {}

impl<T> LockHost for T where T: ActorLookup + SpatialQuery + RayQuery + MarkerSpawner {}
