//! Multi-ray line-of-sight test tolerant of partial occlusion.
//!
//! Seven probe points are placed around each end (the location itself plus
//! ± `probe_distance` along the origin's right, up and forward axes). Every
//! origin probe is traced to every target probe, and visibility is declared
//! as soon as `LOS_REQUIRED_CLEAR_RAYS` of the 49 rays are unblocked.

use glam::DVec3;

use lockon_core::constants::{LOS_PROBES_PER_END, LOS_REQUIRED_CLEAR_RAYS};
use lockon_core::host::{ActorLookup, RayQuery};
use lockon_core::types::{ActorId, Pose};

/// Axes used to offset probe points at both ends of the battery.
#[derive(Debug, Clone, Copy)]
pub struct ProbeAxes {
    pub right: DVec3,
    pub up: DVec3,
    pub forward: DVec3,
}

impl From<&Pose> for ProbeAxes {
    fn from(pose: &Pose) -> Self {
        Self {
            right: pose.right(),
            up: pose.up(),
            forward: pose.forward(),
        }
    }
}

/// The seven probe points around `center`.
pub fn probe_points(
    center: DVec3,
    axes: &ProbeAxes,
    probe_distance: f64,
) -> [DVec3; LOS_PROBES_PER_END] {
    [
        center,
        center + axes.right * probe_distance,
        center - axes.right * probe_distance,
        center + axes.up * probe_distance,
        center - axes.up * probe_distance,
        center + axes.forward * probe_distance,
        center - axes.forward * probe_distance,
    ]
}

/// Run the 7×7 ray battery between `origin` and `target`.
pub fn line_of_sight<R: RayQuery + ?Sized>(
    rays: &R,
    origin: DVec3,
    target: DVec3,
    axes: &ProbeAxes,
    ignore: &[ActorId],
    probe_distance: f64,
) -> bool {
    let origin_probes = probe_points(origin, axes, probe_distance);
    let target_probes = probe_points(target, axes, probe_distance);

    let mut clear = 0;
    for from in origin_probes {
        for to in target_probes {
            if !rays.trace(from, to, ignore) {
                clear += 1;
                if clear >= LOS_REQUIRED_CLEAR_RAYS {
                    return true;
                }
            }
        }
    }
    false
}

/// Line of sight from a pose (camera or actor) to a point, using the pose's axes.
pub fn from_pose<R: RayQuery + ?Sized>(
    rays: &R,
    origin: &Pose,
    target: DVec3,
    ignore: &[ActorId],
    probe_distance: f64,
) -> bool {
    line_of_sight(
        rays,
        origin.position,
        target,
        &ProbeAxes::from(origin),
        ignore,
        probe_distance,
    )
}

/// Line of sight between two actors. False if either no longer resolves.
pub fn actor_to_actor<H: ActorLookup + RayQuery + ?Sized>(
    host: &H,
    origin: ActorId,
    target: ActorId,
    ignore: &[ActorId],
    probe_distance: f64,
) -> bool {
    let (Some(origin_pose), Some(target_pose)) = (host.pose(origin), host.pose(target)) else {
        return false;
    };
    from_pose(host, &origin_pose, target_pose.position, ignore, probe_distance)
}

/// Visibility by the OR rule: either the camera or the owner seeing the target suffices.
pub fn visible_from_either<R: RayQuery + ?Sized>(
    rays: &R,
    camera: &Pose,
    owner: Option<&Pose>,
    target: DVec3,
    ignore: &[ActorId],
    probe_distance: f64,
) -> bool {
    from_pose(rays, camera, target, ignore, probe_distance)
        || owner.is_some_and(|pose| from_pose(rays, pose, target, ignore, probe_distance))
}
