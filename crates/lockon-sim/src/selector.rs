//! One-shot target selection.
//!
//! Gathers every actor of the lockable classes inside the lock radius around
//! the owner, filters by camera distance and view angle, optionally requires
//! line of sight, and keeps the nearest survivor.

use tracing::debug;

use lockon_core::config::LockConfig;
use lockon_core::host::{ActorLookup, RayQuery, SpatialQuery};
use lockon_core::types::{ActorId, Pose};

use crate::geometry::angle_between;
use crate::los;

/// Who is looking, and from where.
pub struct SelectionContext {
    pub owner: ActorId,
    pub owner_pose: Pose,
    pub camera_pose: Pose,
}

/// The chosen target and how it scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub target: ActorId,
    /// Camera-to-target distance.
    pub distance: f64,
    /// Angle from camera forward (degrees).
    pub angle: f64,
}

/// Pick the nearest eligible candidate, or `None`.
///
/// Ties keep the first candidate in the order the spatial query returned
/// them, which is host-defined.
pub fn select_target<H>(host: &H, ctx: &SelectionContext, config: &LockConfig) -> Option<Selection>
where
    H: ActorLookup + SpatialQuery + RayQuery + ?Sized,
{
    let radius = config.max_distance_to_start_target_lock;
    let camera_position = ctx.camera_pose.position;
    let camera_forward = ctx.camera_pose.forward();

    let mut candidates = Vec::new();
    for class in &config.lockable_classes {
        candidates.extend(host.sphere_overlap(ctx.owner_pose.position, radius, class));
    }

    let mut best: Option<Selection> = None;
    let mut rejected = 0usize;

    for candidate in candidates {
        if candidate == ctx.owner {
            continue;
        }
        let Some(pose) = host.pose(candidate) else {
            continue;
        };

        let distance = camera_position.distance(pose.position);
        if distance >= radius {
            rejected += 1;
            continue;
        }
        if best.is_some_and(|b| distance >= b.distance) {
            continue;
        }

        let Some(angle) = angle_between(camera_forward, pose.position - camera_position) else {
            rejected += 1;
            continue;
        };
        if angle > config.max_angle_to_target {
            rejected += 1;
            continue;
        }

        if config.do_line_of_sight_check {
            let ignore = [candidate, ctx.owner];
            let visible = los::visible_from_either(
                host,
                &ctx.camera_pose,
                Some(&ctx.owner_pose),
                pose.position,
                &ignore,
                config.line_of_sight_probe_distance,
            );
            if !visible {
                rejected += 1;
                continue;
            }
        }

        best = Some(Selection {
            target: candidate,
            distance,
            angle,
        });
    }

    debug!(
        rejected,
        selected = ?best.map(|b| b.target),
        "target selection finished"
    );
    best
}
