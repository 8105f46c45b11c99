//! Entity spawn factories for setting up the arena.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use lockon_core::types::{ClassTag, Pose, Rotator};

use crate::arena::actor_id;
use crate::components::{ActorClass, CameraRig, Collider, Occluder, Velocity};

pub const PLAYER_CLASS: &str = "Player";
pub const PLAYER_RADIUS: f64 = 40.0;

/// Spawn the player pawn and its camera rig. Returns `(pawn, camera)`.
pub fn spawn_player(
    world: &mut World,
    position: DVec3,
    rotation: Rotator,
    camera_offset: DVec3,
) -> (Entity, Entity) {
    let pawn = world.spawn((
        Pose::new(position, rotation),
        ActorClass(ClassTag::new(PLAYER_CLASS)),
        Collider {
            radius: PLAYER_RADIUS,
        },
    ));
    let camera = world.spawn((
        Pose::new(position + camera_offset, rotation),
        CameraRig {
            owner: actor_id(pawn),
            offset: camera_offset,
        },
    ));
    (pawn, camera)
}

/// Spawn a lockable actor. Zero velocity leaves it stationary.
pub fn spawn_actor(
    world: &mut World,
    class: &ClassTag,
    position: DVec3,
    radius: f64,
    velocity: DVec3,
) -> Entity {
    let entity = world.spawn((
        Pose::new(position, Rotator::ZERO),
        ActorClass(class.clone()),
        Collider { radius },
    ));
    if velocity != DVec3::ZERO {
        let _ = world.insert_one(entity, Velocity(velocity));
    }
    entity
}

/// Spawn a static visibility blocker.
pub fn spawn_occluder(world: &mut World, position: DVec3, occluder: Occluder) -> Entity {
    world.spawn((Pose::new(position, Rotator::ZERO), occluder))
}

/// Scatter `count` actors on the ground plane in a ring around `center`.
pub fn scatter_actors(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    class: &ClassTag,
    count: usize,
    center: DVec3,
    min_distance: f64,
    max_distance: f64,
) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            let bearing = rng.gen_range(0.0..std::f64::consts::TAU);
            let distance = if max_distance > min_distance {
                rng.gen_range(min_distance..max_distance)
            } else {
                min_distance
            };
            let offset = DVec3::new(bearing.cos(), bearing.sin(), 0.0) * distance;
            spawn_actor(world, class, center + offset, 0.0, DVec3::ZERO)
        })
        .collect()
}
