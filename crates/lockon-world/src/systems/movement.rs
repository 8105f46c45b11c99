//! Kinematic integration system.
//!
//! Updates each pose from its velocity: position += velocity * dt.

use hecs::World;

use lockon_core::types::Pose;

use crate::components::Velocity;

/// Run kinematic integration for all entities with Pose + Velocity.
pub fn run(world: &mut World, delta_secs: f64) {
    for (_entity, (pose, velocity)) in world.query_mut::<(&mut Pose, &Velocity)>() {
        pose.position += velocity.0 * delta_secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use lockon_core::types::Rotator;

    #[test]
    fn test_integrates_velocity() {
        let mut world = World::new();
        let moving = world.spawn((
            Pose::new(DVec3::ZERO, Rotator::ZERO),
            Velocity(DVec3::new(100.0, -50.0, 0.0)),
        ));
        let still = world.spawn((Pose::new(DVec3::ONE, Rotator::ZERO),));

        run(&mut world, 0.5);

        let pose = *world.get::<&Pose>(moving).unwrap();
        assert_eq!(pose.position, DVec3::new(50.0, -25.0, 0.0));
        let pose = *world.get::<&Pose>(still).unwrap();
        assert_eq!(pose.position, DVec3::ONE);
    }
}
