//! Segment intersection tests used by the arena's visibility query.

use glam::DVec3;

use crate::components::Occluder;

impl Occluder {
    /// Whether the segment `from -> to` touches this occluder centered at `center`.
    pub fn blocks(&self, center: DVec3, from: DVec3, to: DVec3) -> bool {
        match *self {
            Occluder::Sphere { radius } => segment_hits_sphere(from, to, center, radius),
            Occluder::Box { half_extents } => {
                segment_hits_aabb(from, to, center - half_extents, center + half_extents)
            }
        }
    }
}

/// Closest-point test between a segment and a sphere.
pub fn segment_hits_sphere(from: DVec3, to: DVec3, center: DVec3, radius: f64) -> bool {
    let segment = to - from;
    let len_sq = segment.length_squared();
    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((center - from).dot(segment) / len_sq).clamp(0.0, 1.0)
    };
    let closest = from + segment * t;
    closest.distance_squared(center) <= radius * radius
}

/// Slab test between a segment and an axis-aligned box.
pub fn segment_hits_aabb(from: DVec3, to: DVec3, min: DVec3, max: DVec3) -> bool {
    let direction = to - from;
    let mut t_enter = 0.0f64;
    let mut t_exit = 1.0f64;

    for axis in 0..3 {
        let origin = from[axis];
        let d = direction[axis];
        if d.abs() < f64::EPSILON {
            // Parallel to this slab: must already be inside it.
            if origin < min[axis] || origin > max[axis] {
                return false;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_and_miss() {
        let center = DVec3::new(100.0, 0.0, 0.0);
        assert!(segment_hits_sphere(DVec3::ZERO, DVec3::X * 200.0, center, 10.0));
        assert!(!segment_hits_sphere(
            DVec3::new(0.0, 20.0, 0.0),
            DVec3::new(200.0, 20.0, 0.0),
            center,
            10.0
        ));
    }

    #[test]
    fn test_sphere_behind_segment_end() {
        // Sphere lies on the ray's extension, past the segment end.
        let center = DVec3::new(300.0, 0.0, 0.0);
        assert!(!segment_hits_sphere(DVec3::ZERO, DVec3::X * 200.0, center, 50.0));
    }

    #[test]
    fn test_degenerate_segment() {
        assert!(segment_hits_sphere(DVec3::ONE, DVec3::ONE, DVec3::ZERO, 2.0));
        assert!(!segment_hits_sphere(DVec3::ONE, DVec3::ONE, DVec3::ZERO, 1.0));
    }

    #[test]
    fn test_aabb_crossing() {
        let min = DVec3::new(90.0, -10.0, -10.0);
        let max = DVec3::new(110.0, 10.0, 10.0);
        assert!(segment_hits_aabb(DVec3::ZERO, DVec3::X * 200.0, min, max));
        // Diagonal through a corner region.
        assert!(segment_hits_aabb(
            DVec3::new(0.0, -50.0, 0.0),
            DVec3::new(200.0, 50.0, 0.0),
            min,
            max
        ));
    }

    #[test]
    fn test_aabb_miss_and_short_segment() {
        let min = DVec3::new(90.0, -10.0, -10.0);
        let max = DVec3::new(110.0, 10.0, 10.0);
        assert!(!segment_hits_aabb(
            DVec3::new(0.0, 20.0, 0.0),
            DVec3::new(200.0, 20.0, 0.0),
            min,
            max
        ));
        // Stops before reaching the box.
        assert!(!segment_hits_aabb(DVec3::ZERO, DVec3::X * 80.0, min, max));
    }

    #[test]
    fn test_aabb_parallel_inside_slab() {
        let min = DVec3::new(-5.0, -5.0, -5.0);
        let max = DVec3::new(5.0, 5.0, 5.0);
        assert!(segment_hits_aabb(
            DVec3::new(0.0, -100.0, 0.0),
            DVec3::new(0.0, 100.0, 0.0),
            min,
            max
        ));
        assert!(!segment_hits_aabb(
            DVec3::new(6.0, -100.0, 0.0),
            DVec3::new(6.0, 100.0, 0.0),
            min,
            max
        ));
    }

    #[test]
    fn test_occluder_dispatch() {
        let center = DVec3::new(50.0, 0.0, 0.0);
        let wall = Occluder::Box {
            half_extents: DVec3::new(1.0, 100.0, 100.0),
        };
        assert!(wall.blocks(center, DVec3::ZERO, DVec3::X * 100.0));
        assert!(!wall.blocks(center, DVec3::ZERO, DVec3::X * 40.0));
        let ball = Occluder::Sphere { radius: 5.0 };
        assert!(ball.blocks(center, DVec3::ZERO, DVec3::X * 100.0));
    }
}
