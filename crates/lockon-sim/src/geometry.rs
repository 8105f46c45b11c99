//! Stateless angle and vector helpers used by selection and convergence.

use glam::DVec3;

use lockon_core::types::Rotator;

/// Angle between two directions in degrees, in `[0, 180]`.
///
/// Returns `None` when either vector has zero length. The cosine is clamped
/// so rounding on (anti)parallel inputs cannot produce NaN.
pub fn angle_between(a: DVec3, b: DVec3) -> Option<f64> {
    let magnitude = (a.length_squared() * b.length_squared()).sqrt();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return None;
    }
    let cos = (a.dot(b) / magnitude).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Signed minimal delta in `(-180, 180]` that rotates `origin` onto `target`.
///
/// Both inputs are taken modulo 360, so `origin + delta ≡ target (mod 360)`.
pub fn shortest_rotation_delta(target: f64, origin: f64) -> f64 {
    let delta = (target.rem_euclid(360.0) - origin.rem_euclid(360.0)).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Component of `v` along `onto`. Zero when `onto` is zero.
pub fn project_onto(v: DVec3, onto: DVec3) -> DVec3 {
    let len_sq = onto.length_squared();
    if len_sq == 0.0 {
        return DVec3::ZERO;
    }
    onto * (v.dot(onto) / len_sq)
}

/// Rotation that looks from `from` toward `to`, roll 0.
pub fn look_at(from: DVec3, to: DVec3) -> Rotator {
    Rotator::from_direction(to - from)
}
