pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

use std::f64::consts::TAU;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn normalize_angle_wraps_negative() {
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < TOLERANCE);
    }

    #[test]
    fn normalize_angle_wraps_full_turns() {
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-9);
        assert!(normalize_angle(TAU).abs() < TOLERANCE);
    }

    #[test]
    fn normalize_angle_tiny_negative_stays_in_range() {
        let a = normalize_angle(-1e-300);
        assert!((0.0..TAU).contains(&a));
    }
}
