use super::{Point2, Vector2, TOLERANCE};

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel segments never intersect.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Distance along the ray `origin + t * dir` at which it crosses segment `b0`-`b1`.
///
/// `dir` is expected to be a unit vector, so the returned `t` is a distance.
/// Crossings at `t <= TOLERANCE` are ignored.
#[must_use]
pub fn ray_segment_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    b0: &Point2,
    b1: &Point2,
) -> Option<f64> {
    let db = b1 - b0;
    let cross = dir.x * db.y - dir.y * db.x;
    if cross.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - origin.x;
    let dy = b0.y - origin.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * dir.y - dy * dir.x) / cross;

    if t > TOLERANCE && u >= -TOLERANCE && u <= 1.0 + TOLERANCE {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_segments() {
        let (pt, t, u) =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0))
                .unwrap();
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!((pt.y - 1.0).abs() < TOLERANCE);
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn disjoint_segments() {
        assert!(
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 1.0), &p(2.0, -1.0))
                .is_none()
        );
    }

    #[test]
    fn parallel_segments() {
        assert!(
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0))
                .is_none()
        );
    }

    #[test]
    fn touching_endpoints_count() {
        assert!(
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0))
                .is_some()
        );
    }

    #[test]
    fn ray_hits_segment_ahead() {
        let t = ray_segment_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(3.0, -1.0),
            &p(3.0, 1.0),
        )
        .unwrap();
        assert!((t - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn ray_ignores_segment_behind() {
        assert!(ray_segment_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(-3.0, -1.0),
            &p(-3.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn ray_misses_short_segment() {
        assert!(ray_segment_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(3.0, 1.0),
            &p(3.0, 2.0),
        )
        .is_none());
    }
}
