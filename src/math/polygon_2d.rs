use super::intersect_2d::segment_segment_intersect_2d;
use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Area-weighted centroid of a closed ring, or `None` if the ring has no area.
#[must_use]
pub fn area_centroid(points: &[Point2]) -> Option<Point2> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    // Work relative to the first vertex to keep the cross products small.
    let origin = points[0];
    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = points[i] - origin;
        let b = points[(i + 1) % n] - origin;
        let cross = a.x * b.y - b.x * a.y;
        area2 += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    if area2.abs() < TOLERANCE {
        return None;
    }
    Some(Point2::new(
        origin.x + cx / (3.0 * area2),
        origin.y + cy / (3.0 * area2),
    ))
}

/// Even-odd point-in-ring test. Points exactly on an edge may go either way.
#[must_use]
pub fn contains_point(points: &[Point2], p: &Point2) -> bool {
    let n = points.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = points[i];
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns the first pair of non-adjacent edges that touch or cross, if any.
///
/// Edge `i` runs from vertex `i` to vertex `i + 1` (wrapping).
#[must_use]
pub fn first_self_intersection(points: &[Point2]) -> Option<(usize, usize)> {
    let n = points.len();
    if n < 4 {
        return None;
    }
    for i in 0..n {
        let a0 = &points[i];
        let a1 = &points[(i + 1) % n];
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = &points[j];
            let b1 = &points[(j + 1) % n];
            if segment_segment_intersect_2d(a0, a1, b0, b1).is_some() {
                return Some((i, j));
            }
        }
    }
    None
}

/// Drops an explicit closing vertex and consecutive duplicates from a ring.
#[must_use]
pub fn dedup_ring(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_some_and(|q| (p - q).norm() < TOLERANCE) {
            continue;
        }
        out.push(*p);
    }
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() < TOLERANCE {
        out.pop();
    }
    out
}
