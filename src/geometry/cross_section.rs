use crate::error::{BoundaryError, Result};
use crate::math::polygon_2d::{dedup_ring, first_self_intersection, signed_area_2d};
use crate::math::{Point2, TOLERANCE};

/// A time-stamped boundary polygon as supplied by a caller.
///
/// Only the outer ring takes part in radial sampling; interior rings are
/// carried along but ignored by the radial envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    /// Timestamp in the grid's time-coordinate units.
    pub timestamp: f64,
    /// Outer ring, in order. A repeated closing point is allowed.
    pub outer: Vec<Point2>,
    /// Interior rings.
    pub holes: Vec<Vec<Point2>>,
}

/// How the centre of a radial profile is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CentroidPolicy {
    /// Area-weighted centroid of the outer ring.
    #[default]
    AreaCentroid,
    /// Caller-supplied centre.
    Explicit(Point2),
}

impl CrossSection {
    /// Creates a cross-section without interior rings.
    #[must_use]
    pub fn new(timestamp: f64, outer: Vec<Point2>) -> Self {
        Self {
            timestamp,
            outer,
            holes: Vec::new(),
        }
    }

    /// Adds an interior ring.
    #[must_use]
    pub fn with_hole(mut self, ring: Vec<Point2>) -> Self {
        self.holes.push(ring);
        self
    }

    /// Returns the outer ring with duplicate vertices removed, after checking
    /// that it is finite, non-degenerate and simple.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] describing the first defect found.
    pub fn validated_outer(&self) -> Result<Vec<Point2>> {
        validate_ring(&self.outer)
    }
}

/// Validates a closed ring, returning it with duplicate vertices removed.
///
/// # Errors
///
/// Returns [`BoundaryError`] describing the first defect found.
pub fn validate_ring(points: &[Point2]) -> Result<Vec<Point2>> {
    if let Some(i) = points
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(BoundaryError::NonFinite(i).into());
    }

    let ring = dedup_ring(points);
    if ring.len() < 3 {
        return Err(BoundaryError::TooFewPoints(ring.len()).into());
    }
    if signed_area_2d(&ring).abs() < TOLERANCE {
        return Err(BoundaryError::ZeroArea.into());
    }
    if let Some((first, second)) = first_self_intersection(&ring) {
        return Err(BoundaryError::NotSimple { first, second }.into());
    }
    Ok(ring)
}
