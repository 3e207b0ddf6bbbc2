use std::f64::consts::TAU;

use crate::error::{BoundaryError, GeometryError, Result};
use crate::math::distance_2d::point_to_ring_dist;
use crate::math::intersect_2d::ray_segment_intersect_2d;
use crate::math::polygon_2d::{area_centroid, contains_point};
use crate::math::{normalize_angle, Point2, Vector2, TOLERANCE};

use super::cross_section::{validate_ring, CentroidPolicy, CrossSection};

/// Angular sample count used when the caller does not choose one.
pub const DEFAULT_N_THETA: usize = 64;

/// Smallest angular sample count that still encloses an area.
pub const MIN_N_THETA: usize = 3;

/// A boundary re-expressed as a centre plus one radius per equally spaced angle.
///
/// Sample `k` lies at angle `2πk / n_theta`. Between samples the boundary
/// radius is interpolated linearly in angle, wrapping at `2π`. Shapes that are
/// not star-shaped about the centre are approximated by the radius of the
/// first boundary crossing along each ray.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialProfile {
    centroid: Point2,
    radii: Vec<f64>,
}

impl RadialProfile {
    /// Creates a profile from raw samples.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidSampleCount`] for fewer than
    /// [`MIN_N_THETA`] samples, [`GeometryError::InvalidRadius`] for negative or
    /// non-finite radii and [`BoundaryError::CentroidOutside`] for a non-finite centre.
    pub fn new(centroid: Point2, radii: Vec<f64>) -> Result<Self> {
        check_sample_count(radii.len())?;
        if !centroid.x.is_finite() || !centroid.y.is_finite() {
            return Err(BoundaryError::CentroidOutside {
                x: centroid.x,
                y: centroid.y,
            }
            .into());
        }
        if let Some((index, &value)) = radii
            .iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || **r < 0.0)
        {
            return Err(GeometryError::InvalidRadius { index, value }.into());
        }
        Ok(Self { centroid, radii })
    }

    /// A circle of constant radius.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RadialProfile::new`].
    pub fn circle(center: Point2, radius: f64, n_theta: usize) -> Result<Self> {
        Self::new(center, vec![radius; n_theta])
    }

    /// Samples the outer ring of a cross-section.
    ///
    /// # Errors
    ///
    /// See [`RadialProfile::from_ring`].
    pub fn from_cross_section(
        section: &CrossSection,
        n_theta: usize,
        policy: CentroidPolicy,
    ) -> Result<Self> {
        Self::from_ring(&section.outer, n_theta, policy)
    }

    /// Casts `n_theta` rays from the centre and records the distance to the
    /// first boundary crossing along each.
    ///
    /// # Errors
    ///
    /// - [`BoundaryError`] if the ring is malformed or the centre is not
    ///   strictly inside it.
    /// - [`GeometryError::RayMiss`] if a ray never crosses the ring.
    /// - [`GeometryError::InvalidSampleCount`] if `n_theta < MIN_N_THETA`.
    pub fn from_ring(points: &[Point2], n_theta: usize, policy: CentroidPolicy) -> Result<Self> {
        check_sample_count(n_theta)?;
        let ring = validate_ring(points)?;
        Self::sample_ring(&ring, n_theta, policy)
    }

    /// Samples a ring already known to be finite, simple and of non-zero
    /// area, such as a traced pixel boundary.
    pub(crate) fn from_simple_ring(
        ring: &[Point2],
        n_theta: usize,
        policy: CentroidPolicy,
    ) -> Result<Self> {
        check_sample_count(n_theta)?;
        Self::sample_ring(ring, n_theta, policy)
    }

    #[allow(clippy::cast_precision_loss)]
    fn sample_ring(ring: &[Point2], n_theta: usize, policy: CentroidPolicy) -> Result<Self> {
        let centroid = match policy {
            CentroidPolicy::AreaCentroid => area_centroid(ring).ok_or(BoundaryError::ZeroArea)?,
            CentroidPolicy::Explicit(c) => c,
        };
        if !is_strictly_inside(ring, &centroid) {
            return Err(BoundaryError::CentroidOutside {
                x: centroid.x,
                y: centroid.y,
            }
            .into());
        }

        let step = TAU / n_theta as f64;
        let radii = (0..n_theta)
            .map(|k| {
                let angle = step * k as f64;
                let dir = Vector2::new(angle.cos(), angle.sin());
                first_crossing(ring, &centroid, &dir).ok_or(GeometryError::RayMiss { angle })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { centroid, radii })
    }

    /// The centre all radii are measured from.
    #[must_use]
    pub fn centroid(&self) -> Point2 {
        self.centroid
    }

    /// Radius samples, one per angle.
    #[must_use]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Number of angular samples.
    #[must_use]
    pub fn n_theta(&self) -> usize {
        self.radii.len()
    }

    /// Angular spacing between samples, in radians.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn angle_step(&self) -> f64 {
        TAU / self.radii.len() as f64
    }

    /// Angle of sample `k`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn angle(&self, k: usize) -> f64 {
        self.angle_step() * k as f64
    }

    /// Largest radius sample.
    #[must_use]
    pub fn max_radius(&self) -> f64 {
        self.radii.iter().copied().fold(0.0, f64::max)
    }

    /// Boundary radius at an arbitrary angle, interpolated between the two
    /// bracketing samples.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn boundary_radius(&self, theta: f64) -> f64 {
        let n = self.radii.len();
        let pos = normalize_angle(theta) / self.angle_step();
        let base = pos.floor();
        let frac = pos - base;
        let i = (base as usize) % n;
        let j = (i + 1) % n;
        self.radii[i] + (self.radii[j] - self.radii[i]) * frac
    }

    /// Whether `(x, y)` lies on or inside the sampled boundary.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.centroid.x;
        let dy = y - self.centroid.y;
        let r = dx.hypot(dy);
        if r <= TOLERANCE {
            return true;
        }
        r <= self.boundary_radius(dy.atan2(dx)) + TOLERANCE
    }

    /// Area of the polygon through the sample points.
    #[must_use]
    pub fn area(&self) -> f64 {
        let n = self.radii.len();
        let sum: f64 = (0..n)
            .map(|k| self.radii[k] * self.radii[(k + 1) % n])
            .sum();
        0.5 * self.angle_step().sin() * sum
    }

    /// The sample points in counter-clockwise order.
    #[must_use]
    pub fn ring_points(&self) -> Vec<Point2> {
        self.radii
            .iter()
            .enumerate()
            .map(|(k, &r)| {
                let a = self.angle(k);
                Point2::new(self.centroid.x + r * a.cos(), self.centroid.y + r * a.sin())
            })
            .collect()
    }

    /// Componentwise blend towards `other` with weight `f`.
    ///
    /// Both profiles must share `n_theta`.
    pub(crate) fn lerp(&self, other: &Self, f: f64) -> Self {
        debug_assert_eq!(self.radii.len(), other.radii.len());
        let centroid = self.centroid + (other.centroid - self.centroid) * f;
        let radii = self
            .radii
            .iter()
            .zip(&other.radii)
            .map(|(a, b)| a + (b - a) * f)
            .collect();
        Self { centroid, radii }
    }
}

fn check_sample_count(n_theta: usize) -> Result<()> {
    if n_theta < MIN_N_THETA {
        return Err(GeometryError::InvalidSampleCount {
            got: n_theta,
            min: MIN_N_THETA,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn is_strictly_inside(ring: &[Point2], p: &Point2) -> bool {
    p.x.is_finite()
        && p.y.is_finite()
        && contains_point(ring, p)
        && point_to_ring_dist(p, ring) > TOLERANCE
}

/// Nearest crossing of the ray with any ring edge.
fn first_crossing(ring: &[Point2], origin: &Point2, dir: &Vector2) -> Option<f64> {
    let n = ring.len();
    (0..n)
        .filter_map(|i| ray_segment_intersect_2d(origin, dir, &ring[i], &ring[(i + 1) % n]))
        .min_by(f64::total_cmp)
}
