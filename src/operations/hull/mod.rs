mod build_hull;

pub use build_hull::BuildHull;

use crate::error::{GeometryError, Result};
use crate::geometry::VaseDefinition;
use crate::mesh::{Aabb, TriangleMesh};

/// Conversion from native grid units to the hull's physical units.
///
/// `planar` multiplies x/y coordinates; `temporal` multiplies time deltas
/// into the third-axis distance unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalScale {
    planar: f64,
    temporal: f64,
}

impl PhysicalScale {
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidScale`] unless both factors are finite
    /// and positive.
    pub fn new(planar: f64, temporal: f64) -> Result<Self> {
        for (name, value) in [("planar", planar), ("temporal", temporal)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::InvalidScale { name, value }.into());
            }
        }
        Ok(Self { planar, temporal })
    }

    #[must_use]
    pub fn planar(&self) -> f64 {
        self.planar
    }

    #[must_use]
    pub fn temporal(&self) -> f64 {
        self.temporal
    }
}

/// Scalar summaries of a hull, in physical units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HullMetrics {
    /// Largest radius sample across all control profiles.
    pub scale: f64,
    /// Time span between the first and last control profile.
    pub duration: f64,
    /// Enclosed volume (frustum approximation between consecutive rings).
    pub volume: f64,
    /// Total triangle area, caps included.
    pub surface: f64,
}

/// A triangulated surface through a vase's control profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Hull {
    mesh: TriangleMesh,
    metrics: HullMetrics,
}

impl Hull {
    /// Vertex positions and triangle indices.
    #[must_use]
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    #[must_use]
    pub fn metrics(&self) -> HullMetrics {
        self.metrics
    }

    /// Bounding box of the hull's vertices.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.mesh.bounding_box()
    }
}

/// Builds the hull of `vase`.
///
/// # Errors
///
/// See [`BuildHull::execute`].
pub fn build_hull(vase: &VaseDefinition, scale: PhysicalScale) -> Result<Hull> {
    BuildHull::new(vase, scale).execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoxloftError;

    #[test]
    fn scale_must_be_positive() {
        assert!(PhysicalScale::new(1.0, 1.0).is_ok());
        assert!(matches!(
            PhysicalScale::new(0.0, 1.0),
            Err(VoxloftError::Geometry(GeometryError::InvalidScale {
                name: "planar",
                ..
            }))
        ));
        assert!(matches!(
            PhysicalScale::new(1.0, f64::INFINITY),
            Err(VoxloftError::Geometry(GeometryError::InvalidScale {
                name: "temporal",
                ..
            }))
        ));
    }
}
