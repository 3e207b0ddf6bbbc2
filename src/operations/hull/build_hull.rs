use tracing::debug;

use crate::error::{Result, VaseError};
use crate::geometry::VaseDefinition;
use crate::math::Point3;
use crate::mesh::TriangleMesh;

use super::{Hull, HullMetrics, PhysicalScale};

/// Lofts a vase's control profiles into a closed triangle mesh.
///
/// Each control profile becomes a ring of `n_theta` vertices at height
/// `timestamp * temporal`. Consecutive rings are joined by quad strips split
/// into two triangles each, and the first and last rings are capped with a
/// fan from their centroid. A single control profile yields only a flat fan.
pub struct BuildHull<'a> {
    vase: &'a VaseDefinition,
    scale: PhysicalScale,
}

impl<'a> BuildHull<'a> {
    /// Creates a new `BuildHull` operation.
    #[must_use]
    pub fn new(vase: &'a VaseDefinition, scale: PhysicalScale) -> Self {
        Self { vase, scale }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`VaseError::Empty`] if the vase has no control points.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<Hull> {
        let controls = self.vase.controls();
        if controls.is_empty() {
            return Err(VaseError::Empty.into());
        }
        let planar = self.scale.planar();
        let temporal = self.scale.temporal();
        let n = self.vase.n_theta();
        let n32 = n as u32;

        let mut mesh = TriangleMesh::default();
        for control in controls {
            let z = control.timestamp * temporal;
            for p in control.profile.ring_points() {
                mesh.push_vertex(Point3::new(p.x * planar, p.y * planar, z));
            }
        }

        // Lateral surface.
        for i in 0..controls.len().saturating_sub(1) {
            let lower = i as u32 * n32;
            let upper = lower + n32;
            for k in 0..n32 {
                let k1 = (k + 1) % n32;
                let (a, b) = (lower + k, lower + k1);
                let (c, d) = (upper + k1, upper + k);
                mesh.indices.push([a, b, c]);
                mesh.indices.push([a, c, d]);
            }
        }

        // Caps. The bottom fan is wound clockwise so its normal points down.
        let last = controls.len() - 1;
        let mut cap = |ring: usize, flip: bool| {
            let c = controls[ring].profile.centroid();
            let centre = mesh.push_vertex(Point3::new(
                c.x * planar,
                c.y * planar,
                controls[ring].timestamp * temporal,
            ));
            let base = ring as u32 * n32;
            for k in 0..n32 {
                let (a, b) = (base + k, base + (k + 1) % n32);
                mesh.indices
                    .push(if flip { [centre, b, a] } else { [centre, a, b] });
            }
        };
        if last == 0 {
            cap(0, false);
        } else {
            cap(0, true);
            cap(last, false);
        }

        let metrics = HullMetrics {
            scale: controls
                .iter()
                .map(|c| c.profile.max_radius())
                .fold(0.0, f64::max)
                * planar,
            duration: self.vase.time_span() * temporal,
            volume: frustum_volume(self.vase, self.scale),
            surface: mesh.surface_area(),
        };
        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            volume = metrics.volume,
            "hull built"
        );
        Ok(Hull { mesh, metrics })
    }
}

/// Sum over consecutive control pairs of mean cross-section area times the
/// scaled time gap.
fn frustum_volume(vase: &VaseDefinition, scale: PhysicalScale) -> f64 {
    let area_scale = scale.planar() * scale.planar();
    vase.controls()
        .windows(2)
        .map(|pair| {
            let a0 = pair[0].profile.area() * area_scale;
            let a1 = pair[1].profile.area() * area_scale;
            let dz = (pair[1].timestamp - pair[0].timestamp) * scale.temporal();
            0.5 * (a0 + a1) * dz
        })
        .sum()
}
