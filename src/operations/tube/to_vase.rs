use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::error::{GridError, Result, TubeError};
use crate::geometry::radial_profile::is_strictly_inside;
use crate::geometry::{CentroidPolicy, RadialProfile, VaseDefinition};
use crate::grid::{Axis, BoolVolume, CoordinateSource, GridCoordinates};
use crate::math::polygon_2d::{area_centroid, signed_area_2d};
use crate::math::{Point2, TOLERANCE};

use super::discover::flood;
use super::trace::outer_boundary;
use super::{DiscoveryParams, Tube};

/// Re-expresses a discovered tube as a vase with one control profile per
/// occupied time step.
///
/// Each slice's outer pixel boundary is traced along cell edges, mapped into
/// grid coordinates and sampled radially. Slices are traced in parallel; the
/// vase is only returned once every slice has succeeded.
pub struct ToVase<'a> {
    tube: &'a Tube,
    volume: &'a BoolVolume,
    params: DiscoveryParams,
}

impl<'a> ToVase<'a> {
    /// Creates a new `ToVase` operation with default parameters.
    #[must_use]
    pub fn new(tube: &'a Tube, volume: &'a BoolVolume) -> Self {
        Self {
            tube,
            volume,
            params: DiscoveryParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: DiscoveryParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation against the grid's coordinates.
    ///
    /// # Errors
    ///
    /// - [`GridError::ShapeMismatch`] if `coords` and the volume disagree.
    /// - [`TubeError::StaleTube`] if the tube was not discovered in this volume.
    /// - [`TubeError::DegenerateSlice`] if a slice traces to a zero-area boundary.
    /// - Boundary, geometry and vase errors from sampling the traced rings.
    pub fn execute(&self, coords: &GridCoordinates) -> Result<VaseDefinition> {
        let shape = self.volume.shape();
        if coords.shape() != shape {
            return Err(GridError::ShapeMismatch {
                expected: shape,
                found: coords.shape(),
            }
            .into());
        }

        let [t0, y0, x0] = self.tube.seed;
        let mut member = vec![false; self.volume.len()];
        let count = if self.volume.get(t0, y0, x0) {
            flood(self.volume, self.volume.index(t0, y0, x0), |i| {
                !std::mem::replace(&mut member[i], true)
            })
            .len()
        } else {
            0
        };
        if count != self.tube.voxel_count {
            return Err(TubeError::StaleTube { id: self.tube.id }.into());
        }

        debug!(
            tube = %self.tube.id,
            slices = self.tube.time_indices.len(),
            n_theta = self.params.n_theta,
            "tracing tube boundaries"
        );
        let controls = self
            .tube
            .time_indices
            .par_iter()
            .map(|&t| self.trace_slice(t, &member, coords))
            .collect::<Result<Vec<_>>>()?;

        VaseDefinition::new(controls, self.params.mode)
    }

    fn trace_slice(
        &self,
        t: usize,
        member: &[bool],
        coords: &GridCoordinates,
    ) -> Result<(f64, RadialProfile)> {
        let [_, ny, nx] = self.volume.shape();
        let inside = |y: usize, x: usize| member[self.volume.index(t, y, x)];

        let corners =
            outer_boundary(ny, nx, inside).ok_or(TubeError::DegenerateSlice { time_index: t })?;
        let ring: Vec<Point2> = corners
            .iter()
            .map(|&(xe, ye)| {
                Point2::new(coords.cell_edge(Axis::X, xe), coords.cell_edge(Axis::Y, ye))
            })
            .collect();
        if signed_area_2d(&ring).abs() < TOLERANCE {
            return Err(TubeError::DegenerateSlice { time_index: t }.into());
        }

        let policy = match area_centroid(&ring) {
            Some(c) if is_strictly_inside(&ring, &c) => CentroidPolicy::AreaCentroid,
            centroid => {
                let target = centroid.unwrap_or(ring[0]);
                let centre = (0..ny)
                    .flat_map(|y| (0..nx).map(move |x| (y, x)))
                    .filter(|&(y, x)| inside(y, x))
                    .map(|(y, x)| Point2::new(coords.x()[x], coords.y()[y]))
                    .filter(|p| is_strictly_inside(&ring, p))
                    .min_by(|a, b| (*a - target).norm().total_cmp(&(*b - target).norm()))
                    .ok_or(TubeError::DegenerateSlice { time_index: t })?;
                warn!(
                    time_index = t,
                    x = centre.x,
                    y = centre.y,
                    "area centroid lies outside the traced boundary, using nearest member pixel"
                );
                CentroidPolicy::Explicit(centre)
            }
        };

        trace!(time_index = t, vertices = ring.len(), "slice traced");
        let profile = RadialProfile::from_simple_ring(&ring, self.params.n_theta, policy)?;
        Ok((coords.time()[t], profile))
    }
}
