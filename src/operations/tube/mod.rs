mod discover;
mod select;
mod to_vase;
mod trace;

pub use discover::{discover_tubes_in, label_volume, DiscoverTubes, LabelVolume};
pub use select::TubeSelection;
pub use to_vase::ToVase;

use std::fmt;

use crate::error::Result;
use crate::geometry::{InterpolationMode, VaseDefinition, DEFAULT_N_THETA};
use crate::grid::{BoolVolume, GridCoordinates};

/// Identifier of a tube within one discovery pass, assigned in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TubeId(pub u32);

impl fmt::Display for TubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive index bounds of a tube in the y/x plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialExtent {
    pub y_min: usize,
    pub y_max: usize,
    pub x_min: usize,
    pub x_max: usize,
}

impl SpatialExtent {
    /// Rows covered.
    #[must_use]
    pub fn height(&self) -> usize {
        self.y_max - self.y_min + 1
    }

    /// Columns covered.
    #[must_use]
    pub fn width(&self) -> usize {
        self.x_max - self.x_min + 1
    }
}

/// A maximal face-connected region of `true` voxels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tube {
    pub id: TubeId,
    /// First voxel of the tube in `(time, y, x)` scan order.
    pub seed: [usize; 3],
    pub voxel_count: usize,
    /// Distinct time indices touched, ascending.
    pub time_indices: Vec<usize>,
    pub extent: SpatialExtent,
}

impl Tube {
    /// Time steps from the first to the last occupied index, gaps included.
    #[must_use]
    pub fn duration(&self) -> usize {
        match (self.time_indices.first(), self.time_indices.last()) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        }
    }
}

/// Settings for turning a tube back into a vase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryParams {
    /// Angular samples per traced slice.
    pub n_theta: usize,
    /// Interpolation mode of the resulting vase.
    pub mode: InterpolationMode,
    /// Tubes with fewer voxels are dropped by discovery.
    pub min_voxels: usize,
}

impl Default for DiscoveryParams {
    fn default() -> Self {
        Self {
            n_theta: DEFAULT_N_THETA,
            mode: InterpolationMode::Linear,
            min_voxels: 1,
        }
    }
}

impl DiscoveryParams {
    #[must_use]
    pub fn with_n_theta(mut self, n_theta: usize) -> Self {
        self.n_theta = n_theta;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: InterpolationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_min_voxels(mut self, min_voxels: usize) -> Self {
        self.min_voxels = min_voxels;
        self
    }
}

/// Labels every face-connected region of `volume`.
///
/// # Errors
///
/// See [`DiscoverTubes::execute`].
pub fn discover_tubes(volume: &BoolVolume) -> Result<Vec<Tube>> {
    DiscoverTubes::new(volume).execute()
}

/// Picks one tube according to `policy`.
///
/// # Errors
///
/// See [`TubeSelection::select`].
pub fn select_tube(tubes: &[Tube], policy: TubeSelection) -> Result<&Tube> {
    policy.select(tubes)
}

/// Traces `tube` slice by slice into a vase in `coords`' coordinate space.
///
/// # Errors
///
/// See [`ToVase::execute`].
pub fn to_vase(
    tube: &Tube,
    volume: &BoolVolume,
    coords: &GridCoordinates,
    params: DiscoveryParams,
) -> Result<VaseDefinition> {
    ToVase::new(tube, volume).with_params(params).execute(coords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_counts_gaps() {
        let tube = Tube {
            id: TubeId(0),
            seed: [2, 0, 0],
            voxel_count: 3,
            time_indices: vec![2, 3, 7],
            extent: SpatialExtent {
                y_min: 0,
                y_max: 4,
                x_min: 1,
                x_max: 1,
            },
        };
        assert_eq!(tube.duration(), 6);
        assert_eq!(tube.extent.height(), 5);
        assert_eq!(tube.extent.width(), 1);
    }

    #[test]
    fn params_builders() {
        let p = DiscoveryParams::default()
            .with_n_theta(16)
            .with_mode(InterpolationMode::Nearest)
            .with_min_voxels(4);
        assert_eq!(p.n_theta, 16);
        assert_eq!(p.mode, InterpolationMode::Nearest);
        assert_eq!(p.min_voxels, 4);
        assert_eq!(DiscoveryParams::default().n_theta, DEFAULT_N_THETA);
    }
}
