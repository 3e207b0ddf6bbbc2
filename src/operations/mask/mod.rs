mod build_mask;

pub use build_mask::BuildMask;

use crate::error::Result;
use crate::geometry::VaseDefinition;
use crate::grid::{BoolVolume, CoordinateSource};

/// A named boolean mask over a grid's `(time, y, x)` index space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelMask {
    name: String,
    description: String,
    volume: BoolVolume,
}

impl VoxelMask {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, volume: BoolVolume) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            volume,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The underlying boolean values.
    #[must_use]
    pub fn volume(&self) -> &BoolVolume {
        &self.volume
    }

    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        self.volume.shape()
    }

    /// Whether voxel `(t, y, x)` is inside the region.
    #[must_use]
    pub fn get(&self, t: usize, y: usize, x: usize) -> bool {
        self.volume.get(t, y, x)
    }

    /// Number of voxels inside the region.
    #[must_use]
    pub fn count_inside(&self) -> usize {
        self.volume.count_true()
    }

    /// Consumes the mask, returning its values.
    #[must_use]
    pub fn into_volume(self) -> BoolVolume {
        self.volume
    }
}

/// Builds the voxel mask of `vase` over `grid` with default chunking.
///
/// # Errors
///
/// See [`BuildMask::execute`].
pub fn build_mask<G>(grid: &G, vase: &VaseDefinition) -> Result<VoxelMask>
where
    G: CoordinateSource + ?Sized,
{
    BuildMask::new(vase).execute(grid)
}
