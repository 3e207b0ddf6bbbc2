use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::Result;
use crate::geometry::{RadialProfile, VaseDefinition};
use crate::grid::{BoolVolume, ChunkSpec, CoordinateSource, GridCoordinates, Region};

use super::VoxelMask;

/// Classifies every grid point against the vase's boundary at that point's time.
///
/// Only coordinate metadata is read from the grid. The grid is split into
/// blocks of [`ChunkSpec`] size which are classified independently and in
/// parallel, then placed into the result by index.
pub struct BuildMask<'a> {
    vase: &'a VaseDefinition,
    chunks: ChunkSpec,
    name: String,
    description: Option<String>,
}

impl<'a> BuildMask<'a> {
    /// Creates a new `BuildMask` operation with default chunking.
    #[must_use]
    pub fn new(vase: &'a VaseDefinition) -> Self {
        Self {
            vase,
            chunks: ChunkSpec::default(),
            name: "vase_mask".into(),
            description: None,
        }
    }

    /// Sets the block size used to split the grid.
    #[must_use]
    pub fn with_chunks(mut self, chunks: ChunkSpec) -> Self {
        self.chunks = chunks;
        self
    }

    /// Sets the mask name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the mask description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`](crate::error::GridError) if the chunk spec has a
    /// zero size or the grid's coordinates are missing, non-finite or not
    /// monotonic.
    pub fn execute<G>(&self, grid: &G) -> Result<VoxelMask>
    where
        G: CoordinateSource + ?Sized,
    {
        let coords = GridCoordinates::fetch(grid, &self.chunks)?;
        let shape = coords.shape();
        let regions = self.chunks.regions(shape);
        debug!(
            ?shape,
            blocks = regions.len(),
            controls = self.vase.len(),
            "building voxel mask"
        );

        // One profile per time step, shared by every block in that step.
        let profiles: Vec<RadialProfile> = coords
            .time()
            .par_iter()
            .map(|&t| self.vase.profile_at(t))
            .collect();

        let blocks: Vec<(Region, Vec<bool>)> = regions
            .into_par_iter()
            .map(|region| {
                let values = classify_block(&region, &profiles, &coords);
                (region, values)
            })
            .collect();

        let mut volume = BoolVolume::filled(shape, false);
        for (region, values) in blocks {
            trace!(?region, "placing block");
            for ([t, y, x], inside) in region.cells().zip(values) {
                if inside {
                    volume.set(t, y, x, true)?;
                }
            }
        }

        let description = self.description.clone().unwrap_or_else(|| {
            format!(
                "region lofted through {} control cross-section(s) with {:?} interpolation",
                self.vase.len(),
                self.vase.mode()
            )
        });
        let mask = VoxelMask::new(self.name.clone(), description, volume);
        debug!(inside = mask.count_inside(), "voxel mask built");
        Ok(mask)
    }
}

/// Containment flags for one block, in `(time, y, x)` row-major order.
fn classify_block(region: &Region, profiles: &[RadialProfile], coords: &GridCoordinates) -> Vec<bool> {
    let ys = &coords.y()[region.y.clone()];
    let xs = &coords.x()[region.x.clone()];
    let mut out = Vec::with_capacity(region.time.len() * ys.len() * xs.len());
    for t in region.time.clone() {
        let profile = &profiles[t];
        for &y in ys {
            for &x in xs {
                out.push(profile.contains(x, y));
            }
        }
    }
    out
}
