use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use crate::error::{GridError, Result};
use crate::grid::{Axis, BoolVolume, Region, ValueSource};

use super::{SpatialExtent, Tube, TubeId};

/// Per-voxel tube labels produced by a discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVolume {
    shape: [usize; 3],
    labels: Vec<Option<TubeId>>,
}

impl LabelVolume {
    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Label of voxel `(t, y, x)`; `None` for `false` voxels, dropped tubes
    /// and out-of-range positions.
    #[must_use]
    pub fn get(&self, t: usize, y: usize, x: usize) -> Option<TubeId> {
        if t >= self.shape[0] || y >= self.shape[1] || x >= self.shape[2] {
            return None;
        }
        self.labels[(t * self.shape[1] + y) * self.shape[2] + x]
    }
}

/// Labels the face-connected components of a materialised suitability volume.
///
/// Two `true` voxels share a tube iff a chain of single-axis unit steps
/// through `true` voxels joins them. Labels are assigned in `(time, y, x)`
/// scan order.
pub struct DiscoverTubes<'a> {
    volume: &'a BoolVolume,
    min_voxels: usize,
}

impl<'a> DiscoverTubes<'a> {
    /// Creates a new `DiscoverTubes` operation keeping every tube.
    #[must_use]
    pub fn new(volume: &'a BoolVolume) -> Self {
        Self {
            volume,
            min_voxels: 1,
        }
    }

    /// Drops tubes with fewer than `min_voxels` voxels.
    #[must_use]
    pub fn with_min_voxels(mut self, min_voxels: usize) -> Self {
        self.min_voxels = min_voxels;
        self
    }

    /// Executes the operation, returning the tubes in id order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyAxis`] if the volume has a zero extent.
    pub fn execute(&self) -> Result<Vec<Tube>> {
        self.execute_labeled().map(|(_, tubes)| tubes)
    }

    /// Like [`DiscoverTubes::execute`], also returning the label of every voxel.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyAxis`] if the volume has a zero extent.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute_labeled(&self) -> Result<(LabelVolume, Vec<Tube>)> {
        let shape = self.volume.shape();
        if let Some(axis) = Axis::ALL.into_iter().find(|a| shape[a.index()] == 0) {
            return Err(GridError::EmptyAxis(axis).into());
        }

        let data = self.volume.as_slice();
        let mut labels: Vec<Option<TubeId>> = vec![None; data.len()];
        let mut visited = vec![false; data.len()];
        let mut tubes = Vec::new();
        let mut dropped = 0usize;

        for start in 0..data.len() {
            if !data[start] || visited[start] {
                continue;
            }
            let members = flood(self.volume, start, |i| {
                !std::mem::replace(&mut visited[i], true)
            });
            if members.len() < self.min_voxels {
                dropped += 1;
                continue;
            }

            let id = TubeId(tubes.len() as u32);
            for &i in &members {
                labels[i] = Some(id);
            }
            tubes.push(summarize(self.volume, id, &members));
        }

        debug!(
            ?shape,
            tubes = tubes.len(),
            dropped,
            "tube discovery finished"
        );
        Ok((LabelVolume { shape, labels }, tubes))
    }
}

/// Labels `volume` and returns the per-voxel labels alongside the tubes.
///
/// # Errors
///
/// See [`DiscoverTubes::execute_labeled`].
pub fn label_volume(volume: &BoolVolume) -> Result<(LabelVolume, Vec<Tube>)> {
    DiscoverTubes::new(volume).execute_labeled()
}

/// Materialises `region` of `source` and discovers tubes inside it.
///
/// Tube indices are relative to the region's origin.
///
/// # Errors
///
/// Propagates materialisation errors and those of [`DiscoverTubes::execute`].
pub fn discover_tubes_in<S>(source: &S, region: &Region) -> Result<Vec<Tube>>
where
    S: ValueSource + ?Sized,
{
    let volume = source.materialize(region)?;
    DiscoverTubes::new(&volume).execute()
}

/// Breadth-first flood over face-adjacent `true` voxels from `start`.
///
/// `claim` is called once per reachable voxel and returns `false` if the
/// voxel was already taken. Returns the claimed flat indices in visit order.
pub(crate) fn flood(
    volume: &BoolVolume,
    start: usize,
    mut claim: impl FnMut(usize) -> bool,
) -> Vec<usize> {
    let data = volume.as_slice();
    let [nt, ny, nx] = volume.shape();
    let mut members = Vec::new();
    if !data[start] || !claim(start) {
        return members;
    }

    let mut queue = VecDeque::from([start]);
    while let Some(i) = queue.pop_front() {
        members.push(i);
        let [t, y, x] = volume.unravel(i);
        let mut neighbours = [None; 6];
        if t > 0 {
            neighbours[0] = Some(volume.index(t - 1, y, x));
        }
        if t + 1 < nt {
            neighbours[1] = Some(volume.index(t + 1, y, x));
        }
        if y > 0 {
            neighbours[2] = Some(volume.index(t, y - 1, x));
        }
        if y + 1 < ny {
            neighbours[3] = Some(volume.index(t, y + 1, x));
        }
        if x > 0 {
            neighbours[4] = Some(volume.index(t, y, x - 1));
        }
        if x + 1 < nx {
            neighbours[5] = Some(volume.index(t, y, x + 1));
        }
        for n in neighbours.into_iter().flatten() {
            if data[n] && claim(n) {
                queue.push_back(n);
            }
        }
    }
    members
}

fn summarize(volume: &BoolVolume, id: TubeId, members: &[usize]) -> Tube {
    let seed = volume.unravel(members.iter().copied().min().unwrap_or_default());
    let mut times = BTreeSet::new();
    let mut extent = SpatialExtent {
        y_min: usize::MAX,
        y_max: 0,
        x_min: usize::MAX,
        x_max: 0,
    };
    for &i in members {
        let [t, y, x] = volume.unravel(i);
        times.insert(t);
        extent.y_min = extent.y_min.min(y);
        extent.y_max = extent.y_max.max(y);
        extent.x_min = extent.x_min.min(x);
        extent.x_max = extent.x_max.max(x);
    }
    Tube {
        id,
        seed,
        voxel_count: members.len(),
        time_indices: times.into_iter().collect(),
        extent,
    }
}
