use std::cmp::Ordering;

use crate::error::{Result, TubeError};

use super::{Tube, TubeId};

/// How one tube is chosen from a discovery result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TubeSelection {
    /// Longest duration, then most voxels, then smallest id.
    Longest,
    /// Most voxels, then longest duration, then smallest id.
    Largest,
    /// The tube with this id.
    Explicit(TubeId),
}

impl TubeSelection {
    /// Applies the policy to `tubes`.
    ///
    /// # Errors
    ///
    /// - [`TubeError::NoTubes`] if `tubes` is empty.
    /// - [`TubeError::Unknown`] if an explicit id is absent.
    pub fn select<'t>(&self, tubes: &'t [Tube]) -> Result<&'t Tube> {
        let best = match *self {
            TubeSelection::Explicit(id) => {
                return tubes
                    .iter()
                    .find(|t| t.id == id)
                    .ok_or_else(|| TubeError::Unknown(id).into());
            }
            TubeSelection::Longest => tubes.iter().max_by(|a, b| {
                a.duration()
                    .cmp(&b.duration())
                    .then(a.voxel_count.cmp(&b.voxel_count))
                    .then(smaller_id_wins(a, b))
            }),
            TubeSelection::Largest => tubes.iter().max_by(|a, b| {
                a.voxel_count
                    .cmp(&b.voxel_count)
                    .then(a.duration().cmp(&b.duration()))
                    .then(smaller_id_wins(a, b))
            }),
        };
        best.ok_or_else(|| TubeError::NoTubes.into())
    }
}

fn smaller_id_wins(a: &Tube, b: &Tube) -> Ordering {
    b.id.cmp(&a.id)
}
