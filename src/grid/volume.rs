use crate::error::{GridError, Result};

use super::{Region, ValueSource};

/// Dense boolean array indexed by `(time, y, x)`, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolVolume {
    shape: [usize; 3],
    data: Vec<bool>,
}

impl BoolVolume {
    /// Wraps row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if `data` does not hold exactly
    /// `shape[0] * shape[1] * shape[2]` values.
    pub fn new(shape: [usize; 3], data: Vec<bool>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(GridError::ShapeMismatch {
                expected: shape,
                found: [data.len(), 1, 1],
            }
            .into());
        }
        Ok(Self { shape, data })
    }

    /// A volume with every voxel set to `value`.
    #[must_use]
    pub fn filled(shape: [usize; 3], value: bool) -> Self {
        Self {
            shape,
            data: vec![value; shape.iter().product()],
        }
    }

    /// A volume whose voxels are given by `f(t, y, x)`.
    #[must_use]
    pub fn from_fn(shape: [usize; 3], mut f: impl FnMut(usize, usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(shape.iter().product());
        for t in 0..shape[0] {
            for y in 0..shape[1] {
                for x in 0..shape[2] {
                    data.push(f(t, y, x));
                }
            }
        }
        Self { shape, data }
    }

    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Total number of voxels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of `(t, y, x)`.
    #[must_use]
    pub fn index(&self, t: usize, y: usize, x: usize) -> usize {
        (t * self.shape[1] + y) * self.shape[2] + x
    }

    /// `(t, y, x)` of a flat index.
    #[must_use]
    pub fn unravel(&self, index: usize) -> [usize; 3] {
        let plane = self.shape[1] * self.shape[2];
        [
            index / plane,
            (index % plane) / self.shape[2],
            index % self.shape[2],
        ]
    }

    /// Value at `(t, y, x)`; out-of-range positions read as `false`.
    #[must_use]
    pub fn get(&self, t: usize, y: usize, x: usize) -> bool {
        t < self.shape[0] && y < self.shape[1] && x < self.shape[2] && self.data[self.index(t, y, x)]
    }

    /// Sets the value at `(t, y, x)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the position is out of range.
    pub fn set(&mut self, t: usize, y: usize, x: usize, value: bool) -> Result<()> {
        if t >= self.shape[0] || y >= self.shape[1] || x >= self.shape[2] {
            return Err(GridError::OutOfBounds {
                index: [t, y, x],
                shape: self.shape,
            }
            .into());
        }
        let i = self.index(t, y, x);
        self.data[i] = value;
        Ok(())
    }

    /// Number of `true` voxels.
    #[must_use]
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Row-major view of the values.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }
}

impl ValueSource for BoolVolume {
    fn shape(&self) -> [usize; 3] {
        self.shape
    }

    fn materialize(&self, region: &Region) -> Result<BoolVolume> {
        region.check_within(self.shape)?;
        let shape = region.shape();
        let mut data = Vec::with_capacity(shape.iter().product());
        for t in region.time.clone() {
            for y in region.y.clone() {
                let row = self.index(t, y, region.x.start);
                data.extend_from_slice(&self.data[row..row + shape[2]]);
            }
        }
        Ok(BoolVolume { shape, data })
    }
}
