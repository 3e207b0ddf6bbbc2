use std::ops::Range;

use crate::error::{GridError, Result};

use super::{check_range, Axis, ChunkSpec, CoordinateSource};

/// Validated, in-memory coordinate arrays for a `(time, y, x)` grid.
///
/// Time is strictly increasing; y and x are strictly monotonic in either
/// direction and need not be evenly spaced.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCoordinates {
    time: Vec<f64>,
    y: Vec<f64>,
    x: Vec<f64>,
}

impl GridCoordinates {
    /// # Errors
    ///
    /// Returns [`GridError`] if an axis is empty, non-finite or not monotonic.
    pub fn new(time: Vec<f64>, y: Vec<f64>, x: Vec<f64>) -> Result<Self> {
        validate_axis(Axis::Time, &time)?;
        validate_axis(Axis::Y, &y)?;
        validate_axis(Axis::X, &x)?;
        Ok(Self { time, y, x })
    }

    /// Coordinates equal to the integer indices of a grid with `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyAxis`] if any extent is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn index_space(shape: [usize; 3]) -> Result<Self> {
        let axis = |n: usize| (0..n).map(|i| i as f64).collect::<Vec<_>>();
        Self::new(axis(shape[0]), axis(shape[1]), axis(shape[2]))
    }

    /// Reads every axis of `source` chunk by chunk and validates the result.
    ///
    /// # Errors
    ///
    /// Propagates source errors, returns [`GridError::ShapeMismatch`] if a
    /// chunk comes back with the wrong length, and otherwise the same errors
    /// as [`GridCoordinates::new`].
    pub fn fetch<S>(source: &S, chunks: &ChunkSpec) -> Result<Self>
    where
        S: CoordinateSource + ?Sized,
    {
        chunks.validate()?;
        let shape = source.shape();
        let mut axes: [Vec<f64>; 3] = Default::default();
        for axis in Axis::ALL {
            let len = shape[axis.index()];
            let mut values = Vec::with_capacity(len);
            for range in chunks.ranges(axis, len) {
                let part = source.coordinate_range(axis, range.clone())?;
                if part.len() != range.len() {
                    let mut found = shape;
                    found[axis.index()] = values.len() + part.len();
                    return Err(GridError::ShapeMismatch {
                        expected: shape,
                        found,
                    }
                    .into());
                }
                values.extend(part);
            }
            axes[axis.index()] = values;
        }
        let [time, y, x] = axes;
        Self::new(time, y, x)
    }

    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Coordinates along `axis`.
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Time => &self.time,
            Axis::Y => &self.y,
            Axis::X => &self.x,
        }
    }

    /// Position of cell edge `i` along `axis`, for `i` in `0..=len`.
    ///
    /// Interior edges sit midway between neighbouring coordinates; the outer
    /// edges extend by half the adjacent spacing. A single coordinate is
    /// treated as a unit-wide cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_edge(&self, axis: Axis, i: usize) -> f64 {
        let c = self.axis(axis);
        let n = c.len();
        if n == 1 {
            return c[0] + (i as f64 - 0.5);
        }
        if i == 0 {
            c[0] - (c[1] - c[0]) * 0.5
        } else if i >= n {
            c[n - 1] + (c[n - 1] - c[n - 2]) * 0.5
        } else {
            (c[i - 1] + c[i]) * 0.5
        }
    }
}

impl CoordinateSource for GridCoordinates {
    fn axis_len(&self, axis: Axis) -> usize {
        self.axis(axis).len()
    }

    fn coordinate_range(&self, axis: Axis, range: Range<usize>) -> Result<Vec<f64>> {
        let values = self.axis(axis);
        check_range(axis, &range, values.len())?;
        Ok(values[range].to_vec())
    }
}

fn validate_axis(axis: Axis, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(GridError::EmptyAxis(axis).into());
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(GridError::NonFinite { axis, index }.into());
    }
    if values.len() < 2 {
        return Ok(());
    }

    let increasing = values[1] > values[0];
    if axis == Axis::Time && !increasing {
        return Err(GridError::NonMonotonic { axis, index: 1 }.into());
    }
    for i in 1..values.len() {
        let ok = if increasing {
            values[i] > values[i - 1]
        } else {
            values[i] < values[i - 1]
        };
        if !ok {
            return Err(GridError::NonMonotonic { axis, index: i }.into());
        }
    }
    Ok(())
}
