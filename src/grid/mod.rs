mod coordinates;
mod volume;

pub use coordinates::GridCoordinates;
pub use volume::BoolVolume;

use std::fmt;
use std::ops::Range;

use crate::error::{GridError, Result};

/// One of the three grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Time,
    Y,
    X,
}

impl Axis {
    /// All axes in `(time, y, x)` order.
    pub const ALL: [Axis; 3] = [Axis::Time, Axis::Y, Axis::X];

    /// Position of this axis in a `(time, y, x)` shape.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::Time => 0,
            Axis::Y => 1,
            Axis::X => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Time => "time",
            Axis::Y => "y",
            Axis::X => "x",
        })
    }
}

/// Read access to a grid's coordinate metadata, by contiguous sub-range.
///
/// Implementations must not need to touch bulk cube values to answer.
pub trait CoordinateSource: Sync {
    /// Number of coordinates along `axis`.
    fn axis_len(&self, axis: Axis) -> usize;

    /// Coordinates for `range` along `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::RangeOutOfBounds`] if `range` exceeds the axis.
    fn coordinate_range(&self, axis: Axis, range: Range<usize>) -> Result<Vec<f64>>;

    /// The `(time, y, x)` shape.
    fn shape(&self) -> [usize; 3] {
        Axis::ALL.map(|a| self.axis_len(a))
    }
}

/// Materialises boolean values for a region of a grid.
pub trait ValueSource {
    /// The `(time, y, x)` shape of the whole source.
    fn shape(&self) -> [usize; 3];

    /// Realises the values inside `region` as a dense volume.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the region exceeds the source.
    fn materialize(&self, region: &Region) -> Result<BoolVolume>;
}

/// A box of contiguous index ranges along each axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub time: Range<usize>,
    pub y: Range<usize>,
    pub x: Range<usize>,
}

impl Region {
    #[must_use]
    pub fn new(time: Range<usize>, y: Range<usize>, x: Range<usize>) -> Self {
        Self { time, y, x }
    }

    /// The region covering a whole shape.
    #[must_use]
    pub fn full(shape: [usize; 3]) -> Self {
        Self::new(0..shape[0], 0..shape[1], 0..shape[2])
    }

    /// Range along one axis.
    #[must_use]
    pub fn range(&self, axis: Axis) -> Range<usize> {
        match axis {
            Axis::Time => self.time.clone(),
            Axis::Y => self.y.clone(),
            Axis::X => self.x.clone(),
        }
    }

    /// Extent along each axis.
    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        Axis::ALL.map(|a| self.range(a).len())
    }

    /// Every `[t, y, x]` index inside the region, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.time.clone().flat_map(move |t| {
            self.y
                .clone()
                .flat_map(move |y| self.x.clone().map(move |x| [t, y, x]))
        })
    }

    /// Checks the region fits within `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::RangeOutOfBounds`] for the first axis that overflows.
    pub fn check_within(&self, shape: [usize; 3]) -> Result<()> {
        for axis in Axis::ALL {
            check_range(axis, &self.range(axis), shape[axis.index()])?;
        }
        Ok(())
    }
}

/// Block sizes used to split a grid into independently processed chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpec {
    pub time: usize,
    pub y: usize,
    pub x: usize,
}

impl Default for ChunkSpec {
    fn default() -> Self {
        Self {
            time: 1,
            y: 256,
            x: 256,
        }
    }
}

impl ChunkSpec {
    #[must_use]
    pub fn new(time: usize, y: usize, x: usize) -> Self {
        Self { time, y, x }
    }

    /// Chunk size along one axis.
    #[must_use]
    pub fn size(&self, axis: Axis) -> usize {
        match axis {
            Axis::Time => self.time,
            Axis::Y => self.y,
            Axis::X => self.x,
        }
    }

    /// Rejects zero-sized chunks.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroChunk`] naming the offending axis.
    pub fn validate(&self) -> Result<()> {
        match Axis::ALL.into_iter().find(|&a| self.size(a) == 0) {
            Some(axis) => Err(GridError::ZeroChunk(axis).into()),
            None => Ok(()),
        }
    }

    /// Splits `0..len` along `axis` into consecutive chunk ranges.
    #[must_use]
    pub fn ranges(&self, axis: Axis, len: usize) -> Vec<Range<usize>> {
        let step = self.size(axis).max(1);
        (0..len)
            .step_by(step)
            .map(|start| start..(start + step).min(len))
            .collect()
    }

    /// Every block of a grid with the given shape, in `(time, y, x)` order.
    #[must_use]
    pub fn regions(&self, shape: [usize; 3]) -> Vec<Region> {
        let ts = self.ranges(Axis::Time, shape[0]);
        let ys = self.ranges(Axis::Y, shape[1]);
        let xs = self.ranges(Axis::X, shape[2]);
        let mut out = Vec::with_capacity(ts.len() * ys.len() * xs.len());
        for t in &ts {
            for y in &ys {
                for x in &xs {
                    out.push(Region::new(t.clone(), y.clone(), x.clone()));
                }
            }
        }
        out
    }
}

pub(crate) fn check_range(axis: Axis, range: &Range<usize>, len: usize) -> Result<()> {
    if range.start > range.end || range.end > len {
        return Err(GridError::RangeOutOfBounds {
            axis,
            start: range.start,
            end: range.end,
            len,
        }
        .into());
    }
    Ok(())
}
