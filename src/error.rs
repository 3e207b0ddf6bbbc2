use thiserror::Error;

use crate::grid::Axis;
use crate::operations::tube::TubeId;

/// Top-level error type for the voxloft engine.
#[derive(Debug, Error)]
pub enum VoxloftError {
    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Vase(#[from] VaseError),

    #[error(transparent)]
    Tube(#[from] TubeError),
}

/// Malformed boundary polygons.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("outer ring needs at least 3 distinct points, got {0}")]
    TooFewPoints(usize),

    #[error("ring point {0} has a non-finite coordinate")]
    NonFinite(usize),

    #[error("ring encloses zero area")]
    ZeroArea,

    #[error("ring is not simple: segments {first} and {second} intersect")]
    NotSimple { first: usize, second: usize },

    #[error("centroid ({x}, {y}) is not strictly inside the outer ring")]
    CentroidOutside { x: f64, y: f64 },
}

/// Failures while resolving radial samples or scales.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("ray at angle {angle} rad does not cross the boundary")]
    RayMiss { angle: f64 },

    #[error("angular sample count must be at least {min}, got {got}")]
    InvalidSampleCount { got: usize, min: usize },

    #[error("radius sample {index} = {value} is negative or non-finite")]
    InvalidRadius { index: usize, value: f64 },

    #[error("{name} scale must be finite and positive, got {value}")]
    InvalidScale { name: &'static str, value: f64 },
}

/// Missing or inconsistent grid coordinate data.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("{0} axis has no coordinates")]
    EmptyAxis(Axis),

    #[error("{axis} coordinate {index} is not finite")]
    NonFinite { axis: Axis, index: usize },

    #[error("{axis} coordinates are not strictly monotonic at index {index}")]
    NonMonotonic { axis: Axis, index: usize },

    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: [usize; 3],
        found: [usize; 3],
    },

    #[error("{axis} range {start}..{end} exceeds axis length {len}")]
    RangeOutOfBounds {
        axis: Axis,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("voxel {index:?} lies outside shape {shape:?}")]
    OutOfBounds {
        index: [usize; 3],
        shape: [usize; 3],
    },

    #[error("{0} chunk size must be non-zero")]
    ZeroChunk(Axis),
}

/// Invalid vase definitions.
#[derive(Debug, Error)]
pub enum VaseError {
    #[error("vase definition has no control points")]
    Empty,

    #[error("control timestamps must be strictly increasing (index {index})")]
    NonIncreasing { index: usize },

    #[error("control {index} has {found} angular samples, expected {expected}")]
    SampleCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Tube discovery and selection failures.
#[derive(Debug, Error)]
pub enum TubeError {
    #[error("no tube with id {0}")]
    Unknown(TubeId),

    #[error("no tubes to select from")]
    NoTubes,

    #[error("tube {id} does not match the supplied suitability volume")]
    StaleTube { id: TubeId },

    #[error("boundary traced at time index {time_index} encloses zero area")]
    DegenerateSlice { time_index: usize },
}

/// Convenience type alias for results using [`VoxloftError`].
pub type Result<T> = std::result::Result<T, VoxloftError>;
