pub mod error;
pub mod geometry;
pub mod grid;
pub mod math;
pub mod mesh;
pub mod operations;

pub use error::{Result, VoxloftError};
pub use operations::{build_hull, build_mask, discover_tubes, select_tube, to_vase};
