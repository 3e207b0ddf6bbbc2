pub mod hull;
pub mod mask;
pub mod tube;

pub use hull::build_hull;
pub use mask::build_mask;
pub use tube::{discover_tubes, select_tube, to_vase};
