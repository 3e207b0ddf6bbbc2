pub mod cross_section;
pub mod radial_profile;
pub mod vase;

pub use cross_section::{CentroidPolicy, CrossSection};
pub use radial_profile::{RadialProfile, DEFAULT_N_THETA, MIN_N_THETA};
pub use vase::{ControlPoint, InterpolationMode, VaseDefinition};
