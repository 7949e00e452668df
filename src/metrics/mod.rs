pub mod cer;
pub mod edit_distance;

pub use cer::{CerCalculator, WeightedCer};
pub use edit_distance::{default_backend, DistanceBackend, DpBackend, StrsimBackend};
