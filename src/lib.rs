pub mod core;
pub mod input;
pub mod matching;
pub mod metrics;
pub mod pipeline;
pub mod report;

pub use crate::core::geometry::BBox;
pub use crate::core::model::{MatchedPair, PageSet, TextRegion};
pub use crate::report::{PageOutcome, PageReport, Report};
