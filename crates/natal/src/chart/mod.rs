pub mod builder;
pub mod houses;
pub mod stats;

pub use builder::{build, ChartBuilder, ChartOutcome, ChartPosition, SkipReason, SkippedBody};
pub use houses::{locate, HouseCusps, HousePlacement};
pub use stats::STELLIUM_MIN_BODIES;
