//! Usage-pattern classification.

pub mod classifier;
pub mod series;

pub use classifier::{PatternClassifier, UsagePattern};
pub use series::{SeriesPeriod, usage_series};
