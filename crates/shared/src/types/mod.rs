//! Common types used across the workspace.

pub mod id;
pub mod options;

pub use id::*;
pub use options::{RecommendationSort, UsageStrategy};
