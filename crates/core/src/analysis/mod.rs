//! Composite analysis over one snapshot of store records.

pub mod engine;
pub mod types;


pub use engine::AnalyticsEngine;
pub use types::{AnalysisInput, AnalysisOptions, AnalysisResult, BudgetTotals};
