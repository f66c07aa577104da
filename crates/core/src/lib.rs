//! Core analytics for Allotment.
//!
//! This crate contains the budget utilization engine with ZERO I/O dependencies.
//! Every result is a pure function of the supplied records and an explicit
//! reference time.
//!
//! # Modules
//!
//! - `analysis` - Composite entry point and summary totals
//! - `budget` - Budget items, settings, thresholds and input validation
//! - `session` - Service events, usage records and the usage index
//! - `plan` - Plan window and plan-progress helpers
//! - `utilization` - Per-item utilization over event-derived or synthetic usage
//! - `pattern` - Usage series and trend classification
//! - `forecast` - Budget depletion forecasting
//! - `reallocation` - Cross-item transfer suggestions
//! - `recommendation` - Goal relevance, service gaps and recommendations

pub mod analysis;
pub mod budget;
pub mod forecast;
pub mod pattern;
pub mod plan;
pub mod reallocation;
pub mod recommendation;
pub mod session;
pub mod utilization;

pub use analysis::{AnalysisInput, AnalysisOptions, AnalysisResult, AnalyticsEngine};
pub use budget::BudgetError;
