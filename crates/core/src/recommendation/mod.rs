//! Goal-aware recommendations.
//!
//! Items are scored against goal and subgoal text, the service taxonomy
//! exposes goal-relevant categories the budget lacks, and expensive
//! little-used items are flagged for substitution.

pub mod jitter;
pub mod relevance;
pub mod service;
pub mod taxonomy;
pub mod types;

#[cfg(test)]
mod tests;

pub use jitter::Jitter;
pub use relevance::{GoalCorpus, base_relevance, relevance_score, tokenize};
pub use service::{RecommendationContext, RecommendationService};
pub use taxonomy::{ServiceCategory, ServiceTaxonomy};
pub use types::{Goal, ImpactLevel, Recommendation, RecommendationKind, Subgoal};
