//! Engine options shared by configuration and the analytics engine.

use serde::{Deserialize, Serialize};

/// Which usage data source the host selects for utilization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageStrategy {
    /// Sum recorded usage only. Items without records show zero usage.
    #[default]
    EventDerived,
    /// Always synthesize usage from event counts (demo data).
    Synthetic,
    /// Use recorded usage, synthesizing only when no usage record exists at all.
    EventDerivedOrSynthetic,
}

/// Sort key for synthesized recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSort {
    /// Highest relevance score first.
    #[default]
    Relevance,
    /// Highest impact first (high > medium > low), relevance breaks ties.
    Impact,
}
