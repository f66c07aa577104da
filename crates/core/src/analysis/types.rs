//! Analysis inputs, options and the composite result.

use std::collections::BTreeMap;

use allotment_shared::AnalyticsConfig;
use allotment_shared::types::{RecommendationSort, UsageStrategy};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::{BudgetItem, BudgetSettings, DEFAULT_CATEGORY, EnhancedBudgetItem};
use crate::forecast::DepletionForecast;
use crate::reallocation::ReallocationSuggestion;
use crate::recommendation::{Goal, Recommendation, ServiceTaxonomy, Subgoal};
use crate::session::ServiceEvent;
use crate::utilization::UsageSourceKind;

/// Everything the engine reads for one analysis, as supplied by the host stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// Budget line items.
    pub items: Vec<BudgetItem>,
    /// Plan settings.
    pub settings: BudgetSettings,
    /// Service events with their usage records.
    #[serde(default)]
    pub events: Vec<ServiceEvent>,
    /// Participant goals.
    #[serde(default)]
    pub goals: Vec<Goal>,
    /// Goal steps.
    #[serde(default)]
    pub subgoals: Vec<Subgoal>,
}

/// Engine behaviour chosen by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisOptions {
    /// Where usage figures come from.
    pub usage_strategy: UsageStrategy,
    /// Seed for relevance jitter; `None` disables jitter.
    pub jitter_seed: Option<u64>,
    /// Ordering of recommendations.
    pub recommendation_sort: RecommendationSort,
    /// Categories used for gap detection.
    pub taxonomy: ServiceTaxonomy,
}

impl AnalysisOptions {
    /// Options from application configuration. A configured taxonomy
    /// replaces the built-in one.
    #[must_use]
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self {
            usage_strategy: config.usage_strategy,
            jitter_seed: config.jitter_seed,
            recommendation_sort: config.recommendation_sort,
            taxonomy: config
                .taxonomy
                .as_deref()
                .map_or_else(ServiceTaxonomy::default, ServiceTaxonomy::from_entries),
        }
    }
}

/// Plan-wide money totals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetTotals {
    /// Available funds.
    pub total_budget: Decimal,
    /// Sum of item allocations (`quantity × unit_price`).
    pub total_allocated: Decimal,
    /// Sum of used cost.
    pub total_spent: Decimal,
    /// `total_budget − total_spent`. Negative when overspent.
    pub remaining: Decimal,
    /// `total_budget − total_allocated`.
    pub unallocated: Decimal,
    /// `total_spent / total_budget × 100`, 2 dp; 0 for an empty budget or a
    /// ratio outside the Decimal range.
    pub overall_utilization_percent: Decimal,
    /// Used cost per item category.
    pub spending_by_category: BTreeMap<String, Decimal>,
    /// Items over the plan-progress target.
    pub overutilized_count: usize,
    /// Items under the plan-progress target.
    pub underutilized_count: usize,
}

impl BudgetTotals {
    /// Aggregates enhanced items against the available funds.
    #[must_use]
    pub fn from_items(items: &[EnhancedBudgetItem], available_funds: Decimal) -> Self {
        let mut totals = Self {
            total_budget: available_funds,
            ..Self::default()
        };

        for item in items {
            totals.total_allocated = totals.total_allocated.saturating_add(item.total_cost);
            totals.total_spent = totals.total_spent.saturating_add(item.used_cost);

            let category = item.item.category.trim();
            let category = if category.is_empty() {
                DEFAULT_CATEGORY
            } else {
                category
            };
            let spent = totals
                .spending_by_category
                .entry(category.to_string())
                .or_default();
            *spent = spent.saturating_add(item.used_cost);

            if item.is_overutilized() {
                totals.overutilized_count += 1;
            } else if item.is_underutilized() {
                totals.underutilized_count += 1;
            }
        }

        totals.remaining = totals.total_budget.saturating_sub(totals.total_spent);
        totals.unallocated = totals.total_budget.saturating_sub(totals.total_allocated);
        totals.overall_utilization_percent = totals
            .total_spent
            .checked_div(totals.total_budget)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ZERO, |percent| percent.round_dp(2));
        totals
    }
}

/// Composite result of one analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Reference time every figure was computed against.
    pub reference_time: DateTime<Utc>,
    /// Source the usage figures came from.
    pub usage_source: UsageSourceKind,
    /// Enhanced items, in input order.
    pub items: Vec<EnhancedBudgetItem>,
    /// Plan-wide totals.
    pub totals: BudgetTotals,
    /// Depletion forecast.
    pub forecast: DepletionForecast,
    /// Reallocation suggestions.
    pub suggestions: Vec<ReallocationSuggestion>,
    /// Sorted recommendations.
    pub recommendations: Vec<Recommendation>,
}
