//! The analytics engine entry points.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use super::types::{AnalysisInput, AnalysisOptions, AnalysisResult, BudgetTotals};
use crate::budget::{BudgetError, BudgetValidator, EnhancedBudgetItem};
use crate::forecast::{DepletionForecast, DepletionForecaster};
use crate::reallocation::{ReallocationService, ReallocationSuggestion};
use crate::recommendation::{
    GoalCorpus, Jitter, Recommendation, RecommendationContext, RecommendationService,
};
use crate::session::UsageIndex;
use crate::utilization::{
    EventDerivedUsage, SyntheticUsage, UsageContext, UsageSourceKind, UtilizationService,
};

/// Pure analytics over one snapshot of budget, event and goal records.
///
/// Every entry point validates its input first and depends only on the
/// input and `reference_time`. Jitter is reseeded per call, so repeated
/// calls with the same options return identical results.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    options: AnalysisOptions,
}

impl AnalyticsEngine {
    /// Creates an engine with the given options.
    #[must_use]
    pub const fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    /// The engine's options.
    #[must_use]
    pub const fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Runs the full analysis.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError` when the input holds negative quantities or
    /// prices, or `reference_time` precedes plan creation.
    #[instrument(
        skip_all,
        fields(items = input.items.len(), events = input.events.len(), %reference_time)
    )]
    pub fn analyze(
        &self,
        input: &AnalysisInput,
        reference_time: DateTime<Utc>,
    ) -> Result<AnalysisResult, BudgetError> {
        Self::validate(input, reference_time)?;

        let (usage_source, items) = self.enhance(input, reference_time);
        let totals = BudgetTotals::from_items(&items, input.settings.available_funds);
        let forecast = DepletionForecaster::forecast(
            totals.total_budget,
            totals.total_spent,
            &input.events,
            reference_time,
        );
        let suggestions = ReallocationService::suggest(&items);
        let recommendations = self.recommend(input, &items);

        info!(
            usage_source = ?usage_source,
            spent = %totals.total_spent,
            suggestions = suggestions.len(),
            recommendations = recommendations.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            reference_time,
            usage_source,
            items,
            totals,
            forecast,
            suggestions,
            recommendations,
        })
    }

    /// Enhanced items only.
    ///
    /// # Errors
    ///
    /// Same as [`Self::analyze`].
    pub fn utilization(
        &self,
        input: &AnalysisInput,
        reference_time: DateTime<Utc>,
    ) -> Result<Vec<EnhancedBudgetItem>, BudgetError> {
        Self::validate(input, reference_time)?;
        Ok(self.enhance(input, reference_time).1)
    }

    /// Depletion forecast only.
    ///
    /// # Errors
    ///
    /// Same as [`Self::analyze`].
    pub fn forecast(
        &self,
        input: &AnalysisInput,
        reference_time: DateTime<Utc>,
    ) -> Result<DepletionForecast, BudgetError> {
        Self::validate(input, reference_time)?;
        let (_, items) = self.enhance(input, reference_time);
        let totals = BudgetTotals::from_items(&items, input.settings.available_funds);
        Ok(DepletionForecaster::forecast(
            totals.total_budget,
            totals.total_spent,
            &input.events,
            reference_time,
        ))
    }

    /// Reallocation suggestions only.
    ///
    /// # Errors
    ///
    /// Same as [`Self::analyze`].
    pub fn suggestions(
        &self,
        input: &AnalysisInput,
        reference_time: DateTime<Utc>,
    ) -> Result<Vec<ReallocationSuggestion>, BudgetError> {
        Self::validate(input, reference_time)?;
        let (_, items) = self.enhance(input, reference_time);
        Ok(ReallocationService::suggest(&items))
    }

    /// Recommendations only.
    ///
    /// # Errors
    ///
    /// Same as [`Self::analyze`].
    pub fn recommendations(
        &self,
        input: &AnalysisInput,
        reference_time: DateTime<Utc>,
    ) -> Result<Vec<Recommendation>, BudgetError> {
        Self::validate(input, reference_time)?;
        let (_, items) = self.enhance(input, reference_time);
        Ok(self.recommend(input, &items))
    }

    fn validate(input: &AnalysisInput, reference_time: DateTime<Utc>) -> Result<(), BudgetError> {
        BudgetValidator::validate(&input.items, &input.settings, &input.events, reference_time)
            .inspect_err(|err| warn!(error = %err, "rejected analysis input"))
    }

    fn enhance(
        &self,
        input: &AnalysisInput,
        reference_time: DateTime<Utc>,
    ) -> (UsageSourceKind, Vec<EnhancedBudgetItem>) {
        let index = UsageIndex::build(&input.events);
        let kind = UsageSourceKind::resolve(self.options.usage_strategy, &index);
        let ctx = UsageContext::new(&input.settings, &input.events, reference_time);

        let items = match kind {
            UsageSourceKind::EventDerived => {
                debug!(records = index.record_count(), "using recorded usage");
                UtilizationService::calculate(&input.items, &EventDerivedUsage::new(index), &ctx)
            }
            UsageSourceKind::Synthetic => {
                warn!(
                    strategy = ?self.options.usage_strategy,
                    completed_events = ctx.completed_events,
                    "usage is synthetic"
                );
                UtilizationService::calculate(&input.items, &SyntheticUsage, &ctx)
            }
        };
        (kind, items)
    }

    fn recommend(&self, input: &AnalysisInput, items: &[EnhancedBudgetItem]) -> Vec<Recommendation> {
        let corpus = GoalCorpus::new(&input.goals, &input.subgoals);
        let ctx = RecommendationContext {
            corpus: &corpus,
            taxonomy: &self.options.taxonomy,
            sort: self.options.recommendation_sort,
        };
        let mut jitter = Jitter::from_seed(self.options.jitter_seed);
        RecommendationService::recommend(items, &ctx, &mut jitter)
    }
}
