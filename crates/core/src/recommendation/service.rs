//! Recommendation synthesis.

use std::cmp::Ordering;

use allotment_shared::types::RecommendationSort;
use rust_decimal::Decimal;
use tracing::debug;

use super::jitter::Jitter;
use super::relevance::{GoalCorpus, relevance_score};
use super::taxonomy::ServiceTaxonomy;
use super::types::{ImpactLevel, Recommendation, RecommendationKind};
use crate::budget::{BudgetItem, EnhancedBudgetItem};

/// Base relevance of a missing-category recommendation (0.8).
const MISSING_CATEGORY_RELEVANCE: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
/// Base relevance of a cost-substitution recommendation (0.6).
const COST_SUBSTITUTION_RELEVANCE: Decimal = Decimal::from_parts(6, 0, 0, false, 1);
/// Upper bound of the jitter bonus on fixed relevances (0.2).
const RELEVANCE_BONUS: Decimal = Decimal::from_parts(2, 0, 0, false, 1);
/// Unit price above which an item is a substitution candidate.
const EXPENSIVE_UNIT_PRICE: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
/// Utilization rate below which an expensive item is a substitution candidate (0.6).
const SUBSTITUTION_RATE: Decimal = Decimal::from_parts(6, 0, 0, false, 1);
/// Most cost-substitution recommendations emitted per call.
const MAX_SUBSTITUTIONS: usize = 2;

/// Inputs shared by every recommendation rule.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationContext<'a> {
    /// Goal and subgoal text.
    pub corpus: &'a GoalCorpus,
    /// Known service categories.
    pub taxonomy: &'a ServiceTaxonomy,
    /// Ordering of the final list.
    pub sort: RecommendationSort,
}

/// Stateless service producing goal-aware recommendations.
pub struct RecommendationService;

impl RecommendationService {
    /// Produces recommendations for the enhanced items, sorted per `ctx.sort`.
    ///
    /// Jitter is drawn in a fixed order (under-utilized items, then missing
    /// categories, then substitutions) so a seed reproduces the whole list.
    pub fn recommend(
        items: &[EnhancedBudgetItem],
        ctx: &RecommendationContext<'_>,
        jitter: &mut Jitter,
    ) -> Vec<Recommendation> {
        let mut recommendations = Self::utilization_increases(items, ctx.corpus, jitter);

        let plain: Vec<BudgetItem> = items.iter().map(|e| e.item.clone()).collect();
        recommendations.extend(Self::missing_categories(&plain, ctx, jitter));
        recommendations.extend(Self::cost_substitutions(items, jitter));

        Self::sort(&mut recommendations, ctx.sort);
        debug!(count = recommendations.len(), sort = ?ctx.sort, "recommendations synthesized");
        recommendations
    }

    /// One medium-impact recommendation per under-utilized item, scored
    /// against the goal text.
    pub fn utilization_increases(
        items: &[EnhancedBudgetItem],
        corpus: &GoalCorpus,
        jitter: &mut Jitter,
    ) -> Vec<Recommendation> {
        items
            .iter()
            .filter(|e| e.is_underutilized())
            .map(|e| Recommendation {
                kind: RecommendationKind::UtilizationIncrease,
                title: format!("Increase use of {}", e.item.description),
                description: format!(
                    "{} is at {}% utilization against a {}% target for this point in the plan.",
                    e.item.description,
                    percent(e.utilization_rate),
                    percent(e.ideal_utilization),
                ),
                impact: ImpactLevel::Medium,
                relevance: relevance_score(&e.item, corpus, jitter),
                item_id: Some(e.item.id),
                category: Some(e.item.category.clone()),
            })
            .collect()
    }

    /// One high-impact recommendation per goal-relevant category that no
    /// item covers.
    pub fn missing_categories(
        items: &[BudgetItem],
        ctx: &RecommendationContext<'_>,
        jitter: &mut Jitter,
    ) -> Vec<Recommendation> {
        ctx.taxonomy
            .missing_categories(ctx.corpus, items)
            .into_iter()
            .map(|category| Recommendation {
                kind: RecommendationKind::MissingCategory,
                title: format!("Add {} services", category.name),
                description: format!(
                    "Goals mention {} needs but no budget item covers this category.",
                    category.name.to_lowercase()
                ),
                impact: ImpactLevel::High,
                relevance: (MISSING_CATEGORY_RELEVANCE + jitter.bonus(RELEVANCE_BONUS))
                    .min(Decimal::ONE),
                item_id: None,
                category: Some(category.name.clone()),
            })
            .collect()
    }

    /// Up to two medium-impact recommendations for expensive items used
    /// below 60%, most expensive first.
    pub fn cost_substitutions(
        items: &[EnhancedBudgetItem],
        jitter: &mut Jitter,
    ) -> Vec<Recommendation> {
        let mut candidates: Vec<&EnhancedBudgetItem> = items
            .iter()
            .filter(|e| {
                e.item.unit_price > EXPENSIVE_UNIT_PRICE && e.utilization_rate < SUBSTITUTION_RATE
            })
            .collect();
        candidates.sort_by(|a, b| b.item.unit_price.cmp(&a.item.unit_price));

        candidates
            .into_iter()
            .take(MAX_SUBSTITUTIONS)
            .map(|e| Recommendation {
                kind: RecommendationKind::CostSubstitution,
                title: format!("Review lower-cost alternatives for {}", e.item.description),
                description: format!(
                    "{} costs {} per unit and is {}% utilized; a cheaper provider or format may stretch the budget further.",
                    e.item.description,
                    e.item.unit_price.round_dp(2),
                    percent(e.utilization_rate),
                ),
                impact: ImpactLevel::Medium,
                relevance: (COST_SUBSTITUTION_RELEVANCE + jitter.bonus(RELEVANCE_BONUS))
                    .min(Decimal::ONE),
                item_id: Some(e.item.id),
                category: Some(e.item.category.clone()),
            })
            .collect()
    }

    /// Sorts by the chosen key, descending. Impact ties break by relevance.
    pub fn sort(recommendations: &mut [Recommendation], sort: RecommendationSort) {
        recommendations.sort_by(|a, b| compare(a, b, sort));
    }
}

fn compare(a: &Recommendation, b: &Recommendation, sort: RecommendationSort) -> Ordering {
    match sort {
        RecommendationSort::Relevance => b.relevance.cmp(&a.relevance),
        RecommendationSort::Impact => b
            .impact
            .rank()
            .cmp(&a.impact.rank())
            .then_with(|| b.relevance.cmp(&a.relevance)),
    }
}

fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).round_dp(1).normalize()
}
