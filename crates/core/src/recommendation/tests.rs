//! Tests for relevance scoring and recommendation synthesis.

use allotment_shared::TaxonomyEntry;
use allotment_shared::types::{BudgetItemId, GoalId, RecommendationSort, SubgoalId};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::budget::{BudgetItem, EnhancedBudgetItem};
use crate::session::ItemUsage;
use crate::utilization::UtilizationService;

fn item(id: u128, description: &str, category: &str, unit_price: Decimal) -> BudgetItem {
    BudgetItem {
        id: BudgetItemId::from_u128(id),
        description: description.to_string(),
        item_code: format!("CODE-{id}"),
        category: category.to_string(),
        quantity: 10,
        unit_price,
    }
}

fn enhanced(item: &BudgetItem, used: i64, ideal: Decimal) -> EnhancedBudgetItem {
    let usage = ItemUsage {
        quantity: used,
        cost: Decimal::from(used) * item.unit_price,
        history: Vec::new(),
    };
    UtilizationService::enhance(item, &usage, ideal, false)
}

fn goal(id: u128, title: &str, description: &str) -> Goal {
    Goal {
        id: GoalId::from_u128(id),
        title: title.to_string(),
        description: description.to_string(),
        priority: None,
        status: None,
    }
}

fn subgoal(id: u128, title: &str) -> Subgoal {
    Subgoal {
        id: SubgoalId::from_u128(id),
        goal_id: Some(GoalId::from_u128(1)),
        title: title.to_string(),
        description: String::new(),
        status: None,
    }
}

fn corpus() -> GoalCorpus {
    GoalCorpus::new(
        &[goal(1, "Improve speech", "and language therapy skills")],
        &[subgoal(1, "Practice walking with balance support")],
    )
}

#[test]
fn test_tokenize_lowercases_and_splits() {
    let tokens: Vec<String> = tokenize("Speech-Therapy, (weekly) 1:1").collect();
    assert_eq!(tokens, vec!["speech", "therapy", "weekly", "1", "1"]);
}

#[test]
fn test_base_relevance_counts_overlaps() {
    let speech = item(1, "Speech therapy session", "Speech", dec!(120));
    assert_eq!(base_relevance(&speech, &corpus()), dec!(0.4));
}

#[test]
fn test_base_relevance_caps_at_one() {
    let speech = item(1, "Speech therapy session", "Speech", dec!(120));
    let corpus = GoalCorpus::from_text("speech speech therapy therapy speeches therapy");
    assert_eq!(base_relevance(&speech, &corpus), Decimal::ONE);
}

#[test]
fn test_base_relevance_without_goals_is_zero() {
    let speech = item(1, "Speech therapy session", "Speech", dec!(120));
    let empty = GoalCorpus::new(&[], &[]);
    assert!(empty.is_empty());
    assert_eq!(base_relevance(&speech, &empty), Decimal::ZERO);
}

#[test]
fn test_missing_categories_follow_goal_text() {
    let items = [item(1, "Speech therapy session", "Speech", dec!(120))];
    let taxonomy = ServiceTaxonomy::default();
    let names: Vec<&str> = taxonomy
        .missing_categories(&corpus(), &items)
        .into_iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Communication Therapy", "Physical Therapy"]);
}

#[rstest]
#[case("Physical Therapy", false)]
#[case("physical therapy - clinic", false)]
#[case("Physical", false)]
#[case("Uncategorized", true)]
#[case("", true)]
#[case("Transport", true)]
fn test_category_coverage(#[case] category: &str, #[case] missing: bool) {
    let taxonomy = ServiceTaxonomy::new(vec![ServiceCategory::new(
        "Physical Therapy",
        ["walking"],
    )]);
    let items = [item(1, "Some service", category, dec!(10))];
    let found = taxonomy.missing_categories(&corpus(), &items);
    assert_eq!(found.len() == 1, missing);
}

#[test]
fn test_taxonomy_from_entries_lowercases_keywords() {
    let taxonomy = ServiceTaxonomy::from_entries(&[TaxonomyEntry {
        name: "Respite".to_string(),
        keywords: vec!["Carer Break".to_string(), " ".to_string()],
    }]);
    assert_eq!(taxonomy.categories().len(), 1);
    assert_eq!(taxonomy.categories()[0].keywords, vec!["carer break"]);
    let corpus = GoalCorpus::from_text("Give my carer break time");
    assert_eq!(taxonomy.missing_categories(&corpus, &[]).len(), 1);
}

#[test]
fn test_cost_substitutions_take_two_most_expensive() {
    let items = [
        enhanced(&item(1, "A", "X", dec!(150)), 2, dec!(0.5)),
        enhanced(&item(2, "B", "X", dec!(300)), 5, dec!(0.5)),
        enhanced(&item(3, "C", "X", dec!(200)), 1, dec!(0.5)),
        enhanced(&item(4, "D", "X", dec!(500)), 6, dec!(0.5)),
        enhanced(&item(5, "E", "X", dec!(90)), 0, dec!(0.5)),
    ];
    let recs = RecommendationService::cost_substitutions(&items, &mut Jitter::Disabled);
    let ids: Vec<_> = recs.iter().filter_map(|r| r.item_id).collect();
    assert_eq!(
        ids,
        vec![BudgetItemId::from_u128(2), BudgetItemId::from_u128(3)]
    );
    assert!(recs.iter().all(|r| r.relevance == dec!(0.6)));
}

fn scenario() -> Vec<EnhancedBudgetItem> {
    vec![
        enhanced(&item(1, "Speech therapy session", "Speech", dec!(120)), 2, dec!(0.5)),
        enhanced(&item(2, "Transport", "Travel", dec!(20)), 5, dec!(0.5)),
    ]
}

#[test]
fn test_recommend_sorted_by_relevance() {
    let corpus = corpus();
    let taxonomy = ServiceTaxonomy::default();
    let ctx = RecommendationContext {
        corpus: &corpus,
        taxonomy: &taxonomy,
        sort: RecommendationSort::Relevance,
    };

    let recs = RecommendationService::recommend(&scenario(), &ctx, &mut Jitter::Disabled);

    let summary: Vec<(RecommendationKind, Decimal)> =
        recs.iter().map(|r| (r.kind, r.relevance)).collect();
    assert_eq!(
        summary,
        vec![
            (RecommendationKind::MissingCategory, dec!(0.8)),
            (RecommendationKind::MissingCategory, dec!(0.8)),
            (RecommendationKind::CostSubstitution, dec!(0.6)),
            (RecommendationKind::UtilizationIncrease, dec!(0.4)),
        ]
    );
    assert_eq!(recs[0].category.as_deref(), Some("Communication Therapy"));
}

#[test]
fn test_recommend_sorted_by_impact() {
    let corpus = corpus();
    let taxonomy = ServiceTaxonomy::default();
    let ctx = RecommendationContext {
        corpus: &corpus,
        taxonomy: &taxonomy,
        sort: RecommendationSort::Impact,
    };

    let recs = RecommendationService::recommend(&scenario(), &ctx, &mut Jitter::Disabled);

    let impacts: Vec<ImpactLevel> = recs.iter().map(|r| r.impact).collect();
    assert_eq!(
        impacts,
        vec![
            ImpactLevel::High,
            ImpactLevel::High,
            ImpactLevel::Medium,
            ImpactLevel::Medium
        ]
    );
    assert_eq!(recs[2].kind, RecommendationKind::CostSubstitution);
}

#[test]
fn test_seeded_recommendations_are_reproducible() {
    let corpus = corpus();
    let taxonomy = ServiceTaxonomy::default();
    let ctx = RecommendationContext {
        corpus: &corpus,
        taxonomy: &taxonomy,
        sort: RecommendationSort::Relevance,
    };

    let first = RecommendationService::recommend(&scenario(), &ctx, &mut Jitter::seeded(42));
    let second = RecommendationService::recommend(&scenario(), &ctx, &mut Jitter::seeded(42));
    assert_eq!(first, second);
}

proptest! {
    /// Jittered scores stay within [0, 1] for any seed.
    #[test]
    fn test_relevance_stays_in_unit_interval(seed in any::<u64>(), repeats in 0usize..12) {
        let corpus = GoalCorpus::from_text(&"speech therapy ".repeat(repeats));
        let speech = item(1, "Speech therapy session", "Speech", dec!(120));
        let mut jitter = Jitter::seeded(seed);
        let score = relevance_score(&speech, &corpus, &mut jitter);
        prop_assert!(score >= Decimal::ZERO && score <= Decimal::ONE);
    }

    /// Fixed-relevance recommendations never exceed 1.
    #[test]
    fn test_bonus_relevance_is_bounded(seed in any::<u64>()) {
        let items = [enhanced(&item(1, "A", "X", dec!(150)), 0, dec!(0.5))];
        let recs = RecommendationService::cost_substitutions(&items, &mut Jitter::seeded(seed));
        prop_assert!(recs[0].relevance >= dec!(0.6) && recs[0].relevance < dec!(0.8));
    }
}
