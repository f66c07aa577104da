//! Reallocation suggestion engine.

use std::collections::HashMap;

use allotment_shared::types::BudgetItemId;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use super::types::{ItemRef, ReallocationSuggestion};
use crate::budget::EnhancedBudgetItem;

/// Pairs over-utilized items with under-utilized donors.
pub struct ReallocationService;

impl ReallocationService {
    /// Proposes at most one transfer per over-utilized item.
    ///
    /// Recipients are visited from the largest delta down; donors from the most
    /// under-utilized up, same-category donors first. The first donor with
    /// spare units wins.
    ///
    /// A donor's spare units shrink as it gives them away, so one donor is
    /// never promised more than `available_to_reallocate` in total. When every
    /// same-category donor is already exhausted, donors from other categories
    /// are tried, exactly as when the category has no donors at all.
    #[must_use]
    pub fn suggest(items: &[EnhancedBudgetItem]) -> Vec<ReallocationSuggestion> {
        let mut over: Vec<&EnhancedBudgetItem> =
            items.iter().filter(|item| item.is_overutilized()).collect();
        over.sort_by(|a, b| b.utilization_delta.cmp(&a.utilization_delta));

        let mut under: Vec<&EnhancedBudgetItem> =
            items.iter().filter(|item| item.is_underutilized()).collect();
        under.sort_by(|a, b| a.utilization_delta.cmp(&b.utilization_delta));

        let mut given: HashMap<BudgetItemId, i64> = HashMap::new();
        let mut suggestions = Vec::new();

        for recipient in over {
            let shortage = Self::projected_shortage(recipient);
            if shortage <= 0 {
                continue;
            }

            let category_donors: Vec<&EnhancedBudgetItem> = under
                .iter()
                .copied()
                .filter(|donor| same_category(donor, recipient))
                .collect();
            let donor = Self::first_with_capacity(&category_donors, &given)
                .or_else(|| Self::first_with_capacity(&under, &given));

            let Some((donor, available)) = donor else {
                debug!(item = %recipient.item.item_code, shortage, "no donor with spare units");
                continue;
            };

            let amount = shortage.min(available);
            *given.entry(donor.item.id).or_default() += amount;
            suggestions.push(ReallocationSuggestion {
                from_item: ItemRef::from(donor),
                to_item: ItemRef::from(recipient),
                amount,
                projected_shortage: shortage,
                cost_impact: Decimal::from(amount)
                    .saturating_mul(recipient.item.unit_price - donor.item.unit_price),
                same_category: same_category(donor, recipient),
            });
        }

        suggestions
    }

    /// Extra units `item` will need by plan end at its current pace:
    /// `ceil(quantity × (rate / progress − 1))`. 0 before any progress.
    #[must_use]
    pub fn projected_shortage(item: &EnhancedBudgetItem) -> i64 {
        if item.ideal_utilization <= Decimal::ZERO {
            return 0;
        }
        let pace = item.utilization_rate / item.ideal_utilization - Decimal::ONE;
        Decimal::from(item.item.quantity)
            .saturating_mul(pace)
            .ceil()
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    /// Units `item` can spare: `floor(quantity − ideal used quantity)`.
    #[must_use]
    pub fn available_to_reallocate(item: &EnhancedBudgetItem) -> i64 {
        (Decimal::from(item.item.quantity) - item.ideal_used_quantity())
            .floor()
            .to_i64()
            .unwrap_or(0)
    }

    fn first_with_capacity<'a>(
        candidates: &[&'a EnhancedBudgetItem],
        given: &HashMap<BudgetItemId, i64>,
    ) -> Option<(&'a EnhancedBudgetItem, i64)> {
        candidates.iter().find_map(|donor| {
            let spare = Self::available_to_reallocate(donor)
                - given.get(&donor.item.id).copied().unwrap_or(0);
            (spare > 0).then_some((*donor, spare))
        })
    }
}

fn same_category(a: &EnhancedBudgetItem, b: &EnhancedBudgetItem) -> bool {
    a.item.category.trim().eq_ignore_ascii_case(b.item.category.trim())
}
