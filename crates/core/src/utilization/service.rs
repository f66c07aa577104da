//! Per-item utilization metrics.

use rust_decimal::Decimal;

use super::source::{UsageContext, UsageSource, UsageSourceKind};
use crate::budget::{BudgetItem, EnhancedBudgetItem, SeverityBand, UtilizationStatus};
use crate::pattern::{PatternClassifier, SeriesPeriod, usage_series};
use crate::session::ItemUsage;

/// Stateless service deriving `EnhancedBudgetItem`s.
pub struct UtilizationService;

impl UtilizationService {
    /// Enhances every item with usage drawn from `source`, preserving input order.
    #[must_use]
    pub fn calculate<S: UsageSource + ?Sized>(
        items: &[BudgetItem],
        source: &S,
        ctx: &UsageContext,
    ) -> Vec<EnhancedBudgetItem> {
        let synthetic = source.kind() == UsageSourceKind::Synthetic;
        items
            .iter()
            .map(|item| {
                let usage = source.usage_for(item, ctx);
                Self::enhance(item, &usage, ctx.ideal_utilization, synthetic)
            })
            .collect()
    }

    /// Derives the metrics for one item.
    #[must_use]
    pub fn enhance(
        item: &BudgetItem,
        usage: &ItemUsage,
        ideal_utilization: Decimal,
        synthetic: bool,
    ) -> EnhancedBudgetItem {
        let total_cost = item.total_cost();
        let utilization_rate = Self::utilization_rate(usage.quantity, item.quantity);
        let utilization_delta = utilization_rate - ideal_utilization;
        let usage_pattern =
            PatternClassifier::classify(&usage_series(&usage.history, SeriesPeriod::Monthly));

        EnhancedBudgetItem {
            item: item.clone(),
            total_cost,
            used_quantity: usage.quantity,
            used_cost: usage.cost,
            // Overrun stays visible as a negative remainder.
            remaining_cost: total_cost - usage.cost,
            utilization_rate,
            ideal_utilization,
            utilization_delta,
            status: UtilizationStatus::from_delta(utilization_delta),
            severity: SeverityBand::from_rate(utilization_rate),
            usage_pattern,
            synthetic,
        }
    }

    /// `used / allocated`, 0 when nothing is allocated.
    #[must_use]
    pub fn utilization_rate(used: i64, allocated: i64) -> Decimal {
        if allocated == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(used) / Decimal::from(allocated)
    }
}
