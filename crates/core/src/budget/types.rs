//! Budget data types.

use allotment_shared::types::{BudgetItemId, BudgetPlanId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pattern::UsagePattern;

/// Category assigned to items that arrive without one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Utilization delta above which an item is over-utilized (0.15).
pub const OVERUTILIZED_DELTA: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Utilization delta below which an item is under-utilized (-0.15).
pub const UNDERUTILIZED_DELTA: Decimal = Decimal::from_parts(15, 0, 0, true, 2);

const CRITICAL_RATE: Decimal = Decimal::from_parts(85, 0, 0, false, 2);
const WARNING_RATE: Decimal = Decimal::from_parts(70, 0, 0, false, 2);
const LOW_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// One allocated service line within a funding plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Item ID.
    pub id: BudgetItemId,
    /// Human description.
    pub description: String,
    /// External item code usage records refer to.
    pub item_code: String,
    /// Free-text category.
    #[serde(default = "default_category")]
    pub category: String,
    /// Allocated quantity.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Decimal,
}

impl BudgetItem {
    /// Allocated cost (`quantity × unit_price`), saturating at the Decimal range.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.unit_price)
    }

    /// Allocated cost, or `None` when it does not fit in a Decimal.
    #[must_use]
    pub fn checked_total_cost(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// Plan-level settings defining funds and the plan window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSettings {
    /// Plan this configuration belongs to.
    #[serde(default)]
    pub plan_id: Option<BudgetPlanId>,
    /// Total available funds.
    pub available_funds: Decimal,
    /// Plan creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Plan end timestamp.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Utilization status against the plan-progress target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationStatus {
    /// Consumption is more than 15 points ahead of the plan.
    Overutilized,
    /// Consumption is more than 15 points behind the plan.
    Underutilized,
    /// Within tolerance. The boundary itself counts as normal.
    Normal,
}

impl UtilizationStatus {
    /// Classifies a utilization delta (actual − ideal).
    #[must_use]
    pub fn from_delta(delta: Decimal) -> Self {
        if delta > OVERUTILIZED_DELTA {
            Self::Overutilized
        } else if delta < UNDERUTILIZED_DELTA {
            Self::Underutilized
        } else {
            Self::Normal
        }
    }
}

/// Display severity derived from the raw utilization rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    /// Rate above 85%.
    Critical,
    /// Rate above 70%.
    Warning,
    /// Rate below 30%.
    Underutilized,
    /// Anything else.
    Normal,
}

impl SeverityBand {
    /// Maps a utilization rate onto its display band.
    #[must_use]
    pub fn from_rate(rate: Decimal) -> Self {
        if rate > CRITICAL_RATE {
            Self::Critical
        } else if rate > WARNING_RATE {
            Self::Warning
        } else if rate < LOW_RATE {
            Self::Underutilized
        } else {
            Self::Normal
        }
    }
}

/// A budget item augmented with derived utilization metrics.
///
/// Recomputed on every call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedBudgetItem {
    /// The source item, unchanged.
    #[serde(flatten)]
    pub item: BudgetItem,
    /// Allocated cost.
    pub total_cost: Decimal,
    /// Quantity consumed so far.
    pub used_quantity: i64,
    /// Cost consumed so far.
    pub used_cost: Decimal,
    /// `total_cost − used_cost`. Negative on overrun.
    pub remaining_cost: Decimal,
    /// `used_quantity / quantity`, 0 when nothing is allocated. May exceed 1.
    pub utilization_rate: Decimal,
    /// Plan-progress target, clamped to [0, 1].
    pub ideal_utilization: Decimal,
    /// `utilization_rate − ideal_utilization`.
    pub utilization_delta: Decimal,
    /// Status from the delta thresholds.
    pub status: UtilizationStatus,
    /// Display band from the rate.
    pub severity: SeverityBand,
    /// Trend classification of the item's usage series.
    pub usage_pattern: UsagePattern,
    /// Whether usage was synthesized rather than recorded.
    pub synthetic: bool,
}

impl EnhancedBudgetItem {
    /// Returns true when the item is consuming ahead of plan.
    #[must_use]
    pub fn is_overutilized(&self) -> bool {
        self.status == UtilizationStatus::Overutilized
    }

    /// Returns true when the item is consuming behind plan.
    #[must_use]
    pub fn is_underutilized(&self) -> bool {
        self.status == UtilizationStatus::Underutilized
    }

    /// Quantity the plan expects to have been used by now.
    #[must_use]
    pub fn ideal_used_quantity(&self) -> Decimal {
        Decimal::from(self.item.quantity) * self.ideal_utilization
    }
}
