//! Usage trend classification.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

const STABLE_CHANGE_PERCENT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
const TREND_CHANGE_PERCENT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
const SEASONAL_VARIATION: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Usage-pattern category of an item's period series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsagePattern {
    /// Little change between the first and last period.
    #[default]
    Stable,
    /// More than 20% growth.
    Increasing,
    /// More than 20% decline.
    Decreasing,
    /// Moderate net change with high period-to-period variation.
    Seasonal,
}

/// Simple first-vs-last trend heuristic.
///
/// Priority is stable, then increasing/decreasing, then seasonal. There is no
/// smoothing or seasonality decomposition.
pub struct PatternClassifier;

impl PatternClassifier {
    /// Classifies a chronological per-period usage series.
    #[must_use]
    pub fn classify(series: &[Decimal]) -> UsagePattern {
        let (Some(&first), Some(&last)) = (series.first(), series.last()) else {
            return UsagePattern::Stable;
        };

        let change = Self::percent_change(first, last);
        if change.abs() < STABLE_CHANGE_PERCENT {
            UsagePattern::Stable
        } else if change > TREND_CHANGE_PERCENT {
            UsagePattern::Increasing
        } else if change < -TREND_CHANGE_PERCENT {
            UsagePattern::Decreasing
        } else if Self::coefficient_of_variation(series) > SEASONAL_VARIATION {
            UsagePattern::Seasonal
        } else {
            UsagePattern::Stable
        }
    }

    /// Percent change from `first` to `last`; 0 when `first` is 0.
    #[must_use]
    pub fn percent_change(first: Decimal, last: Decimal) -> Decimal {
        if first.is_zero() {
            return Decimal::ZERO;
        }
        (last - first) / first * Decimal::ONE_HUNDRED
    }

    /// Population standard deviation divided by the mean; 0 for a non-positive mean.
    #[must_use]
    pub fn coefficient_of_variation(series: &[Decimal]) -> Decimal {
        if series.is_empty() {
            return Decimal::ZERO;
        }
        let count = Decimal::from(series.len());
        let mean = series.iter().copied().sum::<Decimal>() / count;
        if mean <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        // Deviations are taken relative to the mean so squares stay small.
        let variance = series
            .iter()
            .map(|value| {
                let ratio = *value / mean - Decimal::ONE;
                ratio * ratio
            })
            .sum::<Decimal>()
            / count;

        variance.sqrt().unwrap_or(Decimal::ZERO)
    }
}
