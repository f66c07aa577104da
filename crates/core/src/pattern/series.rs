//! Per-period usage series built from dated consumption.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::session::DatedQuantity;

/// Bucket width for a usage series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesPeriod {
    /// Seven-day buckets counted from the first consumption.
    Weekly,
    /// Calendar months.
    Monthly,
}

impl SeriesPeriod {
    fn key(self, at: DateTime<Utc>, origin: DateTime<Utc>) -> i64 {
        match self {
            Self::Weekly => {
                (at.date_naive() - origin.date_naive()).num_days().div_euclid(7)
            }
            Self::Monthly => {
                let months = |t: DateTime<Utc>| i64::from(t.year()) * 12 + i64::from(t.month0());
                months(at) - months(origin)
            }
        }
    }
}

/// Sums `history` into chronological buckets from the first to the last
/// consumption. Periods without usage are zero.
#[must_use]
pub fn usage_series(history: &[DatedQuantity], period: SeriesPeriod) -> Vec<Decimal> {
    let Some(origin) = history.iter().map(|entry| entry.at).min() else {
        return Vec::new();
    };

    let keyed: Vec<(i64, i64)> = history
        .iter()
        .map(|entry| (period.key(entry.at, origin), entry.quantity))
        .collect();
    let last = keyed.iter().map(|(key, _)| *key).max().unwrap_or(0);
    let len = usize::try_from(last + 1).unwrap_or(0);

    let mut series = vec![Decimal::ZERO; len];
    for (key, quantity) in keyed {
        if let Some(slot) = usize::try_from(key).ok().and_then(|k| series.get_mut(k)) {
            *slot += Decimal::from(quantity);
        }
    }
    series
}
