//! Budget depletion forecasting.

use chrono::{DateTime, Months, TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::ServiceEvent;

/// Forecast horizon when fewer than two qualifying events exist.
const INSUFFICIENT_DATA_MONTHS: u32 = 6;
/// Horizon used as "never depletes" when nothing is being spent.
const NEVER_DEPLETES_MONTHS: u32 = 1_200;
/// Earliest forecast, in days from now.
const MINIMUM_FORECAST_DAYS: i64 = 30;
const SECONDS_PER_DAY: i64 = 86_400;

/// How a forecast was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastBasis {
    /// Fewer than two completed or billed events.
    InsufficientData,
    /// Spending rate is zero; the date is a far-future sentinel.
    NoSpending,
    /// Projected from the observed spending rate.
    Projected,
}

/// Projected budget exhaustion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepletionForecast {
    /// Date the budget is expected to run out.
    pub depletion_date: DateTime<Utc>,
    /// How the date was derived.
    pub basis: ForecastBasis,
    /// Observed spend per day (0 unless projected).
    pub daily_spending_rate: Decimal,
    /// Unfloored days until depletion, when projected.
    pub days_until_depletion: Option<Decimal>,
}

/// Stateless depletion forecaster.
pub struct DepletionForecaster;

impl DepletionForecaster {
    /// Forecasts depletion from completed and billed events.
    #[must_use]
    pub fn forecast(
        total_budget: Decimal,
        total_spent: Decimal,
        events: &[ServiceEvent],
        now: DateTime<Utc>,
    ) -> DepletionForecast {
        let dates: Vec<DateTime<Utc>> = events
            .iter()
            .filter(|event| event.status.is_consumed())
            .map(|event| event.occurred_at)
            .collect();
        Self::forecast_from_dates(total_budget, total_spent, &dates, now)
    }

    /// Forecasts depletion from the timestamps of qualifying events.
    ///
    /// The result is never earlier than 30 days from `now`.
    #[must_use]
    pub fn forecast_from_dates(
        total_budget: Decimal,
        total_spent: Decimal,
        dates: &[DateTime<Utc>],
        now: DateTime<Utc>,
    ) -> DepletionForecast {
        let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) else {
            return Self::insufficient(now);
        };
        if dates.len() < 2 {
            return Self::insufficient(now);
        }

        let span_days = (Decimal::from((*last - *first).num_seconds())
            / Decimal::from(SECONDS_PER_DAY))
        .max(Decimal::ONE);
        let daily_spending_rate = total_spent / span_days;

        if daily_spending_rate <= Decimal::ZERO {
            debug!("no spending observed, forecasting no depletion");
            return DepletionForecast {
                depletion_date: never_depletes(now),
                basis: ForecastBasis::NoSpending,
                daily_spending_rate: Decimal::ZERO,
                days_until_depletion: None,
            };
        }

        let Some(days_until_depletion) = total_budget
            .checked_sub(total_spent)
            .and_then(|remaining| remaining.checked_div(daily_spending_rate))
        else {
            debug!("depletion horizon out of range, forecasting no depletion");
            return DepletionForecast {
                depletion_date: never_depletes(now),
                basis: ForecastBasis::NoSpending,
                daily_spending_rate,
                days_until_depletion: None,
            };
        };
        let horizon = days_until_depletion.max(Decimal::from(MINIMUM_FORECAST_DAYS));
        let depletion_date = horizon
            .checked_mul(Decimal::from(SECONDS_PER_DAY))
            .and_then(|seconds| seconds.round().to_i64())
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or_else(|| never_depletes(now));

        DepletionForecast {
            depletion_date,
            basis: ForecastBasis::Projected,
            daily_spending_rate,
            days_until_depletion: Some(days_until_depletion),
        }
    }

    fn insufficient(now: DateTime<Utc>) -> DepletionForecast {
        debug!("fewer than two qualifying events, using default forecast horizon");
        DepletionForecast {
            depletion_date: now
                .checked_add_months(Months::new(INSUFFICIENT_DATA_MONTHS))
                .unwrap_or_else(|| never_depletes(now)),
            basis: ForecastBasis::InsufficientData,
            daily_spending_rate: Decimal::ZERO,
            days_until_depletion: None,
        }
    }
}

fn never_depletes(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_add_months(Months::new(NEVER_DEPLETES_MONTHS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
