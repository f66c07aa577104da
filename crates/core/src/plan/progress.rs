//! Plan window arithmetic.
//!
//! Missing or inverted plan dates are normal for a freshly created plan, so
//! every function here falls back to a defined default instead of failing.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use crate::budget::BudgetSettings;

/// Elapsed days assumed when the plan has no dates at all.
pub const DEFAULT_ELAPSED_DAYS: i64 = 30;

/// Plan length assumed when the plan has no end date.
pub const DEFAULT_PLAN_DAYS: i64 = 365;

const SECONDS_PER_DAY: i64 = 86_400;

/// Stateless helper for plan-progress calculations.
pub struct PlanCalendar;

impl PlanCalendar {
    /// Effective plan start.
    ///
    /// Uses the creation timestamp, or one year before the end date when only
    /// the end is known.
    #[must_use]
    pub fn plan_start(settings: &BudgetSettings) -> Option<DateTime<Utc>> {
        settings.created_at.or_else(|| {
            settings
                .end_date
                .map(|end| end - TimeDelta::days(DEFAULT_PLAN_DAYS))
        })
    }

    /// Whole days elapsed since the plan started, rounded up, never negative.
    #[must_use]
    pub fn days_elapsed(settings: &BudgetSettings, now: DateTime<Utc>) -> i64 {
        match Self::plan_start(settings) {
            Some(start) => ceil_days(now - start).max(0),
            None => DEFAULT_ELAPSED_DAYS,
        }
    }

    /// Total plan length in days, rounded up.
    ///
    /// An end date at or before the start is clamped to the default length.
    #[must_use]
    pub fn total_plan_days(settings: &BudgetSettings) -> i64 {
        let Some(end) = settings.end_date else {
            return DEFAULT_PLAN_DAYS;
        };
        let start = Self::plan_start(settings).unwrap_or(end);
        let days = ceil_days(end - start);

        if days <= 0 {
            warn!(
                total_days = days,
                "plan end does not follow plan start, using default plan length"
            );
            return DEFAULT_PLAN_DAYS;
        }
        days
    }

    /// Raw elapsed fraction of the plan. Exceeds 1 once the plan is overdue.
    #[must_use]
    pub fn plan_progress(settings: &BudgetSettings, now: DateTime<Utc>) -> Decimal {
        Decimal::from(Self::days_elapsed(settings, now))
            / Decimal::from(Self::total_plan_days(settings))
    }

    /// Utilization expected under perfectly linear consumption, in [0, 1].
    #[must_use]
    pub fn ideal_utilization(settings: &BudgetSettings, now: DateTime<Utc>) -> Decimal {
        Self::plan_progress(settings, now).clamp(Decimal::ZERO, Decimal::ONE)
    }
}

/// Ceiling of a duration in days.
fn ceil_days(delta: TimeDelta) -> i64 {
    let secs = delta.num_seconds();
    // Truncating division already rounds negative values up.
    secs / SECONDS_PER_DAY + i64::from(secs % SECONDS_PER_DAY > 0)
}
