//! Usage data sources.
//!
//! Recorded usage is exact. Synthetic usage only keeps a demo or empty plan
//! populated; it is opt-in through `UsageStrategy` and every item it touches
//! is flagged `synthetic`.

use allotment_shared::types::UsageStrategy;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::budget::{BudgetItem, BudgetSettings};
use crate::plan::PlanCalendar;
use crate::session::{ItemUsage, ServiceEvent, UsageIndex};

/// Completed events at which synthetic activity saturates.
const FULL_ACTIVITY_EVENTS: i64 = 10;
/// Per-item spread applied around plan progress (0.08 per bucket step).
const VARIANCE_STEP: Decimal = Decimal::from_parts(8, 0, 0, false, 2);
/// Boost for the overrun subset (×1.25).
const OVERRUN_BOOST: Decimal = Decimal::from_parts(125, 0, 0, false, 2);
/// Cap for the overrun subset (1.2).
const OVERRUN_CAP: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// Where an item's usage figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageSourceKind {
    /// Summed from usage records.
    EventDerived,
    /// Estimated from event counts.
    Synthetic,
}

impl UsageSourceKind {
    /// Resolves the host's strategy against the available data.
    #[must_use]
    pub fn resolve(strategy: UsageStrategy, index: &UsageIndex<'_>) -> Self {
        match strategy {
            UsageStrategy::EventDerived => Self::EventDerived,
            UsageStrategy::Synthetic => Self::Synthetic,
            UsageStrategy::EventDerivedOrSynthetic if index.is_empty() => Self::Synthetic,
            UsageStrategy::EventDerivedOrSynthetic => Self::EventDerived,
        }
    }
}

/// Per-call facts a source may draw on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageContext {
    /// Plan-progress target in [0, 1].
    pub ideal_utilization: Decimal,
    /// Number of completed or billed events.
    pub completed_events: usize,
}

impl UsageContext {
    /// Builds the context for one analysis call.
    #[must_use]
    pub fn new(settings: &BudgetSettings, events: &[ServiceEvent], now: DateTime<Utc>) -> Self {
        Self {
            ideal_utilization: PlanCalendar::ideal_utilization(settings, now),
            completed_events: events
                .iter()
                .filter(|event| event.status.is_consumed())
                .count(),
        }
    }
}

/// Capability that yields usage for a budget item.
pub trait UsageSource {
    /// Kind reported on results.
    fn kind(&self) -> UsageSourceKind;

    /// Usage attributed to `item`.
    fn usage_for(&self, item: &BudgetItem, ctx: &UsageContext) -> ItemUsage;
}

/// Exact usage from indexed records.
#[derive(Debug)]
pub struct EventDerivedUsage<'a> {
    index: UsageIndex<'a>,
}

impl<'a> EventDerivedUsage<'a> {
    /// Wraps a prebuilt index.
    #[must_use]
    pub const fn new(index: UsageIndex<'a>) -> Self {
        Self { index }
    }

    /// Indexes `events` and wraps the result.
    #[must_use]
    pub fn from_events(events: &'a [ServiceEvent]) -> Self {
        Self::new(UsageIndex::build(events))
    }
}

impl UsageSource for EventDerivedUsage<'_> {
    fn kind(&self) -> UsageSourceKind {
        UsageSourceKind::EventDerived
    }

    fn usage_for(&self, item: &BudgetItem, _ctx: &UsageContext) -> ItemUsage {
        self.index.usage_for(item)
    }
}

/// Synthetic usage estimated from event counts and plan progress.
///
/// `f = max(0, (ideal + ((id mod 5) − 2) × 0.08) × min(1, completed / 10))`.
/// Items with `id mod 7 == 0` are boosted ×1.25 and may reach 1.2; all others
/// cap at 1.0. `used = round(quantity × f)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticUsage;

impl SyntheticUsage {
    /// Synthetic utilization fraction for `item`.
    #[must_use]
    pub fn fraction(item: &BudgetItem, ctx: &UsageContext) -> Decimal {
        let completed = i64::try_from(ctx.completed_events).unwrap_or(i64::MAX);
        let activity = (Decimal::from(completed) / Decimal::from(FULL_ACTIVITY_EVENTS))
            .min(Decimal::ONE);
        let bucket = i64::try_from(item.id.bucket(5)).unwrap_or(0);
        let spread = Decimal::from(bucket - 2);
        let fraction =
            ((ctx.ideal_utilization + spread * VARIANCE_STEP) * activity).max(Decimal::ZERO);

        if item.id.bucket(7) == 0 {
            (fraction * OVERRUN_BOOST).min(OVERRUN_CAP)
        } else {
            fraction.min(Decimal::ONE)
        }
    }
}

impl UsageSource for SyntheticUsage {
    fn kind(&self) -> UsageSourceKind {
        UsageSourceKind::Synthetic
    }

    fn usage_for(&self, item: &BudgetItem, ctx: &UsageContext) -> ItemUsage {
        let used = (Decimal::from(item.quantity) * Self::fraction(item, ctx))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0);

        ItemUsage {
            quantity: used,
            cost: Decimal::from(used).saturating_mul(item.unit_price),
            history: Vec::new(),
        }
    }
}
