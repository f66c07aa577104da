//! Service event data types.

use allotment_shared::types::{BudgetItemId, ServiceEventId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a service event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Booked but not yet delivered.
    Scheduled,
    /// Delivered.
    Completed,
    /// Called off.
    Cancelled,
    /// Delivered without charge.
    Waived,
    /// Delivered and invoiced.
    Billed,
    /// Moved to another slot.
    Rescheduled,
}

impl SessionStatus {
    /// Returns true for events that represent delivered, chargeable service.
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Completed | Self::Billed)
    }
}

/// Consumption of one budget item recorded against an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Matched budget item, when the host resolved it.
    #[serde(default)]
    pub item_id: Option<BudgetItemId>,
    /// Matched external item code.
    #[serde(default)]
    pub item_code: Option<String>,
    /// Quantity consumed.
    pub quantity: i64,
    /// Unit price at time of use.
    pub unit_price: Decimal,
}

impl UsageRecord {
    /// Cost of this record (`quantity × unit_price`), saturating at the Decimal range.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.unit_price)
    }

    /// Cost of this record, or `None` when it does not fit in a Decimal.
    #[must_use]
    pub fn checked_cost(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// A session or other billable occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEvent {
    /// Event ID.
    pub id: ServiceEventId,
    /// Current status.
    pub status: SessionStatus,
    /// When the event took place (or is scheduled to).
    pub occurred_at: DateTime<Utc>,
    /// Usage recorded against this event.
    #[serde(default)]
    pub usage: Vec<UsageRecord>,
}

/// A quantity consumed at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedQuantity {
    /// When it was consumed.
    pub at: DateTime<Utc>,
    /// How much was consumed.
    pub quantity: i64,
}
