//! Budget error types.

use allotment_shared::AppError;
use allotment_shared::types::{BudgetItemId, ServiceEventId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Invalid engine inputs.
///
/// Missing dates, zero quantities, and empty lists are normal for a new plan
/// and never produce these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Allocated quantity is negative.
    #[error("Budget item {item_id} has negative quantity {quantity}")]
    NegativeQuantity {
        /// Offending item.
        item_id: BudgetItemId,
        /// Supplied quantity.
        quantity: i64,
    },

    /// Unit price is negative.
    #[error("Budget item {0} has a negative unit price")]
    NegativeUnitPrice(BudgetItemId),

    /// Available funds are negative.
    #[error("Available funds cannot be negative")]
    NegativeAvailableFunds,

    /// A usage record consumed a negative quantity.
    #[error("Service event {0} has a usage record with negative quantity")]
    NegativeUsageQuantity(ServiceEventId),

    /// A usage record carries a negative price.
    #[error("Service event {0} has a usage record with negative unit price")]
    NegativeUsagePrice(ServiceEventId),

    /// Amounts are too large to add up without overflowing.
    #[error("Total {0} exceed the supported amount range")]
    AmountOverflow(&'static str),

    /// Reference time precedes the plan's creation.
    #[error("Reference time {reference} is earlier than plan creation {created}")]
    ReferenceBeforeCreation {
        /// Plan creation timestamp.
        created: DateTime<Utc>,
        /// Supplied reference time.
        reference: DateTime<Utc>,
    },
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        Self::Validation(err.to_string())
    }
}
