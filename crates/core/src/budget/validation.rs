//! Input validation for engine entry points.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{BudgetItem, BudgetSettings};
use crate::session::ServiceEvent;

/// Validation rules shared by every public entry point.
pub struct BudgetValidator;

impl BudgetValidator {
    /// Rejects negative items and allocations too large to total.
    pub fn validate_items(items: &[BudgetItem]) -> Result<(), BudgetError> {
        let mut allocated = Decimal::ZERO;
        for item in items {
            if item.quantity < 0 {
                return Err(BudgetError::NegativeQuantity {
                    item_id: item.id,
                    quantity: item.quantity,
                });
            }
            if item.unit_price < Decimal::ZERO {
                return Err(BudgetError::NegativeUnitPrice(item.id));
            }
            allocated = item
                .checked_total_cost()
                .and_then(|cost| allocated.checked_add(cost))
                .ok_or(BudgetError::AmountOverflow("item allocations"))?;
        }
        Ok(())
    }

    /// Rejects negative funds and a reference time before plan creation.
    pub fn validate_settings(
        settings: &BudgetSettings,
        reference_time: DateTime<Utc>,
    ) -> Result<(), BudgetError> {
        if settings.available_funds < Decimal::ZERO {
            return Err(BudgetError::NegativeAvailableFunds);
        }
        if let Some(created) = settings.created_at
            && reference_time < created
        {
            return Err(BudgetError::ReferenceBeforeCreation {
                created,
                reference: reference_time,
            });
        }
        Ok(())
    }

    /// Rejects usage records with negative quantity or price, and usage
    /// too large to total.
    pub fn validate_events(events: &[ServiceEvent]) -> Result<(), BudgetError> {
        let mut quantity: i64 = 0;
        let mut cost = Decimal::ZERO;
        for event in events {
            for record in &event.usage {
                if record.quantity < 0 {
                    return Err(BudgetError::NegativeUsageQuantity(event.id));
                }
                if record.unit_price < Decimal::ZERO {
                    return Err(BudgetError::NegativeUsagePrice(event.id));
                }
                quantity = quantity
                    .checked_add(record.quantity)
                    .ok_or(BudgetError::AmountOverflow("usage quantities"))?;
                cost = record
                    .checked_cost()
                    .and_then(|record_cost| cost.checked_add(record_cost))
                    .ok_or(BudgetError::AmountOverflow("usage costs"))?;
            }
        }
        Ok(())
    }

    /// Runs every rule.
    pub fn validate(
        items: &[BudgetItem],
        settings: &BudgetSettings,
        events: &[ServiceEvent],
        reference_time: DateTime<Utc>,
    ) -> Result<(), BudgetError> {
        Self::validate_items(items)?;
        Self::validate_settings(settings, reference_time)?;
        Self::validate_events(events)
    }
}
