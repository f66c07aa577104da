//! Pre-indexed usage records keyed by budget item.

use std::collections::HashMap;

use allotment_shared::types::BudgetItemId;
use rust_decimal::Decimal;

use super::types::{DatedQuantity, ServiceEvent};
use crate::budget::BudgetItem;

/// Aggregated usage for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUsage {
    /// Total quantity consumed.
    pub quantity: i64,
    /// Total cost at the recorded prices.
    pub cost: Decimal,
    /// Individual consumptions, in event order.
    pub history: Vec<DatedQuantity>,
}

impl ItemUsage {
    fn absorb(&mut self, other: &Self) {
        self.quantity = self.quantity.saturating_add(other.quantity);
        self.cost = self.cost.saturating_add(other.cost);
        self.history.extend_from_slice(&other.history);
    }
}

/// Usage records grouped by the item they refer to.
///
/// Built in one pass over all events so each item lookup is O(1).
/// A record is attributed by item ID when it has one, otherwise by code.
#[derive(Debug, Default)]
pub struct UsageIndex<'a> {
    by_id: HashMap<BudgetItemId, ItemUsage>,
    by_code: HashMap<&'a str, ItemUsage>,
    record_count: usize,
}

impl<'a> UsageIndex<'a> {
    /// Indexes every usage record across `events`.
    #[must_use]
    pub fn build(events: &'a [ServiceEvent]) -> Self {
        let mut index = Self::default();

        for event in events {
            for record in &event.usage {
                let slot = match (record.item_id, record.item_code.as_deref()) {
                    (Some(id), _) => index.by_id.entry(id).or_default(),
                    (None, Some(code)) => index.by_code.entry(code).or_default(),
                    (None, None) => continue,
                };
                slot.quantity = slot.quantity.saturating_add(record.quantity);
                slot.cost = slot.cost.saturating_add(record.cost());
                slot.history.push(DatedQuantity {
                    at: event.occurred_at,
                    quantity: record.quantity,
                });
                index.record_count += 1;
            }
        }

        index
    }

    /// Number of usage records matched to an item reference or code.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.record_count
    }

    /// Returns true when no usage record was indexed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Usage attributed to `item`, by ID and by code combined.
    #[must_use]
    pub fn usage_for(&self, item: &BudgetItem) -> ItemUsage {
        let mut usage = ItemUsage::default();
        if let Some(by_id) = self.by_id.get(&item.id) {
            usage.absorb(by_id);
        }
        if let Some(by_code) = self.by_code.get(item.item_code.as_str()) {
            usage.absorb(by_code);
        }
        usage.history.sort_by_key(|entry| entry.at);
        usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::types::{SessionStatus, UsageRecord};
    use allotment_shared::types::ServiceEventId;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn item(id: u128, code: &str) -> BudgetItem {
        BudgetItem {
            id: BudgetItemId::from_u128(id),
            description: "Speech session".to_string(),
            item_code: code.to_string(),
            category: "Speech".to_string(),
            quantity: 10,
            unit_price: dec!(50),
        }
    }

    fn event(day: u32, usage: Vec<UsageRecord>) -> ServiceEvent {
        ServiceEvent {
            id: ServiceEventId::new(),
            status: SessionStatus::Completed,
            occurred_at: Utc.with_ymd_and_hms(2026, 1, day, 9, 0, 0).unwrap(),
            usage,
        }
    }

    fn by_code(code: &str, quantity: i64, price: rust_decimal::Decimal) -> UsageRecord {
        UsageRecord {
            item_id: None,
            item_code: Some(code.to_string()),
            quantity,
            unit_price: price,
        }
    }

    #[test]
    fn test_sums_records_by_code() {
        let events = vec![
            event(1, vec![by_code("SP-1", 1, dec!(50))]),
            event(2, vec![by_code("SP-1", 2, dec!(55)), by_code("OT-1", 1, dec!(80))]),
        ];
        let index = UsageIndex::build(&events);

        let usage = index.usage_for(&item(1, "SP-1"));
        assert_eq!(usage.quantity, 3);
        assert_eq!(usage.cost, dec!(160));
        assert_eq!(usage.history.len(), 2);
        assert_eq!(index.record_count(), 3);
    }

    #[test]
    fn test_item_id_takes_precedence_over_code() {
        let record = UsageRecord {
            item_id: Some(BudgetItemId::from_u128(2)),
            item_code: Some("SP-1".to_string()),
            quantity: 4,
            unit_price: dec!(10),
        };
        let events = vec![event(3, vec![record])];
        let index = UsageIndex::build(&events);

        assert_eq!(index.usage_for(&item(1, "SP-1")).quantity, 0);
        assert_eq!(index.usage_for(&item(2, "OTHER")).quantity, 4);
    }

    #[test]
    fn test_unmatched_records_are_ignored() {
        let record = UsageRecord {
            item_id: None,
            item_code: None,
            quantity: 4,
            unit_price: dec!(10),
        };
        let events = vec![event(3, vec![record])];
        let index = UsageIndex::build(&events);

        assert!(index.is_empty());
    }

    #[test]
    fn test_history_is_chronological() {
        let events = vec![
            event(9, vec![by_code("SP-1", 1, dec!(50))]),
            event(2, vec![by_code("SP-1", 1, dec!(50))]),
        ];
        let index = UsageIndex::build(&events);
        let usage = index.usage_for(&item(1, "SP-1"));

        assert!(usage.history[0].at < usage.history[1].at);
    }
}
