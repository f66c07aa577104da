//! Reallocation data types.

use allotment_shared::types::BudgetItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::EnhancedBudgetItem;

/// The identifying parts of an item taking part in a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    /// Item ID.
    pub id: BudgetItemId,
    /// External item code.
    pub item_code: String,
    /// Human description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Unit price.
    pub unit_price: Decimal,
}

impl From<&EnhancedBudgetItem> for ItemRef {
    fn from(enhanced: &EnhancedBudgetItem) -> Self {
        Self {
            id: enhanced.item.id,
            item_code: enhanced.item.item_code.clone(),
            description: enhanced.item.description.clone(),
            category: enhanced.item.category.clone(),
            unit_price: enhanced.item.unit_price,
        }
    }
}

/// A proposed transfer of unused allocation between two items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReallocationSuggestion {
    /// Under-utilized donor.
    pub from_item: ItemRef,
    /// Over-utilized recipient.
    pub to_item: ItemRef,
    /// Units to move. Always positive.
    pub amount: i64,
    /// Units the recipient is projected to run short by plan end.
    pub projected_shortage: i64,
    /// `amount × (to.unit_price − from.unit_price)`. Positive raises total cost.
    pub cost_impact: Decimal,
    /// Whether donor and recipient share a category.
    pub same_category: bool,
}
