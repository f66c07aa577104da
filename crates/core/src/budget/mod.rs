//! Budget items, plan settings, and their derived utilization records.

pub mod error;
pub mod types;
pub mod validation;


pub use error::BudgetError;
pub use types::{
    BudgetItem, BudgetSettings, DEFAULT_CATEGORY, EnhancedBudgetItem, OVERUTILIZED_DELTA,
    SeverityBand, UNDERUTILIZED_DELTA, UtilizationStatus,
};
pub use validation::BudgetValidator;
