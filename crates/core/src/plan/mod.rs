//! Plan window and plan-progress helpers.

pub mod progress;

pub use progress::{DEFAULT_ELAPSED_DAYS, DEFAULT_PLAN_DAYS, PlanCalendar};
