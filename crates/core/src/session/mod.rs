//! Service events and the usage records they carry.

pub mod index;
pub mod types;

pub use index::{ItemUsage, UsageIndex};
pub use types::{DatedQuantity, ServiceEvent, SessionStatus, UsageRecord};
