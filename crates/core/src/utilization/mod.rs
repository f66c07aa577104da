//! Utilization calculation over interchangeable usage sources.

pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use service::UtilizationService;
pub use source::{
    EventDerivedUsage, SyntheticUsage, UsageContext, UsageSource, UsageSourceKind,
};
