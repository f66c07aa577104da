//! Cross-item reallocation suggestions.

pub mod service;
pub mod types;


pub use service::ReallocationService;
pub use types::{ItemRef, ReallocationSuggestion};
