//! Shared identifiers, errors, and configuration for Allotment.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe record references
//! - Engine option enums shared by configuration and the engine
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AnalyticsConfig, AppConfig, TaxonomyEntry};
pub use error::{AppError, AppResult};
