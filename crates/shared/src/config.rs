//! Application configuration management.

use serde::Deserialize;

use crate::types::{RecommendationSort, UsageStrategy};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Analytics engine configuration.
    pub analytics: AnalyticsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Snapshot input configuration.
    pub snapshot: SnapshotConfig,
}

/// Analytics engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Usage data source the engine should use.
    pub usage_strategy: UsageStrategy,
    /// Seed for relevance jitter. Jitter is disabled when absent.
    pub jitter_seed: Option<u64>,
    /// Sort key for recommendations.
    pub recommendation_sort: RecommendationSort,
    /// Replacement for the built-in service taxonomy.
    pub taxonomy: Option<Vec<TaxonomyEntry>>,
}

/// One service category and the goal keywords that make it relevant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxonomyEntry {
    /// Category name, matched against budget item categories.
    pub name: String,
    /// Keywords matched against goal and subgoal text.
    pub keywords: Vec<String>,
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub filter: String,
    /// Log line encoding.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "allotment=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Snapshot input configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Default path of the JSON snapshot to analyze.
    pub path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("ALLOTMENT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
