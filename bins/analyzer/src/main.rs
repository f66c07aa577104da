//! Allotment analyzer
//!
//! Reads a JSON snapshot of budget, event and goal records, runs the
//! analytics engine, and prints the result as JSON.
//!
//! Usage: allotment [SNAPSHOT] [REFERENCE_TIME]
//!
//! `SNAPSHOT` falls back to `snapshot.path` from configuration.
//! `REFERENCE_TIME` is RFC 3339 and defaults to now.

use std::process::ExitCode;

use allotment_core::{AnalysisInput, AnalysisOptions, AnalyticsEngine};
use allotment_shared::config::{LogFormat, LoggingConfig};
use allotment_shared::{AppConfig, AppError};
use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            init_tracing(&LoggingConfig::default());
            let err = AppError::from(err);
            error!(code = err.error_code(), error = %err, "failed to load configuration");
            return ExitCode::from(err.exit_code());
        }
    };
    init_tracing(&config.logging);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let app_err = err.downcast_ref::<AppError>();
            error!(
                code = app_err.map_or("INTERNAL_ERROR", AppError::error_code),
                error = %format!("{err:#}"),
                "analysis failed"
            );
            ExitCode::from(app_err.map_or(70, AppError::exit_code))
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let json = logging.format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn run(config: &AppConfig) -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);

    let path = args
        .next()
        .or_else(|| config.snapshot.path.clone())
        .ok_or_else(|| {
            AppError::Input("no snapshot given; pass a path or set snapshot.path".to_string())
        })?;
    let reference_time = match args.next() {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map_err(|err| AppError::Input(format!("invalid reference time {raw}: {err}")))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let raw = std::fs::read_to_string(&path)
        .map_err(|err| AppError::Input(format!("cannot read {path}: {err}")))?;
    let input: AnalysisInput = serde_json::from_str(&raw)
        .map_err(|err| AppError::Input(format!("cannot decode {path}: {err}")))?;
    info!(
        path = %path,
        items = input.items.len(),
        events = input.events.len(),
        goals = input.goals.len(),
        "snapshot loaded"
    );

    let engine = AnalyticsEngine::new(AnalysisOptions::from_config(&config.analytics));
    let result = engine
        .analyze(&input, reference_time)
        .map_err(AppError::from)?;

    let json = serde_json::to_string_pretty(&result).context("failed to encode result")?;
    println!("{json}");
    Ok(())
}
