//! Depletion forecasting.

pub mod depletion;

pub use depletion::{DepletionForecast, DepletionForecaster, ForecastBasis};
