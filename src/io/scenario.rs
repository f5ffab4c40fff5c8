use std::path::Path;

use serde::Deserialize;

use crate::analysis::{DrivingForecast, ExtrapolationStrategy, DEFAULT_AVERAGING_WINDOW};
use crate::error::PopulationError;

/// Per-run tunables loaded from a TOML scenario file.
///
/// Everything is optional; command-line flags take precedence over file
/// values. Per-series forecast strategies (including manual overrides, which
/// are unwieldy as flags) are only expressible here.
///
/// ```toml
/// initial_population = 10246565
/// forecast_years = 2
/// strategy = "linear"
///
/// [forecast.births]
/// kind = "manual_override"
/// values = [39456.0, 38000.0]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Literal initial population, overriding the derived value
    pub initial_population: Option<f64>,
    /// Integration step in years
    pub time_step: Option<f64>,
    /// Number of future years to forecast
    pub forecast_years: Option<usize>,
    /// First year assigned to CSV rows without a year column
    pub start_year: Option<i32>,
    /// Restrict the analysis to years >= from_year
    pub from_year: Option<i32>,
    /// Restrict the analysis to years <= to_year
    pub to_year: Option<i32>,
    /// Uniform strategy name: "linear" or "average"
    pub strategy: Option<String>,
    /// Trailing window for the "average" strategy
    pub window: Option<usize>,
    /// Full per-series strategy selection; wins over `strategy`
    pub forecast: Option<DrivingForecast>,
}

impl ScenarioConfig {
    /// Load a scenario from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PopulationError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse a scenario from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, PopulationError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the configured forecast strategies, if any.
    pub fn resolve_forecast(&self) -> Result<Option<DrivingForecast>, PopulationError> {
        if let Some(forecast) = &self.forecast {
            return Ok(Some(forecast.clone()));
        }
        let Some(name) = &self.strategy else {
            return Ok(None);
        };
        let strategy = parse_strategy(name, self.window)?;
        Ok(Some(DrivingForecast::uniform(strategy)))
    }
}

/// Map a strategy name from the CLI or a scenario file to a strategy.
pub fn parse_strategy(
    name: &str,
    window: Option<usize>,
) -> Result<ExtrapolationStrategy, PopulationError> {
    match name.to_lowercase().as_str() {
        "linear" | "trend" | "linear-trend" => Ok(ExtrapolationStrategy::LinearTrend),
        "average" | "mean" | "moving-average" => Ok(ExtrapolationStrategy::MovingAverage {
            window: window.unwrap_or(DEFAULT_AVERAGING_WINDOW),
        }),
        "manual" => Err(PopulationError::Config(
            "manual overrides need per-series values; use a [forecast.*] table in a scenario file"
                .to_string(),
        )),
        _ => Err(PopulationError::ParseError(format!(
            "Unknown extrapolation strategy: '{name}'. Use: linear or average"
        ))),
    }
}
