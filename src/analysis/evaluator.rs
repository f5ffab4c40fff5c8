use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::PopulationError;
use crate::models::YearSeries;

/// Modeled-vs-reference comparison for one year.
///
/// Sign convention: error = modeled - reference, so a positive error means
/// the model overestimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearError {
    pub year: i32,
    pub modeled: f64,
    pub reference: f64,
    pub error: f64,
    pub percent_error: f64,
}

/// Per-year errors and aggregate accuracy metrics for a model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub per_year: Vec<YearError>,
    pub mean_absolute_error: f64,
    pub root_mean_square_error: f64,
    pub mean_absolute_percentage_error: f64,
    /// Signed error at the most recent comparable year
    pub last_error: f64,
    /// Signed percentage error at the most recent comparable year
    pub last_percent_error: f64,
}

impl ErrorReport {
    /// Compare a modeled series against a reference series covering the same
    /// years.
    ///
    /// Fails with `LengthMismatch` when the year ranges differ and with
    /// `DivisionByZero` (naming the year) when a reference value is zero; a
    /// zero reference makes the percentage error undefined and a sentinel
    /// would silently skew MAPE.
    pub fn evaluate(
        modeled: &YearSeries,
        reference: &YearSeries,
    ) -> Result<Self, PopulationError> {
        if !modeled.same_span(reference) {
            return Err(PopulationError::LengthMismatch(format!(
                "modeled series covers {} years from {}, reference covers {} years from {}",
                modeled.len(),
                modeled.start_year(),
                reference.len(),
                reference.start_year()
            )));
        }
        let mut per_year = Vec::with_capacity(modeled.len());
        for ((year, model_value), &reference_value) in modeled.iter().zip(reference.values()) {
            if reference_value == 0.0 {
                return Err(PopulationError::DivisionByZero(format!(
                    "reference population is 0 in {year}"
                )));
            }
            let error = model_value - reference_value;
            per_year.push(YearError {
                year,
                modeled: model_value,
                reference: reference_value,
                error,
                percent_error: error / reference_value * 100.0,
            });
        }

        let mean_absolute_error = per_year.iter().map(|e| e.error.abs()).mean();
        let root_mean_square_error = per_year.iter().map(|e| e.error * e.error).mean().sqrt();
        let mean_absolute_percentage_error =
            per_year.iter().map(|e| e.percent_error.abs()).mean();

        let (last_error, last_percent_error) = match per_year.last() {
            Some(e) => (e.error, e.percent_error),
            None => {
                return Err(PopulationError::InsufficientData(
                    "no years to evaluate".to_string(),
                ))
            }
        };
        Ok(Self {
            per_year,
            mean_absolute_error,
            root_mean_square_error,
            mean_absolute_percentage_error,
            last_error,
            last_percent_error,
        })
    }
}
