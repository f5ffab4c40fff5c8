use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::PopulationError;
use crate::models::YearSeries;

/// Ordinary least squares line fit of value on year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line through a historical series.
    ///
    /// Closed-form OLS with mean-centered years. Requires at least two
    /// observations; the year axis always has nonzero spread, so the fit
    /// never degenerates.
    pub fn fit(series: &YearSeries) -> Result<Self, PopulationError> {
        let n = series.len();
        if n < 2 {
            return Err(PopulationError::InsufficientData(format!(
                "linear fit requires at least 2 observations, got {n}"
            )));
        }

        let years: Vec<f64> = series.years().map(f64::from).collect();
        let values = series.values();
        let year_mean = years.iter().mean();
        let value_mean = values.iter().mean();

        let mut covariance = 0.0;
        let mut year_variance = 0.0;
        for (x, y) in years.iter().zip(values) {
            let dx = x - year_mean;
            covariance += dx * (y - value_mean);
            year_variance += dx * dx;
        }

        let slope = covariance / year_variance;
        Ok(Self {
            slope,
            intercept: value_mean - slope * year_mean,
        })
    }

    /// Evaluate the fitted line at a year. Years far outside the historical
    /// range are permitted.
    pub fn predict(&self, year: i32) -> f64 {
        self.intercept + self.slope * f64::from(year)
    }

    /// Evaluate the fitted line at several years.
    pub fn predict_years(&self, years: impl IntoIterator<Item = i32>) -> Vec<f64> {
        years.into_iter().map(|y| self.predict(y)).collect()
    }
}
