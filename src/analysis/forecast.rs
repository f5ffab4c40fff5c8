use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::trend::LinearFit;
use crate::error::PopulationError;
use crate::models::{DrivingSeries, YearSeries};

/// Trailing window used by the moving-average strategy when none is given.
pub const DEFAULT_AVERAGING_WINDOW: usize = 3;

/// How a driving series is extended beyond its historical range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtrapolationStrategy {
    /// OLS line fit over all historical years, evaluated at the future years.
    LinearTrend,
    /// Arithmetic mean of the most recent `window` historical values, used
    /// for every future year.
    MovingAverage { window: usize },
    /// Fixed values supplied per future year, in year order.
    ManualOverride { values: Vec<f64> },
}

impl ExtrapolationStrategy {
    /// Moving average over the default trailing window.
    pub fn moving_average() -> Self {
        ExtrapolationStrategy::MovingAverage {
            window: DEFAULT_AVERAGING_WINDOW,
        }
    }
}

/// Forecast the next `future_years` values of a historical series.
pub fn forecast_values(
    series: &YearSeries,
    strategy: &ExtrapolationStrategy,
    future_years: usize,
) -> Result<Vec<f64>, PopulationError> {
    match strategy {
        ExtrapolationStrategy::LinearTrend => {
            let fit = LinearFit::fit(series)?;
            let end = series.end_year().ok_or_else(|| {
                PopulationError::InsufficientData("cannot extend an empty series".to_string())
            })?;
            Ok(fit.predict_years((1..=future_years as i32).map(|i| end + i)))
        }
        ExtrapolationStrategy::MovingAverage { window } => {
            if *window == 0 {
                return Err(PopulationError::ValidationError(
                    "averaging window must be at least 1".to_string(),
                ));
            }
            if series.is_empty() {
                return Err(PopulationError::InsufficientData(
                    "cannot average an empty series".to_string(),
                ));
            }
            let values = series.values();
            let tail = &values[values.len().saturating_sub(*window)..];
            let mean = tail.iter().mean();
            Ok(vec![mean; future_years])
        }
        ExtrapolationStrategy::ManualOverride { values } => {
            if values.len() != future_years {
                return Err(PopulationError::LengthMismatch(format!(
                    "manual override supplies {} values for {future_years} future years",
                    values.len()
                )));
            }
            Ok(values.clone())
        }
    }
}

/// Extend a historical series by its forecast values.
pub fn extend_series(
    series: &YearSeries,
    strategy: &ExtrapolationStrategy,
    future_years: usize,
) -> Result<YearSeries, PopulationError> {
    if future_years == 0 {
        return Ok(series.clone());
    }
    let predicted = forecast_values(series, strategy, future_years)?;
    Ok(series.with_appended(&predicted))
}

/// One extrapolation strategy per driving series, so a manually-estimated
/// year and regression-extended series can be mixed in one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingForecast {
    pub inflow: ExtrapolationStrategy,
    pub outflow: ExtrapolationStrategy,
    pub births: ExtrapolationStrategy,
    pub deaths: ExtrapolationStrategy,
}

impl DrivingForecast {
    /// Apply the same strategy to all four driving series.
    pub fn uniform(strategy: ExtrapolationStrategy) -> Self {
        Self {
            inflow: strategy.clone(),
            outflow: strategy.clone(),
            births: strategy.clone(),
            deaths: strategy,
        }
    }
}

/// Extend each driving series independently over `future_years`.
///
/// Deterministic and idempotent: the same historical inputs and the same
/// requested horizon always produce bit-identical extended series.
pub fn extend_driving(
    driving: &DrivingSeries,
    forecast: &DrivingForecast,
    future_years: usize,
) -> Result<DrivingSeries, PopulationError> {
    DrivingSeries::new(
        extend_series(driving.inflow(), &forecast.inflow, future_years)?,
        extend_series(driving.outflow(), &forecast.outflow, future_years)?,
        extend_series(driving.births(), &forecast.births, future_years)?,
        extend_series(driving.deaths(), &forecast.deaths, future_years)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn linear_series() -> YearSeries {
        // value = 10 * (year - 2011)
        YearSeries::new(2012, vec![10.0, 20.0, 30.0])
    }

    #[test]
    fn test_moving_average_window_three() {
        let series = linear_series();
        let predicted =
            forecast_values(&series, &ExtrapolationStrategy::moving_average(), 4).unwrap();
        assert_eq!(predicted, vec![20.0, 20.0, 20.0, 20.0]);
    }

    #[test]
    fn test_moving_average_shorter_window() {
        let series = linear_series();
        let strategy = ExtrapolationStrategy::MovingAverage { window: 2 };
        let predicted = forecast_values(&series, &strategy, 1).unwrap();
        assert_eq!(predicted, vec![25.0]);
    }

    #[test]
    fn test_moving_average_window_larger_than_history() {
        let series = YearSeries::new(2012, vec![10.0, 30.0]);
        let strategy = ExtrapolationStrategy::MovingAverage { window: 10 };
        let predicted = forecast_values(&series, &strategy, 2).unwrap();
        assert_eq!(predicted, vec![20.0, 20.0]);
    }

    #[test]
    fn test_moving_average_zero_window_rejected() {
        let series = linear_series();
        let strategy = ExtrapolationStrategy::MovingAverage { window: 0 };
        assert!(forecast_values(&series, &strategy, 1).is_err());
    }

    #[test]
    fn test_moving_average_empty_series_rejected() {
        let series = YearSeries::new(2012, vec![]);
        let result = forecast_values(&series, &ExtrapolationStrategy::moving_average(), 1);
        assert!(matches!(result, Err(PopulationError::InsufficientData(_))));
    }

    #[test]
    fn test_linear_trend_follows_line() {
        let series = linear_series();
        let predicted = forecast_values(&series, &ExtrapolationStrategy::LinearTrend, 2).unwrap();
        assert_approx_eq!(predicted[0], 40.0, 1e-9);
        assert_approx_eq!(predicted[1], 50.0, 1e-9);
    }

    #[test]
    fn test_linear_trend_single_point_rejected() {
        let series = YearSeries::new(2012, vec![10.0]);
        let result = forecast_values(&series, &ExtrapolationStrategy::LinearTrend, 1);
        assert!(matches!(result, Err(PopulationError::InsufficientData(_))));
    }

    #[test]
    fn test_manual_override_values_used_verbatim() {
        let series = linear_series();
        let strategy = ExtrapolationStrategy::ManualOverride {
            values: vec![111.0, 222.0],
        };
        let predicted = forecast_values(&series, &strategy, 2).unwrap();
        assert_eq!(predicted, vec![111.0, 222.0]);
    }

    #[test]
    fn test_manual_override_wrong_length_rejected() {
        let series = linear_series();
        let strategy = ExtrapolationStrategy::ManualOverride {
            values: vec![111.0],
        };
        let result = forecast_values(&series, &strategy, 2);
        assert!(matches!(result, Err(PopulationError::LengthMismatch(_))));
    }

    #[test]
    fn test_extend_series_appends_years() {
        let series = linear_series();
        let extended =
            extend_series(&series, &ExtrapolationStrategy::moving_average(), 2).unwrap();
        assert_eq!(extended.len(), 5);
        assert_eq!(extended.end_year(), Some(2016));
        assert_eq!(extended.get(2016), Some(20.0));
        // Historical values untouched
        assert_eq!(extended.get(2013), Some(20.0));
    }

    #[test]
    fn test_extend_series_zero_years_is_identity() {
        let series = linear_series();
        let extended = extend_series(&series, &ExtrapolationStrategy::LinearTrend, 0).unwrap();
        assert_eq!(extended, series);
    }

    #[test]
    fn test_extend_is_idempotent() {
        let series = YearSeries::new(2012, vec![10.7, 19.2, 31.8, 38.4]);
        let a = extend_series(&series, &ExtrapolationStrategy::LinearTrend, 3).unwrap();
        let b = extend_series(&series, &ExtrapolationStrategy::LinearTrend, 3).unwrap();
        for (x, y) in a.values().iter().zip(b.values()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_extend_driving_uniform() {
        let driving = DrivingSeries::new(
            YearSeries::new(2012, vec![10.0, 20.0, 30.0]),
            YearSeries::new(2012, vec![5.0, 10.0, 15.0]),
            YearSeries::new(2012, vec![3.0, 3.0, 3.0]),
            YearSeries::new(2012, vec![1.0, 2.0, 3.0]),
        )
        .unwrap();
        let forecast = DrivingForecast::uniform(ExtrapolationStrategy::moving_average());
        let extended = extend_driving(&driving, &forecast, 2).unwrap();
        assert_eq!(extended.len(), 5);
        assert_eq!(extended.inflow().get(2015), Some(20.0));
        assert_eq!(extended.outflow().get(2016), Some(10.0));
        assert_eq!(extended.births().get(2015), Some(3.0));
        assert_eq!(extended.deaths().get(2016), Some(2.0));
    }

    #[test]
    fn test_extend_driving_mixed_strategies() {
        let driving = DrivingSeries::new(
            YearSeries::new(2012, vec![10.0, 20.0]),
            YearSeries::new(2012, vec![5.0, 10.0]),
            YearSeries::new(2012, vec![3.0, 3.0]),
            YearSeries::new(2012, vec![1.0, 2.0]),
        )
        .unwrap();
        let forecast = DrivingForecast {
            inflow: ExtrapolationStrategy::LinearTrend,
            outflow: ExtrapolationStrategy::MovingAverage { window: 2 },
            births: ExtrapolationStrategy::ManualOverride { values: vec![4.0] },
            deaths: ExtrapolationStrategy::ManualOverride { values: vec![2.5] },
        };
        let extended = extend_driving(&driving, &forecast, 1).unwrap();
        assert_approx_eq!(extended.inflow().get(2014).unwrap(), 30.0, 1e-9);
        assert_approx_eq!(extended.outflow().get(2014).unwrap(), 7.5, 1e-9);
        assert_eq!(extended.births().get(2014), Some(4.0));
        assert_eq!(extended.deaths().get(2014), Some(2.5));
    }
}
