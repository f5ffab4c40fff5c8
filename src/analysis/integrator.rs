use serde::{Deserialize, Serialize};

use crate::error::PopulationError;
use crate::models::{DrivingSeries, YearSeries};

/// Modeled population over a simulated horizon.
///
/// Immutable once computed; rerun [`integrate`] if any input changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Initial population the run started from
    pub initial_population: f64,
    /// Integration step in years
    pub time_step: f64,
    /// Modeled population, one value per simulated year
    pub population: YearSeries,
}

impl SimulationState {
    /// Modeled population at the final simulated year.
    pub fn final_population(&self) -> f64 {
        self.population
            .values()
            .last()
            .copied()
            .unwrap_or(self.initial_population)
    }
}

/// Forward-integrate the box-model recurrence over the driving horizon.
///
/// Explicit (forward Euler) integration of the mass balance
/// dC/dt = Qin - Qout + births - deaths:
///
/// - `value[0] = initial_population`
/// - `value[t] = value[t-1] + (Qin[t-1] - Qout[t-1] + P[t-1] - D[t-1]) * dt`
///
/// Deterministic: identical inputs always produce identical outputs.
///
/// # Examples
///
/// ```
/// use population_box_analyzer::analysis::integrate;
/// use population_box_analyzer::models::{DrivingSeries, YearSeries};
///
/// let driving = DrivingSeries::new(
///     YearSeries::new(2012, vec![100.0, 110.0]),
///     YearSeries::new(2012, vec![90.0, 95.0]),
///     YearSeries::new(2012, vec![10.0, 12.0]),
///     YearSeries::new(2012, vec![5.0, 6.0]),
/// ).unwrap();
/// let state = integrate(1000.0, 1.0, &driving).unwrap();
/// assert_eq!(state.population.values(), &[1000.0, 1015.0]);
/// ```
pub fn integrate(
    initial_population: f64,
    time_step: f64,
    driving: &DrivingSeries,
) -> Result<SimulationState, PopulationError> {
    if driving.is_empty() {
        return Err(PopulationError::EmptyHorizon(
            "driving series cover zero years".to_string(),
        ));
    }
    if !(time_step.is_finite() && time_step > 0.0) {
        return Err(PopulationError::ValidationError(format!(
            "time step must be a positive real number, got {time_step}"
        )));
    }

    let horizon = driving.len();
    let mut values = Vec::with_capacity(horizon);
    values.push(initial_population);
    for t in 1..horizon {
        values.push(values[t - 1] + driving.net_rate(t - 1) * time_step);
    }

    Ok(SimulationState {
        initial_population,
        time_step,
        population: YearSeries::new(driving.start_year(), values),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_driving(
        inflow: Vec<f64>,
        outflow: Vec<f64>,
        births: Vec<f64>,
        deaths: Vec<f64>,
    ) -> DrivingSeries {
        DrivingSeries::new(
            YearSeries::new(2012, inflow),
            YearSeries::new(2012, outflow),
            YearSeries::new(2012, births),
            YearSeries::new(2012, deaths),
        )
        .unwrap()
    }

    #[test]
    fn test_first_value_is_initial_condition() {
        let driving = make_driving(
            vec![100.0, 110.0, 120.0],
            vec![90.0, 95.0, 100.0],
            vec![10.0, 12.0, 14.0],
            vec![5.0, 6.0, 7.0],
        );
        let state = integrate(123_456.0, 1.0, &driving).unwrap();
        assert_eq!(state.population.values()[0], 123_456.0);
    }

    #[test]
    fn test_two_year_scenario() {
        let driving = make_driving(
            vec![100.0, 110.0],
            vec![90.0, 95.0],
            vec![10.0, 12.0],
            vec![5.0, 6.0],
        );
        let state = integrate(1000.0, 1.0, &driving).unwrap();
        assert_eq!(state.population.values(), &[1000.0, 1015.0]);
    }

    #[test]
    fn test_recurrence_step_by_step() {
        let driving = make_driving(
            vec![50.0, 60.0, 70.0, 80.0],
            vec![40.0, 45.0, 50.0, 55.0],
            vec![5.0, 6.0, 7.0, 8.0],
            vec![2.0, 3.0, 4.0, 5.0],
        );
        let dt = 1.0;
        let state = integrate(500.0, dt, &driving).unwrap();
        let values = state.population.values();
        for t in 1..values.len() {
            let expected = driving.net_rate(t - 1) * dt;
            assert!((values[t] - values[t - 1] - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fractional_time_step() {
        let driving = make_driving(vec![100.0, 100.0], vec![90.0, 90.0], vec![0.0, 0.0], vec![
            0.0, 0.0,
        ]);
        let state = integrate(1000.0, 0.5, &driving).unwrap();
        // 1000 + (100 - 90) * 0.5
        assert_eq!(state.population.values()[1], 1005.0);
    }

    #[test]
    fn test_years_follow_driving_years() {
        let driving = make_driving(
            vec![1.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        );
        let state = integrate(10.0, 1.0, &driving).unwrap();
        assert_eq!(state.population.start_year(), 2012);
        assert_eq!(state.population.end_year(), Some(2014));
    }

    #[test]
    fn test_empty_horizon_rejected() {
        let driving = make_driving(vec![], vec![], vec![], vec![]);
        let result = integrate(1000.0, 1.0, &driving);
        assert!(matches!(result, Err(PopulationError::EmptyHorizon(_))));
    }

    #[test]
    fn test_zero_time_step_rejected() {
        let driving = make_driving(vec![1.0], vec![1.0], vec![1.0], vec![1.0]);
        assert!(integrate(1000.0, 0.0, &driving).is_err());
    }

    #[test]
    fn test_negative_time_step_rejected() {
        let driving = make_driving(vec![1.0], vec![1.0], vec![1.0], vec![1.0]);
        assert!(integrate(1000.0, -1.0, &driving).is_err());
    }

    #[test]
    fn test_nan_time_step_rejected() {
        let driving = make_driving(vec![1.0], vec![1.0], vec![1.0], vec![1.0]);
        assert!(integrate(1000.0, f64::NAN, &driving).is_err());
    }

    #[test]
    fn test_single_year_horizon() {
        let driving = make_driving(vec![100.0], vec![90.0], vec![10.0], vec![5.0]);
        let state = integrate(1000.0, 1.0, &driving).unwrap();
        assert_eq!(state.population.values(), &[1000.0]);
        assert_eq!(state.final_population(), 1000.0);
    }

    #[test]
    fn test_deterministic() {
        let driving = make_driving(
            vec![100.3, 110.7, 120.1],
            vec![90.9, 95.2, 100.8],
            vec![10.5, 12.3, 14.9],
            vec![5.1, 6.6, 7.2],
        );
        let a = integrate(1_000_000.0, 1.0, &driving).unwrap();
        let b = integrate(1_000_000.0, 1.0, &driving).unwrap();
        assert_eq!(a, b);
        // Bit-identical values, not merely approximately equal
        for (x, y) in a.population.values().iter().zip(b.population.values()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_final_population() {
        let driving = make_driving(
            vec![100.0, 110.0],
            vec![90.0, 95.0],
            vec![10.0, 12.0],
            vec![5.0, 6.0],
        );
        let state = integrate(1000.0, 1.0, &driving).unwrap();
        assert_eq!(state.final_population(), 1015.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let driving = make_driving(vec![1.0, 2.0], vec![1.0, 1.0], vec![0.0, 0.0], vec![
            0.0, 0.0,
        ]);
        let state = integrate(100.0, 1.0, &driving).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: SimulationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
