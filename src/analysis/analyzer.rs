use crate::analysis::{
    extend_driving, integrate, DrivingForecast, ErrorReport, SimulationState,
};
use crate::error::PopulationError;
use crate::models::{DemographicTable, DrivingSeries, YearSeries};

/// Unified API that groups the box-model operations over one dataset.
pub struct Analyzer<'a> {
    table: &'a DemographicTable,
}

impl<'a> Analyzer<'a> {
    /// Create a new Analyzer for the given demographic table.
    pub fn new(table: &'a DemographicTable) -> Self {
        Self { table }
    }

    /// The reference population reconstructed from recorded components.
    pub fn reference(&self) -> YearSeries {
        self.table.reference_population()
    }

    /// Initial condition for a run: the supplied literal, or the reference
    /// value at the first observed year when none is given.
    pub fn initial_population(&self, override_value: Option<f64>) -> Result<f64, PopulationError> {
        match override_value {
            Some(value) => Ok(value),
            None => self.table.initial_population(),
        }
    }

    /// Integrate the box model over the observed horizon.
    pub fn simulate(
        &self,
        initial_override: Option<f64>,
        time_step: f64,
    ) -> Result<SimulationState, PopulationError> {
        let driving = DrivingSeries::from_table(self.table)?;
        let initial = self.initial_population(initial_override)?;
        integrate(initial, time_step, &driving)
    }

    /// Extend each driving series by `future_years` with the given forecast
    /// strategies, then integrate over the extended horizon from the same
    /// initial condition.
    pub fn simulate_extended(
        &self,
        initial_override: Option<f64>,
        time_step: f64,
        forecast: &DrivingForecast,
        future_years: usize,
    ) -> Result<SimulationState, PopulationError> {
        let driving = DrivingSeries::from_table(self.table)?;
        let extended = extend_driving(&driving, forecast, future_years)?;
        let initial = self.initial_population(initial_override)?;
        integrate(initial, time_step, &extended)
    }

    /// Compare a simulation against the reference population.
    ///
    /// The modeled series is trimmed to the reference's year range first:
    /// forecast years have no ground truth to compare against.
    pub fn evaluate(&self, state: &SimulationState) -> Result<ErrorReport, PopulationError> {
        let reference = self.reference();
        let (Some(ref_end), Some(model_end)) =
            (reference.end_year(), state.population.end_year())
        else {
            return Err(PopulationError::InsufficientData(
                "no years to evaluate".to_string(),
            ));
        };
        let end = ref_end.min(model_end);
        let modeled = state.population.window(state.population.start_year(), end)?;
        let reference = reference.window(reference.start_year(), end)?;
        ErrorReport::evaluate(&modeled, &reference)
    }
}
