mod integrator;
mod trend;
mod forecast;
mod evaluator;
mod analyzer;

pub use integrator::{integrate, SimulationState};
pub use trend::LinearFit;
pub use forecast::{
    extend_driving, extend_series, forecast_values, DrivingForecast, ExtrapolationStrategy,
    DEFAULT_AVERAGING_WINDOW,
};
pub use evaluator::{ErrorReport, YearError};
pub use analyzer::Analyzer;
