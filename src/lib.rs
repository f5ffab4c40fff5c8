pub mod analysis;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

pub use analysis::Analyzer;
pub use error::PopulationError;
pub use io::{TableReader, TableWriter};
pub use models::{DemographicRecord, DemographicTable, DrivingSeries, YearSeries};
