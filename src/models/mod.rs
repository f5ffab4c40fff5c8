mod series;
mod record;
mod driving;

pub use series::YearSeries;
pub use record::{DemographicRecord, DemographicTable};
pub use driving::DrivingSeries;
