use serde::{Deserialize, Serialize};

use super::{DemographicTable, YearSeries};
use crate::error::PopulationError;

/// The four exogenous inputs that drive the box model, aligned on an
/// identical year range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingSeries {
    inflow: YearSeries,
    outflow: YearSeries,
    births: YearSeries,
    deaths: YearSeries,
}

impl DrivingSeries {
    /// Assemble the driving inputs, rejecting misaligned series.
    pub fn new(
        inflow: YearSeries,
        outflow: YearSeries,
        births: YearSeries,
        deaths: YearSeries,
    ) -> Result<Self, PopulationError> {
        let named = [
            ("Qout", &outflow),
            ("births", &births),
            ("deaths", &deaths),
        ];
        for (name, series) in named {
            if !inflow.same_span(series) {
                return Err(PopulationError::LengthMismatch(format!(
                    "Qin covers {} years from {}, {name} covers {} years from {}",
                    inflow.len(),
                    inflow.start_year(),
                    series.len(),
                    series.start_year()
                )));
            }
        }
        Ok(Self {
            inflow,
            outflow,
            births,
            deaths,
        })
    }

    /// Extract the driving inputs from a demographic table.
    pub fn from_table(table: &DemographicTable) -> Result<Self, PopulationError> {
        Self::new(
            table.in_migration(),
            table.out_migration(),
            table.births(),
            table.deaths(),
        )
    }

    /// Number of years covered.
    pub fn len(&self) -> usize {
        self.inflow.len()
    }

    /// True when no years are covered.
    pub fn is_empty(&self) -> bool {
        self.inflow.is_empty()
    }

    /// First covered year.
    pub fn start_year(&self) -> i32 {
        self.inflow.start_year()
    }

    /// Last covered year, if non-empty.
    pub fn end_year(&self) -> Option<i32> {
        self.inflow.end_year()
    }

    /// In-migration series.
    pub fn inflow(&self) -> &YearSeries {
        &self.inflow
    }

    /// Out-migration series.
    pub fn outflow(&self) -> &YearSeries {
        &self.outflow
    }

    /// Births series.
    pub fn births(&self) -> &YearSeries {
        &self.births
    }

    /// Deaths series.
    pub fn deaths(&self) -> &YearSeries {
        &self.deaths
    }

    /// Net rate of population change in year index `t`:
    /// inflow - outflow + births - deaths.
    pub fn net_rate(&self, t: usize) -> f64 {
        self.inflow.values()[t] - self.outflow.values()[t] + self.births.values()[t]
            - self.deaths.values()[t]
    }
}
