use serde::{Deserialize, Serialize};

use super::YearSeries;
use crate::error::PopulationError;

/// One year of recorded demographic data for the city.
///
/// Counts are kept as `f64` because forecast rows appended to a table carry
/// fractional estimates (regression or average values).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicRecord {
    /// Calendar year
    pub year: i32,
    /// In-migration across the city boundary (persons)
    pub in_migration: f64,
    /// Out-migration across the city boundary (persons)
    pub out_migration: f64,
    /// Live births (persons)
    pub births: f64,
    /// Deaths (persons)
    pub deaths: f64,
    /// Recorded male population (persons)
    pub male_population: f64,
    /// Recorded female population (persons)
    pub female_population: f64,
    /// General marriage rate, husband side (per 1,000)
    pub marriage_rate_husband: Option<f64>,
    /// General marriage rate, wife side (per 1,000)
    pub marriage_rate_wife: Option<f64>,
}

impl DemographicRecord {
    /// Net migration for this year: inflow minus outflow.
    pub fn net_migration(&self) -> f64 {
        self.in_migration - self.out_migration
    }

    /// Natural increase for this year: births minus deaths.
    pub fn natural_increase(&self) -> f64 {
        self.births - self.deaths
    }

    /// Recorded population with the year's own flows backed out:
    /// male + female - births + deaths - inflow + outflow.
    pub fn reference_population(&self) -> f64 {
        self.male_population + self.female_population - self.births + self.deaths
            - self.in_migration
            + self.out_migration
    }

    /// Check that every numeric field is finite.
    pub fn validate(&self) -> Result<(), PopulationError> {
        let fields = [
            ("in_migration", self.in_migration),
            ("out_migration", self.out_migration),
            ("births", self.births),
            ("deaths", self.deaths),
            ("male_population", self.male_population),
            ("female_population", self.female_population),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(PopulationError::ValidationError(format!(
                    "year {}: {name} is not finite, got {value}",
                    self.year
                )));
            }
        }
        Ok(())
    }
}

/// A complete demographic dataset for one city, one record per year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicTable {
    /// Name or identifier for this dataset
    pub name: String,
    /// Per-year records, contiguous and strictly increasing in year
    pub records: Vec<DemographicRecord>,
}

impl DemographicTable {
    /// Create a new empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Build a table from records, validating year contiguity.
    pub fn from_records(
        name: impl Into<String>,
        records: Vec<DemographicRecord>,
    ) -> Result<Self, PopulationError> {
        for record in &records {
            record.validate()?;
        }
        for pair in records.windows(2) {
            if pair[1].year != pair[0].year + 1 {
                return Err(PopulationError::ValidationError(format!(
                    "years must be contiguous: {} is followed by {}",
                    pair[0].year, pair[1].year
                )));
            }
        }
        Ok(Self {
            name: name.into(),
            records,
        })
    }

    /// Number of observed years.
    pub fn num_years(&self) -> usize {
        self.records.len()
    }

    /// True when the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First observed year.
    pub fn start_year(&self) -> Option<i32> {
        self.records.first().map(|r| r.year)
    }

    /// Last observed year.
    pub fn end_year(&self) -> Option<i32> {
        self.records.last().map(|r| r.year)
    }

    /// Append a record for the year immediately after the current last year.
    pub fn push_record(&mut self, record: DemographicRecord) -> Result<(), PopulationError> {
        record.validate()?;
        if let Some(end) = self.end_year() {
            if record.year != end + 1 {
                return Err(PopulationError::ValidationError(format!(
                    "record year {} does not follow last year {end}",
                    record.year
                )));
            }
        }
        self.records.push(record);
        Ok(())
    }

    /// Restrict the table to the inclusive year range `from..=to`.
    pub fn window(&self, from: i32, to: i32) -> Result<DemographicTable, PopulationError> {
        if from > to {
            return Err(PopulationError::ValidationError(format!(
                "invalid year range: {from} > {to}"
            )));
        }
        let records: Vec<DemographicRecord> = self
            .records
            .iter()
            .filter(|r| r.year >= from && r.year <= to)
            .cloned()
            .collect();
        if records.is_empty() {
            return Err(PopulationError::InsufficientData(format!(
                "no records in year range {from}..={to}"
            )));
        }
        Ok(DemographicTable {
            name: self.name.clone(),
            records,
        })
    }

    fn column(&self, f: impl Fn(&DemographicRecord) -> f64) -> YearSeries {
        let start = self.start_year().unwrap_or(0);
        YearSeries::new(start, self.records.iter().map(f).collect())
    }

    /// In-migration as a year series.
    pub fn in_migration(&self) -> YearSeries {
        self.column(|r| r.in_migration)
    }

    /// Out-migration as a year series.
    pub fn out_migration(&self) -> YearSeries {
        self.column(|r| r.out_migration)
    }

    /// Births as a year series.
    pub fn births(&self) -> YearSeries {
        self.column(|r| r.births)
    }

    /// Deaths as a year series.
    pub fn deaths(&self) -> YearSeries {
        self.column(|r| r.deaths)
    }

    /// Recorded male population as a year series.
    pub fn male_population(&self) -> YearSeries {
        self.column(|r| r.male_population)
    }

    /// Recorded female population as a year series.
    pub fn female_population(&self) -> YearSeries {
        self.column(|r| r.female_population)
    }

    /// Husband-side marriage rate series, if present for every year.
    pub fn marriage_rate_husband(&self) -> Option<YearSeries> {
        let start = self.start_year()?;
        let values: Option<Vec<f64>> = self
            .records
            .iter()
            .map(|r| r.marriage_rate_husband)
            .collect();
        Some(YearSeries::new(start, values?))
    }

    /// Wife-side marriage rate series, if present for every year.
    pub fn marriage_rate_wife(&self) -> Option<YearSeries> {
        let start = self.start_year()?;
        let values: Option<Vec<f64>> =
            self.records.iter().map(|r| r.marriage_rate_wife).collect();
        Some(YearSeries::new(start, values?))
    }

    /// Reference population reconstructed from recorded components, used for
    /// comparison against the modeled series.
    pub fn reference_population(&self) -> YearSeries {
        self.column(DemographicRecord::reference_population)
    }

    /// Default initial condition for the box model: the reference population
    /// at the first observed year.
    pub fn initial_population(&self) -> Result<f64, PopulationError> {
        self.records
            .first()
            .map(DemographicRecord::reference_population)
            .ok_or_else(|| {
                PopulationError::InsufficientData(
                    "cannot derive an initial population from an empty table".to_string(),
                )
            })
    }
}
