use serde::{Deserialize, Serialize};

use crate::error::PopulationError;

/// A contiguous year-indexed sequence of values.
///
/// Years are strictly increasing with no gaps, which the representation
/// (first year plus a dense value vector) guarantees by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSeries {
    start_year: i32,
    values: Vec<f64>,
}

impl YearSeries {
    /// Create a series starting at `start_year` with one value per year.
    pub fn new(start_year: i32, values: Vec<f64>) -> Self {
        Self { start_year, values }
    }

    /// Build a series from `(year, value)` pairs, which must be contiguous
    /// and strictly increasing in year.
    pub fn from_pairs(pairs: &[(i32, f64)]) -> Result<Self, PopulationError> {
        let Some(&(start_year, _)) = pairs.first() else {
            return Ok(Self::new(0, Vec::new()));
        };
        for (offset, &(year, _)) in pairs.iter().enumerate() {
            let expected = start_year + offset as i32;
            if year != expected {
                return Err(PopulationError::ValidationError(format!(
                    "years must be contiguous: expected {expected}, got {year}"
                )));
            }
        }
        Ok(Self::new(start_year, pairs.iter().map(|&(_, v)| v).collect()))
    }

    /// Number of years covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series covers no years.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First year of the series.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Last year of the series, if non-empty.
    pub fn end_year(&self) -> Option<i32> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.start_year + self.values.len() as i32 - 1)
        }
    }

    /// The covered years in order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.values.len()).map(move |i| self.start_year + i as i32)
    }

    /// The values in year order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value for a specific year, if covered.
    ///
    /// # Examples
    ///
    /// ```
    /// use population_box_analyzer::models::YearSeries;
    ///
    /// let series = YearSeries::new(2012, vec![10.0, 20.0, 30.0]);
    /// assert_eq!(series.get(2013), Some(20.0));
    /// assert_eq!(series.get(2015), None);
    /// ```
    pub fn get(&self, year: i32) -> Option<f64> {
        if year < self.start_year {
            return None;
        }
        self.values.get((year - self.start_year) as usize).copied()
    }

    /// Last `(year, value)` pair, if non-empty.
    pub fn last(&self) -> Option<(i32, f64)> {
        let year = self.end_year()?;
        Some((year, *self.values.last()?))
    }

    /// Iterate over `(year, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (self.start_year + i as i32, v))
    }

    /// Restrict the series to the inclusive year range `from..=to`.
    pub fn window(&self, from: i32, to: i32) -> Result<YearSeries, PopulationError> {
        if from > to {
            return Err(PopulationError::ValidationError(format!(
                "invalid year range: {from} > {to}"
            )));
        }
        let end = self.end_year().ok_or_else(|| {
            PopulationError::InsufficientData("cannot window an empty series".to_string())
        })?;
        if from < self.start_year || to > end {
            return Err(PopulationError::ValidationError(format!(
                "year range {from}..={to} outside series range {}..={end}",
                self.start_year
            )));
        }
        let lo = (from - self.start_year) as usize;
        let hi = (to - self.start_year) as usize;
        Ok(YearSeries::new(from, self.values[lo..=hi].to_vec()))
    }

    /// Copy of the series with extra values appended for the following years.
    pub fn with_appended(&self, extra: &[f64]) -> YearSeries {
        let mut values = self.values.clone();
        values.extend_from_slice(extra);
        YearSeries::new(self.start_year, values)
    }

    /// True when both series cover exactly the same years.
    pub fn same_span(&self, other: &YearSeries) -> bool {
        self.start_year == other.start_year && self.values.len() == other.values.len()
    }
}
