mod csv_io;
mod json_io;
mod scenario;

use std::path::Path;

use crate::error::PopulationError;
use crate::models::DemographicTable;

pub use csv_io::{read_csv, read_csv_from_bytes, write_csv, TextEncoding};
pub use json_io::{read_json, read_json_from_bytes, to_json_string, write_json};
pub use scenario::{parse_strategy, ScenarioConfig};

/// Trait for reading demographic data from a file.
pub trait TableReader {
    fn read(&self, path: &Path) -> Result<DemographicTable, PopulationError>;
}

/// Trait for writing demographic data to a file.
pub trait TableWriter {
    fn write(&self, table: &DemographicTable, path: &Path) -> Result<(), PopulationError>;
}

/// CSV format reader/writer.
pub struct CsvFormat {
    pub encoding: TextEncoding,
    pub start_year: i32,
}

impl TableReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<DemographicTable, PopulationError> {
        read_csv(path, self.encoding, self.start_year)
    }
}

impl TableWriter for CsvFormat {
    fn write(&self, table: &DemographicTable, path: &Path) -> Result<(), PopulationError> {
        write_csv(table, path)
    }
}

/// JSON format reader/writer.
pub struct JsonFormat {
    pub pretty: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self { pretty: false }
    }
}

impl TableReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<DemographicTable, PopulationError> {
        read_json(path)
    }
}

impl TableWriter for JsonFormat {
    fn write(&self, table: &DemographicTable, path: &Path) -> Result<(), PopulationError> {
        write_json(table, path, self.pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DemographicRecord;

    fn sample_table() -> DemographicTable {
        let record = |year: i32| DemographicRecord {
            year,
            in_migration: 1200.0,
            out_migration: 1100.0,
            births: 90.0,
            deaths: 60.0,
            male_population: 4800.0,
            female_population: 4900.0,
            marriage_rate_husband: Some(5.0),
            marriage_rate_wife: Some(4.8),
        };
        DemographicTable::from_records("IO Trait Test", vec![record(2012), record(2013)]).unwrap()
    }

    #[test]
    fn test_csv_trait_roundtrip() {
        let table = sample_table();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.csv");

        let writer: &dyn TableWriter = &CsvFormat {
            encoding: TextEncoding::Utf8,
            start_year: 2012,
        };
        writer.write(&table, &path).unwrap();

        let reader: &dyn TableReader = &CsvFormat {
            encoding: TextEncoding::Utf8,
            start_year: 2012,
        };
        let loaded = reader.read(&path).unwrap();

        assert_eq!(loaded.num_years(), table.num_years());
        assert_eq!(loaded.records[0].in_migration, 1200.0);
    }

    #[test]
    fn test_json_trait_roundtrip() {
        let table = sample_table();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.json");

        let writer: &dyn TableWriter = &JsonFormat { pretty: true };
        writer.write(&table, &path).unwrap();

        let reader: &dyn TableReader = &JsonFormat::default();
        let loaded = reader.read(&path).unwrap();

        assert_eq!(loaded.num_years(), table.num_years());
        assert_eq!(loaded.records[1].marriage_rate_wife, Some(4.8));
    }

    #[test]
    fn test_json_format_default() {
        let fmt = JsonFormat::default();
        assert!(!fmt.pretty);
    }
}
