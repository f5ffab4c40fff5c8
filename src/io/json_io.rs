use std::path::Path;

use crate::error::PopulationError;
use crate::models::DemographicTable;

/// Read demographic data from a JSON file.
pub fn read_json(path: impl AsRef<Path>) -> Result<DemographicTable, PopulationError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let table: DemographicTable = serde_json::from_str(&content)?;
    // Re-validate through the checked constructor: serde bypasses it
    DemographicTable::from_records(table.name, table.records)
}

/// Read demographic data from JSON bytes.
pub fn read_json_from_bytes(
    data: &[u8],
    name: &str,
) -> Result<DemographicTable, PopulationError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| PopulationError::ParseError(format!("Invalid UTF-8: {e}")))?;
    let table: DemographicTable = serde_json::from_str(content)?;
    DemographicTable::from_records(name, table.records)
}

/// Write demographic data to a JSON file.
pub fn write_json(
    table: &DemographicTable,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), PopulationError> {
    let content = if pretty {
        serde_json::to_string_pretty(table)?
    } else {
        serde_json::to_string(table)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

/// Serialize any report value (error report, simulation state) as JSON.
pub fn to_json_string<T: serde::Serialize>(
    value: &T,
    pretty: bool,
) -> Result<String, PopulationError> {
    let content = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DemographicRecord;

    fn sample_record(year: i32) -> DemographicRecord {
        DemographicRecord {
            year,
            in_migration: 1000.0,
            out_migration: 900.0,
            births: 100.0,
            deaths: 50.0,
            male_population: 5000.0,
            female_population: 5100.0,
            marriage_rate_husband: None,
            marriage_rate_wife: None,
        }
    }

    fn sample_table() -> DemographicTable {
        DemographicTable::from_records("JSON Test", vec![sample_record(2012), sample_record(2013)])
            .unwrap()
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");

        let table = sample_table();
        write_json(&table, &path, true).unwrap();
        let reread = read_json(&path).unwrap();

        assert_eq!(reread.name, table.name);
        assert_eq!(reread.num_years(), 2);
        assert_eq!(reread.records[0].in_migration, 1000.0);
    }

    #[test]
    fn test_json_compact_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compact.json");

        let table = sample_table();
        write_json(&table, &path, false).unwrap();
        let reread = read_json(&path).unwrap();
        assert_eq!(reread.num_years(), table.num_years());
    }

    #[test]
    fn test_read_json_from_bytes_renames() {
        let table = sample_table();
        let json = serde_json::to_string(&table).unwrap();
        let reread = read_json_from_bytes(json.as_bytes(), "renamed").unwrap();
        assert_eq!(reread.name, "renamed");
    }

    #[test]
    fn test_read_json_rejects_gap() {
        let table = DemographicTable {
            name: "Gappy".to_string(),
            records: vec![sample_record(2012), sample_record(2015)],
        };
        let json = serde_json::to_string(&table).unwrap();
        let result = read_json_from_bytes(json.as_bytes(), "Gappy");
        assert!(matches!(result, Err(PopulationError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let result = read_json_from_bytes(b"{not json", "bad");
        assert!(matches!(result, Err(PopulationError::Json(_))));
    }

    #[test]
    fn test_to_json_string() {
        let table = sample_table();
        let compact = to_json_string(&table, false).unwrap();
        let pretty = to_json_string(&table, true).unwrap();
        assert!(compact.contains("JSON Test"));
        assert!(pretty.len() > compact.len());
    }
}
