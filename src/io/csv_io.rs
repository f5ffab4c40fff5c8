use std::path::Path;
use std::str::FromStr;

use crate::error::PopulationError;
use crate::models::{DemographicRecord, DemographicTable};

/// Text encoding of a CSV source.
///
/// The public statistics export this tool was built around ships EUC-KR
/// encoded files; re-exported data is plain UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    EucKr,
}

impl FromStr for TextEncoding {
    type Err = PopulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "euc-kr" | "euckr" | "cp949" => Ok(TextEncoding::EucKr),
            _ => Err(PopulationError::ParseError(format!(
                "Unknown text encoding: '{s}'"
            ))),
        }
    }
}

impl TextEncoding {
    fn decode(self, data: &[u8]) -> Result<String, PopulationError> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(data.to_vec())
                .map_err(|e| PopulationError::ParseError(format!("Invalid UTF-8: {e}"))),
            TextEncoding::EucKr => {
                let (decoded, _, had_errors) = encoding_rs::EUC_KR.decode(data);
                if had_errors {
                    return Err(PopulationError::ParseError(
                        "input contains byte sequences that are not valid EUC-KR".to_string(),
                    ));
                }
                Ok(decoded.into_owned())
            }
        }
    }
}

/// CSV row structure, with column names exactly as the data source documents
/// them. The year column is optional; files without one are numbered from a
/// caller-supplied first year.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct DemographicRow {
    #[serde(rename = "연도")]
    year: Option<i32>,
    #[serde(rename = "Qin")]
    qin: f64,
    #[serde(rename = "Qout")]
    qout: f64,
    #[serde(rename = "출생아수(명)")]
    births: f64,
    #[serde(rename = "사망자수(명)")]
    deaths: f64,
    #[serde(rename = "남자인구수 (명)")]
    male_population: f64,
    #[serde(rename = "여자인구수 (명)")]
    female_population: f64,
    #[serde(rename = "일반혼인율(남편)")]
    marriage_rate_husband: Option<f64>,
    #[serde(rename = "일반혼인율(아내)")]
    marriage_rate_wife: Option<f64>,
}

fn parse_csv_records(
    decoded: &str,
    name: &str,
    start_year: i32,
) -> Result<DemographicTable, PopulationError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(decoded.as_bytes());

    let mut records = Vec::new();
    for (index, result) in rdr.deserialize().enumerate() {
        let row: DemographicRow = result?;
        records.push(DemographicRecord {
            year: row.year.unwrap_or(start_year + index as i32),
            in_migration: row.qin,
            out_migration: row.qout,
            births: row.births,
            deaths: row.deaths,
            male_population: row.male_population,
            female_population: row.female_population,
            marriage_rate_husband: row.marriage_rate_husband,
            marriage_rate_wife: row.marriage_rate_wife,
        });
    }

    DemographicTable::from_records(name, records)
}

/// Read demographic data from a CSV file in the given encoding.
///
/// Rows without a `연도` column are assigned consecutive years starting at
/// `start_year`.
pub fn read_csv(
    path: impl AsRef<Path>,
    encoding: TextEncoding,
    start_year: i32,
) -> Result<DemographicTable, PopulationError> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    read_csv_from_bytes(&data, &name, encoding, start_year)
}

/// Read demographic data from CSV bytes.
pub fn read_csv_from_bytes(
    data: &[u8],
    name: &str,
    encoding: TextEncoding,
    start_year: i32,
) -> Result<DemographicTable, PopulationError> {
    let decoded = encoding.decode(data)?;
    parse_csv_records(&decoded, name, start_year)
}

/// Write demographic data to a UTF-8 CSV file, year column included.
pub fn write_csv(
    table: &DemographicTable,
    path: impl AsRef<Path>,
) -> Result<(), PopulationError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;

    for record in &table.records {
        wtr.serialize(DemographicRow {
            year: Some(record.year),
            qin: record.in_migration,
            qout: record.out_migration,
            births: record.births,
            deaths: record.deaths,
            male_population: record.male_population,
            female_population: record.female_population,
            marriage_rate_husband: record.marriage_rate_husband,
            marriage_rate_wife: record.marriage_rate_wife,
        })?;
    }

    wtr.flush()?;
    Ok(())
}
