use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{Schedule, ScheduleError, TaxBracket};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a bracket schedule.
#[derive(Debug, Error)]
pub enum ScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("malformed schedule: {0}")]
    MalformedSchedule(#[from] ScheduleError),
}

impl From<csv::Error> for ScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a bracket table.
///
/// - `min_income`: floor of the bracket (inclusive)
/// - `max_income`: ceiling of the bracket (exclusive), empty for the top bracket
/// - `rate`: marginal rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl From<&BracketRecord> for TaxBracket {
    fn from(record: &BracketRecord) -> Self {
        TaxBracket::new(record.min_income, record.max_income, record.rate)
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Reads bracket tables from CSV and turns them into validated schedules.
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice of embedded data. Row order is not significant.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, ScheduleLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a [`Schedule`] named `name` from parsed records.
    pub fn build(
        name: &str,
        records: &[BracketRecord],
    ) -> Result<Schedule, ScheduleLoaderError> {
        let brackets = records.iter().map(TaxBracket::from).collect();
        let schedule = Schedule::new(name, brackets)?;
        debug!(
            schedule = name,
            brackets = schedule.brackets().len(),
            "loaded schedule"
        );
        Ok(schedule)
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(
        name: &str,
        reader: R,
    ) -> Result<Schedule, ScheduleLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(name, &records)
    }
}
