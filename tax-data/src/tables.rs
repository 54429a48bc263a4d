//! Built-in 2020 single-filer tables.
//!
//! The bracket tables are embedded CSV so they can be read and diffed like
//! any other data file; they are parsed and validated once, at startup.

use rust_decimal_macros::dec;
use tax_core::{LevyConfigError, PayrollLevyConfig, Schedule};
use thiserror::Error;

use crate::loader::{ScheduleLoader, ScheduleLoaderError};

pub const TAX_YEAR: i32 = 2020;

const FEDERAL_2020_SINGLE: &str = include_str!("../data/federal_2020_single.csv");
const WISCONSIN_2020_SINGLE: &str = include_str!("../data/wisconsin_2020_single.csv");

/// Errors raised while building the built-in tables.
#[derive(Debug, Error)]
pub enum TaxTablesError {
    #[error("{name} schedule: {source}")]
    Schedule {
        name: &'static str,
        #[source]
        source: ScheduleLoaderError,
    },

    #[error("payroll levies: {0}")]
    Levies(#[from] LevyConfigError),
}

/// Seven-bracket federal schedule for single filers.
pub fn federal_schedule() -> Result<Schedule, TaxTablesError> {
    load_embedded("federal", FEDERAL_2020_SINGLE)
}

/// Four-bracket Wisconsin schedule for single filers.
pub fn state_schedule() -> Result<Schedule, TaxTablesError> {
    load_embedded("wisconsin", WISCONSIN_2020_SINGLE)
}

/// Employee-side social security and medicare parameters.
pub fn payroll_levies() -> PayrollLevyConfig {
    PayrollLevyConfig {
        tax_year: TAX_YEAR,
        ss_wage_max: dec!(137000),
        ss_tax_rate: dec!(0.062),
        medicare_tax_rate: dec!(0.0145),
        medicare_surcharge_rate: dec!(0.009),
        medicare_surcharge_threshold: dec!(200000),
    }
}

fn load_embedded(
    name: &'static str,
    csv: &str,
) -> Result<Schedule, TaxTablesError> {
    ScheduleLoader::load(name, csv.as_bytes())
        .map_err(|source| TaxTablesError::Schedule { name, source })
}

/// Every table a paycheck calculation needs, validated.
#[derive(Debug, Clone)]
pub struct TaxTables {
    pub federal: Schedule,
    pub state: Schedule,
    pub levies: PayrollLevyConfig,
}

impl TaxTables {
    pub fn load() -> Result<Self, TaxTablesError> {
        let levies = payroll_levies();
        levies.validate()?;
        Ok(Self {
            federal: federal_schedule()?,
            state: state_schedule()?,
            levies,
        })
    }
}
