use thiserror::Error;

use crate::{IncomeError, LevyConfigError, ScheduleError};

/// Any error raised while setting up or running a calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("invalid income: {0}")]
    InvalidIncome(#[from] IncomeError),

    #[error("malformed schedule: {0}")]
    MalformedSchedule(#[from] ScheduleError),

    #[error("invalid levy configuration: {0}")]
    InvalidLevyConfig(#[from] LevyConfigError),
}
