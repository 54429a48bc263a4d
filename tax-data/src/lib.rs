//! Static bracket tables and payroll levy parameters.

mod loader;
mod tables;

pub use loader::{BracketRecord, ScheduleLoader, ScheduleLoaderError};
pub use tables::{
    TAX_YEAR, TaxTables, TaxTablesError, federal_schedule, payroll_levies, state_schedule,
};
