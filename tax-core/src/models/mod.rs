mod income;
mod levy_config;
mod schedule;
mod tax_bracket;
mod tax_result;

pub use income::{Income, IncomeError};
pub use levy_config::{LevyConfigError, PayrollLevyConfig};
pub use schedule::{Schedule, ScheduleError};
pub use tax_bracket::TaxBracket;
pub use tax_result::{ComponentKind, TaxComponent, TaxResult};
