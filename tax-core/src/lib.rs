pub mod calculations;
mod error;
pub mod models;

pub use error::TaxError;
pub use models::*;
