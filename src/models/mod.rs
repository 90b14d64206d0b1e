pub mod enums;
pub mod biomarker;
pub mod record;

pub use enums::*;
pub use biomarker::*;
pub use record::*;

use thiserror::Error;

/// Raised by `FromStr` on the string-backed enums.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}
