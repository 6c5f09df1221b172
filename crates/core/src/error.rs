use chrono::NaiveDate;

use crate::types::StaffId;

/// Caller-contract violations surfaced by the engine.
///
/// Compliance findings (too many hours, missing staff, ...) are never
/// reported through this type; they are returned as data inside a
/// [`ValidationResult`](crate::validation::ValidationResult).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Duplicate assignment: staff {staff_id} already has a shift on {date}")]
    DuplicateAssignment { staff_id: StaffId, date: NaiveDate },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// Stable machine-readable tag for the error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "MALFORMED_INPUT",
            Self::DuplicateAssignment { .. } => "DUPLICATE_ASSIGNMENT",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}
