//! `roster-core` -- shift-compliance validation for clinic work schedules.
//!
//! Pure logic with no I/O: callers pass in the roster, the stored
//! assignments and a [`ValidationRuleSet`], and receive a
//! [`ValidationResult`] listing blocking errors and advisory warnings.

pub mod calendar;
pub mod error;
pub mod leave;
pub mod rules;
pub mod shift;
pub mod staff;
pub mod types;
pub mod validation;

pub use error::CoreError;
pub use rules::ValidationRuleSet;
pub use shift::{ShiftAssignment, ShiftStatus};
pub use staff::{EmploymentType, Staff, StaffRole};
pub use validation::{ShiftValidator, ValidationResult, Violation, ViolationKind};
