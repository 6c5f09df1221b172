//! Shift-compliance rule engine.
//!
//! Each check is a pure function over caller-supplied assignments and a
//! rule set, returning a fresh [`ValidationResult`]. [`ShiftValidator`]
//! composes the per-shift subset; the day and month audits are called
//! directly.

pub mod composite;
pub mod consecutive;
pub mod coverage;
pub mod holidays;
pub mod hours;
pub mod leave;
pub mod preconditions;
pub mod rest;
pub mod result;

pub use composite::{ShiftCheck, ShiftContext, ShiftValidator};
pub use consecutive::check_consecutive_work_days;
pub use coverage::{
    audit_day, check_minimum_staffing, check_qualification_coverage, check_special_duty,
    SpecialDutyDay,
};
pub use holidays::check_monthly_holidays;
pub use hours::{check_daily_hours, check_weekly_hours};
pub use leave::{check_leave_request_deadline, check_leave_request_limit};
pub use rest::check_rest_hours_between_shifts;
pub use result::{ValidationResult, ValidationSeverity, Violation, ViolationDetails, ViolationKind};
