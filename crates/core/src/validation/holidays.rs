//! Monthly-holidays check.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::result::{ValidationResult, Violation, ViolationDetails, ViolationKind};
use crate::calendar::{days_in_month, first_of_month, in_month};
use crate::error::CoreError;
use crate::rules::ValidationRuleSet;
use crate::shift::{active_for_staff, ShiftAssignment};

/// Days in the month on which the staff member has no active assignment.
///
/// Worked days are counted as distinct dates, so a second assignment on an
/// already-worked date does not reduce the holiday count further.
pub fn count_holidays(
    staff_id: &str,
    assignments: &[ShiftAssignment],
    year: i32,
    month: u32,
) -> Result<u32, CoreError> {
    let total = days_in_month(year, month)?;
    let worked: BTreeSet<NaiveDate> = active_for_staff(assignments, staff_id)
        .into_iter()
        .map(|a| a.date)
        .filter(|date| in_month(*date, year, month))
        .collect();
    Ok(total - worked.len() as u32)
}

/// Emit `INSUFFICIENT_HOLIDAYS` when the month leaves fewer days off than
/// the rule set requires.
///
/// Fails only for an invalid `month`.
pub fn check_monthly_holidays(
    rules: &ValidationRuleSet,
    staff_id: &str,
    assignments: &[ShiftAssignment],
    year: i32,
    month: u32,
) -> Result<ValidationResult, CoreError> {
    let holidays = count_holidays(staff_id, assignments, year, month)?;
    let required = rules.min_monthly_holidays;

    tracing::debug!(staff_id, year, month, holidays, required, "Monthly holidays evaluated");

    let mut result = ValidationResult::pass();
    if holidays < required {
        result.push(Violation::new(
            ViolationKind::InsufficientHolidays,
            format!("Monthly holidays are below {required} ({holidays} days)"),
            ViolationDetails {
                staff_id: Some(staff_id.to_string()),
                date: Some(first_of_month(year, month)?),
                value: Some(f64::from(holidays)),
                threshold: Some(f64::from(required)),
                ..Default::default()
            },
        ));
    }
    Ok(result)
}
