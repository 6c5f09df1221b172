//! Rest-hours-between-shifts check.

use super::preconditions::check_assignment;
use super::result::{ValidationResult, Violation, ViolationDetails, ViolationKind};
use crate::error::CoreError;
use crate::rules::ValidationRuleSet;
use crate::shift::{active_for_staff, ShiftAssignment};

/// Hours between the end of `current` and the start of `next`.
pub fn rest_hours(current: &ShiftAssignment, next: &ShiftAssignment) -> f64 {
    next.start_at()
        .signed_duration_since(current.end_at())
        .num_seconds() as f64
        / 3600.0
}

/// Emit `INSUFFICIENT_REST` for every adjacent pair of the staff member's
/// active shifts (ordered by date) whose gap is below the minimum.
///
/// Assumes at most one active assignment per staff member per date; the
/// orchestrator enforces that before calling this check. Fails with
/// `MalformedInput` if any of the shifts has an uninterpretable span.
pub fn check_rest_hours_between_shifts(
    rules: &ValidationRuleSet,
    staff_id: &str,
    assignments: &[ShiftAssignment],
) -> Result<ValidationResult, CoreError> {
    let shifts = active_for_staff(assignments, staff_id);
    for shift in &shifts {
        check_assignment(shift)?;
    }
    let min = rules.min_rest_hours_between_shifts;
    let mut result = ValidationResult::pass();

    for pair in shifts.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let rest = rest_hours(current, next);
        if rest < min {
            tracing::debug!(
                staff_id,
                date = %current.date,
                next_date = %next.date,
                rest,
                min,
                "Insufficient rest between shifts",
            );
            result.push(Violation::new(
                ViolationKind::InsufficientRest,
                format!("Rest between shifts is below {min} hours ({rest} hours)"),
                ViolationDetails {
                    staff_id: Some(staff_id.to_string()),
                    date: Some(current.date),
                    next_date: Some(next.date),
                    value: Some(rest),
                    threshold: Some(min),
                    ..Default::default()
                },
            ));
        }
    }

    Ok(result)
}
