//! Structural preconditions checked before any rule runs.
//!
//! Rule checks assume well-formed spans and at most one active assignment
//! per staff member per date. Violations of those assumptions are caller
//! contract errors, not compliance findings.

use crate::error::CoreError;
use crate::shift::{active_for_staff, ShiftAssignment};

/// Reject an assignment whose span cannot be interpreted.
///
/// - an end before the start requires `spans_midnight`
/// - `spans_midnight` requires the end not to be after the start
/// - the break may not exceed the span
pub fn check_assignment(assignment: &ShiftAssignment) -> Result<(), CoreError> {
    let id = &assignment.id;
    if !assignment.spans_midnight && assignment.end_time < assignment.start_time {
        return Err(CoreError::MalformedInput(format!(
            "shift {id} ends at {} before it starts at {}; overnight shifts must set spans_midnight",
            assignment.end_time, assignment.start_time
        )));
    }
    if assignment.spans_midnight && assignment.end_time > assignment.start_time {
        return Err(CoreError::MalformedInput(format!(
            "shift {id} is marked as spanning midnight but ends at {} after it starts at {}",
            assignment.end_time, assignment.start_time
        )));
    }
    if assignment.worked_seconds() < 0 {
        return Err(CoreError::MalformedInput(format!(
            "shift {id} has a {} minute break longer than its {} minute span",
            assignment.break_minutes,
            assignment.span_minutes()
        )));
    }
    Ok(())
}

/// Reject two active assignments for `staff_id` on the same date.
pub fn check_single_assignment_per_day(
    staff_id: &str,
    assignments: &[ShiftAssignment],
) -> Result<(), CoreError> {
    let shifts = active_for_staff(assignments, staff_id);
    match shifts.windows(2).find(|pair| pair[0].date == pair[1].date) {
        Some(pair) => Err(CoreError::DuplicateAssignment {
            staff_id: staff_id.to_string(),
            date: pair[0].date,
        }),
        None => Ok(()),
    }
}
