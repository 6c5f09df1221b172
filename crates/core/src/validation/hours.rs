//! Weekly and daily working-hours checks.

use chrono::{Duration, NaiveDate};

use super::preconditions::check_assignment;
use super::result::{ValidationResult, Violation, ViolationDetails, ViolationKind};
use crate::error::CoreError;
use crate::rules::ValidationRuleSet;
use crate::shift::{active_for_staff, ShiftAssignment};

/// Effective worked hours of the staff member's active assignments dated in
/// the half-open range `[from, until)`.
///
/// Fails with `MalformedInput` if any of those assignments has an
/// uninterpretable span.
pub fn worked_hours_between(
    staff_id: &str,
    assignments: &[ShiftAssignment],
    from: NaiveDate,
    until: NaiveDate,
) -> Result<f64, CoreError> {
    let mut seconds = 0;
    for shift in active_for_staff(assignments, staff_id)
        .into_iter()
        .filter(|a| a.date >= from && a.date < until)
    {
        check_assignment(shift)?;
        seconds += shift.worked_seconds();
    }
    Ok(seconds as f64 / 3600.0)
}

/// Check total worked hours in the seven days starting at `week_start`.
///
/// Errors above `max_weekly_hours`; otherwise warns above
/// `max_weekly_hours * weekly_hours_warning_ratio`.
pub fn check_weekly_hours(
    rules: &ValidationRuleSet,
    staff_id: &str,
    assignments: &[ShiftAssignment],
    week_start: NaiveDate,
) -> Result<ValidationResult, CoreError> {
    let week_end = week_start + Duration::days(7);
    let total_hours = worked_hours_between(staff_id, assignments, week_start, week_end)?;
    let max = rules.max_weekly_hours;
    let high = max * rules.weekly_hours_warning_ratio;

    tracing::debug!(
        staff_id,
        week_start = %week_start,
        total_hours,
        max,
        "Weekly hours evaluated",
    );

    let mut result = ValidationResult::pass();
    let details = ViolationDetails {
        staff_id: Some(staff_id.to_string()),
        date: Some(week_start),
        value: Some(total_hours),
        threshold: Some(max),
        ..Default::default()
    };

    if total_hours > max {
        result.push(Violation::new(
            ViolationKind::WeeklyHoursExceeded,
            format!("Weekly working hours exceed {max} ({total_hours} hours)"),
            details,
        ));
    } else if total_hours > high {
        let pct = (rules.weekly_hours_warning_ratio * 100.0).round();
        result.push(Violation::new(
            ViolationKind::WeeklyHoursHigh,
            format!("Weekly working hours exceed {pct}% of the limit ({total_hours} hours)"),
            details,
        ));
    }

    Ok(result)
}

/// Check total worked hours of one staff member on one date.
pub fn check_daily_hours(
    rules: &ValidationRuleSet,
    staff_id: &str,
    assignments: &[ShiftAssignment],
    date: NaiveDate,
) -> Result<ValidationResult, CoreError> {
    let total_hours = worked_hours_between(staff_id, assignments, date, date + Duration::days(1))?;
    let max = rules.max_daily_hours;

    tracing::debug!(staff_id, date = %date, total_hours, max, "Daily hours evaluated");

    let mut result = ValidationResult::pass();
    if total_hours > max {
        result.push(Violation::new(
            ViolationKind::DailyHoursExceeded,
            format!("Daily working hours exceed {max} ({total_hours} hours)"),
            ViolationDetails {
                staff_id: Some(staff_id.to_string()),
                date: Some(date),
                value: Some(total_hours),
                threshold: Some(max),
                ..Default::default()
            },
        ));
    }
    Ok(result)
}
