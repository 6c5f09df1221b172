//! Leave-request allowance and deadline checks.

use super::result::{ValidationResult, Violation, ViolationDetails, ViolationKind};
use crate::calendar::{first_of_month, in_month};
use crate::error::CoreError;
use crate::leave::LeaveRequest;
use crate::rules::ValidationRuleSet;

/// Emit `LEAVE_REQUEST_LIMIT_EXCEEDED` when the staff member has more
/// outstanding requests in the month than the rule set allows.
///
/// Fails only for an invalid `month`.
pub fn check_leave_request_limit(
    rules: &ValidationRuleSet,
    staff_id: &str,
    requests: &[LeaveRequest],
    year: i32,
    month: u32,
) -> Result<ValidationResult, CoreError> {
    let first = first_of_month(year, month)?;
    let count = requests
        .iter()
        .filter(|r| r.staff_id == staff_id && r.is_outstanding() && in_month(r.date, year, month))
        .count() as u32;
    let max = rules.max_leave_requests_per_month;

    tracing::debug!(staff_id, year, month, count, max, "Leave requests evaluated");

    let mut result = ValidationResult::pass();
    if count > max {
        result.push(Violation::new(
            ViolationKind::LeaveRequestLimitExceeded,
            format!("Leave requests exceed {max} per month ({count} requests)"),
            ViolationDetails {
                staff_id: Some(staff_id.to_string()),
                date: Some(first),
                value: Some(f64::from(count)),
                threshold: Some(f64::from(max)),
                ..Default::default()
            },
        ));
    }
    Ok(result)
}

/// Emit `LEAVE_REQUEST_PAST_DEADLINE` when the request was submitted with
/// less notice than the rule set requires.
pub fn check_leave_request_deadline(
    rules: &ValidationRuleSet,
    request: &LeaveRequest,
) -> ValidationResult {
    let notice = request.notice_days();
    let deadline = i64::from(rules.leave_request_deadline_days);
    let mut result = ValidationResult::pass();

    if notice < deadline {
        tracing::debug!(
            staff_id = %request.staff_id,
            date = %request.date,
            notice,
            deadline,
            "Leave request past deadline",
        );
        result.push(Violation::new(
            ViolationKind::LeaveRequestPastDeadline,
            format!(
                "Leave requests must be submitted {deadline} days in advance ({notice} days given)"
            ),
            ViolationDetails {
                staff_id: Some(request.staff_id.clone()),
                date: Some(request.date),
                value: Some(notice as f64),
                threshold: Some(deadline as f64),
                ..Default::default()
            },
        ));
    }
    result
}
