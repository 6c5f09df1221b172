//! Consecutive-work-days check.

use chrono::NaiveDate;

use super::result::{ValidationResult, Violation, ViolationDetails, ViolationKind};
use crate::rules::ValidationRuleSet;
use crate::shift::{active_for_staff, ShiftAssignment};

/// Longest run of dates exactly one calendar day apart.
///
/// Any other gap, including a repeated date, resets the run to 1.
pub fn longest_run(dates: &[NaiveDate]) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    let mut prev: Option<NaiveDate> = None;

    for &date in dates {
        current = match prev {
            Some(p) if date.signed_duration_since(p).num_days() == 1 => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        prev = Some(date);
    }

    longest
}

/// Evaluate the staff member's longest streak of consecutive work days
/// across the whole assignment history.
///
/// `_target_date` is accepted for call-site symmetry with the other checks
/// but does not restrict the scan.
pub fn check_consecutive_work_days(
    rules: &ValidationRuleSet,
    staff_id: &str,
    assignments: &[ShiftAssignment],
    _target_date: NaiveDate,
) -> ValidationResult {
    let dates: Vec<NaiveDate> = active_for_staff(assignments, staff_id)
        .iter()
        .map(|a| a.date)
        .collect();
    let run = longest_run(&dates);
    let limit = rules.max_consecutive_work_days;

    tracing::debug!(staff_id, run, limit, "Consecutive work days evaluated");

    let mut result = ValidationResult::pass();
    let details = ViolationDetails {
        staff_id: Some(staff_id.to_string()),
        value: Some(f64::from(run)),
        threshold: Some(f64::from(limit)),
        ..Default::default()
    };

    if run > limit {
        result.push(Violation::new(
            ViolationKind::ConsecutiveWorkDaysExceeded,
            format!("Consecutive work days exceed {limit} ({run} days)"),
            details,
        ));
    } else if run == limit {
        result.push(Violation::new(
            ViolationKind::ConsecutiveWorkDaysAtLimit,
            format!("Consecutive work days have reached the limit of {limit}"),
            details,
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::ShiftStatus;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    fn shift(day: u32, status: ShiftStatus) -> ShiftAssignment {
        ShiftAssignment::parse(format!("s{day}"), "n1", d(day), "09:00", "18:00", 60, status)
            .unwrap()
    }

    fn streak(days: std::ops::RangeInclusive<u32>) -> Vec<ShiftAssignment> {
        days.map(|day| shift(day, ShiftStatus::Confirmed)).collect()
    }

    #[test]
    fn longest_run_of_empty_is_zero() {
        assert_eq!(longest_run(&[]), 0);
    }

    #[test]
    fn longest_run_resets_on_gap_and_duplicate() {
        assert_eq!(longest_run(&[d(1), d(2), d(3), d(5), d(6)]), 3);
        assert_eq!(longest_run(&[d(1), d(2), d(2), d(3)]), 2);
    }

    #[test]
    fn six_days_is_at_limit_warning_only() {
        let rules = ValidationRuleSet::default();
        let r = check_consecutive_work_days(&rules, "n1", &streak(1..=6), d(6));
        assert!(r.is_valid());
        assert!(r.errors().is_empty());
        assert_eq!(r.warnings().len(), 1);
        assert_eq!(r.warnings()[0].kind, ViolationKind::ConsecutiveWorkDaysAtLimit);
        assert_eq!(r.warnings()[0].details.value, Some(6.0));
    }

    #[test]
    fn seven_days_is_error_without_warning() {
        let rules = ValidationRuleSet::default();
        let r = check_consecutive_work_days(&rules, "n1", &streak(1..=7), d(7));
        assert!(!r.is_valid());
        assert_eq!(r.errors().len(), 1);
        assert_eq!(r.errors()[0].kind, ViolationKind::ConsecutiveWorkDaysExceeded);
        assert_eq!(r.errors()[0].details.value, Some(7.0));
        assert!(r.warnings().is_empty());
    }

    #[test]
    fn cancelled_day_breaks_the_streak() {
        let rules = ValidationRuleSet::default();
        let mut shifts = streak(1..=7);
        shifts[3].status = ShiftStatus::Cancelled;
        let r = check_consecutive_work_days(&rules, "n1", &shifts, d(7));
        assert!(r.is_valid());
        assert!(r.warnings().is_empty());
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let rules = ValidationRuleSet::default();
        let mut shifts = streak(1..=7);
        shifts.reverse();
        let r = check_consecutive_work_days(&rules, "n1", &shifts, d(1));
        assert!(r.has(ViolationKind::ConsecutiveWorkDaysExceeded));
    }

    #[test]
    fn other_staff_are_ignored() {
        let rules = ValidationRuleSet::default();
        let r = check_consecutive_work_days(&rules, "someone_else", &streak(1..=10), d(1));
        assert!(r.is_valid());
        assert!(r.warnings().is_empty());
    }

    #[test]
    fn streak_across_month_boundary_counts() {
        let rules = ValidationRuleSet::default();
        let shifts: Vec<ShiftAssignment> = (0..7)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2025, 3, 28).unwrap() + chrono::Duration::days(i);
                ShiftAssignment::parse(format!("m{i}"), "n1", date, "09:00", "18:00", 60, ShiftStatus::Tentative)
                    .unwrap()
            })
            .collect();
        let r = check_consecutive_work_days(&rules, "n1", &shifts, d(1));
        assert!(r.has(ViolationKind::ConsecutiveWorkDaysExceeded));
    }
}
