//! Day-level coverage audits: minimum staffing per role and required
//! qualifications.
//!
//! Only `Confirmed` assignments count. Tentative and pending shifts are
//! plans, not coverage.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::result::{ValidationResult, Violation, ViolationDetails, ViolationKind};
use crate::rules::ValidationRuleSet;
use crate::shift::{confirmed_on, ShiftAssignment};
use crate::staff::{find_staff, Staff, StaffRole};

/// A date with a special duty that needs specific qualifications on site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDutyDay {
    pub date: NaiveDate,
    pub duty_type: String,
    pub required_qualifications: Vec<String>,
}

/// Confirmed headcount per role on `date`. Assignments whose staff member
/// is not in the roster are skipped.
pub fn headcount_by_role(
    date: NaiveDate,
    assignments: &[ShiftAssignment],
    roster: &[Staff],
) -> BTreeMap<StaffRole, u32> {
    let mut counts = BTreeMap::new();
    for shift in confirmed_on(assignments, date) {
        if let Some(staff) = find_staff(roster, &shift.staff_id) {
            *counts.entry(staff.role).or_insert(0) += 1;
        }
    }
    counts
}

/// Emit `INSUFFICIENT_STAFF` for every configured role whose confirmed
/// headcount on `date` is below its minimum.
pub fn check_minimum_staffing(
    rules: &ValidationRuleSet,
    date: NaiveDate,
    assignments: &[ShiftAssignment],
    roster: &[Staff],
) -> ValidationResult {
    let counts = headcount_by_role(date, assignments, roster);
    let mut result = ValidationResult::pass();

    for (&role, &required) in &rules.minimum_staffing {
        let actual = counts.get(&role).copied().unwrap_or(0);
        tracing::debug!(date = %date, role = %role, required, actual, "Staffing evaluated");
        if actual < required {
            result.push(Violation::new(
                ViolationKind::InsufficientStaff,
                format!("Not enough {role} staff (required: {required}, actual: {actual})"),
                ViolationDetails {
                    date: Some(date),
                    role: Some(role),
                    value: Some(f64::from(actual)),
                    threshold: Some(f64::from(required)),
                    ..Default::default()
                },
            ));
        }
    }

    result
}

/// Union of qualifications held by confirmed staff on `date`.
pub fn qualifications_on(
    date: NaiveDate,
    assignments: &[ShiftAssignment],
    roster: &[Staff],
) -> BTreeSet<String> {
    confirmed_on(assignments, date)
        .into_iter()
        .filter_map(|shift| find_staff(roster, &shift.staff_id))
        .flat_map(|staff| staff.qualifications.iter().cloned())
        .collect()
}

/// Emit `MISSING_QUALIFICATION` for every required tag nobody confirmed on
/// `date` holds. Produces no warnings.
pub fn check_qualification_coverage(
    date: NaiveDate,
    assignments: &[ShiftAssignment],
    roster: &[Staff],
    required_qualifications: &[String],
) -> ValidationResult {
    let available = qualifications_on(date, assignments, roster);
    let mut result = ValidationResult::pass();

    for qualification in required_qualifications {
        if !available.contains(qualification) {
            tracing::debug!(date = %date, qualification = %qualification, "Qualification not covered");
            result.push(Violation::new(
                ViolationKind::MissingQualification,
                format!("No staff with the {qualification} qualification is assigned"),
                ViolationDetails {
                    date: Some(date),
                    qualification: Some(qualification.clone()),
                    ..Default::default()
                },
            ));
        }
    }

    result
}

/// Qualification coverage for a special duty day.
pub fn check_special_duty(
    duty: &SpecialDutyDay,
    assignments: &[ShiftAssignment],
    roster: &[Staff],
) -> ValidationResult {
    check_qualification_coverage(duty.date, assignments, roster, &duty.required_qualifications)
}

/// Full audit of one day: minimum staffing, then qualification coverage.
pub fn audit_day(
    rules: &ValidationRuleSet,
    date: NaiveDate,
    assignments: &[ShiftAssignment],
    roster: &[Staff],
    required_qualifications: &[String],
) -> ValidationResult {
    let mut result = check_minimum_staffing(rules, date, assignments, roster);
    result.merge(check_qualification_coverage(
        date,
        assignments,
        roster,
        required_qualifications,
    ));
    result
}
