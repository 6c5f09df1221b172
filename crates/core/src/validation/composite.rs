//! Per-shift composite validation.
//!
//! [`ShiftValidator`] answers "can this single shift be added?" by running
//! an ordered registry of named checks over one [`ShiftContext`] and
//! concatenating their results in registry order. The default registry is
//! consecutive work days, then weekly hours, then rest between shifts.
//! Day- and month-level audits (staffing, qualifications, holidays) are not
//! part of this pass; callers invoke them directly.

use super::consecutive::check_consecutive_work_days;
use super::hours::check_weekly_hours;
use super::preconditions::{check_assignment, check_single_assignment_per_day};
use super::rest::check_rest_hours_between_shifts;
use super::result::ValidationResult;
use crate::calendar::week_start;
use crate::error::CoreError;
use crate::rules::ValidationRuleSet;
use crate::shift::ShiftAssignment;
use crate::staff::Staff;

pub const CHECK_CONSECUTIVE_WORK_DAYS: &str = "consecutive_work_days";
pub const CHECK_WEEKLY_HOURS: &str = "weekly_hours";
pub const CHECK_REST_HOURS: &str = "rest_hours_between_shifts";

/// Everything a per-shift check may look at.
#[derive(Debug, Clone, Copy)]
pub struct ShiftContext<'a> {
    pub rules: &'a ValidationRuleSet,
    /// The shift being proposed.
    pub proposed: &'a ShiftAssignment,
    /// The stored assignments, minus any stored version of the proposed
    /// shift (same id).
    pub existing: &'a [ShiftAssignment],
    /// `existing` with the proposed shift appended.
    pub candidate: &'a [ShiftAssignment],
    pub roster: &'a [Staff],
}

/// Uniform signature of a registered per-shift check. An `Err` aborts the
/// whole validation.
pub type ShiftCheck = fn(&ShiftContext<'_>) -> Result<ValidationResult, CoreError>;

fn consecutive_work_days(ctx: &ShiftContext<'_>) -> Result<ValidationResult, CoreError> {
    Ok(check_consecutive_work_days(
        ctx.rules,
        &ctx.proposed.staff_id,
        ctx.existing,
        ctx.proposed.date,
    ))
}

fn weekly_hours(ctx: &ShiftContext<'_>) -> Result<ValidationResult, CoreError> {
    let start = week_start(ctx.proposed.date, ctx.rules.week_starts_on);
    check_weekly_hours(ctx.rules, &ctx.proposed.staff_id, ctx.existing, start)
}

fn rest_hours(ctx: &ShiftContext<'_>) -> Result<ValidationResult, CoreError> {
    check_rest_hours_between_shifts(ctx.rules, &ctx.proposed.staff_id, ctx.candidate)
}

/// The per-shift registry, in evaluation order.
pub const DEFAULT_SHIFT_CHECKS: &[(&str, ShiftCheck)] = &[
    (CHECK_CONSECUTIVE_WORK_DAYS, consecutive_work_days),
    (CHECK_WEEKLY_HOURS, weekly_hours),
    (CHECK_REST_HOURS, rest_hours),
];

/// Composes per-shift checks under one rule set.
#[derive(Debug, Clone)]
pub struct ShiftValidator {
    rules: ValidationRuleSet,
    checks: Vec<(&'static str, ShiftCheck)>,
}

impl Default for ShiftValidator {
    fn default() -> Self {
        Self::new(ValidationRuleSet::default())
    }
}

impl ShiftValidator {
    pub fn new(rules: ValidationRuleSet) -> Self {
        Self {
            rules,
            checks: DEFAULT_SHIFT_CHECKS.to_vec(),
        }
    }

    pub fn rules(&self) -> &ValidationRuleSet {
        &self.rules
    }

    /// Append a check after the registered ones.
    pub fn with_check(mut self, name: &'static str, check: ShiftCheck) -> Self {
        self.checks.push((name, check));
        self
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|(name, _)| *name).collect()
    }

    /// Validate adding `proposed` to `existing`.
    ///
    /// A stored assignment with the proposed shift's id is treated as the
    /// version being replaced and is ignored.
    ///
    /// Structural preconditions are verified first: every shift of the
    /// staff member in the candidate schedule must have an interpretable
    /// span, and the candidate schedule may hold at most one active
    /// assignment per date. A failed precondition is returned as `Err` and
    /// no rule check runs.
    pub fn validate_shift(
        &self,
        proposed: &ShiftAssignment,
        existing: &[ShiftAssignment],
        roster: &[Staff],
    ) -> Result<ValidationResult, CoreError> {
        let staff_id = proposed.staff_id.as_str();
        tracing::debug!(
            staff_id,
            shift_id = %proposed.id,
            date = %proposed.date,
            existing = existing.len(),
            "Validating proposed shift",
        );

        let retained: Vec<ShiftAssignment> = existing
            .iter()
            .filter(|a| a.id != proposed.id)
            .cloned()
            .collect();
        let candidate: Vec<ShiftAssignment> = retained
            .iter()
            .cloned()
            .chain(std::iter::once(proposed.clone()))
            .collect();

        if let Err(e) = check_preconditions(staff_id, &candidate) {
            tracing::warn!(staff_id, shift_id = %proposed.id, error = %e, "Shift rejected before rule checks");
            return Err(e);
        }

        let ctx = ShiftContext {
            rules: &self.rules,
            proposed,
            existing: &retained,
            candidate: &candidate,
            roster,
        };

        let result = self
            .checks
            .iter()
            .map(|(_, check)| check(&ctx))
            .collect::<Result<ValidationResult, CoreError>>()?;

        tracing::debug!(
            staff_id,
            shift_id = %proposed.id,
            is_valid = result.is_valid(),
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            "Shift validation complete",
        );

        Ok(result)
    }
}

fn check_preconditions(staff_id: &str, candidate: &[ShiftAssignment]) -> Result<(), CoreError> {
    for shift in candidate
        .iter()
        .filter(|a| a.staff_id == staff_id && a.is_active())
    {
        check_assignment(shift)?;
    }
    check_single_assignment_per_day(staff_id, candidate)
}
