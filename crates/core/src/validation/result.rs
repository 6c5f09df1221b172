//! Violation and result types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::staff::StaffRole;
use crate::types::StaffId;

/// Whether a violation blocks the action or is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// Every finding the rule checks can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    ConsecutiveWorkDaysExceeded,
    ConsecutiveWorkDaysAtLimit,
    InsufficientHolidays,
    WeeklyHoursExceeded,
    WeeklyHoursHigh,
    DailyHoursExceeded,
    InsufficientStaff,
    MissingQualification,
    InsufficientRest,
    LeaveRequestLimitExceeded,
    LeaveRequestPastDeadline,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConsecutiveWorkDaysExceeded => "CONSECUTIVE_WORK_DAYS_EXCEEDED",
            Self::ConsecutiveWorkDaysAtLimit => "CONSECUTIVE_WORK_DAYS_AT_LIMIT",
            Self::InsufficientHolidays => "INSUFFICIENT_HOLIDAYS",
            Self::WeeklyHoursExceeded => "WEEKLY_HOURS_EXCEEDED",
            Self::WeeklyHoursHigh => "WEEKLY_HOURS_HIGH",
            Self::DailyHoursExceeded => "DAILY_HOURS_EXCEEDED",
            Self::InsufficientStaff => "INSUFFICIENT_STAFF",
            Self::MissingQualification => "MISSING_QUALIFICATION",
            Self::InsufficientRest => "INSUFFICIENT_REST",
            Self::LeaveRequestLimitExceeded => "LEAVE_REQUEST_LIMIT_EXCEEDED",
            Self::LeaveRequestPastDeadline => "LEAVE_REQUEST_PAST_DEADLINE",
        }
    }

    pub fn severity(&self) -> ValidationSeverity {
        match self {
            Self::ConsecutiveWorkDaysAtLimit | Self::WeeklyHoursHigh => ValidationSeverity::Warning,
            _ => ValidationSeverity::Error,
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured context attached to a violation. Only the fields relevant to
/// the producing check are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViolationDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<StaffId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Second date of a pair (the later shift for rest violations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<StaffRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    /// Measured value (days, hours, counts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Configured limit the value was compared against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

/// A single rule finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
    pub details: ViolationDetails,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>, details: ViolationDetails) -> Self {
        Self {
            kind,
            message: message.into(),
            details,
        }
    }
}

/// Aggregated outcome of one or more checks.
///
/// `is_valid` is always exactly `errors.is_empty()`; warnings never affect
/// validity. Fields are private so that invariant cannot be broken.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<Violation>,
    warnings: Vec<Violation>,
}

impl ValidationResult {
    /// An empty, valid result.
    pub fn pass() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn from_parts(errors: Vec<Violation>, warnings: Vec<Violation>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Route a violation to errors or warnings by its kind's severity.
    pub fn push(&mut self, violation: Violation) {
        match violation.kind.severity() {
            ValidationSeverity::Error => {
                self.errors.push(violation);
                self.is_valid = false;
            }
            ValidationSeverity::Warning => self.warnings.push(violation),
        }
    }

    /// Append another result's errors and warnings after this one's.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.is_valid = self.errors.is_empty();
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Violation] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Vec<Violation>, Vec<Violation>) {
        (self.errors, self.warnings)
    }

    /// Whether any error or warning has the given kind.
    pub fn has(&self, kind: ViolationKind) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|v| v.kind == kind)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::pass()
    }
}

impl FromIterator<ValidationResult> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        let mut merged = ValidationResult::pass();
        for result in iter {
            merged.merge(result);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(kind: ViolationKind) -> Violation {
        Violation::new(kind, kind.as_str(), ViolationDetails::default())
    }

    #[test]
    fn pass_is_valid_and_empty() {
        let r = ValidationResult::pass();
        assert!(r.is_valid());
        assert!(r.errors().is_empty());
        assert!(r.warnings().is_empty());
    }

    #[test]
    fn warnings_do_not_block_validation() {
        let mut r = ValidationResult::pass();
        r.push(v(ViolationKind::WeeklyHoursHigh));
        assert!(r.is_valid());
        assert_eq!(r.warnings().len(), 1);
    }

    #[test]
    fn errors_invalidate() {
        let mut r = ValidationResult::pass();
        r.push(v(ViolationKind::InsufficientRest));
        assert!(!r.is_valid());
        assert_eq!(r.errors().len(), 1);
    }

    #[test]
    fn merge_preserves_order() {
        let mut a = ValidationResult::from_parts(
            vec![v(ViolationKind::ConsecutiveWorkDaysExceeded)],
            vec![],
        );
        let b = ValidationResult::from_parts(
            vec![v(ViolationKind::InsufficientRest)],
            vec![v(ViolationKind::WeeklyHoursHigh)],
        );
        a.merge(b);
        let kinds: Vec<_> = a.errors().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::ConsecutiveWorkDaysExceeded,
                ViolationKind::InsufficientRest
            ]
        );
        assert_eq!(a.warnings()[0].kind, ViolationKind::WeeklyHoursHigh);
        assert!(!a.is_valid());
    }

    #[test]
    fn collect_merges_in_sequence() {
        let merged: ValidationResult = vec![
            ValidationResult::from_parts(vec![], vec![v(ViolationKind::ConsecutiveWorkDaysAtLimit)]),
            ValidationResult::pass(),
            ValidationResult::from_parts(vec![], vec![v(ViolationKind::WeeklyHoursHigh)]),
        ]
        .into_iter()
        .collect();
        assert!(merged.is_valid());
        assert_eq!(merged.warnings().len(), 2);
        assert!(merged.has(ViolationKind::WeeklyHoursHigh));
    }

    #[test]
    fn kind_serializes_as_tag() {
        let json = serde_json::to_value(v(ViolationKind::InsufficientStaff)).unwrap();
        assert_eq!(json["kind"], "INSUFFICIENT_STAFF");
        assert!(json["details"].as_object().unwrap().is_empty());
    }

    #[test]
    fn result_serializes_validity() {
        let r = ValidationResult::from_parts(vec![v(ViolationKind::InsufficientRest)], vec![]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["errors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn severity_of_warning_kinds() {
        assert_eq!(
            ViolationKind::ConsecutiveWorkDaysAtLimit.severity(),
            ValidationSeverity::Warning
        );
        assert_eq!(
            ViolationKind::MissingQualification.severity(),
            ValidationSeverity::Error
        );
    }
}
