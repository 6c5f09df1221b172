//! Compliance thresholds.
//!
//! A [`ValidationRuleSet`] is plain configuration, supplied once per
//! validation run and never mutated by the engine. The default instance is
//! a named value passed explicitly at call sites; there is no global.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::staff::StaffRole;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_MAX_CONSECUTIVE_WORK_DAYS: u32 = 6;
pub const DEFAULT_MIN_MONTHLY_HOLIDAYS: u32 = 8;
pub const DEFAULT_MAX_WEEKLY_HOURS: f64 = 40.0;
pub const DEFAULT_MAX_DAILY_HOURS: f64 = 8.0;
pub const DEFAULT_MIN_REST_HOURS_BETWEEN_SHIFTS: f64 = 11.0;
pub const DEFAULT_MAX_LEAVE_REQUESTS_PER_MONTH: u32 = 3;
pub const DEFAULT_LEAVE_REQUEST_DEADLINE_DAYS: u32 = 14;

/// Weekly totals above this share of the maximum raise a warning.
pub const DEFAULT_WEEKLY_HOURS_WARNING_RATIO: f64 = 0.9;

/// Environment variable prefix read by [`ValidationRuleSet::from_env`].
pub const ENV_PREFIX: &str = "ROSTER_";

// ---------------------------------------------------------------------------
// ValidationRuleSet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ValidationRuleSet {
    #[validate(range(min = 1, max = 31))]
    pub max_consecutive_work_days: u32,
    #[validate(range(max = 31))]
    pub min_monthly_holidays: u32,
    #[validate(range(exclusive_min = 0.0, max = 168.0))]
    pub max_weekly_hours: f64,
    #[validate(range(exclusive_min = 0.0, max = 24.0))]
    pub max_daily_hours: f64,
    /// Minimum gap between the end of one shift and the start of the next.
    #[validate(range(min = 0.0, max = 48.0))]
    pub min_rest_hours_between_shifts: f64,
    /// Minimum Confirmed headcount per role per day. Roles absent from the
    /// map are not checked.
    pub minimum_staffing: BTreeMap<StaffRole, u32>,
    pub max_leave_requests_per_month: u32,
    pub leave_request_deadline_days: u32,
    /// First day of the week used by the per-shift weekly-hours check.
    pub week_starts_on: Weekday,
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub weekly_hours_warning_ratio: f64,
}

impl Default for ValidationRuleSet {
    fn default() -> Self {
        Self {
            max_consecutive_work_days: DEFAULT_MAX_CONSECUTIVE_WORK_DAYS,
            min_monthly_holidays: DEFAULT_MIN_MONTHLY_HOLIDAYS,
            max_weekly_hours: DEFAULT_MAX_WEEKLY_HOURS,
            max_daily_hours: DEFAULT_MAX_DAILY_HOURS,
            min_rest_hours_between_shifts: DEFAULT_MIN_REST_HOURS_BETWEEN_SHIFTS,
            minimum_staffing: BTreeMap::from([
                (StaffRole::Physician, 1),
                (StaffRole::Nurse, 2),
                (StaffRole::MedicalClerk, 1),
            ]),
            max_leave_requests_per_month: DEFAULT_MAX_LEAVE_REQUESTS_PER_MONTH,
            leave_request_deadline_days: DEFAULT_LEAVE_REQUEST_DEADLINE_DAYS,
            week_starts_on: Weekday::Sun,
            weekly_hours_warning_ratio: DEFAULT_WEEKLY_HOURS_WARNING_RATIO,
        }
    }
}

impl ValidationRuleSet {
    /// Check structural ranges of every threshold.
    pub fn check(&self) -> Result<(), CoreError> {
        Validate::validate(self).map_err(|e| CoreError::InvalidConfig(e.to_string()))
    }

    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let rules: Self =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidConfig(e.to_string()))?;
        rules.check()?;
        Ok(rules)
    }

    /// Load overrides from `ROSTER_*` environment variables.
    ///
    /// | Env Var                                  | Default                               |
    /// |------------------------------------------|---------------------------------------|
    /// | `ROSTER_MAX_CONSECUTIVE_WORK_DAYS`       | `6`                                   |
    /// | `ROSTER_MIN_MONTHLY_HOLIDAYS`            | `8`                                   |
    /// | `ROSTER_MAX_WEEKLY_HOURS`                | `40`                                  |
    /// | `ROSTER_MAX_DAILY_HOURS`                 | `8`                                   |
    /// | `ROSTER_MIN_REST_HOURS_BETWEEN_SHIFTS`   | `11`                                  |
    /// | `ROSTER_MINIMUM_STAFFING`                | `physician=1,nurse=2,medical_clerk=1` |
    /// | `ROSTER_MAX_LEAVE_REQUESTS_PER_MONTH`    | `3`                                   |
    /// | `ROSTER_LEAVE_REQUEST_DEADLINE_DAYS`     | `14`                                  |
    /// | `ROSTER_WEEK_STARTS_ON`                  | `sun`                                 |
    /// | `ROSTER_WEEKLY_HOURS_WARNING_RATIO`      | `0.9`                                 |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rules = Self::default();
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("MAX_CONSECUTIVE_WORK_DAYS") {
            rules.max_consecutive_work_days = parse_value("MAX_CONSECUTIVE_WORK_DAYS", &v)?;
        }
        if let Some(v) = var("MIN_MONTHLY_HOLIDAYS") {
            rules.min_monthly_holidays = parse_value("MIN_MONTHLY_HOLIDAYS", &v)?;
        }
        if let Some(v) = var("MAX_WEEKLY_HOURS") {
            rules.max_weekly_hours = parse_value("MAX_WEEKLY_HOURS", &v)?;
        }
        if let Some(v) = var("MAX_DAILY_HOURS") {
            rules.max_daily_hours = parse_value("MAX_DAILY_HOURS", &v)?;
        }
        if let Some(v) = var("MIN_REST_HOURS_BETWEEN_SHIFTS") {
            rules.min_rest_hours_between_shifts =
                parse_value("MIN_REST_HOURS_BETWEEN_SHIFTS", &v)?;
        }
        if let Some(v) = var("MINIMUM_STAFFING") {
            rules.minimum_staffing = parse_staffing(&v)?;
        }
        if let Some(v) = var("MAX_LEAVE_REQUESTS_PER_MONTH") {
            rules.max_leave_requests_per_month = parse_value("MAX_LEAVE_REQUESTS_PER_MONTH", &v)?;
        }
        if let Some(v) = var("LEAVE_REQUEST_DEADLINE_DAYS") {
            rules.leave_request_deadline_days = parse_value("LEAVE_REQUEST_DEADLINE_DAYS", &v)?;
        }
        if let Some(v) = var("WEEK_STARTS_ON") {
            rules.week_starts_on = v.trim().parse().map_err(|_| {
                CoreError::InvalidConfig(format!("{ENV_PREFIX}WEEK_STARTS_ON: invalid weekday '{v}'"))
            })?;
        }
        if let Some(v) = var("WEEKLY_HOURS_WARNING_RATIO") {
            rules.weekly_hours_warning_ratio = parse_value("WEEKLY_HOURS_WARNING_RATIO", &v)?;
        }

        rules.check()?;
        Ok(rules)
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::InvalidConfig(format!("{ENV_PREFIX}{name}: cannot parse '{raw}'")))
}

/// Parse `role=count` pairs separated by commas.
fn parse_staffing(raw: &str) -> Result<BTreeMap<StaffRole, u32>, CoreError> {
    let mut staffing = BTreeMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (role, count) = pair.split_once('=').ok_or_else(|| {
            CoreError::InvalidConfig(format!(
                "{ENV_PREFIX}MINIMUM_STAFFING: expected role=count, got '{pair}'"
            ))
        })?;
        let role: StaffRole = role
            .parse()
            .map_err(|e: CoreError| CoreError::InvalidConfig(e.to_string()))?;
        staffing.insert(role, parse_value("MINIMUM_STAFFING", count)?);
    }
    Ok(staffing)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_clinic_policy() {
        let rules = ValidationRuleSet::default();
        assert_eq!(rules.max_consecutive_work_days, 6);
        assert_eq!(rules.min_monthly_holidays, 8);
        assert_eq!(rules.max_weekly_hours, 40.0);
        assert_eq!(rules.max_daily_hours, 8.0);
        assert_eq!(rules.min_rest_hours_between_shifts, 11.0);
        assert_eq!(rules.minimum_staffing.get(&StaffRole::Physician), Some(&1));
        assert_eq!(rules.minimum_staffing.get(&StaffRole::Nurse), Some(&2));
        assert_eq!(rules.minimum_staffing.get(&StaffRole::MedicalClerk), Some(&1));
        assert_eq!(rules.minimum_staffing.get(&StaffRole::BeautyStaff), None);
        assert_eq!(rules.max_leave_requests_per_month, 3);
        assert_eq!(rules.leave_request_deadline_days, 14);
        assert_eq!(rules.week_starts_on, Weekday::Sun);
        assert!(rules.check().is_ok());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let rules = ValidationRuleSet::from_json_str(
            r#"{"max_weekly_hours": 44, "minimum_staffing": {"nurse": 3}}"#,
        )
        .unwrap();
        assert_eq!(rules.max_weekly_hours, 44.0);
        assert_eq!(rules.minimum_staffing.len(), 1);
        assert_eq!(rules.minimum_staffing.get(&StaffRole::Nurse), Some(&3));
        assert_eq!(rules.max_consecutive_work_days, 6);
    }

    #[test]
    fn json_out_of_range_is_invalid_config() {
        let err = ValidationRuleSet::from_json_str(r#"{"max_consecutive_work_days": 0}"#)
            .unwrap_err();
        assert_eq!(err.kind(), "INVALID_CONFIG");
    }

    #[test]
    fn json_syntax_error_is_invalid_config() {
        let err = ValidationRuleSet::from_json_str("{not json").unwrap_err();
        assert_eq!(err.kind(), "INVALID_CONFIG");
    }

    #[test]
    fn env_overrides_apply() {
        let rules = ValidationRuleSet::from_lookup(lookup(&[
            ("ROSTER_MAX_WEEKLY_HOURS", "38.5"),
            ("ROSTER_MINIMUM_STAFFING", "physician=2, radiologic_technologist=1"),
            ("ROSTER_WEEK_STARTS_ON", "mon"),
        ]))
        .unwrap();
        assert_eq!(rules.max_weekly_hours, 38.5);
        assert_eq!(rules.week_starts_on, Weekday::Mon);
        assert_eq!(rules.minimum_staffing.get(&StaffRole::Physician), Some(&2));
        assert_eq!(
            rules.minimum_staffing.get(&StaffRole::RadiologicTechnologist),
            Some(&1)
        );
        assert_eq!(rules.minimum_staffing.get(&StaffRole::Nurse), None);
    }

    #[test]
    fn empty_env_yields_defaults() {
        let rules = ValidationRuleSet::from_lookup(|_| None).unwrap();
        assert_eq!(rules, ValidationRuleSet::default());
    }

    #[test]
    fn env_unparseable_value_is_invalid_config() {
        let err = ValidationRuleSet::from_lookup(lookup(&[("ROSTER_MAX_DAILY_HOURS", "eight")]))
            .unwrap_err();
        assert_eq!(err.kind(), "INVALID_CONFIG");
        assert!(err.to_string().contains("ROSTER_MAX_DAILY_HOURS"));
    }

    #[test]
    fn env_bad_staffing_pair_is_invalid_config() {
        let err =
            ValidationRuleSet::from_lookup(lookup(&[("ROSTER_MINIMUM_STAFFING", "nurse:2")]))
                .unwrap_err();
        assert_eq!(err.kind(), "INVALID_CONFIG");

        let err =
            ValidationRuleSet::from_lookup(lookup(&[("ROSTER_MINIMUM_STAFFING", "pilot=1")]))
                .unwrap_err();
        assert_eq!(err.kind(), "INVALID_CONFIG");
    }

    #[test]
    fn warning_ratio_must_be_in_unit_interval() {
        let rules = ValidationRuleSet {
            weekly_hours_warning_ratio: 1.5,
            ..ValidationRuleSet::default()
        };
        assert_eq!(rules.check().unwrap_err().kind(), "INVALID_CONFIG");
    }
}
