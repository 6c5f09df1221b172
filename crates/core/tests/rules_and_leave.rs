//! Rule-set loading and leave-request checks through the public API.

use assert_matches::assert_matches;
use chrono::NaiveDate;

use roster_core::leave::{LeavePriority, LeaveRequest, LeaveStatus};
use roster_core::validation::{check_leave_request_deadline, check_leave_request_limit};
use roster_core::{CoreError, StaffRole, ValidationRuleSet, ViolationKind};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

fn request(id: &str, day: u32, status: LeaveStatus) -> LeaveRequest {
    LeaveRequest {
        id: id.into(),
        staff_id: "n1".into(),
        date: date(5, day),
        priority: LeavePriority::Preferred,
        status,
        requested_on: date(4, 1),
        reason: None,
    }
}

#[test]
fn rule_set_json_round_trips_through_defaults() {
    let rules = ValidationRuleSet::default();
    let json = serde_json::to_string(&rules).unwrap();
    assert_eq!(ValidationRuleSet::from_json_str(&json).unwrap(), rules);
}

#[test]
fn empty_json_object_is_the_default_rule_set() {
    assert_eq!(
        ValidationRuleSet::from_json_str("{}").unwrap(),
        ValidationRuleSet::default()
    );
}

#[test]
fn invalid_thresholds_are_config_errors() {
    assert_matches!(
        ValidationRuleSet::from_json_str(r#"{"max_weekly_hours": -5}"#),
        Err(CoreError::InvalidConfig(_))
    );
    assert_matches!(
        ValidationRuleSet::from_json_str(r#"{"minimum_staffing": {"janitor": 1}}"#),
        Err(CoreError::InvalidConfig(_))
    );
}

#[test]
fn env_lookup_overrides_staffing() {
    let rules = ValidationRuleSet::from_lookup(|key| match key {
        "ROSTER_MINIMUM_STAFFING" => Some("beauty_staff=1".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(rules.minimum_staffing.len(), 1);
    assert_eq!(rules.minimum_staffing.get(&StaffRole::BeautyStaff), Some(&1));
}

#[test]
fn fourth_outstanding_request_exceeds_limit() {
    let rules = ValidationRuleSet::default();
    let mut requests = vec![
        request("a", 5, LeaveStatus::Pending),
        request("b", 6, LeaveStatus::Approved),
        request("c", 7, LeaveStatus::Pending),
        request("d", 8, LeaveStatus::Withdrawn),
    ];
    assert!(check_leave_request_limit(&rules, "n1", &requests, 2025, 5)
        .unwrap()
        .is_valid());

    requests.push(request("e", 9, LeaveStatus::Pending));
    let result = check_leave_request_limit(&rules, "n1", &requests, 2025, 5).unwrap();
    assert!(result.has(ViolationKind::LeaveRequestLimitExceeded));
    assert_eq!(result.errors()[0].details.value, Some(4.0));

    assert_matches!(
        check_leave_request_limit(&rules, "n1", &requests, 2025, 0),
        Err(CoreError::MalformedInput(_))
    );
}

#[test]
fn late_request_misses_deadline() {
    let rules = ValidationRuleSet::default();
    let on_time = LeaveRequest {
        requested_on: date(4, 21),
        ..request("a", 5, LeaveStatus::Pending)
    };
    assert!(check_leave_request_deadline(&rules, &on_time).is_valid());

    let late = LeaveRequest {
        requested_on: date(4, 22),
        ..request("b", 5, LeaveStatus::Pending)
    };
    let result = check_leave_request_deadline(&rules, &late);
    assert!(result.has(ViolationKind::LeaveRequestPastDeadline));
    assert_eq!(result.errors()[0].details.value, Some(13.0));
}
