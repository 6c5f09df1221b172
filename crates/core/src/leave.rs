//! Requested days off.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::StaffId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeavePriority {
    Required,
    Preferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

/// A staff member's request to be off on `date`, submitted on `requested_on`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: String,
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub priority: LeavePriority,
    pub status: LeaveStatus,
    pub requested_on: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
}

impl LeaveRequest {
    /// Pending and approved requests count against the monthly allowance.
    pub fn is_outstanding(&self) -> bool {
        matches!(self.status, LeaveStatus::Pending | LeaveStatus::Approved)
    }

    /// Whole days between submission and the requested date.
    pub fn notice_days(&self) -> i64 {
        self.date.signed_duration_since(self.requested_on).num_days()
    }
}
