//! Staff roster records.
//!
//! The roster is owned by an external provider; the engine only reads it to
//! resolve roles and qualifications of assigned staff.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::StaffId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const ROLE_PHYSICIAN: &str = "physician";
pub const ROLE_NURSE: &str = "nurse";
pub const ROLE_MEDICAL_CLERK: &str = "medical_clerk";
pub const ROLE_RADIOLOGIC_TECHNOLOGIST: &str = "radiologic_technologist";
pub const ROLE_BEAUTY_STAFF: &str = "beauty_staff";

/// All valid role strings, in declaration order.
pub const VALID_ROLES: &[&str] = &[
    ROLE_PHYSICIAN,
    ROLE_NURSE,
    ROLE_MEDICAL_CLERK,
    ROLE_RADIOLOGIC_TECHNOLOGIST,
    ROLE_BEAUTY_STAFF,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Job role of a staff member. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Physician,
    Nurse,
    MedicalClerk,
    RadiologicTechnologist,
    BeautyStaff,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physician => ROLE_PHYSICIAN,
            Self::Nurse => ROLE_NURSE,
            Self::MedicalClerk => ROLE_MEDICAL_CLERK,
            Self::RadiologicTechnologist => ROLE_RADIOLOGIC_TECHNOLOGIST,
            Self::BeautyStaff => ROLE_BEAUTY_STAFF,
        }
    }
}

impl FromStr for StaffRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ROLE_PHYSICIAN => Ok(Self::Physician),
            ROLE_NURSE => Ok(Self::Nurse),
            ROLE_MEDICAL_CLERK => Ok(Self::MedicalClerk),
            ROLE_RADIOLOGIC_TECHNOLOGIST => Ok(Self::RadiologicTechnologist),
            ROLE_BEAUTY_STAFF => Ok(Self::BeautyStaff),
            other => Err(CoreError::MalformedInput(format!(
                "Invalid staff role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

/// A staff member as supplied by the roster provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: StaffRole,
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub qualifications: BTreeSet<String>,
    pub is_active: bool,
}

impl Staff {
    pub fn has_qualification(&self, qualification: &str) -> bool {
        self.qualifications.contains(qualification)
    }
}

/// Find a staff member by id.
pub fn find_staff<'a>(roster: &'a [Staff], staff_id: &str) -> Option<&'a Staff> {
    roster.iter().find(|s| s.id == staff_id)
}
