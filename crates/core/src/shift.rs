//! Shift assignments, their time spans, and the clinic's standard patterns.
//!
//! A shift's span is an explicit `(date, start, end, spans_midnight)` tuple.
//! When `spans_midnight` is set the end time falls on the calendar day after
//! `date`; otherwise start and end are on the same day and an end before the
//! start is malformed input rather than an implicit overnight shift.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{ShiftId, StaffId, SECONDS_PER_DAY};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of an assignment.
///
/// `Cancelled` is a soft-cancel: the record stays in storage but is
/// excluded from every compliance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    Confirmed,
    Tentative,
    PendingRequest,
    Cancelled,
}

// ---------------------------------------------------------------------------
// Time parsing
// ---------------------------------------------------------------------------

/// Parse a local time-of-day in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time(s: &str) -> Result<NaiveTime, CoreError> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| CoreError::MalformedInput(format!("invalid time '{s}': {e}")))
}

// ---------------------------------------------------------------------------
// ShiftAssignment
// ---------------------------------------------------------------------------

/// One staff member's scheduled shift on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub id: ShiftId,
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub spans_midnight: bool,
    pub break_minutes: u32,
    pub status: ShiftStatus,
}

impl ShiftAssignment {
    /// Build an assignment from `HH:MM` strings.
    pub fn parse(
        id: impl Into<ShiftId>,
        staff_id: impl Into<StaffId>,
        date: NaiveDate,
        start_time: &str,
        end_time: &str,
        break_minutes: u32,
        status: ShiftStatus,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id: id.into(),
            staff_id: staff_id.into(),
            date,
            start_time: parse_time(start_time)?,
            end_time: parse_time(end_time)?,
            spans_midnight: false,
            break_minutes,
            status,
        })
    }

    pub fn with_spans_midnight(mut self, spans_midnight: bool) -> Self {
        self.spans_midnight = spans_midnight;
        self
    }

    pub fn with_status(mut self, status: ShiftStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the assignment takes part in compliance computations.
    pub fn is_active(&self) -> bool {
        self.status != ShiftStatus::Cancelled
    }

    /// Whether the assignment counts toward staffing and coverage.
    pub fn is_confirmed(&self) -> bool {
        self.status == ShiftStatus::Confirmed
    }

    pub fn start_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn end_at(&self) -> NaiveDateTime {
        let end = self.date.and_time(self.end_time);
        if self.spans_midnight {
            end + Duration::days(1)
        } else {
            end
        }
    }

    /// Seconds between start and end, before breaks.
    ///
    /// Negative for an unflagged shift whose end precedes its start; see
    /// [`check_assignment`](crate::validation::preconditions::check_assignment).
    pub fn span_seconds(&self) -> i64 {
        let raw = self
            .end_time
            .signed_duration_since(self.start_time)
            .num_seconds();
        if self.spans_midnight {
            raw + SECONDS_PER_DAY
        } else {
            raw
        }
    }

    /// Effective worked seconds: span minus break.
    pub fn worked_seconds(&self) -> i64 {
        self.span_seconds() - i64::from(self.break_minutes) * 60
    }

    /// Span in whole minutes, rounded toward zero.
    pub fn span_minutes(&self) -> i64 {
        self.span_seconds() / 60
    }

    /// Worked time in whole minutes, rounded toward zero.
    pub fn worked_minutes(&self) -> i64 {
        self.worked_seconds() / 60
    }

    pub fn worked_hours(&self) -> f64 {
        self.worked_seconds() as f64 / 3600.0
    }
}

/// Active (non-cancelled) assignments of one staff member, sorted by date.
///
/// The sort is stable, so same-day assignments keep their input order.
pub fn active_for_staff<'a>(
    assignments: &'a [ShiftAssignment],
    staff_id: &str,
) -> Vec<&'a ShiftAssignment> {
    let mut out: Vec<&ShiftAssignment> = assignments
        .iter()
        .filter(|a| a.staff_id == staff_id && a.is_active())
        .collect();
    out.sort_by_key(|a| a.date);
    out
}

/// Confirmed assignments on one date.
pub fn confirmed_on(assignments: &[ShiftAssignment], date: NaiveDate) -> Vec<&ShiftAssignment> {
    assignments
        .iter()
        .filter(|a| a.date == date && a.is_confirmed())
        .collect()
}

// ---------------------------------------------------------------------------
// Standard patterns
// ---------------------------------------------------------------------------

/// A named shift template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPattern {
    pub name: &'static str,
    pub start_time: &'static str,
    pub end_time: &'static str,
    pub break_minutes: u32,
}

pub const PATTERN_EARLY: ShiftPattern = ShiftPattern {
    name: "early",
    start_time: "08:30",
    end_time: "17:30",
    break_minutes: 60,
};

pub const PATTERN_LATE: ShiftPattern = ShiftPattern {
    name: "late",
    start_time: "10:00",
    end_time: "19:00",
    break_minutes: 60,
};

pub const PATTERN_REGULAR: ShiftPattern = ShiftPattern {
    name: "regular",
    start_time: "09:00",
    end_time: "18:00",
    break_minutes: 60,
};

pub const PATTERN_SATURDAY_MORNING: ShiftPattern = ShiftPattern {
    name: "saturday_morning",
    start_time: "09:00",
    end_time: "13:00",
    break_minutes: 0,
};

pub const PATTERN_SATURDAY_FULL: ShiftPattern = ShiftPattern {
    name: "saturday_full",
    start_time: "09:00",
    end_time: "17:00",
    break_minutes: 60,
};

/// The clinic's standard shift patterns.
pub const STANDARD_SHIFT_PATTERNS: &[ShiftPattern] = &[
    PATTERN_EARLY,
    PATTERN_LATE,
    PATTERN_REGULAR,
    PATTERN_SATURDAY_MORNING,
    PATTERN_SATURDAY_FULL,
];

impl ShiftPattern {
    /// Look up a standard pattern by name.
    pub fn standard(name: &str) -> Option<&'static ShiftPattern> {
        STANDARD_SHIFT_PATTERNS.iter().find(|p| p.name == name)
    }

    /// Instantiate this pattern for a staff member on a date.
    pub fn assign(
        &self,
        id: impl Into<ShiftId>,
        staff_id: impl Into<StaffId>,
        date: NaiveDate,
        status: ShiftStatus,
    ) -> Result<ShiftAssignment, CoreError> {
        ShiftAssignment::parse(
            id,
            staff_id,
            date,
            self.start_time,
            self.end_time,
            self.break_minutes,
            status,
        )
    }
}
