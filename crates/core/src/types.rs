/// Staff identifiers are opaque strings owned by the roster provider.
pub type StaffId = String;

/// Shift identifiers are opaque strings owned by the schedule store.
pub type ShiftId = String;

/// Seconds in one calendar day.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
