//! Free-slot computation for appointment suggestions.
//!
//! This module lives in `core` (zero internal deps) so the slot scan can be
//! unit-tested without a database: the API layer loads the day's bookings
//! and hands their intervals to [`free_slots`].

use chrono::{Duration, NaiveDate, TimeZone, Utc};

use crate::types::Timestamp;

/// Opening hour of the business day (UTC).
pub const DAY_START_HOUR: u32 = 8;

/// Closing hour of the business day (UTC). No suggested slot may end after it.
pub const DAY_END_HOUR: u32 = 20;

/// Candidate start times advance on this grid.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// Domain error code reported when a day has no free slot of the requested
/// duration.
pub const NO_FREE_SLOT_CODE: &str = "ERRO-AGENDA004";

/// A booked interval, half-open: `[start, end)`.
pub type BusyInterval = (Timestamp, Timestamp);

/// Scan the business day for free start times.
///
/// Candidates run from 08:00 to 20:00 in 30-minute steps; a candidate of
/// `duration_minutes` is kept iff the whole slot fits before closing and
/// overlaps none of `busy` (half-open test: a candidate `[s, e)` conflicts
/// with a booking `[bs, be)` iff `s < be && e > bs`). Back-to-back slots are
/// therefore allowed. Results are in chronological order; an empty result
/// means the day is fully booked for that duration.
pub fn free_slots(date: NaiveDate, duration_minutes: i64, busy: &[BusyInterval]) -> Vec<Timestamp> {
    let day_start = Utc.from_utc_datetime(
        &date
            .and_hms_opt(DAY_START_HOUR, 0, 0)
            .expect("valid opening time"),
    );
    let day_end = Utc.from_utc_datetime(
        &date
            .and_hms_opt(DAY_END_HOUR, 0, 0)
            .expect("valid closing time"),
    );

    let slot = Duration::minutes(duration_minutes);
    let step = Duration::minutes(SLOT_STEP_MINUTES);

    let mut suggestions = Vec::new();
    let mut candidate = day_start;
    while candidate + slot <= day_end {
        let end = candidate + slot;
        let conflict = busy
            .iter()
            .any(|(busy_start, busy_end)| candidate < *busy_end && end > *busy_start);
        if !conflict {
            suggestions.push(candidate);
        }
        candidate += step;
    }
    suggestions
}
