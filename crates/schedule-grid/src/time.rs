//! Slot arithmetic shared by the minute and day grids.
//!
//! Minute grids address time as minutes since midnight of the grid date.
//! Quantization always happens against the slot boundaries of the day (i.e.
//! multiples of the slot size counted from midnight), not against the grid's
//! start bound.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Slot size used when a resource is configured with a zero slot size.
pub const DEFAULT_SLOT_SIZE: u32 = 15;

/// Default opening time, as minutes since midnight (08:00).
pub const DEFAULT_START_MINS: u32 = 8 * 60;

/// Default closing time, as minutes since midnight (18:00).
pub const DEFAULT_END_MINS: u32 = 18 * 60;

/// Replace a zero slot size with [`DEFAULT_SLOT_SIZE`].
pub fn normalize_slot_size(slot_size: u32) -> u32 {
    if slot_size == 0 {
        tracing::warn!(
            default = DEFAULT_SLOT_SIZE,
            "slot size of 0 minutes is invalid, using default"
        );
        DEFAULT_SLOT_SIZE
    } else {
        slot_size
    }
}

/// Midnight at the start of `date`.
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The datetime `minutes` after midnight of `date`. Values past 1440 roll
/// into the following day.
pub fn at_minutes(date: NaiveDate, minutes: u32) -> NaiveDateTime {
    midnight(date) + Duration::minutes(i64::from(minutes))
}

/// Whole minutes since midnight, ignoring seconds.
pub fn minutes_of_day(time: NaiveDateTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Minutes since midnight, rounding any seconds up to the next minute.
fn minutes_of_day_ceil(time: NaiveDateTime) -> u32 {
    let partial = time.second() > 0 || time.nanosecond() > 0;
    minutes_of_day(time) + u32::from(partial)
}

/// Round `minutes` down to a multiple of `slot_size`.
pub fn round_down(minutes: u32, slot_size: u32) -> u32 {
    (minutes / slot_size) * slot_size
}

/// Round `minutes` up to a multiple of `slot_size`.
pub fn round_up(minutes: u32, slot_size: u32) -> u32 {
    minutes.div_ceil(slot_size) * slot_size
}

/// Signed minutes between midnight of `date` and `time`.
pub fn minutes_since(date: NaiveDate, time: NaiveDateTime) -> i64 {
    (time - midnight(date)).num_minutes()
}

/// Minutes of `time` relative to `date`, clamped to the day (`0..=1440`).
///
/// Times on earlier days clamp to 0 and times on later days clamp to 1440,
/// so an event crossing midnight is clipped to the grid date.
pub fn clamp_to_day(date: NaiveDate, time: NaiveDateTime) -> u32 {
    let mins = minutes_since(date, time).clamp(0, i64::from(MINUTES_PER_DAY));
    mins as u32
}

/// Minutes of `time` relative to `date`, rounded down (or up) to a slot
/// boundary and clamped to the day.
///
/// Rounding up counts any partial minute, so 09:30:30 rounds up past 09:30.
pub fn slot_minutes(date: NaiveDate, time: NaiveDateTime, slot_size: u32, round_up_to_slot: bool) -> u32 {
    let since = time - midnight(date);
    let mut mins = since.num_minutes();
    if round_up_to_slot && since > Duration::minutes(mins) {
        mins += 1;
    }
    let mins = mins.clamp(0, i64::from(MINUTES_PER_DAY)) as u32;
    if round_up_to_slot {
        round_up(mins, slot_size)
    } else {
        round_down(mins, slot_size)
    }
}

/// Start time of `time`'s slot, on the slot grid of its own day.
pub fn floor_to_slot(time: NaiveDateTime, slot_size: u32) -> NaiveDateTime {
    at_minutes(time.date(), round_down(minutes_of_day(time), slot_size))
}

/// End of the slot containing the instant just before `time`. Times already
/// on a slot boundary are returned unchanged.
pub fn ceil_to_slot(time: NaiveDateTime, slot_size: u32) -> NaiveDateTime {
    at_minutes(time.date(), round_up(minutes_of_day_ceil(time), slot_size))
}

/// Number of day slots covered by `[start, end)`.
///
/// Every calendar day the interval touches counts, except that an end exactly
/// at midnight does not consume the following day. The result is at least 1.
pub fn day_span(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let days = (end.date() - start.date()).num_days();
    let partial = i64::from(end.time() != NaiveTime::MIN);
    (days + partial).max(1)
}
