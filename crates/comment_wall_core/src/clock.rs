//! crates/comment_wall_core/src/clock.rs
//!
//! Wall-clock access and the "start of today" calculation.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveTime, TimeZone, Utc};

/// Source of the current local time. Swapped for a fixed clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Local midnight of the current date on `clock`, as an absolute instant.
pub fn start_of_local_day(clock: &dyn Clock) -> DateTime<Utc> {
    start_of_day(&clock.now())
}

/// Midnight of `now`'s calendar date in `now`'s own timezone.
///
/// An ambiguous midnight resolves to the earlier instant. A midnight swallowed
/// by a DST gap resolves to the first local minute of the date that exists.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    for minute in 0..24 * 60 {
        let candidate = midnight + Duration::minutes(minute);
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => {
                return t.with_timezone(&Utc);
            }
            LocalResult::None => continue,
        }
    }

    now.with_timezone(&Utc)
}

#[cfg(test)]
#[path = "clock_test.rs"]
mod tests;
