//! Expiration Module
//!
//! Represents the raw duration-or-deadline expression attached to a cache
//! item and normalizes it into the TTL convention of the underlying store:
//! a non-negative number of seconds from now, where 0 means "never expires".

use chrono::{DateTime, Months, TimeDelta, Utc};

// == Expiration ==
/// A raw, un-normalized expiration expression.
///
/// Items carry the expression as given; conversion to a TTL happens once,
/// at save time, via [`Expiration::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiration {
    /// No expiration; the entry lives until the store discards it
    #[default]
    Never,
    /// Absolute deadline
    At(DateTime<Utc>),
    /// Relative duration from the moment of normalization
    After(TimeDelta),
    /// Calendar-relative duration; honors month-length variation
    AfterMonths(Months),
    /// Raw TTL in seconds, passed through unchanged
    Seconds(u64),
}

impl Expiration {
    // == Normalize ==
    /// Converts the expression into whole seconds from `now`.
    ///
    /// Returns 0 for [`Expiration::Never`], and for deadlines already in
    /// the past, since 0 means "never expires" to the store. Relative
    /// durations are resolved by adding them to `now` and subtracting `now`
    /// again, so calendar-relative expressions reflect the actual length of
    /// the months they span.
    pub fn normalize(&self, now: DateTime<Utc>) -> u64 {
        match self {
            Expiration::Never => 0,
            Expiration::At(deadline) => clamp_seconds(*deadline - now),
            Expiration::After(delta) => match now.checked_add_signed(*delta) {
                Some(then) => clamp_seconds(then - now),
                None => 0,
            },
            Expiration::AfterMonths(months) => match now.checked_add_months(*months) {
                Some(then) => clamp_seconds(then - now),
                None => 0,
            },
            Expiration::Seconds(seconds) => *seconds,
        }
    }
}

// == Conversions ==
impl From<DateTime<Utc>> for Expiration {
    fn from(deadline: DateTime<Utc>) -> Self {
        Expiration::At(deadline)
    }
}

impl From<TimeDelta> for Expiration {
    fn from(delta: TimeDelta) -> Self {
        Expiration::After(delta)
    }
}

impl From<Months> for Expiration {
    fn from(months: Months) -> Self {
        Expiration::AfterMonths(months)
    }
}

impl From<u64> for Expiration {
    fn from(seconds: u64) -> Self {
        Expiration::Seconds(seconds)
    }
}

// == Utility Functions ==
/// Converts a signed delta into whole non-negative seconds.
fn clamp_seconds(delta: TimeDelta) -> u64 {
    delta.num_seconds().max(0) as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_never_normalizes_to_zero() {
        assert_eq!(Expiration::Never.normalize(fixed_now(2025, 6, 1)), 0);
        assert_eq!(Expiration::default(), Expiration::Never);
    }

    #[test]
    fn test_absolute_deadline_in_future() {
        let now = fixed_now(2025, 6, 1);
        let deadline = now + TimeDelta::seconds(90);
        assert_eq!(Expiration::At(deadline).normalize(now), 90);
    }

    #[test]
    fn test_absolute_deadline_in_past_clamps_to_zero() {
        let now = fixed_now(2025, 6, 1);
        let deadline = now - TimeDelta::seconds(90);
        assert_eq!(Expiration::At(deadline).normalize(now), 0);
    }

    #[test]
    fn test_relative_duration() {
        let now = fixed_now(2025, 6, 1);
        let expr = Expiration::After(TimeDelta::minutes(5));
        assert_eq!(expr.normalize(now), 300);
    }

    #[test]
    fn test_negative_relative_duration_clamps_to_zero() {
        let now = fixed_now(2025, 6, 1);
        let expr = Expiration::After(TimeDelta::seconds(-10));
        assert_eq!(expr.normalize(now), 0);
    }

    #[test]
    fn test_calendar_month_length_varies() {
        let one_month = Expiration::AfterMonths(Months::new(1));

        // January has 31 days, February 2025 has 28
        let from_january = one_month.normalize(fixed_now(2025, 1, 1));
        let from_february = one_month.normalize(fixed_now(2025, 2, 1));

        assert_eq!(from_january, 31 * 24 * 3600);
        assert_eq!(from_february, 28 * 24 * 3600);
    }

    #[test]
    fn test_raw_seconds_pass_through() {
        let now = fixed_now(2025, 6, 1);
        assert_eq!(Expiration::Seconds(3600).normalize(now), 3600);
        assert_eq!(Expiration::Seconds(0).normalize(now), 0);
    }

    #[test]
    fn test_conversions() {
        let now = fixed_now(2025, 6, 1);
        assert_eq!(Expiration::from(now), Expiration::At(now));
        assert_eq!(
            Expiration::from(TimeDelta::seconds(5)),
            Expiration::After(TimeDelta::seconds(5))
        );
        assert_eq!(
            Expiration::from(Months::new(2)),
            Expiration::AfterMonths(Months::new(2))
        );
        assert_eq!(Expiration::from(60u64), Expiration::Seconds(60));
    }
}
