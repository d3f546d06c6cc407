//! Day/night window
//!
//! Built once per fetch from the current-conditions sunrise and sunset and
//! reused for every daytime check in that fetch. The window is half-open:
//! a local time equal to sunrise is day, one equal to sunset is night.
//!
//! Checks compare the time of day only, so the same window classifies every
//! day of a multi-day forecast. The dates carried in `sunrise` and `sunset`
//! are ignored on purpose; they only record which day the window came from.
//! When the local sunset falls before the local sunrise on the clock (the
//! pair straddles midnight), daytime wraps around midnight instead.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::TimezoneOffset;

/// Local sunrise/sunset pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayNightWindow {
    /// Local sunrise
    pub sunrise: NaiveDateTime,
    /// Local sunset
    pub sunset: NaiveDateTime,
}

impl DayNightWindow {
    /// Window from local date-times
    #[must_use]
    pub const fn new(sunrise: NaiveDateTime, sunset: NaiveDateTime) -> Self {
        Self { sunrise, sunset }
    }

    /// Window from unix sunrise/sunset and the fetch's offset
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidField` naming `sunrise` or `sunset` when
    /// either cannot be represented as a local date-time.
    pub fn from_unix(
        sunrise: i64,
        sunset: i64,
        offset: TimezoneOffset,
    ) -> Result<Self, DomainError> {
        let sunrise = offset
            .to_local(sunrise)
            .map_err(|e| DomainError::invalid_field("sunrise", e.to_string()))?;
        let sunset = offset
            .to_local(sunset)
            .map_err(|e| DomainError::invalid_field("sunset", e.to_string()))?;
        Ok(Self { sunrise, sunset })
    }

    /// Whether a local date-time falls in daylight
    #[must_use]
    pub fn is_daytime(&self, local: NaiveDateTime) -> bool {
        self.is_daytime_at(local.time())
    }

    /// Whether a local time of day falls in daylight
    #[must_use]
    pub fn is_daytime_at(&self, t: NaiveTime) -> bool {
        let rise = self.sunrise.time();
        let set = self.sunset.time();
        if rise <= set {
            rise <= t && t < set
        } else {
            t >= rise || t < set
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    fn window(rise: (u32, u32), set: (u32, u32)) -> DayNightWindow {
        DayNightWindow::new(at(rise.0, rise.1), at(set.0, set.1))
    }

    #[test]
    fn sunrise_is_daytime_sunset_is_not() {
        let w = window((5, 45), (20, 10));
        assert!(w.is_daytime(at(5, 45)));
        assert!(!w.is_daytime(at(20, 10)));
        assert!(!w.is_daytime(at(5, 44)));
        assert!(w.is_daytime(at(20, 9)));
    }

    #[test]
    fn applies_to_other_days() {
        let w = window((6, 0), (18, 0));
        let next_day_noon = at(12, 0) + chrono::Duration::days(1);
        assert!(w.is_daytime(next_day_noon));
        let day_before_night = at(22, 0) - chrono::Duration::days(1);
        assert!(!w.is_daytime(day_before_night));
    }

    #[test]
    fn window_dates_do_not_matter() {
        // sunset recorded on the following calendar day
        let w = DayNightWindow::new(at(6, 0), at(18, 0) + chrono::Duration::days(1));
        assert!(w.is_daytime(at(12, 0)));
        assert!(!w.is_daytime(at(20, 0)));
    }

    #[test]
    fn wraps_around_midnight() {
        // local sunset after midnight on the clock
        let w = window((7, 0), (0, 30));
        assert!(w.is_daytime(at(23, 0)));
        assert!(w.is_daytime(at(0, 10)));
        assert!(!w.is_daytime(at(0, 30)));
        assert!(!w.is_daytime(at(3, 0)));
        assert!(w.is_daytime(at(7, 0)));
    }

    #[test]
    fn from_unix_applies_offset() {
        // 2024-06-01 04:00 UTC / 19:00 UTC, shifted +2h
        let w = DayNightWindow::from_unix(
            1_717_214_400,
            1_717_268_400,
            TimezoneOffset::from_seconds(7200),
        )
        .unwrap();
        assert_eq!(w.sunrise, at(6, 0));
        assert_eq!(w.sunset, at(21, 0));
    }

    #[test]
    fn from_unix_names_bad_field() {
        let err = DayNightWindow::from_unix(0, i64::MAX, TimezoneOffset::UTC).unwrap_err();
        assert_eq!(err.field(), Some("sunset"));
    }
}
