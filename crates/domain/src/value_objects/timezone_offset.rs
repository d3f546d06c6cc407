//! Timezone offset value object
//!
//! Providers report a location's timezone as a signed number of seconds
//! east of UTC. Adding it to a unix timestamp yields the location's
//! wall-clock time, which is what every local-date grouping and daytime
//! check is computed from.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::TimezoneOffset;
//!
//! let tokyo = TimezoneOffset::from_seconds(9 * 3600);
//! let local = tokyo.to_local(0).expect("in range");
//! assert_eq!(local.to_string(), "1970-01-01 09:00:00");
//! ```

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Signed offset in seconds from UTC to local wall-clock time
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimezoneOffset(i32);

impl TimezoneOffset {
    /// Offset of zero seconds
    pub const UTC: Self = Self(0);

    /// Create an offset from seconds east of UTC
    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self(seconds)
    }

    /// Seconds east of UTC
    #[must_use]
    pub const fn seconds(self) -> i32 {
        self.0
    }

    /// Local wall-clock time for a unix timestamp
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if the shifted timestamp is
    /// outside the range chrono can represent.
    pub fn to_local(self, unix_seconds: i64) -> Result<NaiveDateTime, DomainError> {
        unix_seconds
            .checked_add(i64::from(self.0))
            .and_then(|shifted| DateTime::from_timestamp(shifted, 0))
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| {
                DomainError::InvalidDateTime(format!(
                    "timestamp {unix_seconds} with offset {self} is out of range"
                ))
            })
    }
}

impl fmt::Display for TimezoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.unsigned_abs();
        write!(f, "UTC{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
    }
}

impl From<i32> for TimezoneOffset {
    fn from(seconds: i32) -> Self {
        Self(seconds)
    }
}
