//! Forecast normalizer
//!
//! Turns raw provider records into the series the dashboard shows:
//!
//! - up to five daily summaries bucketed by local calendar date
//! - 24 hourly points, passed through from a 1-hour feed when one is
//!   available or interpolated from the leading 3-hour samples otherwise
//! - a day/night classification for every point, against one window
//!   derived from the current conditions
//!
//! All functions here are pure. Every local time in one normalization is
//! computed with the same offset: the forecast container's when present,
//! the current record's otherwise.
//!
//! Input is validated up front. A non-finite temperature, a timestamp that
//! cannot be represented, or samples out of order fail with
//! [`DomainError::InvalidField`] naming the field, e.g.
//! `forecast[3].temperature`.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use domain::{
    CurrentConditions, DailySummary, DayNightWindow, DomainError, ForecastFeed, HourlyPoint,
    HourlySample, HourlySource, MAX_DAILY_SUMMARIES, MAX_HOURLY_POINTS, NormalizedForecast,
    RawForecastSample, TimezoneOffset, WeatherCondition,
};
use tracing::debug;

/// Leading 3-hour samples considered for interpolation
const INTERPOLATION_SAMPLES: usize = 9;

/// Sub-points generated per 3-hour interval
const POINTS_PER_INTERVAL: usize = 3;

/// Local hour the representative condition is chosen around
const NOON: u32 = 12;

/// A validated forecast sample with its local time resolved
#[derive(Debug)]
struct LocalSample<'a> {
    timestamp: i64,
    local: NaiveDateTime,
    temperature: f64,
    condition: WeatherCondition,
    icon: Option<&'a str>,
}

/// Samples sharing one local calendar date
#[derive(Debug)]
struct DayBucket<'s, 'a> {
    date: NaiveDate,
    samples: Vec<&'s LocalSample<'a>>,
}

impl DayBucket<'_, '_> {
    fn summarize(&self, window: Option<&DayNightWindow>) -> Option<DailySummary> {
        let first = *self.samples.first()?;

        let (min_temperature, max_temperature) = self.samples.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), s| (lo.min(s.temperature), hi.max(s.temperature)),
        );

        // strict `<`: the earliest sample wins on equal distance
        let mut best = first;
        let mut best_diff = 24;
        for sample in &self.samples {
            let diff = sample.local.hour().abs_diff(NOON);
            if diff < best_diff {
                best = sample;
                best_diff = diff;
            }
        }

        let is_daytime = classify(window, first.local);
        let icon = best.icon.map_or_else(
            || best.condition.icon_code(is_daytime).to_string(),
            ToString::to_string,
        );

        Some(DailySummary {
            date: self.date,
            weekday_label: self.date.format("%a").to_string(),
            min_temperature,
            max_temperature,
            representative_condition: best.condition,
            icon,
            is_daytime,
        })
    }
}

/// Normalize one fetch's records into daily and hourly series
///
/// A non-empty `hourly_feed` is passed through; otherwise the hourly series
/// is interpolated from the 3-hour forecast.
pub fn normalize(
    current: &CurrentConditions,
    forecast: &ForecastFeed,
    hourly_feed: Option<&[HourlySample]>,
) -> Result<NormalizedForecast, DomainError> {
    ensure_finite("current.temperature", current.temperature)?;

    let offset = forecast
        .timezone_offset
        .unwrap_or(current.timezone_offset);
    let window = derive_window(current, offset)?;

    let daily = bucket_daily(&forecast.samples, offset, window.as_ref())?;
    let (hourly, hourly_source) = match hourly_feed {
        Some(feed) if !feed.is_empty() => (
            passthrough_hourly(feed, offset, window.as_ref())?,
            HourlySource::Passthrough,
        ),
        _ => (
            interpolate_hourly(&forecast.samples, offset, window.as_ref())?,
            HourlySource::Interpolated,
        ),
    };

    debug!(
        place = %current.place_name,
        offset = %offset,
        days = daily.len(),
        hours = hourly.len(),
        source = ?hourly_source,
        "Normalized forecast"
    );

    Ok(NormalizedForecast {
        daily,
        hourly,
        hourly_source,
        day_night: window,
        timezone_offset: offset,
    })
}

/// Local sunrise/sunset window from the current record
///
/// `None` when the record lacks either time; callers then treat every point
/// as daytime.
pub fn derive_window(
    current: &CurrentConditions,
    offset: TimezoneOffset,
) -> Result<Option<DayNightWindow>, DomainError> {
    let (Some(sunrise), Some(sunset)) = (current.sunrise, current.sunset) else {
        return Ok(None);
    };
    DayNightWindow::from_unix(sunrise, sunset, offset)
        .map(Some)
        .map_err(|e| match e {
            DomainError::InvalidField { field, reason } => {
                DomainError::invalid_field(format!("current.{field}"), reason)
            },
            other => other,
        })
}

/// Group 3-hour samples into at most five local-date summaries
///
/// Buckets are the first five distinct local dates in order of appearance.
/// Each carries the min/max of its samples and the condition of the sample
/// whose local hour is closest to noon.
pub fn bucket_daily(
    samples: &[RawForecastSample],
    offset: TimezoneOffset,
    window: Option<&DayNightWindow>,
) -> Result<Vec<DailySummary>, DomainError> {
    let prepared = prepare_samples(samples, offset)?;

    let mut buckets: Vec<DayBucket<'_, '_>> = Vec::with_capacity(MAX_DAILY_SUMMARIES);
    for sample in &prepared {
        let date = sample.local.date();
        if let Some(bucket) = buckets.iter_mut().find(|b| b.date == date) {
            bucket.samples.push(sample);
        } else if buckets.len() < MAX_DAILY_SUMMARIES {
            buckets.push(DayBucket {
                date,
                samples: vec![sample],
            });
        }
    }

    Ok(buckets
        .iter()
        .filter_map(|bucket| bucket.summarize(window))
        .collect())
}

/// Interpolate the leading 3-hour samples into up to 24 hourly points
///
/// Each of the first eight samples starts an interval towards its successor
/// and yields points at 0, 1/3 and 2/3 of the way. A sample without a
/// successor is its own successor, so its interval stays flat; its points
/// keep the preceding interval's spacing so timestamps still increase.
/// Fewer than two samples yield nothing.
#[allow(clippy::cast_possible_truncation)]
pub fn interpolate_hourly(
    samples: &[RawForecastSample],
    offset: TimezoneOffset,
    window: Option<&DayNightWindow>,
) -> Result<Vec<HourlyPoint>, DomainError> {
    let leading = &samples[..samples.len().min(INTERPOLATION_SAMPLES)];
    if leading.len() < 2 {
        return Ok(Vec::new());
    }
    let prepared = prepare_samples(leading, offset)?;

    let intervals = prepared.len().min(INTERPOLATION_SAMPLES - 1);
    let mut points = Vec::with_capacity(intervals * POINTS_PER_INTERVAL);

    for (i, a) in prepared.iter().take(intervals).enumerate() {
        let (b, span) = match prepared.get(i + 1) {
            Some(b) => (b, b.timestamp - a.timestamp),
            None => {
                let spacing = i
                    .checked_sub(1)
                    .and_then(|p| prepared.get(p))
                    .map_or(0, |prev| a.timestamp - prev.timestamp);
                (a, spacing)
            },
        };
        let span = span as f64;

        for step in 0..POINTS_PER_INTERVAL {
            let frac = step as f64 / POINTS_PER_INTERVAL as f64;
            let temperature = (b.temperature - a.temperature).mul_add(frac, a.temperature);
            let timestamp = a.timestamp + (span * frac).round() as i64;
            let local = offset.to_local(timestamp)?;
            let is_daytime = classify(window, local);

            points.push(HourlyPoint {
                timestamp,
                local_time: local,
                hour_label: hour_label(local),
                temperature,
                condition: a.condition,
                icon: retarget_icon(a.icon, a.condition, is_daytime),
                is_daytime,
            });
        }
    }

    points.truncate(MAX_HOURLY_POINTS);
    Ok(points)
}

/// Map the first 24 entries of a 1-hour feed to hourly points
pub fn passthrough_hourly(
    feed: &[HourlySample],
    offset: TimezoneOffset,
    window: Option<&DayNightWindow>,
) -> Result<Vec<HourlyPoint>, DomainError> {
    let mut points: Vec<HourlyPoint> = Vec::with_capacity(feed.len().min(MAX_HOURLY_POINTS));

    for (i, sample) in feed.iter().take(MAX_HOURLY_POINTS).enumerate() {
        ensure_finite(&format!("hourly[{i}].temperature"), sample.temperature)?;
        let local = local_time(&format!("hourly[{i}].timestamp"), sample.timestamp, offset)?;
        if let Some(prev) = points.last() {
            ensure_after(&format!("hourly[{i}].timestamp"), prev.timestamp, sample.timestamp)?;
        }

        let condition = sample.primary_condition();
        let is_daytime = classify(window, local);
        points.push(HourlyPoint {
            timestamp: sample.timestamp,
            local_time: local,
            hour_label: hour_label(local),
            temperature: sample.temperature,
            condition,
            icon: sample
                .icon
                .clone()
                .unwrap_or_else(|| condition.icon_code(is_daytime).to_string()),
            is_daytime,
        });
    }

    Ok(points)
}

fn prepare_samples(
    samples: &[RawForecastSample],
    offset: TimezoneOffset,
) -> Result<Vec<LocalSample<'_>>, DomainError> {
    let mut prepared: Vec<LocalSample<'_>> = Vec::with_capacity(samples.len());

    for (i, sample) in samples.iter().enumerate() {
        ensure_finite(&format!("forecast[{i}].temperature"), sample.temperature)?;
        let field = format!("forecast[{i}].timestamp");
        let local = local_time(&field, sample.timestamp, offset)?;
        if let Some(prev) = prepared.last() {
            ensure_after(&field, prev.timestamp, sample.timestamp)?;
        }

        prepared.push(LocalSample {
            timestamp: sample.timestamp,
            local,
            temperature: sample.temperature,
            condition: sample.condition.unwrap_or_default(),
            icon: sample.icon.as_deref().filter(|icon| !icon.is_empty()),
        });
    }

    Ok(prepared)
}

fn ensure_finite(field: &str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::invalid_field(
            field,
            format!("{value} is not a finite number"),
        ))
    }
}

fn ensure_after(field: &str, previous: i64, timestamp: i64) -> Result<(), DomainError> {
    if timestamp > previous {
        Ok(())
    } else {
        Err(DomainError::invalid_field(
            field,
            format!("{timestamp} is not after the previous sample ({previous})"),
        ))
    }
}

fn local_time(
    field: &str,
    timestamp: i64,
    offset: TimezoneOffset,
) -> Result<NaiveDateTime, DomainError> {
    offset
        .to_local(timestamp)
        .map_err(|_| DomainError::invalid_field(field, format!("{timestamp} is out of range")))
}

fn classify(window: Option<&DayNightWindow>, local: NaiveDateTime) -> bool {
    window.is_none_or(|w| w.is_daytime(local))
}

fn hour_label(local: NaiveDateTime) -> String {
    local.format("%H:00").to_string()
}

/// Keep the provider's icon artwork but switch its day/night variant
fn retarget_icon(icon: Option<&str>, condition: WeatherCondition, is_daytime: bool) -> String {
    let suffix = if is_daytime { 'd' } else { 'n' };
    match icon.and_then(|i| i.get(..2)) {
        Some(base) => format!("{base}{suffix}"),
        None => condition.icon_code(is_daytime).to_string(),
    }
}
