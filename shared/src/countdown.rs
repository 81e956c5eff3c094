//! Countdown engine - remaining-time computation toward a fixed instant
//!
//! `tick` is a pure function of the target and a caller-supplied "now", so the
//! pages drive it from their frame loop through a `TickSchedule` and tests can
//! feed it arbitrary instants.

use std::time::{Duration, Instant};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// How often the pages recompute their countdowns
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Errors raised while building a countdown target from configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountdownError {
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid time '{0}' (expected HH:MM or HH:MM:SS)")]
    InvalidTime(String),
    #[error("Invalid UTC offset '{0}' (expected ±HH:MM)")]
    InvalidOffset(String),
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("Local time {0} does not exist in the selected zone")]
    NonexistentLocalTime(NaiveDateTime),
}

/// The fixed instant a countdown runs toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInstant(DateTime<FixedOffset>);

impl TargetInstant {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }

    /// Build from the deployment strings, e.g. `("2025-12-20", "13:00:00", "+09:00")`
    pub fn parse(date: &str, time: &str, offset: &str) -> Result<Self, CountdownError> {
        let naive = parse_naive(date, time)?;
        let offset = parse_offset(offset)?;
        offset
            .from_local_datetime(&naive)
            .single()
            .map(Self)
            .ok_or(CountdownError::NonexistentLocalTime(naive))
    }

    /// Interpret a wall-clock date/time in an IANA zone.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant; times
    /// inside a spring-forward gap are rejected.
    pub fn in_zone(date: &str, time: &str, tz: Tz) -> Result<Self, CountdownError> {
        let naive = parse_naive(date, time)?;
        tz.from_local_datetime(&naive)
            .earliest()
            .map(|dt| Self(dt.fixed_offset()))
            .ok_or(CountdownError::NonexistentLocalTime(naive))
    }

    /// Interpret a wall-clock date/time in the host's local zone
    pub fn in_local_zone(date: &str, time: &str) -> Result<Self, CountdownError> {
        let naive = parse_naive(date, time)?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| Self(dt.fixed_offset()))
            .ok_or(CountdownError::NonexistentLocalTime(naive))
    }

    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}

fn parse_naive(date: &str, time: &str) -> Result<NaiveDateTime, CountdownError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| CountdownError::InvalidDate(date.to_string()))?;
    let time_str = time.trim();
    let time = NaiveTime::parse_from_str(time_str, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time_str, "%H:%M"))
        .map_err(|_| CountdownError::InvalidTime(time.to_string()))?;
    Ok(date.and_time(time))
}

/// Parse a UTC offset such as `+09:00`, `-0530`, `+09` or `Z`
pub fn parse_offset(offset: &str) -> Result<FixedOffset, CountdownError> {
    let invalid = || CountdownError::InvalidOffset(offset.to_string());
    let trimmed = offset.trim();

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };
    if !rest.is_ascii() {
        return Err(invalid());
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };

    if hours.is_empty() || hours.len() > 2 || minutes.is_empty() || minutes.len() > 2 {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Parse an IANA timezone name into a Tz
pub fn parse_timezone(tz_str: &str) -> Result<Tz, CountdownError> {
    tz_str
        .trim()
        .parse::<Tz>()
        .map_err(|_| CountdownError::InvalidTimezone(tz_str.to_string()))
}

/// Remaining time, decomposed for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemainingTime {
    pub days: u64,
    /// Hours (0-23)
    pub hours: u8,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Seconds (0-59)
    pub seconds: u8,
}

impl RemainingTime {
    pub const ZERO: RemainingTime = RemainingTime {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decompose a millisecond difference; non-positive differences are zero
    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Self::ZERO;
        }
        Self {
            days: (diff_ms / MS_PER_DAY) as u64,
            hours: ((diff_ms / MS_PER_HOUR) % 24) as u8,
            minutes: ((diff_ms / MS_PER_MINUTE) % 60) as u8,
            seconds: ((diff_ms / MS_PER_SECOND) % 60) as u8,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Whole seconds represented by the four fields
    pub fn total_seconds(&self) -> u64 {
        ((self.days * 24 + self.hours as u64) * 60 + self.minutes as u64) * 60 + self.seconds as u64
    }

    /// Format as "DD:HH:MM:SS"
    pub fn format_clock(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }

    /// Value/label pairs for the four countdown cells
    pub fn cells(&self) -> [(u64, &'static str); 4] {
        [
            (self.days, "DAYS"),
            (self.hours as u64, "HOURS"),
            (self.minutes as u64, "MINUTES"),
            (self.seconds as u64, "SECONDS"),
        ]
    }

    /// Get an accessible description of the remaining time
    pub fn accessible_description(&self) -> String {
        if self.is_zero() {
            return "The countdown has finished.".to_string();
        }
        format!(
            "{} days, {} hours, {} minutes and {} seconds remaining.",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Compute the time remaining until `target` as of `now`
pub fn tick(target: &TargetInstant, now: DateTime<Utc>) -> RemainingTime {
    let diff_ms = (target.to_utc() - now).num_milliseconds();
    RemainingTime::from_millis(diff_ms)
}

/// Repeating once-per-interval schedule polled from a frame loop.
///
/// The first poll is always due so a freshly mounted view shows a value
/// immediately. Missed beats are skipped rather than replayed.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    interval: Duration,
    next_due: Option<Instant>,
    cancelled: bool,
}

impl TickSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
            cancelled: false,
        }
    }

    /// Returns true when a tick should run at `now`
    pub fn due(&mut self, now: Instant) -> bool {
        if self.cancelled {
            return false;
        }
        match self.next_due {
            None => {
                self.next_due = Some(now + self.interval);
                true
            }
            Some(at) if now >= at => {
                let mut next = at + self.interval;
                while next <= now {
                    next += self.interval;
                }
                self.next_due = Some(next);
                true
            }
            Some(_) => false,
        }
    }

    /// Stop the schedule for good (view teardown)
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.next_due = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

/// A countdown owned by a view: optional target plus the last computed value.
///
/// A target that failed to build is logged once and the countdown reads
/// zero for the rest of the view's lifetime.
#[derive(Debug, Clone)]
pub struct Countdown {
    target: Option<TargetInstant>,
    remaining: RemainingTime,
}

impl Countdown {
    pub fn new(target: Result<TargetInstant, CountdownError>) -> Self {
        let target = match target {
            Ok(target) => Some(target),
            Err(e) => {
                tracing::warn!(error = %e, "Countdown target is invalid; countdown will read zero");
                None
            }
        };
        Self {
            target,
            remaining: RemainingTime::ZERO,
        }
    }

    /// Recompute against `now` and return the new value
    pub fn refresh(&mut self, now: DateTime<Utc>) -> RemainingTime {
        self.remaining = match &self.target {
            Some(target) => tick(target, now),
            None => RemainingTime::ZERO,
        };
        self.remaining
    }

    pub fn remaining(&self) -> RemainingTime {
        self.remaining
    }

    pub fn target(&self) -> Option<&TargetInstant> {
        self.target.as_ref()
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn wedding() -> TargetInstant {
        TargetInstant::parse("2025-12-20", "13:00:00", "+09:00").unwrap()
    }

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_one_day_before() {
        let remaining = tick(&wedding(), at("2025-12-19T13:00:00+09:00"));
        assert_eq!(
            remaining,
            RemainingTime {
                days: 1,
                hours: 0,
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn test_zero_at_and_after_target() {
        assert!(tick(&wedding(), at("2025-12-20T13:00:00+09:00")).is_zero());
        assert!(tick(&wedding(), at("2025-12-20T04:00:01Z")).is_zero());
        assert!(tick(&wedding(), at("2030-01-01T00:00:00Z")).is_zero());
    }

    #[test]
    fn test_decomposition() {
        // 2d 3h 4m 5.999s before the target
        let now = wedding().to_utc()
            - ChronoDuration::days(2)
            - ChronoDuration::hours(3)
            - ChronoDuration::minutes(4)
            - ChronoDuration::milliseconds(5_999);
        let remaining = tick(&wedding(), now);
        assert_eq!(
            remaining,
            RemainingTime {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5
            }
        );
    }

    #[test]
    fn test_truncation_law() {
        let target = wedding();
        for offset_ms in [1i64, 999, 1_000, 59_999, 3_600_001, 86_399_999, 1_234_567_891] {
            let now = target.to_utc() - ChronoDuration::milliseconds(offset_ms);
            let remaining = tick(&target, now);
            assert_eq!(remaining.total_seconds(), (offset_ms / 1000) as u64);
        }
    }

    #[test]
    fn test_monotonic_as_time_advances() {
        let target = wedding();
        let mut now = target.to_utc() - ChronoDuration::hours(50);
        let mut previous = tick(&target, now).total_seconds();
        while now < target.to_utc() {
            now += ChronoDuration::milliseconds(7_777);
            let current = tick(&target, now).total_seconds();
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            TargetInstant::parse("2025-13-40", "13:00:00", "+09:00"),
            Err(CountdownError::InvalidDate("2025-13-40".to_string()))
        );
        assert!(matches!(
            TargetInstant::parse("2025-12-20", "1pm", "+09:00"),
            Err(CountdownError::InvalidTime(_))
        ));
        assert!(matches!(
            TargetInstant::parse("2025-12-20", "13:00", "KST"),
            Err(CountdownError::InvalidOffset(_))
        ));
    }

    #[test]
    fn test_parse_offset_forms() {
        assert_eq!(parse_offset("+09:00").unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(parse_offset("-0530").unwrap().local_minus_utc(), -(5 * 3600 + 30 * 60));
        assert_eq!(parse_offset("+09").unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_offset("+25:00").is_err());
        assert!(parse_offset("09:00").is_err());
    }

    #[test]
    fn test_parse_offset_rejects_non_ascii() {
        assert_eq!(
            parse_offset("+1é1"),
            Err(CountdownError::InvalidOffset("+1é1".to_string()))
        );
        assert!(parse_offset("+０９:00").is_err());
        assert!(matches!(
            TargetInstant::parse("2025-12-20", "13:00:00", "+1é1"),
            Err(CountdownError::InvalidOffset(_))
        ));
    }

    #[test]
    fn test_time_without_seconds() {
        let target = TargetInstant::parse("2025-12-20", "13:00", "+09:00").unwrap();
        assert_eq!(target, wedding());
    }

    #[test]
    fn test_in_zone_matches_fixed_offset() {
        let tz = parse_timezone("Asia/Seoul").unwrap();
        let target = TargetInstant::in_zone("2025-12-20", "13:00:00", tz).unwrap();
        assert_eq!(target.to_utc(), wedding().to_utc());
    }

    #[test]
    fn test_in_zone_rejects_gap() {
        let tz = parse_timezone("America/New_York").unwrap();
        let result = TargetInstant::in_zone("2026-03-08", "02:30:00", tz);
        assert!(matches!(result, Err(CountdownError::NonexistentLocalTime(_))));
    }

    #[test]
    fn test_format_clock() {
        let remaining = RemainingTime {
            days: 3,
            hours: 4,
            minutes: 5,
            seconds: 6,
        };
        assert_eq!(remaining.format_clock(), "03:04:05:06");
        assert_eq!(remaining.cells()[0], (3, "DAYS"));
    }

    #[test]
    fn test_tick_schedule_fires_once_per_interval() {
        let start = Instant::now();
        let mut schedule = TickSchedule::new(Duration::from_millis(1000));

        assert!(schedule.due(start));
        assert!(!schedule.due(start + Duration::from_millis(500)));
        assert!(schedule.due(start + Duration::from_millis(1000)));
        assert!(!schedule.due(start + Duration::from_millis(1500)));
        // A long stall produces one tick, not a burst
        assert!(schedule.due(start + Duration::from_millis(5300)));
        assert!(!schedule.due(start + Duration::from_millis(5400)));
        assert!(schedule.due(start + Duration::from_millis(6000)));
    }

    #[test]
    fn test_tick_schedule_cancel() {
        let start = Instant::now();
        let mut schedule = TickSchedule::default();
        assert!(schedule.due(start));
        schedule.cancel();
        assert!(schedule.is_cancelled());
        assert!(!schedule.due(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_countdown_with_bad_target_reads_zero() {
        let mut countdown = Countdown::new(TargetInstant::parse("not-a-date", "13:00", "+09:00"));
        assert!(!countdown.has_target());
        assert!(countdown.refresh(at("2000-01-01T00:00:00Z")).is_zero());
    }

    #[test]
    fn test_countdown_refresh_updates_value() {
        let mut countdown = Countdown::new(Ok(wedding()));
        assert!(countdown.remaining().is_zero());
        countdown.refresh(at("2025-12-19T13:00:00+09:00"));
        assert_eq!(countdown.remaining().days, 1);
    }
}
