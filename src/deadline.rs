use std::fmt;

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use tracing::{debug, warn};

use crate::error::{DeadlineError, Result};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// Format of the value held by a local datetime edit control.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const LOCAL_INPUT_FORMAT_SECS: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Countdown from "now" to a task deadline.
///
/// The three shapes are mutually exclusive: a task either has no deadline,
/// has run out of time, or has a strictly positive amount of time left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingTime {
    NoDeadline,
    Expired,
    Left { days: i64, hours: i64, minutes: i64 },
}

impl RemainingTime {
    /// Breaks `deadline - now` down into days, hours and minutes.
    ///
    /// A deadline equal to `now` is already expired. Minutes are floored and
    /// then clamped to at least 1, so a live deadline never reads "0分".
    pub fn between(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let diff = (deadline - now).num_milliseconds();
        if diff <= 0 {
            return Self::Expired;
        }
        let days = diff / MS_PER_DAY;
        let hours = (diff % MS_PER_DAY) / MS_PER_HOUR;
        let minutes = ((diff % MS_PER_HOUR) / MS_PER_MINUTE).max(1);
        Self::Left { days, hours, minutes }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDeadline => write!(f, "期限未設定"),
            Self::Expired => write!(f, "期限切れ"),
            Self::Left { days, hours, minutes } => write!(f, "{days}日 {hours}時間 {minutes}分"),
        }
    }
}

/// Converts deadlines between the stored UTC form, the local edit form and
/// the remaining-time label, relative to a single timezone.
#[derive(Debug, Clone)]
pub struct DeadlineFormatter<Tz: TimeZone> {
    tz: Tz,
}

impl DeadlineFormatter<Local> {
    /// Formatter for the system's local timezone.
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl<Tz: TimeZone> DeadlineFormatter<Tz>
where
    Tz::Offset: fmt::Display,
{
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Reads an optional deadline.
    ///
    /// Accepts a stored instant (RFC 3339, e.g. `2024-06-01T15:30:00.000Z`) or a
    /// local edit value (`2024-06-01T15:30`, seconds optional) read in this
    /// formatter's timezone. Absent and blank inputs mean "no deadline".
    pub fn parse_deadline(&self, deadline: Option<&str>) -> Result<Option<DateTime<Utc>>> {
        match non_empty(deadline) {
            Some(raw) => self.parse_instant(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Label for the time left until `deadline`, as seen at `now`.
    pub fn remaining_time(&self, deadline: Option<&str>, now: DateTime<Utc>) -> Result<RemainingTime> {
        Ok(match self.parse_deadline(deadline)? {
            Some(instant) => RemainingTime::between(instant, now),
            None => RemainingTime::NoDeadline,
        })
    }

    /// Stored instant rendered as a `YYYY-MM-DDTHH:mm` wall-clock value.
    ///
    /// The offset used is the one in force at the instant itself, so DST
    /// transitions are respected. Seconds are dropped.
    pub fn local_input_value(&self, stored: Option<&str>) -> Result<String> {
        let Some(instant) = self.parse_deadline(stored)? else {
            return Ok(String::new());
        };
        Ok(instant
            .with_timezone(&self.tz)
            .format(LOCAL_INPUT_FORMAT)
            .to_string())
    }

    /// Wall-clock edit value converted to the stored UTC form.
    ///
    /// Returns `None` for an empty value. A wall-clock time skipped by a DST
    /// transition is rejected; one repeated by a transition resolves to the
    /// earlier instant.
    pub fn to_stored_instant(&self, local: &str) -> Result<Option<String>> {
        Ok(self.parse_deadline(Some(local))?.map(format_stored))
    }

    fn parse_instant(&self, raw: &str) -> Result<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            debug!(input = raw, "parsed deadline as stored instant");
            return Ok(dt.with_timezone(&Utc));
        }

        let naive = NaiveDateTime::parse_from_str(raw, LOCAL_INPUT_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, LOCAL_INPUT_FORMAT_SECS))
            .map_err(|err| DeadlineError::invalid(raw, err.to_string()))?;
        debug!(input = raw, "parsed deadline as local wall-clock time");
        self.resolve_local(naive, raw)
    }

    fn resolve_local(&self, naive: NaiveDateTime, raw: &str) -> Result<DateTime<Utc>> {
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
            LocalResult::Ambiguous(first, second) => {
                warn!(
                    input = raw,
                    first = %first,
                    second = %second,
                    "ambiguous local time; using the earlier instant"
                );
                let earliest = if first <= second { first } else { second };
                Ok(earliest.with_timezone(&Utc))
            }
            LocalResult::None => Err(DeadlineError::invalid(
                raw,
                "local time does not exist in this timezone",
            )),
        }
    }
}

/// [`DeadlineFormatter::remaining_time`] in the system timezone.
pub fn remaining_time(deadline: Option<&str>, now: DateTime<Utc>) -> Result<RemainingTime> {
    DeadlineFormatter::local().remaining_time(deadline, now)
}

/// [`DeadlineFormatter::local_input_value`] in the system timezone.
pub fn local_input_value(stored: Option<&str>) -> Result<String> {
    DeadlineFormatter::local().local_input_value(stored)
}

/// [`DeadlineFormatter::to_stored_instant`] in the system timezone.
pub fn to_stored_instant(local: &str) -> Result<Option<String>> {
    DeadlineFormatter::local().to_stored_instant(local)
}

/// Stored form of an instant: UTC with millisecond precision and a `Z` suffix.
pub fn format_stored(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
