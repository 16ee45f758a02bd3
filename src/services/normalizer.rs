//! Date normalization service
//!
//! Turns a loosely typed creation timestamp into a calendar date. Each
//! admissible encoding is a named [`DateStrategy`]; strategies are tried in
//! [`DateStrategy::ORDER`] and the first one that yields a date wins.
//!
//! Component-built dates roll over out-of-range parts the way a calendar
//! constructor does: `2024-02-30` is 1 March and `2024-13-01` is January of
//! the next year.

use chrono::{
    DateTime, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};

use crate::types::{RawTimestamp, UnparseableDate};

/// Largest instant magnitude a timestamp may carry, in milliseconds (±100M days)
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Date-time text without an offset, read as wall-clock time
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Human-entered date text
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%Y/%m/%d", "%m/%d/%Y"];

/// SQL text rewritten to ISO form, minus the trailing `Z`
const SQL_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%MZ"];

/// A single way of reading a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateStrategy {
    /// Structured date value passed through
    NativeInstant,
    /// Number as milliseconds since the Unix epoch
    EpochMillis,
    /// RFC 3339 / RFC 2822 / common date-time text
    GenericText,
    /// Strict `YYYY-MM-DD`, built from its components
    IsoDate,
    /// `YYYY-MM-DD HH:mm:ss`, read as UTC
    SqlTimestamp,
    /// Any `a-b-c` text with numeric leading parts
    DashTriple,
    /// Integer text as seconds since the Unix epoch
    UnixSeconds,
}

impl DateStrategy {
    /// Strategies in the order they are tried
    pub const ORDER: [DateStrategy; 7] = [
        Self::NativeInstant,
        Self::EpochMillis,
        Self::GenericText,
        Self::IsoDate,
        Self::SqlTimestamp,
        Self::DashTriple,
        Self::UnixSeconds,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NativeInstant => "native-instant",
            Self::EpochMillis => "epoch-millis",
            Self::GenericText => "generic-text",
            Self::IsoDate => "iso-date",
            Self::SqlTimestamp => "sql-timestamp",
            Self::DashTriple => "dash-triple",
            Self::UnixSeconds => "unix-seconds",
        }
    }

    /// Try this strategy alone, yielding wall-clock time on the calendar of
    /// `tz`. Date-only forms resolve to midnight.
    pub fn attempt<Tz: TimeZone>(&self, raw: &RawTimestamp, tz: &Tz) -> Option<NaiveDateTime> {
        match (self, raw) {
            (Self::NativeInstant, RawTimestamp::Instant(dt)) => Some(wall_clock(dt, tz)),
            (Self::EpochMillis, RawTimestamp::Millis(ms)) => from_epoch_millis(*ms, tz),
            (Self::GenericText, RawTimestamp::Text(s)) => parse_generic(s, tz),
            (Self::IsoDate, RawTimestamp::Text(s)) => parse_iso_date(s),
            (Self::SqlTimestamp, RawTimestamp::Text(s)) => parse_sql_timestamp(s, tz),
            (Self::DashTriple, RawTimestamp::Text(s)) => parse_dash_triple(s),
            (Self::UnixSeconds, RawTimestamp::Text(s)) => parse_unix_seconds(s, tz),
            _ => None,
        }
    }
}

/// A successfully normalized timestamp and the strategy that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    /// Full wall-clock time, for ordering entries within a day
    pub datetime: NaiveDateTime,
    pub strategy: DateStrategy,
}

/// Normalize against the local time zone.
///
/// # Examples
/// ```
/// use entrytally::services::normalizer::{normalize, DateStrategy};
/// use entrytally::types::RawTimestamp;
///
/// let resolved = normalize(&RawTimestamp::from("2024-03-05")).unwrap();
/// assert_eq!(resolved.date.to_string(), "2024-03-05");
/// assert_eq!(resolved.strategy, DateStrategy::IsoDate);
/// assert!(normalize(&RawTimestamp::from("not-a-date")).is_err());
/// ```
pub fn normalize(raw: &RawTimestamp) -> Result<ResolvedDate, UnparseableDate> {
    normalize_in(raw, &Local)
}

/// Normalize, placing instants on the calendar of `tz`. Never panics.
pub fn normalize_in<Tz: TimeZone>(
    raw: &RawTimestamp,
    tz: &Tz,
) -> Result<ResolvedDate, UnparseableDate> {
    DateStrategy::ORDER
        .iter()
        .find_map(|strategy| {
            strategy.attempt(raw, tz).map(|datetime| ResolvedDate {
                date: datetime.date(),
                datetime,
                strategy: *strategy,
            })
        })
        .ok_or_else(|| UnparseableDate {
            value: raw.display_value(),
            kind: raw.kind(),
        })
}

fn wall_clock<Tz: TimeZone, Src: TimeZone>(dt: &DateTime<Src>, tz: &Tz) -> NaiveDateTime {
    dt.with_timezone(tz).naive_local()
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn from_epoch_millis<Tz: TimeZone>(ms: f64, tz: &Tz) -> Option<NaiveDateTime> {
    if !ms.is_finite() || ms.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(ms.trunc() as i64).map(|dt| wall_clock(&dt, tz))
}

fn parse_generic<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(wall_clock(&dt, tz));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(wall_clock(&dt, tz));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(midnight)
        })
}

fn is_strict_iso_date(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Calendar date from 1-based components, carrying overflow into the next
/// unit. Month 0 is December of the previous year, day 0 the last day of
/// the previous month.
fn date_from_parts(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let year = i32::try_from(year).ok()?;
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;

    let months = month.checked_sub(1)?;
    let month_start = if months >= 0 {
        first.checked_add_months(Months::new(u32::try_from(months).ok()?))?
    } else {
        first.checked_sub_months(Months::new(u32::try_from(-months).ok()?))?
    };

    let days = day.checked_sub(1)?;
    if days >= 0 {
        month_start.checked_add_days(Days::new(u64::try_from(days).ok()?))
    } else {
        month_start.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

fn parse_iso_date(text: &str) -> Option<NaiveDateTime> {
    if !is_strict_iso_date(text) {
        return None;
    }
    let year = text[0..4].parse().ok()?;
    let month = text[5..7].parse().ok()?;
    let day = text[8..10].parse().ok()?;
    date_from_parts(year, month, day).map(midnight)
}

fn parse_sql_timestamp<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<NaiveDateTime> {
    if !(text.contains(' ') && text.contains('-') && text.contains(':')) {
        return None;
    }
    let iso = format!("{}Z", text.replacen(' ', "T", 1));

    if let Ok(dt) = DateTime::parse_from_rfc3339(&iso) {
        return Some(wall_clock(&dt, tz));
    }
    SQL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&iso, fmt).ok())
        .map(|naive| wall_clock(&naive.and_utc(), tz))
}

/// Leading integer of `s`, ignoring leading whitespace and trailing junk
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(|c| c == '+' || c == '-'));
    let digits_len = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..sign_len + digits_len].parse().ok()
}

fn parse_dash_triple(text: &str) -> Option<NaiveDateTime> {
    let parts: Vec<&str> = text.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return None;
    };
    date_from_parts(leading_int(year)?, leading_int(month)?, leading_int(day)?).map(midnight)
}

fn parse_unix_seconds<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let ms = leading_int(text)?.checked_mul(1000)?;
    from_epoch_millis(ms as f64, tz)
}
