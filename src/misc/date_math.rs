//! Client-side resolution of Elasticsearch date math.
//!
//! An expression is an anchor followed by any number of operations:
//!
//! ```text
//! now-1d/d
//! 2014-08-19||+1M/M
//! 1408447319000
//! ```
//!
//! Anchors are `now`, a date terminated by `||`, or (with no math at all) a
//! bare date or epoch-millis value.  Operations add (`+1h`), subtract
//! (`-2w`) or round down (`/d`).  Rounding and dates without an explicit
//! offset are evaluated in the supplied time zone, which may be a fixed
//! offset or a named zone with daylight saving rules.

use crate::error::{Error, Result};
use chrono::{
    DateTime, Datelike, Days, FixedOffset, LocalResult, Months, NaiveDate, NaiveDateTime,
    NaiveTime, Offset, TimeDelta, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref OPERATION: Regex =
        Regex::new(r"^(?:([+-])(\d*)([yMwdhHms])|/([yMwdhHms]))").expect("invalid operation regex");
    static ref OFFSET: Regex =
        Regex::new(r"^([+-])(\d{2})(?::?(\d{2}))?$").expect("invalid offset regex");
    static ref EPOCH_MILLIS: Regex = Regex::new(r"^-?\d+$").expect("invalid epoch regex");
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    fn parse(c: &str) -> Option<Unit> {
        Some(match c {
            "y" => Unit::Year,
            "M" => Unit::Month,
            "w" => Unit::Week,
            "d" => Unit::Day,
            "h" | "H" => Unit::Hour,
            "m" => Unit::Minute,
            "s" => Unit::Second,
            _ => return None,
        })
    }
}

/// A time zone date math can be evaluated in.  Named zones follow their
/// daylight saving rules when rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateZone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl DateZone {
    pub fn utc() -> Self {
        DateZone::Fixed(Utc.fix())
    }
}

/// Parse an Elasticsearch-style time zone: `Z`, `UTC`, `GMT`, a fixed
/// offset (`+05:00`, `-0800`, `+01`) or an IANA name (`America/New_York`).
pub fn parse_time_zone(time_zone: &str) -> Result<DateZone> {
    let trimmed = time_zone.trim();
    if matches!(trimmed, "Z" | "z" | "UTC" | "GMT") {
        return Ok(DateZone::utc());
    }

    let captures = match OFFSET.captures(trimmed) {
        Some(captures) => captures,
        None => {
            return trimmed
                .parse::<Tz>()
                .map(DateZone::Named)
                .map_err(|_| Error::InvalidTimeZone(time_zone.into()))
        }
    };

    let hours: i32 = captures[2]
        .parse()
        .map_err(|_| Error::InvalidTimeZone(time_zone.into()))?;
    let minutes: i32 = match captures.get(3) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| Error::InvalidTimeZone(time_zone.into()))?,
        None => 0,
    };
    if hours > 18 || minutes > 59 {
        return Err(Error::InvalidTimeZone(time_zone.into()));
    }

    let seconds = hours * 3600 + minutes * 60;
    let seconds = if &captures[1] == "-" { -seconds } else { seconds };
    FixedOffset::east_opt(seconds)
        .map(DateZone::Fixed)
        .ok_or_else(|| Error::InvalidTimeZone(time_zone.into()))
}

/// Resolve `expression` to an absolute instant, with `now` pinned to the
/// supplied anchor
pub fn resolve(
    expression: &str,
    now: DateTime<Utc>,
    zone: &DateZone,
) -> Result<DateTime<FixedOffset>> {
    match zone {
        DateZone::Fixed(offset) => resolve_in(expression, now, offset),
        DateZone::Named(tz) => resolve_in(expression, now, tz),
    }
}

/// [`resolve`], as epoch milliseconds
pub fn resolve_millis(expression: &str, now: DateTime<Utc>, zone: &DateZone) -> Result<i64> {
    resolve(expression, now, zone).map(|instant| instant.timestamp_millis())
}

fn resolve_in<Z: TimeZone>(
    expression: &str,
    now: DateTime<Utc>,
    time_zone: &Z,
) -> Result<DateTime<FixedOffset>> {
    let trimmed = expression.trim();

    let (mut instant, math) = if let Some(rest) = trimmed.strip_prefix("now") {
        (now.with_timezone(time_zone), rest)
    } else if let Some(idx) = trimmed.find("||") {
        (
            parse_date(expression, &trimmed[..idx], time_zone)?,
            &trimmed[idx + 2..],
        )
    } else {
        (parse_date(expression, trimmed, time_zone)?, "")
    };

    let mut remaining = math;
    while !remaining.is_empty() {
        let captures = OPERATION.captures(remaining).ok_or_else(|| {
            Error::date_math(expression, format!("unexpected operation at `{}`", remaining))
        })?;

        instant = if let Some(unit) = captures.get(4) {
            let unit = Unit::parse(unit.as_str())
                .ok_or_else(|| Error::date_math(expression, "unknown rounding unit"))?;
            round_down(expression, &instant, unit, time_zone)?
        } else {
            let amount: i64 = match &captures[2] {
                "" => 1,
                digits => digits
                    .parse()
                    .map_err(|_| Error::date_math(expression, "amount out of range"))?,
            };
            let amount = if &captures[1] == "-" { -amount } else { amount };
            let unit = Unit::parse(&captures[3])
                .ok_or_else(|| Error::date_math(expression, "unknown unit"))?;
            add(expression, instant, amount, unit, time_zone)?
        };

        remaining = &remaining[captures[0].len()..];
    }

    Ok(instant.fixed_offset())
}

fn parse_date<Z: TimeZone>(expression: &str, date: &str, time_zone: &Z) -> Result<DateTime<Z>> {
    if date.is_empty() {
        return Err(Error::date_math(expression, "missing anchor date"));
    }

    if EPOCH_MILLIS.is_match(date) {
        let millis: i64 = date
            .parse()
            .map_err(|_| Error::date_math(expression, "epoch millis out of range"))?;
        return time_zone
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| Error::date_math(expression, "epoch millis out of range"));
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(date) {
        return Ok(instant.with_timezone(time_zone));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| Error::date_math(expression, format!("unparseable date `{}`", date)))?;

    localize(expression, naive, time_zone)
}

/// Local wall time to an instant.  Ambiguous times (clocks going back) take
/// the earlier instant.  Times inside a gap (clocks going forward) move past
/// the gap.
fn localize<Z: TimeZone>(
    expression: &str,
    naive: NaiveDateTime,
    time_zone: &Z,
) -> Result<DateTime<Z>> {
    match time_zone.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Ok(instant),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => naive
            .checked_add_signed(TimeDelta::hours(1))
            .and_then(|later| time_zone.from_local_datetime(&later).earliest())
            .ok_or_else(|| Error::date_math(expression, "date out of range")),
    }
}

/// Calendar units step the local wall time; hours and smaller step elapsed
/// time.
fn add<Z: TimeZone>(
    expression: &str,
    instant: DateTime<Z>,
    amount: i64,
    unit: Unit,
    time_zone: &Z,
) -> Result<DateTime<Z>> {
    let overflow = || Error::date_math(expression, "date out of range");

    let local = instant.naive_local();
    let stepped = match unit {
        Unit::Year | Unit::Month => {
            let months = if unit == Unit::Year {
                amount.checked_mul(12).ok_or_else(overflow)?
            } else {
                amount
            };
            let magnitude = u32::try_from(months.unsigned_abs()).map_err(|_| overflow())?;
            if months >= 0 {
                local.checked_add_months(Months::new(magnitude))
            } else {
                local.checked_sub_months(Months::new(magnitude))
            }
        }
        Unit::Week | Unit::Day => {
            let days = if unit == Unit::Week {
                amount.checked_mul(7).ok_or_else(overflow)?
            } else {
                amount
            };
            let magnitude = days.unsigned_abs();
            if days >= 0 {
                local.checked_add_days(Days::new(magnitude))
            } else {
                local.checked_sub_days(Days::new(magnitude))
            }
        }
        _ => {
            let delta = match unit {
                Unit::Hour => TimeDelta::try_hours(amount),
                Unit::Minute => TimeDelta::try_minutes(amount),
                _ => TimeDelta::try_seconds(amount),
            }
            .ok_or_else(overflow)?;
            return instant.checked_add_signed(delta).ok_or_else(overflow);
        }
    }
    .ok_or_else(overflow)?;

    localize(expression, stepped, time_zone)
}

fn round_down<Z: TimeZone>(
    expression: &str,
    instant: &DateTime<Z>,
    unit: Unit,
    time_zone: &Z,
) -> Result<DateTime<Z>> {
    let local = instant.with_timezone(time_zone).naive_local();
    let date = local.date();
    let overflow = || Error::date_math(expression, "date out of range");

    let naive = match unit {
        Unit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)
            .ok_or_else(overflow)?
            .and_time(NaiveTime::MIN),
        Unit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .ok_or_else(overflow)?
            .and_time(NaiveTime::MIN),
        Unit::Week => {
            let days_from_monday = i64::from(date.weekday().num_days_from_monday());
            (date - TimeDelta::try_days(days_from_monday).ok_or_else(overflow)?)
                .and_time(NaiveTime::MIN)
        }
        Unit::Day => date.and_time(NaiveTime::MIN),
        Unit::Hour => date.and_hms_opt(local.hour(), 0, 0).ok_or_else(overflow)?,
        Unit::Minute => date
            .and_hms_opt(local.hour(), local.minute(), 0)
            .ok_or_else(overflow)?,
        Unit::Second => date
            .and_hms_opt(local.hour(), local.minute(), local.second())
            .ok_or_else(overflow)?,
    };

    localize(expression, naive, time_zone)
}
