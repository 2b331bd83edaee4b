//! ISO 8601 durations (`xsd:duration`) for `Object.duration`.
//!
//! Only fixed-length units are accepted: weeks, days, hours, minutes and
//! seconds, with an optional fraction on the seconds and an optional leading
//! `-`. Years and months have no fixed length and are rejected.
//!
//! ```
//! use activitypub_model::duration;
//! use chrono::TimeDelta;
//!
//! let span = duration::parse("PT1H30M").unwrap();
//! assert_eq!(span, TimeDelta::minutes(90));
//! assert_eq!(duration::format(span), "PT1H30M");
//! ```

use chrono::TimeDelta;
use thiserror::Error;

const SECONDS_PER_DAY: i64 = 86_400;

/// Why a duration string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("duration {0:?} does not start with `P`")]
    MissingDesignator(String),

    #[error("duration {text:?} uses `{unit}`, which has no fixed length")]
    CalendarUnit { text: String, unit: char },

    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("duration {0:?} is out of range")]
    OutOfRange(String),
}

/// Parses an ISO 8601 duration such as `P1DT2H`, `PT0.5S` or `-PT10M`.
pub fn parse(text: &str) -> Result<TimeDelta, DurationError> {
    let invalid = || DurationError::Invalid(text.to_string());

    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let rest = rest
        .strip_prefix('P')
        .ok_or_else(|| DurationError::MissingDesignator(text.to_string()))?;

    let (date, time) = match rest.split_once('T') {
        Some((_, "")) => return Err(invalid()),
        Some((date, time)) => (date, time),
        None => (rest, ""),
    };

    let date = components(date).ok_or_else(invalid)?;
    let time = components(time).ok_or_else(invalid)?;
    if date.is_empty() && time.is_empty() {
        return Err(invalid());
    }

    let mut total = TimeDelta::zero();
    let mut rank = 0;
    for (value, unit) in date {
        let (next_rank, part) = match unit {
            'Y' | 'M' => {
                return Err(DurationError::CalendarUnit {
                    text: text.to_string(),
                    unit,
                });
            }
            'W' => (1, TimeDelta::try_weeks(whole(value).ok_or_else(invalid)?)),
            'D' => (2, TimeDelta::try_days(whole(value).ok_or_else(invalid)?)),
            _ => return Err(invalid()),
        };
        total = accumulate(text, total, &mut rank, next_rank, part)?;
    }

    rank = 0;
    for (value, unit) in time {
        let (next_rank, part) = match unit {
            'H' => (1, TimeDelta::try_hours(whole(value).ok_or_else(invalid)?)),
            'M' => (2, TimeDelta::try_minutes(whole(value).ok_or_else(invalid)?)),
            'S' => (3, Some(seconds(value).ok_or_else(invalid)?)),
            _ => return Err(invalid()),
        };
        total = accumulate(text, total, &mut rank, next_rank, part)?;
    }

    Ok(if negative { -total } else { total })
}

/// Formats a duration in its shortest `PnDTnHnMnS` form. Zero is `PT0S`.
#[must_use]
pub fn format(delta: TimeDelta) -> String {
    let negative = delta < TimeDelta::zero();
    let magnitude = if negative { -delta } else { delta };

    let secs = magnitude.num_seconds();
    let nanos = magnitude.subsec_nanos();
    let days = secs / SECONDS_PER_DAY;
    let hours = secs % SECONDS_PER_DAY / 3600;
    let minutes = secs % 3600 / 60;
    let seconds = secs % 60;

    let mut out = String::from(if negative { "-P" } else { "P" });
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }

    let has_time = hours > 0 || minutes > 0 || seconds > 0 || nanos > 0;
    if has_time || days == 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if seconds > 0 || nanos > 0 || !has_time {
            out.push_str(&seconds.to_string());
            if nanos > 0 {
                let fraction = format!("{nanos:09}");
                out.push('.');
                out.push_str(fraction.trim_end_matches('0'));
            }
            out.push('S');
        }
    }
    out
}

fn accumulate(
    text: &str,
    total: TimeDelta,
    rank: &mut u8,
    next_rank: u8,
    part: Option<TimeDelta>,
) -> Result<TimeDelta, DurationError> {
    // Units appear at most once each, largest first.
    if next_rank <= *rank {
        return Err(DurationError::Invalid(text.to_string()));
    }
    *rank = next_rank;
    part.and_then(|part| total.checked_add(&part))
        .ok_or_else(|| DurationError::OutOfRange(text.to_string()))
}

/// Splits `12H30M` into `[("12", 'H'), ("30", 'M')]`.
fn components(part: &str) -> Option<Vec<(&str, char)>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in part.char_indices() {
        if c.is_ascii_digit() || c == '.' {
            continue;
        }
        if i == start {
            return None;
        }
        out.push((&part[start..i], c));
        start = i + c.len_utf8();
    }
    (start == part.len()).then_some(out)
}

fn whole(value: &str) -> Option<i64> {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// `"12.5"` → 12.5 s. Digits past nanoseconds are dropped.
fn seconds(value: &str) -> Option<TimeDelta> {
    let (whole_part, fraction) = match value.split_once('.') {
        Some((w, f)) if !w.is_empty() && !f.is_empty() => (w, f),
        Some(_) => return None,
        None => (value, ""),
    };
    let secs = whole(whole_part)?;
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = &fraction[..fraction.len().min(9)];
    let nanos = if digits.is_empty() {
        0
    } else {
        digits.parse::<u32>().ok()? * 10u32.pow(9 - digits.len() as u32)
    };
    TimeDelta::new(secs, nanos)
}
