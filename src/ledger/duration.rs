// Thu Feb 5 2026 - Alex

use crate::ledger::error::LedgerError;
use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;

static COMPONENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+)(days?|hours?|minutes?|seconds?)$").unwrap());

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

// Grammar: whitespace-separated components like "1days 2hours", any order,
// each unit at most once, at least one nonzero component.
pub fn parse_duration(input: &str) -> Result<Duration, LedgerError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(LedgerError::InvalidDuration("empty duration".to_string()));
    }

    let mut days: Option<i64> = None;
    let mut hours: Option<i64> = None;
    let mut minutes: Option<i64> = None;
    let mut seconds: Option<i64> = None;

    for part in input.split_whitespace() {
        let caps = COMPONENT_RE.captures(part).ok_or_else(|| {
            LedgerError::InvalidDuration(format!(
                "unrecognized component `{}` (expected e.g. `1days`, `2hours`)",
                part
            ))
        })?;

        let value: i64 = caps[1].parse().map_err(|_| {
            LedgerError::InvalidDuration(format!("value out of range in `{}`", part))
        })?;

        let slot = match caps[2].as_bytes()[0].to_ascii_lowercase() {
            b'd' => &mut days,
            b'h' => &mut hours,
            b'm' => &mut minutes,
            _ => &mut seconds,
        };

        if slot.is_some() {
            return Err(LedgerError::InvalidDuration(format!(
                "unit given more than once in `{}`",
                input
            )));
        }
        *slot = Some(value);
    }

    let total = days
        .unwrap_or(0)
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|t| hours.unwrap_or(0).checked_mul(SECONDS_PER_HOUR).and_then(|h| t.checked_add(h)))
        .and_then(|t| minutes.unwrap_or(0).checked_mul(SECONDS_PER_MINUTE).and_then(|m| t.checked_add(m)))
        .and_then(|t| t.checked_add(seconds.unwrap_or(0)))
        .ok_or_else(|| LedgerError::InvalidDuration("duration out of range".to_string()))?;

    if total == 0 {
        return Err(LedgerError::InvalidDuration(
            "duration must have at least one nonzero value".to_string(),
        ));
    }

    Duration::try_seconds(total)
        .ok_or_else(|| LedgerError::InvalidDuration("duration out of range".to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemainingTime {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl RemainingTime {
    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

// Negative deltas clamp to zero rather than reporting negative fields.
pub fn split_remaining(delta: Duration) -> RemainingTime {
    let total = delta.num_seconds().max(0);
    RemainingTime {
        days: total / SECONDS_PER_DAY,
        hours: total % SECONDS_PER_DAY / SECONDS_PER_HOUR,
        minutes: total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE,
        seconds: total % SECONDS_PER_MINUTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days_and_hours() {
        let duration = parse_duration("1days 2hours").unwrap();
        assert_eq!(duration.num_hours(), 26);
    }

    #[test]
    fn test_parse_is_order_independent() {
        let forward = parse_duration("1days 2hours").unwrap();
        let reordered = parse_duration("2hours 1days").unwrap();
        assert_eq!(forward, reordered);
    }

    #[test]
    fn test_parse_singular_and_mixed_case() {
        let duration = parse_duration("1DAY 30Minutes 5second").unwrap();
        assert_eq!(duration.num_seconds(), 86_400 + 30 * 60 + 5);
    }

    #[test]
    fn test_parse_rejects_all_zero() {
        assert!(parse_duration("0minutes").is_err());
        assert!(parse_duration("0days 0seconds").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("5 days").is_err());
        assert!(parse_duration("1fortnight").is_err());
    }

    #[test]
    fn test_parse_rejects_duplicate_unit() {
        assert!(parse_duration("1hours 2hours").is_err());
        assert!(parse_duration("1hour 2hours").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(parse_duration("999999999999999999days").is_err());
    }

    #[test]
    fn test_split_remaining_breakdown() {
        let remaining = split_remaining(Duration::seconds(86_400 + 3_600 * 2 + 60 * 3 + 4));
        assert_eq!(remaining.days, 1);
        assert_eq!(remaining.hours, 2);
        assert_eq!(remaining.minutes, 3);
        assert_eq!(remaining.seconds, 4);
    }

    #[test]
    fn test_split_remaining_clamps_negative() {
        let remaining = split_remaining(Duration::seconds(-30));
        assert!(remaining.is_zero());
    }
}
