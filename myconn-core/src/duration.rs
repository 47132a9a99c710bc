//! Human-readable duration strings used by pool settings.
//!
//! Accepted input is a sequence of decimal numbers, each with an optional
//! fraction and a unit suffix: `"100ms"`, `"10m"`, `"1h30m"`, `"1.5s"`.
//! Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. The bare
//! string `"0"` is also accepted.
//!
//! Formatting emits the same grammar with whole components only, largest unit
//! first, so any formatted value parses back to the identical duration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const NANOS_PER_SEC: u128 = 1_000_000_000;

const UNITS: [(&str, u128); 6] = [
    ("h", 3_600 * NANOS_PER_SEC),
    ("m", 60 * NANOS_PER_SEC),
    ("s", NANOS_PER_SEC),
    ("ms", 1_000_000),
    ("us", 1_000),
    ("ns", 1),
];

/// Returned when a duration string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid duration: {0:?}")]
pub struct ParseDurationError(String);

/// Parse a duration string.
pub fn parse(input: &str) -> Result<Duration, ParseDurationError> {
    parse_nanos(input)
        .and_then(nanos_to_duration)
        .ok_or_else(|| ParseDurationError(input.to_string()))
}

/// Format a duration using the largest units first, omitting zero components.
pub fn format(duration: Duration) -> String {
    let mut remaining = duration.as_nanos();
    if remaining == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    for (suffix, scale) in UNITS {
        let count = remaining / scale;
        if count > 0 {
            out.push_str(&count.to_string());
            out.push_str(suffix);
            remaining -= count * scale;
        }
    }
    out
}

fn unit_scale(unit: &str) -> Option<u128> {
    match unit {
        "µs" | "μs" => Some(1_000),
        _ => UNITS
            .iter()
            .find(|(suffix, _)| *suffix == unit)
            .map(|(_, scale)| *scale),
    }
}

fn parse_nanos(input: &str) -> Option<u128> {
    let mut rest = input.strip_prefix('+').unwrap_or(input);
    if rest == "0" {
        return Some(0);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after) = rest.split_at(int_len);

        let (frac_part, after) = match after.strip_prefix('.') {
            Some(stripped) => {
                let frac_len = stripped.bytes().take_while(u8::is_ascii_digit).count();
                stripped.split_at(frac_len)
            }
            None => ("", after),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, next) = after.split_at(unit_len);
        let scale = unit_scale(unit)?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };
        let mut value = whole.checked_mul(scale)?;

        if !frac_part.is_empty() {
            // Digits beyond nanosecond precision of the largest unit are dropped.
            let digits = frac_part.len().min(18);
            let frac: u128 = frac_part[..digits].parse().ok()?;
            value = value.checked_add(frac * scale / 10u128.pow(digits as u32))?;
        }

        total = total.checked_add(value)?;
        rest = next;
    }

    Some(total)
}

fn nanos_to_duration(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    let subsec = (nanos % NANOS_PER_SEC) as u32;
    Some(Duration::new(secs, subsec))
}

/// A [`Duration`] encoded as a human-readable string in configuration files.
///
/// Only used while parsing configuration; the registry converts it into a
/// plain [`Duration`] before handing it to a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ConfigDuration(Duration);

impl ConfigDuration {
    /// Wrap a duration.
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// The wrapped duration.
    pub const fn get(self) -> Duration {
        self.0
    }
}

impl From<Duration> for ConfigDuration {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl From<ConfigDuration> for Duration {
    fn from(duration: ConfigDuration) -> Self {
        duration.0
    }
}

impl fmt::Display for ConfigDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self.0))
    }
}

impl FromStr for ConfigDuration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).map(Self)
    }
}

impl Serialize for ConfigDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConfigDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
