use chrono::Duration;
use serde::Deserialize;
use serde::Deserializer;
use thiserror::Error;

/// Error for duration parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("Invalid duration {0:?}: expected <n>s, <n>m, <n>h or <n>d")]
    InvalidFormat(String),

    #[error("Duration out of range: {0}")]
    OutOfRange(String),
}

/// Parse a duration such as `30s`, `15m`, `24h` or `7d`.
///
/// A bare integer is read as seconds. Negative amounts are accepted; they produce
/// tokens that are already expired.
///
/// # Errors
/// * `InvalidFormat` - Amount is not an integer or the unit is unknown
/// * `OutOfRange` - Amount overflows the unit
pub fn parse_duration(value: &str) -> Result<Duration, DurationError> {
    let value = value.trim();
    let invalid = || DurationError::InvalidFormat(value.to_string());

    let (amount, unit) = match value.char_indices().last() {
        Some((index, unit)) if unit.is_ascii_alphabetic() => (&value[..index], unit),
        _ => (value, 's'),
    };
    let amount: i64 = amount.parse().map_err(|_| invalid())?;

    let duration = match unit {
        's' => Duration::try_seconds(amount),
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        'd' => Duration::try_days(amount),
        _ => return Err(invalid()),
    };

    duration.ok_or_else(|| DurationError::OutOfRange(value.to_string()))
}

/// Serde adapter reading a duration string from configuration.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_duration(&value).map_err(serde::de::Error::custom)
}
