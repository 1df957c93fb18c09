//! Time values with units, parsed from the client's human-readable format.

use crate::error::{ActionError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Unit of a [`TimeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Nanoseconds.
    Nanoseconds,
    /// Microseconds.
    Microseconds,
    /// Milliseconds.
    Milliseconds,
    /// Seconds.
    Seconds,
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days.
    Days,
}

impl TimeUnit {
    /// Number of nanoseconds in one of this unit.
    pub const fn nanos_per_unit(self) -> i64 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Minutes => 60 * 1_000_000_000,
            TimeUnit::Hours => 60 * 60 * 1_000_000_000,
            TimeUnit::Days => 24 * 60 * 60 * 1_000_000_000,
        }
    }

    /// Suffix used when rendering a value in this unit.
    pub const fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "nanos",
            TimeUnit::Microseconds => "micros",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
        }
    }
}

/// A duration expressed as a magnitude and a [`TimeUnit`].
///
/// Two values are equal when they describe the same span, so `1s == 1000ms`.
#[derive(Debug, Clone, Copy)]
pub struct TimeValue {
    duration: i64,
    unit: TimeUnit,
}

impl TimeValue {
    /// Create a time value.
    pub const fn new(duration: i64, unit: TimeUnit) -> Self {
        Self { duration, unit }
    }

    /// Time value in milliseconds.
    pub const fn timeout_value_millis(millis: i64) -> Self {
        Self::new(millis, TimeUnit::Milliseconds)
    }

    /// Time value in seconds.
    pub const fn timeout_value_seconds(seconds: i64) -> Self {
        Self::new(seconds, TimeUnit::Seconds)
    }

    /// Time value in minutes.
    pub const fn timeout_value_minutes(minutes: i64) -> Self {
        Self::new(minutes, TimeUnit::Minutes)
    }

    /// Magnitude in the value's own unit.
    pub fn duration(&self) -> i64 {
        self.duration
    }

    /// The value's unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    fn nanos_wide(&self) -> i128 {
        self.duration as i128 * self.unit.nanos_per_unit() as i128
    }

    /// Total nanoseconds, saturating at the bounds of `i64`.
    pub fn nanos(&self) -> i64 {
        self.nanos_wide().clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }

    /// Total milliseconds, truncated.
    pub fn millis(&self) -> i64 {
        self.nanos() / TimeUnit::Milliseconds.nanos_per_unit()
    }

    /// Total seconds, truncated.
    pub fn seconds(&self) -> i64 {
        self.nanos() / TimeUnit::Seconds.nanos_per_unit()
    }

    /// Convert to a [`Duration`]; negative values become zero.
    pub fn to_duration(&self) -> Duration {
        let nanos = self.nanos_wide();
        if nanos <= 0 {
            return Duration::ZERO;
        }
        let nanos = nanos.min(u64::MAX as i128) as u64;
        Duration::from_nanos(nanos)
    }

    /// Parse a human-readable time value such as `"500ms"`, `"30s"` or `"1.5m"`.
    ///
    /// A bare integer is read as milliseconds and an upper-case `S` suffix
    /// marks whole milliseconds. Fractional magnitudes are truncated to whole
    /// milliseconds.
    pub fn parse(value: &str) -> Result<Self> {
        let fail = || ActionError::Parse(format!("failed to parse [{}]", value));
        let s = value.trim();

        let (number, millis_per_unit) = if let Some(n) = s.strip_suffix('S') {
            let millis: i64 = n.trim().parse().map_err(|_| fail())?;
            return Ok(Self::timeout_value_millis(millis));
        } else if let Some(n) = s.strip_suffix("ms") {
            (n, 1.0)
        } else if let Some(n) = s.strip_suffix('s') {
            (n, 1_000.0)
        } else if let Some(n) = s.strip_suffix('m') {
            (n, 60_000.0)
        } else if let Some(n) = s.strip_suffix('h').or_else(|| s.strip_suffix('H')) {
            (n, 3_600_000.0)
        } else if let Some(n) = s.strip_suffix('d') {
            (n, 86_400_000.0)
        } else if let Some(n) = s.strip_suffix('w') {
            (n, 604_800_000.0)
        } else {
            let millis: i64 = s.parse().map_err(|_| fail())?;
            return Ok(Self::timeout_value_millis(millis));
        };

        let magnitude: f64 = number.trim().parse().map_err(|_| fail())?;
        if !magnitude.is_finite() {
            return Err(fail());
        }

        Ok(Self::timeout_value_millis((magnitude * millis_per_unit) as i64))
    }
}

impl PartialEq for TimeValue {
    fn eq(&self, other: &Self) -> bool {
        self.nanos_wide() == other.nanos_wide()
    }
}

impl Eq for TimeValue {}

impl Hash for TimeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nanos_wide().hash(state);
    }
}

impl From<Duration> for TimeValue {
    fn from(duration: Duration) -> Self {
        let nanos = duration.as_nanos().min(i64::MAX as u128) as i64;
        Self::new(nanos, TimeUnit::Nanoseconds)
    }
}

impl std::str::FromStr for TimeValue {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.nanos_wide();
        if nanos == 0 {
            return write!(f, "0ms");
        }

        const UNITS: [TimeUnit; 7] = [
            TimeUnit::Days,
            TimeUnit::Hours,
            TimeUnit::Minutes,
            TimeUnit::Seconds,
            TimeUnit::Milliseconds,
            TimeUnit::Microseconds,
            TimeUnit::Nanoseconds,
        ];

        // Nanoseconds always divide evenly, so the loop always writes.
        for unit in UNITS {
            let per = unit.nanos_per_unit() as i128;
            if nanos % per == 0 {
                return write!(f, "{}{}", nanos / per, unit.suffix());
            }
        }
        write!(f, "{}nanos", nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suffixes() {
        assert_eq!(TimeValue::parse("500ms").unwrap().millis(), 500);
        assert_eq!(TimeValue::parse("30s").unwrap().millis(), 30_000);
        assert_eq!(TimeValue::parse("2m").unwrap().millis(), 120_000);
        assert_eq!(TimeValue::parse("1h").unwrap().millis(), 3_600_000);
        assert_eq!(TimeValue::parse("1H").unwrap().millis(), 3_600_000);
        assert_eq!(TimeValue::parse("1d").unwrap().millis(), 86_400_000);
        assert_eq!(TimeValue::parse("1w").unwrap().millis(), 604_800_000);
        assert_eq!(TimeValue::parse("250S").unwrap().millis(), 250);
    }

    #[test]
    fn test_parse_bare_number_is_millis() {
        assert_eq!(TimeValue::parse("1500").unwrap().millis(), 1500);
        assert_eq!(TimeValue::parse("-1").unwrap().millis(), -1);
    }

    #[test]
    fn test_parse_fraction_and_whitespace() {
        assert_eq!(TimeValue::parse("1.5s").unwrap().millis(), 1500);
        assert_eq!(TimeValue::parse("  10s ").unwrap().millis(), 10_000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TimeValue::parse("soon").is_err());
        assert!(TimeValue::parse("").is_err());
        assert!(TimeValue::parse("infs").is_err());
        match TimeValue::parse("abc") {
            Err(ActionError::Parse(msg)) => assert_eq!(msg, "failed to parse [abc]"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_equality_across_units() {
        assert_eq!(
            TimeValue::timeout_value_seconds(1),
            TimeValue::timeout_value_millis(1000)
        );
        assert_ne!(
            TimeValue::timeout_value_seconds(1),
            TimeValue::timeout_value_millis(999)
        );
    }

    #[test]
    fn test_display_uses_largest_exact_unit() {
        assert_eq!(TimeValue::timeout_value_millis(500).to_string(), "500ms");
        assert_eq!(TimeValue::timeout_value_millis(30_000).to_string(), "30s");
        assert_eq!(TimeValue::timeout_value_seconds(60).to_string(), "1m");
        assert_eq!(TimeValue::timeout_value_millis(1500).to_string(), "1500ms");
        assert_eq!(TimeValue::timeout_value_millis(0).to_string(), "0ms");
    }

    #[test]
    fn test_to_duration() {
        assert_eq!(
            TimeValue::timeout_value_millis(500).to_duration(),
            Duration::from_millis(500)
        );
        assert_eq!(TimeValue::timeout_value_millis(-1).to_duration(), Duration::ZERO);
        assert_eq!(
            TimeValue::from(Duration::from_secs(2)),
            TimeValue::timeout_value_seconds(2)
        );
    }
}
