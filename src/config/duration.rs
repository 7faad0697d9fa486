//! Config files specify retention as "7d" or "12h" but rotation works on
//! `Duration`.

use std::time::Duration;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Accepts a bare number of seconds or a number with one of `s`, `m`, `h`, `d`, `w`.
/// `"0"` and `""` mean zero (keep forever).
///
/// # Errors
/// `InvalidDuration` for anything else.
pub fn parse_duration(s: &str) -> Result<Duration, crate::Error> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return Ok(Duration::ZERO);
    }

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (num_str, unit) = s.split_at(split);
    let multiplier = match unit.trim() {
        "" | "s" | "sec" | "secs" => 1,
        "m" | "min" | "mins" => MINUTE,
        "h" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "week" | "weeks" => 7 * DAY,
        _ => return Err(crate::Error::InvalidDuration(s.clone())),
    };

    num_str
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .map(Duration::from_secs)
        .ok_or_else(|| crate::Error::InvalidDuration(s.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        assert_eq!(parse_duration("90").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("30m").unwrap(), Duration::from_secs(1800));
        assert_eq!(parse_duration("12h").unwrap(), Duration::from_secs(12 * HOUR));
        assert_eq!(parse_duration("7d").unwrap(), Duration::from_secs(7 * DAY));
        assert_eq!(parse_duration("2 weeks").unwrap(), Duration::from_secs(14 * DAY));
    }

    #[test]
    fn zero_and_empty_keep_forever() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("  ").unwrap(), Duration::ZERO);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_duration("d").is_err());
        assert!(parse_duration("5y").is_err());
        assert!(parse_duration("-1h").is_err());
    }
}
