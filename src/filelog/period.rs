//! Rotation windows and the bucket tags that name them on disk.
//!
//! Tags are local-time, zero-padded and separator-free so that lexical order
//! matches chronological order: `2024010115` for an hour, `20240101` for a day.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::fmt;
use std::str::FromStr;

const HOUR_TAG: &str = "%Y%m%d%H";
const DAY_TAG: &str = "%Y%m%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    Hour,
    #[default]
    Day,
    /// One ever-growing file, never rotated.
    None,
}

impl Period {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::None => "none",
        }
    }

    /// Number of digits in this period's tag; zero for `None`.
    #[must_use]
    pub const fn tag_width(self) -> usize {
        match self {
            Self::Hour => 10,
            Self::Day => 8,
            Self::None => 0,
        }
    }

    /// Bucket tag for `time`. A timestamp on a boundary belongs to the window it starts.
    #[must_use]
    pub fn tag(self, time: &DateTime<Local>) -> String {
        match self {
            Self::Hour => time.format(HOUR_TAG).to_string(),
            Self::Day => time.format(DAY_TAG).to_string(),
            Self::None => String::new(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown strings mean "don't rotate" rather than an error, so a typo in
/// config degrades to a single file instead of refusing to log.
impl FromStr for Period {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s).unwrap_or(Self::None))
    }
}

impl Period {
    /// Strict lookup: `None` for names that aren't a recognised period.
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hour" | "hourly" | "h" => Some(Self::Hour),
            "day" | "daily" | "d" => Some(Self::Day),
            "none" | "never" | "" => Some(Self::None),
            _ => None,
        }
    }
}

/// Start of the window a tag names. Accepts both hour and day tags so files
/// left behind by a different period setting are still recognised.
#[must_use]
pub fn decode_tag(tag: &str) -> Option<DateTime<Local>> {
    if !tag.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (date, hour) = match tag.len() {
        10 => (&tag[..8], tag[8..].parse::<u32>().ok()?),
        8 => (tag, 0),
        _ => return None,
    };
    let naive = NaiveDate::parse_from_str(date, DAY_TAG)
        .ok()?
        .and_hms_opt(hour, 0, 0)?;
    Local.from_local_datetime(&naive).earliest()
}
