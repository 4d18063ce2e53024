//! Active-hour ranges and their textual form (`9-12/13-18`)

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// One daily window, inclusive on both ends. `start > end` wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveHourRange {
    pub start: u8,
    pub end: u8,
}

impl ActiveHourRange {
    pub const MAX_HOUR: u8 = 23;

    pub fn new(start: u8, end: u8) -> Result<Self, FormatError> {
        if start > Self::MAX_HOUR || end > Self::MAX_HOUR {
            return Err(FormatError::OutOfRange(format!("{}-{}", start, end)));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, hour: u32) -> bool {
        let (start, end) = (u32::from(self.start), u32::from(self.end));
        if start <= end {
            start <= hour && hour <= end
        } else {
            hour >= start || hour <= end
        }
    }

    fn parse_segment(segment: &str) -> Result<Self, FormatError> {
        let (start, end) = segment
            .split_once('-')
            .ok_or_else(|| FormatError::MissingSeparator(segment.to_string()))?;

        let start: i64 = start
            .trim()
            .parse()
            .map_err(|_| FormatError::NotInteger(segment.to_string()))?;
        let end: i64 = end
            .trim()
            .parse()
            .map_err(|_| FormatError::NotInteger(segment.to_string()))?;

        let hours = 0..=i64::from(Self::MAX_HOUR);
        if !hours.contains(&start) || !hours.contains(&end) {
            return Err(FormatError::OutOfRange(segment.to_string()));
        }

        Ok(Self {
            start: start as u8,
            end: end as u8,
        })
    }
}

impl fmt::Display for ActiveHourRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Parsed active-hour windows plus their canonical text.
///
/// An empty spec means "always active". The canonical text re-parses to the
/// exact same ranges, so it is what gets persisted and shown back to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ActiveHoursSpec {
    ranges: Vec<ActiveHourRange>,
    normalized: String,
}

impl ActiveHoursSpec {
    /// Parse an expression such as `9-12/13-18/19-21`.
    ///
    /// Blank input is a valid, always-active spec. Segment order is kept.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let ranges = text
            .split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(ActiveHourRange::parse_segment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_ranges(ranges))
    }

    pub fn from_ranges(ranges: Vec<ActiveHourRange>) -> Self {
        let normalized = ranges
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/");
        Self { ranges, normalized }
    }

    /// Every hour of the day is active
    pub fn always() -> Self {
        Self::default()
    }

    pub fn ranges(&self) -> &[ActiveHourRange] {
        &self.ranges
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_always(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether `hour` (0-23, local wall clock) falls into any window
    pub fn is_active(&self, hour: u32) -> bool {
        self.ranges.is_empty() || self.ranges.iter().any(|range| range.contains(hour))
    }

    /// Text used in log lines and summaries
    pub fn summary(&self) -> &str {
        if self.is_always() {
            "all day"
        } else {
            &self.normalized
        }
    }
}

impl FromStr for ActiveHoursSpec {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ActiveHoursSpec {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ActiveHoursSpec> for String {
    fn from(spec: ActiveHoursSpec) -> Self {
        spec.normalized
    }
}

impl fmt::Display for ActiveHoursSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}
