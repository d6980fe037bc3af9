//! Severity rating helpers.
//!
//! A severity is an integer in `1..=100`; the page slider starts at 50 and
//! colors its readout by [`SeverityBand`].

pub const MIN: u8 = 1;
pub const MAX: u8 = 100;
pub const DEFAULT: u8 = 50;

const LOW_CEILING: u8 = 33;
const MEDIUM_CEILING: u8 = 66;

/// Coarse grouping shown next to the slider value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeverityBand {
    Low,
    Medium,
    High,
}

/// Return `value` as a severity if it is in range.
#[must_use]
pub fn checked(value: i64) -> Option<u8> {
    u8::try_from(value).ok().filter(|v| (MIN..=MAX).contains(v))
}

/// Force `value` into range, the way a slider pins out-of-range input.
#[must_use]
pub fn clamp(value: i64) -> u8 {
    let pinned = value.clamp(i64::from(MIN), i64::from(MAX));
    u8::try_from(pinned).unwrap_or(DEFAULT)
}

#[must_use]
pub fn band(severity: u8) -> SeverityBand {
    if severity <= LOW_CEILING {
        SeverityBand::Low
    } else if severity <= MEDIUM_CEILING {
        SeverityBand::Medium
    } else {
        SeverityBand::High
    }
}

#[cfg(test)]
#[path = "severity_test.rs"]
mod tests;
