//! Validation of period ranges and counting against a reference calendar.

use std::cmp::Ordering;

use crate::domain::period::{check_calendar, check_width, token_value};
use crate::{Cell, Granularity, RangeError, Table};

/// A validated inclusive period range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRange {
    pub start: String,
    pub end: String,
    pub granularity: Granularity,
    start_value: u64,
    end_value: u64,
}

impl PeriodRange {
    /// True when `token` falls inside the range.
    ///
    /// Digit tokens compare as integers; anything else compares as text.
    pub fn contains_token(&self, token: &str) -> bool {
        match token.parse::<u64>() {
            Ok(value) if token.bytes().all(|byte| byte.is_ascii_digit()) => {
                (self.start_value..=self.end_value).contains(&value)
            }
            _ => {
                token.cmp(self.start.as_str()) != Ordering::Less
                    && token.cmp(self.end.as_str()) != Ordering::Greater
            }
        }
    }
}

/// Validates a `(start, end)` pair for `granularity`.
///
/// Checks run in a fixed order: digits, ordering, width, calendar validity.
pub fn validate_range(
    start: &str,
    end: &str,
    granularity: Granularity,
) -> Result<PeriodRange, RangeError> {
    let start = start.trim();
    let end = end.trim();

    let start_value = token_value(start, granularity)?;
    let end_value = token_value(end, granularity)?;

    if start_value > end_value {
        return Err(RangeError::Order {
            start: start.to_owned(),
            end: end.to_owned(),
        });
    }

    check_width(start, granularity)?;
    check_width(end, granularity)?;
    check_calendar(start, granularity)?;
    check_calendar(end, granularity)?;

    Ok(PeriodRange {
        start: start.to_owned(),
        end: end.to_owned(),
        granularity,
        start_value,
        end_value,
    })
}

/// Number of calendar rows whose first column lies inside `range`.
pub fn count_in_range(calendar: &Table, range: &PeriodRange) -> usize {
    if calendar.width() == 0 {
        return 0;
    }

    calendar
        .rows()
        .iter()
        .filter_map(|cells| cells.first().and_then(Cell::to_token))
        .filter(|token| range.contains_token(token))
        .count()
}
