//! Period token validation and period-end arithmetic.
//!
//! Tokens are the fixed-width digit strings the backend uses to address
//! periods: `yyyymmdd` for days, `yyyymm` for months, `yyyyqq` for quarters
//! (`qq` in `01..=04`) and `yyyy` for years.

use time::{Date, Month};

use crate::{Granularity, RangeError};

/// Parses a token made only of ASCII digits.
pub fn token_value(token: &str, granularity: Granularity) -> Result<u64, RangeError> {
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(RangeError::for_granularity(granularity, token));
    }

    token
        .parse::<u64>()
        .map_err(|_| RangeError::for_granularity(granularity, token))
}

/// Rejects tokens whose width does not match the granularity.
pub fn check_width(token: &str, granularity: Granularity) -> Result<(), RangeError> {
    if token.len() != granularity.token_len() {
        return Err(RangeError::for_granularity(granularity, token));
    }
    Ok(())
}

/// Rejects day, month and year tokens that do not name a real calendar period.
///
/// Quarter tokens are not calendar dates; only their width is checked.
pub fn check_calendar(token: &str, granularity: Granularity) -> Result<(), RangeError> {
    let valid = match granularity {
        Granularity::Day => parse_day(token).is_some(),
        Granularity::Month => parse_year_month(token).is_some(),
        Granularity::Quarter => true,
        Granularity::Year => parse_year(token).is_some(),
    };

    if valid {
        Ok(())
    } else {
        Err(RangeError::for_granularity(granularity, token))
    }
}

/// Full validation of a single period token.
pub fn validate_token(token: &str, granularity: Granularity) -> Result<u64, RangeError> {
    let value = token_value(token, granularity)?;
    check_width(token, granularity)?;
    check_calendar(token, granularity)?;
    Ok(value)
}

/// Maps a raw period cell to the last calendar day of the period it names.
///
/// Day cells accept `yyyymmdd`, `yyyy-mm-dd` and `yyyy/mm/dd`. Quarter cells
/// accept both the backend form `yyyyqq` and the marked form `yyyyQq`.
pub fn period_end(raw: &str, granularity: Granularity) -> Option<Date> {
    let raw = raw.trim();
    if !raw.is_ascii() {
        return None;
    }
    match granularity {
        Granularity::Day => parse_day(&strip_date_separators(raw)?),
        Granularity::Month => {
            let (year, month) = parse_year_month(raw)?;
            month_end(year, month)
        }
        Granularity::Quarter => {
            let (year, quarter) = parse_quarter(raw)?;
            let month = Month::try_from(quarter * 3).ok()?;
            month_end(year, month)
        }
        Granularity::Year => {
            let year = parse_year(raw)?;
            Date::from_calendar_date(year, Month::December, 31).ok()
        }
    }
}

/// Formats a date back into its `yyyymmdd` token.
pub fn day_token(date: Date) -> String {
    format!(
        "{:04}{:02}{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn strip_date_separators(raw: &str) -> Option<String> {
    match raw.len() {
        8 => Some(raw.to_owned()),
        10 => {
            let bytes = raw.as_bytes();
            let separator = bytes[4];
            if (separator == b'-' || separator == b'/') && bytes[7] == separator {
                Some(format!("{}{}{}", &raw[0..4], &raw[5..7], &raw[8..10]))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn digits(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_year(raw: &str) -> Option<i32> {
    if raw.len() != 4 {
        return None;
    }
    let year = digits(raw)? as i32;
    (year >= 1).then_some(year)
}

fn parse_year_month(raw: &str) -> Option<(i32, Month)> {
    if raw.len() != 6 || !raw.is_ascii() {
        return None;
    }
    let year = parse_year(&raw[0..4])?;
    let month = Month::try_from(u8::try_from(digits(&raw[4..6])?).ok()?).ok()?;
    Some((year, month))
}

fn parse_day(raw: &str) -> Option<Date> {
    if raw.len() != 8 || !raw.is_ascii() {
        return None;
    }
    let (year, month) = parse_year_month(&raw[0..6])?;
    let day = u8::try_from(digits(&raw[6..8])?).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

fn parse_quarter(raw: &str) -> Option<(i32, u8)> {
    if raw.len() != 6 || !raw.is_ascii() {
        return None;
    }
    let year = parse_year(&raw[0..4])?;
    let marker = &raw[4..6];
    let quarter = match marker.as_bytes() {
        [b'Q' | b'q', digit] if digit.is_ascii_digit() => u32::from(digit - b'0'),
        _ => digits(marker)?,
    };
    let quarter = u8::try_from(quarter).ok()?;
    (1..=4).contains(&quarter).then_some((year, quarter))
}

fn month_end(year: i32, month: Month) -> Option<Date> {
    let last_day = time::util::days_in_year_month(year, month);
    Date::from_calendar_date(year, month, last_day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).expect("valid test date")
    }

    #[test]
    fn width_is_checked_per_granularity() {
        assert!(check_width("20190101", Granularity::Day).is_ok());
        let err = check_width("2019", Granularity::Day).expect_err("must fail");
        assert!(matches!(err, RangeError::Day { .. }));
        assert!(check_width("201902", Granularity::Quarter).is_ok());
    }

    #[test]
    fn non_digit_tokens_are_rejected_with_granularity_error() {
        let err = token_value("2019-01", Granularity::Month).expect_err("must fail");
        assert!(matches!(err, RangeError::Month { .. }));
    }

    #[test]
    fn calendar_validation_rejects_impossible_dates() {
        assert!(check_calendar("20190229", Granularity::Day).is_err());
        assert!(check_calendar("20200229", Granularity::Day).is_ok());
        assert!(check_calendar("201913", Granularity::Month).is_err());
        assert!(check_calendar("0000", Granularity::Year).is_err());
    }

    #[test]
    fn quarter_tokens_skip_calendar_validation() {
        assert!(validate_token("201909", Granularity::Quarter).is_ok());
    }

    #[test]
    fn period_end_advances_to_last_day() {
        assert_eq!(
            period_end("20190115", Granularity::Day),
            Some(date(2019, Month::January, 15))
        );
        assert_eq!(
            period_end("2019-01-15", Granularity::Day),
            Some(date(2019, Month::January, 15))
        );
        assert_eq!(
            period_end("201902", Granularity::Month),
            Some(date(2019, Month::February, 28))
        );
        assert_eq!(
            period_end("201902", Granularity::Quarter),
            Some(date(2019, Month::June, 30))
        );
        assert_eq!(
            period_end("2019Q4", Granularity::Quarter),
            Some(date(2019, Month::December, 31))
        );
        assert_eq!(
            period_end("2019", Granularity::Year),
            Some(date(2019, Month::December, 31))
        );
    }

    #[test]
    fn period_end_rejects_out_of_range_quarters() {
        assert_eq!(period_end("201905", Granularity::Quarter), None);
    }

    #[test]
    fn day_token_round_trips_formatting() {
        assert_eq!(day_token(date(2019, Month::March, 5)), "20190305");
    }
}
