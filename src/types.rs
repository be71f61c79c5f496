use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MONTH_DAY_WIDTH, YEAR_WIDTH,
};
use crate::prelude::*;
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// Why a single date component was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FieldError {
    #[display(fmt = "Invalid date field: {_0:?}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
}

impl std::error::Error for FieldError {}

/// Parses an all-digit field no wider than `width`.
///
/// Signs, whitespace and over-wide fields are rejected, so `"+12"` or `"123"`
/// never sneak through as a month.
fn parse_digits(field: &str, width: usize) -> Result<u16, FieldError> {
    if field.is_empty() || field.len() > width || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::InvalidFormat(field.to_owned()));
    }
    field
        .parse::<u16>()
        .map_err(|_| FieldError::InvalidFormat(field.to_owned()))
}

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `FieldError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, FieldError> {
        let non_zero = NonZeroU16::new(value).ok_or(FieldError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(FieldError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Parses a year field of at most four digits.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidFormat` for non-digit or over-wide input,
    /// `FieldError::InvalidYear` for year zero.
    pub fn parse_field(field: &str) -> Result<Self, FieldError> {
        Self::new(parse_digits(field, YEAR_WIDTH)?)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `FieldError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, FieldError> {
        let non_zero = NonZeroU8::new(value).ok_or(FieldError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(FieldError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Parses a month field of at most two digits.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidFormat` or `FieldError::InvalidMonth`.
    pub fn parse_field(field: &str) -> Result<Self, FieldError> {
        let value = parse_digits(field, MONTH_DAY_WIDTH)?;
        // two digits always fit in a u8
        Self::new(u8::try_from(value).map_err(|_| FieldError::InvalidFormat(field.to_owned()))?)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A day value guaranteed to be valid for the year and month it was built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and exists in the given month
    ///
    /// # Errors
    /// Returns `FieldError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, FieldError> {
        let invalid = FieldError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: value,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if value > days_in_month(year.get(), month.get()) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    /// Parses a day field of at most two digits against its year and month.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidFormat` or `FieldError::InvalidDay`.
    pub fn parse_field(field: &str, year: Year, month: Month) -> Result<Self, FieldError> {
        let value = parse_digits(field, MONTH_DAY_WIDTH)?;
        Self::new(
            u8::try_from(value).map_err(|_| FieldError::InvalidFormat(field.to_owned()))?,
            year,
            month,
        )
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_year_new_bounds() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(9999).is_ok());
        assert!(matches!(Year::new(0), Err(FieldError::InvalidYear(0))));
        assert!(matches!(Year::new(10000), Err(FieldError::InvalidYear(10000))));
    }

    #[rstest]
    #[case("1990", 1990)]
    #[case("0090", 90)]
    #[case("90", 90)]
    #[case("2533", 2533)]
    fn test_year_parse_field(#[case] field: &str, #[case] expected: u16) {
        assert_eq!(Year::parse_field(field).unwrap().get(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("19900")]
    #[case("19a0")]
    #[case("+199")]
    #[case(" 199")]
    fn test_year_parse_field_rejects_bad_format(#[case] field: &str) {
        assert!(matches!(
            Year::parse_field(field),
            Err(FieldError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_year_parse_field_zero() {
        assert!(matches!(
            Year::parse_field("0000"),
            Err(FieldError::InvalidYear(0))
        ));
    }

    #[test]
    fn test_year_display_is_padded() {
        assert_eq!(Year::new(90).unwrap().to_string(), "0090");
        assert_eq!(Year::new(2024).unwrap().to_string(), "2024");
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(FieldError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(FieldError::InvalidMonth(13))));
    }

    #[test]
    fn test_month_parse_field() {
        assert_eq!(Month::parse_field("08").unwrap().get(), 8);
        assert_eq!(Month::parse_field("8").unwrap().get(), 8);
        assert!(matches!(
            Month::parse_field("00"),
            Err(FieldError::InvalidMonth(0))
        ));
        assert!(matches!(
            Month::parse_field("008"),
            Err(FieldError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_day_new_respects_month_length() {
        let leap = Year::new(2024).unwrap();
        let common = Year::new(2023).unwrap();
        let feb = Month::new(2).unwrap();
        let apr = Month::new(4).unwrap();

        assert!(Day::new(29, leap, feb).is_ok());
        assert!(Day::new(29, common, feb).is_err());
        assert!(Day::new(30, leap, apr).is_ok());
        assert!(Day::new(31, leap, apr).is_err());
    }

    #[test]
    fn test_day_new_invalid_reports_context() {
        let result = Day::new(32, Year::new(2024).unwrap(), Month::new(1).unwrap());
        assert_eq!(
            result,
            Err(FieldError::InvalidDay {
                year: 2024,
                month: 1,
                day: 32
            })
        );
    }

    #[test]
    fn test_day_parse_field() {
        let year = Year::new(1990).unwrap();
        let month = Month::new(12).unwrap();
        assert_eq!(Day::parse_field("09", year, month).unwrap().get(), 9);
        assert!(matches!(
            Day::parse_field("0", year, month),
            Err(FieldError::InvalidDay { day: 0, .. })
        ));
        assert!(matches!(
            Day::parse_field("x9", year, month),
            Err(FieldError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_field_error_display() {
        assert_eq!(
            FieldError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            FieldError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            }
            .to_string(),
            "Invalid day 29 for month 2023-02"
        );
    }

    #[rstest]
    #[case(2020, true)]
    #[case(2024, true)]
    #[case(2023, false)]
    #[case(1900, false)]
    #[case(2100, false)]
    #[case(2000, true)]
    #[case(2400, true)]
    fn test_is_leap_year(#[case] year: u16, #[case] leap: bool) {
        assert_eq!(is_leap_year(year), leap, "year {year}");
    }

    #[test]
    fn test_days_in_month_all_months() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2024, 2), 29);
    }
}
