//! Flexible date-string normalization.
//!
//! A [`DateNormalizer`] accepts the handful of shapes dates arrive in from
//! forms and legacy exports (`YYYY-MM-DD`, `DD-MM-YYYY`, either with `/`,
//! packed `YYYYMMDD` and `DDMMYYYY`) and turns them into a [`CalendarDate`].
//! Years implausibly far in the future are read as Buddhist Era and shifted
//! back by 543 years.
//!
//! The shape is chosen once from the input's structure. A separated date that
//! fails to validate is an error; it is never retried as a packed date.

use std::ops::Range;

use chrono::NaiveDate;

use crate::{
    CalendarDate, Clock, NormalizerConfig, SystemClock,
    consts::{
        ALT_SEPARATOR, BUDDHIST_ERA_OFFSET, DATE_SEPARATOR, FEBRUARY, FEBRUARY_DAYS_LEAP, MARCH,
        MIN_DAY, PACKED_LEN, SEPARATED_FIELDS, YEAR_WIDTH, ZERO_FIELD,
    },
    prelude::*,
    types::{Day, FieldError, Month, Year},
};

/// Error type for date normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// A date containing separators did not split into exactly three fields.
    #[error("Malformed date {input:?}: expected 3 fields separated by '-' or '/', found {fields}")]
    MalformedSeparatedDate { input: String, fields: usize },

    /// The separated fields did not form a real calendar date.
    #[error("Invalid ISO date {canonical}: {source}")]
    InvalidIsoDate {
        canonical: String,
        #[source]
        source: FieldError,
    },

    /// Neither packed reading produced a real calendar date.
    #[error("Invalid packed date {input:?}: as YYYYMMDD: {year_first}; as DDMMYYYY: {day_first}")]
    InvalidPackedDate {
        input: String,
        year_first: FieldError,
        day_first: FieldError,
    },

    /// No separators and not exactly eight characters long.
    #[error("Unsupported date {input:?}: date string must be 8 or 10 characters, found {len}")]
    UnsupportedDateLength { input: String, len: usize },
}

/// Field order a date was read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Layout {
    #[display(fmt = "YYYY-MM-DD")]
    YearFirst,
    #[display(fmt = "DD-MM-YYYY")]
    DayFirst,
    #[display(fmt = "YYYYMMDD")]
    PackedYearFirst,
    #[display(fmt = "DDMMYYYY")]
    PackedDayFirst,
}

/// Byte ranges of each component inside a packed date.
struct PackedAttempt {
    layout:      Layout,
    year:        Range<usize>,
    month:       Range<usize>,
    day:         Range<usize>,
    coerce_zero: bool,
}

/// Packed readings, in priority order. Only the year-first reading repairs
/// zeroed month and day fields.
const PACKED_ATTEMPTS: [PackedAttempt; 2] = [
    PackedAttempt {
        layout:      Layout::PackedYearFirst,
        year:        0..4,
        month:       4..6,
        day:         6..8,
        coerce_zero: true,
    },
    PackedAttempt {
        layout:      Layout::PackedDayFirst,
        year:        4..8,
        month:       2..4,
        day:         0..2,
        coerce_zero: false,
    },
];

/// Raw year, month and day text pulled out of the input.
#[derive(Debug, Clone, Copy)]
struct Fields<'a> {
    year:  &'a str,
    month: &'a str,
    day:   &'a str,
}

impl<'a> Fields<'a> {
    fn separated(parts: [&'a str; SEPARATED_FIELDS]) -> (Layout, Self) {
        let [first, month, last] = parts;
        if first.len() == YEAR_WIDTH {
            (Layout::YearFirst, Self { year: first, month, day: last })
        } else {
            (Layout::DayFirst, Self { year: last, month, day: first })
        }
    }

    fn packed(input: &'a str, attempt: &PackedAttempt) -> Result<Self, FieldError> {
        let slice = |range: &Range<usize>| {
            input
                .get(range.clone())
                .ok_or_else(|| FieldError::InvalidFormat(input.to_owned()))
        };
        Ok(Self {
            year:  slice(&attempt.year)?,
            month: slice(&attempt.month)?,
            day:   slice(&attempt.day)?,
        })
    }

    /// A month or day of `00` stands for "unknown" and becomes the first.
    fn coerce_zero(self) -> Self {
        const FIRST: &str = "01";
        Self {
            month: if self.month == ZERO_FIELD { FIRST } else { self.month },
            day: if self.day == ZERO_FIELD { FIRST } else { self.day },
            ..self
        }
    }

    /// Zero-padded `YYYY-MM-DD` form, used in error reports.
    fn canonical(&self) -> String {
        format!("{:0>4}-{:0>2}-{:0>2}", self.year, self.month, self.day)
    }

    /// Validates the fields as a Gregorian date, then applies era correction.
    fn resolve(&self, era_pivot: i32) -> Result<NaiveDate, FieldError> {
        let year = Year::parse_field(self.year)?;
        let month = Month::parse_field(self.month)?;
        let day = Day::parse_field(self.day, year, month)?;
        shift_era(year, month, day, era_pivot)
    }
}

/// Moves a date whose year is past `era_pivot` from the Buddhist Era to the
/// Gregorian calendar.
///
/// The two calendars disagree on leap years, so a BE February 29 can land on
/// a common Gregorian year. It rolls forward to March 1.
fn shift_era(year: Year, month: Month, day: Day, era_pivot: i32) -> Result<NaiveDate, FieldError> {
    let mut y = i32::from(year.get());
    let (m, d) = (u32::from(month.get()), u32::from(day.get()));
    if y > era_pivot {
        tracing::debug!(year = y, era_pivot, "reading year as Buddhist Era");
        y -= BUDDHIST_ERA_OFFSET;
    }
    NaiveDate::from_ymd_opt(y, m, d)
        .or_else(|| {
            let leap_day = month.get() == FEBRUARY && day.get() == FEBRUARY_DAYS_LEAP;
            leap_day
                .then(|| NaiveDate::from_ymd_opt(y, u32::from(MARCH), u32::from(MIN_DAY)))
                .flatten()
        })
        .ok_or(FieldError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: day.get(),
        })
}

/// Turns loosely formatted date strings into [`CalendarDate`]s.
///
/// ```
/// use chrono::NaiveDate;
/// use flex_date::{DateNormalizer, FixedClock, NormalizerConfig};
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let normalizer = DateNormalizer::with_clock(NormalizerConfig::default(), FixedClock(today));
///
/// let date = normalizer.normalize("09/12/2533").unwrap();
/// assert_eq!(date.to_string(), "1990-12-09");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DateNormalizer<C = SystemClock> {
    config: NormalizerConfig,
    clock:  C,
}

impl DateNormalizer {
    /// Creates a normalizer reading "today" from the system clock.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C> DateNormalizer<C> {
    pub const fn with_clock(config: NormalizerConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub const fn config(&self) -> &NormalizerConfig {
        &self.config
    }
}

impl<C: Clock> DateNormalizer<C> {
    /// Normalizes `input` to a date at local midnight in the configured
    /// timezone.
    ///
    /// # Errors
    /// - `MalformedSeparatedDate` if a separated date lacks exactly 3 fields
    /// - `InvalidIsoDate` if separated fields do not form a valid date
    /// - `InvalidPackedDate` if an 8-character date fails both packed readings
    /// - `UnsupportedDateLength` for any other shape
    pub fn normalize(&self, input: &str) -> Result<CalendarDate, NormalizeError> {
        let trimmed = input.trim();
        let unified: String = trimmed
            .chars()
            .map(|c| if c == ALT_SEPARATOR { DATE_SEPARATOR } else { c })
            .collect();
        let era_pivot = self
            .clock
            .current_year(self.config.timezone)
            .saturating_add(self.config.era_threshold);

        let date = if unified.contains(DATE_SEPARATOR) {
            Self::normalize_separated(trimmed, &unified, era_pivot)?
        } else if unified.len() == PACKED_LEN {
            Self::normalize_packed(trimmed, era_pivot)?
        } else {
            tracing::trace!(input = trimmed, len = unified.len(), "unsupported date shape");
            return Err(NormalizeError::UnsupportedDateLength {
                input: trimmed.to_owned(),
                len:   unified.len(),
            });
        };

        Ok(CalendarDate::new(date, self.config.timezone))
    }

    fn normalize_separated(
        input: &str,
        unified: &str,
        era_pivot: i32,
    ) -> Result<NaiveDate, NormalizeError> {
        let parts: Vec<&str> = unified.split(DATE_SEPARATOR).collect();
        let parts: [&str; SEPARATED_FIELDS] =
            parts
                .try_into()
                .map_err(|parts: Vec<&str>| NormalizeError::MalformedSeparatedDate {
                    input:  input.to_owned(),
                    fields: parts.len(),
                })?;

        let (layout, fields) = Fields::separated(parts);
        let fields = fields.coerce_zero();
        match fields.resolve(era_pivot) {
            Ok(date) => {
                tracing::debug!(input, %layout, %date, "normalized date");
                Ok(date)
            }
            Err(source) => {
                tracing::trace!(input, %layout, error = %source, "separated date rejected");
                Err(NormalizeError::InvalidIsoDate {
                    canonical: fields.canonical(),
                    source,
                })
            }
        }
    }

    fn normalize_packed(input: &str, era_pivot: i32) -> Result<NaiveDate, NormalizeError> {
        let [ymd, dmy] = &PACKED_ATTEMPTS;

        let year_first = match Self::try_packed(input, ymd, era_pivot) {
            Ok(date) => return Ok(date),
            Err(err) => err,
        };
        let day_first = match Self::try_packed(input, dmy, era_pivot) {
            Ok(date) => return Ok(date),
            Err(err) => err,
        };

        Err(NormalizeError::InvalidPackedDate {
            input: input.to_owned(),
            year_first,
            day_first,
        })
    }

    fn try_packed(
        input: &str,
        attempt: &PackedAttempt,
        era_pivot: i32,
    ) -> Result<NaiveDate, FieldError> {
        let layout = attempt.layout;
        let fields = Fields::packed(input, attempt)?;
        let fields = if attempt.coerce_zero { fields.coerce_zero() } else { fields };
        fields
            .resolve(era_pivot)
            .inspect(|date| tracing::debug!(input, %layout, %date, "normalized date"))
            .inspect_err(|err| tracing::trace!(input, %layout, error = %err, "packed reading rejected"))
    }
}
