//! Normalize loosely formatted date strings into calendar dates.
//!
//! Accepts `YYYY-MM-DD`, `DD-MM-YYYY` (with `-` or `/`), and packed
//! `YYYYMMDD` / `DDMMYYYY`. Years implausibly far in the future are taken to
//! be Buddhist Era and converted to Gregorian.
//!
//! ```
//! let date = flex_date::normalize("2533-12-09").unwrap();
//! assert_eq!(date.to_string(), "1990-12-09");
//! assert_eq!(date.to_buddhist_packed(), "25331209");
//! ```

mod clock;
mod config;
mod consts;
mod date;
mod normalizer;
mod prelude;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, NormalizerConfig};
pub use consts::*;
pub use date::CalendarDate;
pub use normalizer::{DateNormalizer, Layout, NormalizeError};
pub use types::{Day, FieldError, Month, Year, days_in_month, is_leap_year};

/// Normalizes `input` with the default configuration (Asia/Bangkok, era
/// threshold 272) and the system clock.
///
/// # Errors
/// See [`DateNormalizer::normalize`].
pub fn normalize(input: &str) -> Result<CalendarDate, NormalizeError> {
    <DateNormalizer>::default().normalize(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_with_defaults() {
        let date = normalize("09/12/1990").unwrap();
        assert_eq!(date.to_string(), "1990-12-09");
        assert_eq!(date.timezone(), chrono_tz::Asia::Bangkok);
    }

    #[test]
    fn test_normalize_buddhist_with_system_clock() {
        // any plausible "today" puts 2533 past the pivot
        let date = normalize("25331209").unwrap();
        assert_eq!(date.to_string(), "1990-12-09");
    }

    #[test]
    fn test_normalize_errors_propagate() {
        assert!(matches!(
            normalize("1990"),
            Err(NormalizeError::UnsupportedDateLength { len: 4, .. })
        ));
    }

    #[test]
    fn test_default_normalizer_uses_default_config() {
        let normalizer = <DateNormalizer>::default();
        assert_eq!(normalizer.config(), &NormalizerConfig::default());
    }
}
