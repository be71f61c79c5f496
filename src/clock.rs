//! Sources of "today" for the era-correction threshold.

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// Supplies the current calendar date in a timezone.
pub trait Clock {
    /// Today's date as observed in `tz`.
    fn today(&self, tz: Tz) -> NaiveDate;

    /// Today's year as observed in `tz`.
    fn current_year(&self, tz: Tz) -> i32 {
        self.today(tz).year()
    }
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self, tz: Tz) -> NaiveDate {
        Utc::now().with_timezone(&tz).date_naive()
    }
}

/// Always reports the same date, whatever the timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self, _tz: Tz) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self, tz: Tz) -> NaiveDate {
        (**self).today(tz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_ignores_timezone() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let clock = FixedClock(date);
        assert_eq!(clock.today(chrono_tz::Asia::Bangkok), date);
        assert_eq!(clock.today(chrono_tz::UTC), date);
        assert_eq!(clock.current_year(chrono_tz::UTC), 2025);
    }

    #[test]
    fn test_system_clock_is_near_utc_today() {
        let utc_today = Utc::now().date_naive();
        let bangkok_today = SystemClock.today(chrono_tz::Asia::Bangkok);
        let delta = (bangkok_today - utc_today).num_days().abs();
        assert!(delta <= 1, "{bangkok_today} vs {utc_today}");
    }

    #[test]
    fn test_clock_by_reference() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
        let by_ref: &dyn Clock = &clock;
        assert_eq!(by_ref.current_year(chrono_tz::UTC), 1999);
    }
}
