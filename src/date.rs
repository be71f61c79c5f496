use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::{consts::BUDDHIST_ERA_OFFSET, prelude::*};

/// Step used to find the first local instant of a day whose midnight falls in
/// a DST gap. Every zone in the IANA database shifts by a multiple of this.
const GAP_STEP_MINUTES: i64 = 15;
/// Largest DST gap searched past midnight, in steps.
const GAP_MAX_STEPS: i64 = 8;

/// A Gregorian date anchored at local midnight in a specific timezone.
///
/// Built fresh by every successful normalization and never mutated
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{date}")]
pub struct CalendarDate {
    date:     NaiveDate,
    midnight: DateTime<Tz>,
}

impl CalendarDate {
    /// Anchors `date` at the start of its day in `tz`.
    pub fn new(date: NaiveDate, tz: Tz) -> Self {
        Self {
            date,
            midnight: start_of_day(date, tz),
        }
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// First instant of the day in the configured timezone (normally 00:00).
    pub const fn midnight(&self) -> DateTime<Tz> {
        self.midnight
    }

    pub fn timezone(&self) -> Tz {
        self.midnight.timezone()
    }

    /// Year counted in the Buddhist Era.
    pub fn buddhist_year(&self) -> i32 {
        self.year() + BUDDHIST_ERA_OFFSET
    }

    /// Packed `YYYYMMDD` with a Buddhist Era year, the shape Thai government
    /// data exchange expects (1990-12-09 becomes `25331209`).
    pub fn to_buddhist_packed(&self) -> String {
        format!(
            "{:04}{:02}{:02}",
            self.buddhist_year(),
            self.month(),
            self.day()
        )
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Local midnight of `date`, or the first instant after it when midnight is
/// skipped by a DST transition. Ambiguous midnights resolve to the earlier one.
fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => (1..=GAP_MAX_STEPS)
            .find_map(|step| {
                tz.from_local_datetime(&(midnight + TimeDelta::minutes(step * GAP_STEP_MINUTES)))
                    .earliest()
            })
            .unwrap_or_else(|| tz.from_utc_datetime(&midnight)),
    }
}
