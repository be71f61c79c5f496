/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, also the value a zeroed day or month is coerced to
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for March
pub const MARCH: u8 = 3;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Canonical date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Alternate separator accepted on input, rewritten to `DATE_SEPARATOR`
pub const ALT_SEPARATOR: char = '/';

/// Number of fields in a separated date
pub const SEPARATED_FIELDS: usize = 3;
/// Length of a packed (unseparated) date such as `YYYYMMDD`
pub const PACKED_LEN: usize = 8;

/// Zero-padded width of the year field
pub const YEAR_WIDTH: usize = 4;
/// Zero-padded width of the month and day fields
pub const MONTH_DAY_WIDTH: usize = 2;

/// Field value treated as "missing" and coerced to `MIN_DAY`
pub const ZERO_FIELD: &str = "00";

/// Years the Buddhist Era runs ahead of the Gregorian calendar
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Default number of years past the current year beyond which a year is read
/// as Buddhist Era (roughly half of `BUDDHIST_ERA_OFFSET`)
pub const DEFAULT_ERA_THRESHOLD: i32 = 272;

/// IANA name of the default timezone
pub const DEFAULT_TIMEZONE: &str = "Asia/Bangkok";

/// Prefix for environment variables read by `NormalizerConfig::from_env`
pub const ENV_PREFIX: &str = "FLEX_DATE_";
