use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in `canonical_timezone`, or `None` if the timezone is not known.
pub fn local_today(canonical_timezone: &str) -> Option<Date> {
    get_local_offset(canonical_timezone)
        .map(|offset| OffsetDateTime::now_utc().to_offset(offset).date())
}
