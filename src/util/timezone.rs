use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use time::{OffsetDateTime, UtcOffset};

pub fn localized_datetime(time: OffsetDateTime, tz: Tz) -> DateTime<Tz> {
    let utc = time.to_offset(UtcOffset::UTC);
    let seconds = utc.unix_timestamp();
    let nanos: u32 = utc.nanosecond();
    let datetime_utc = DateTime::<Utc>::from_timestamp(seconds, nanos)
        .or_else(|| DateTime::<Utc>::from_timestamp(seconds, 0))
        .unwrap_or_default();
    tz.from_utc_datetime(&datetime_utc.naive_utc())
}

/// Long US-style stamp used on post cards, e.g. `October 18, 2026 at 03:04 PM`.
pub fn long_form(time: OffsetDateTime, tz: Tz) -> String {
    localized_datetime(time, tz)
        .format("%B %-d, %Y at %I:%M %p")
        .to_string()
}
