//! `created_at` parsing.
//!
//! The backend serialises timestamps as HTTP-dates (`Sun, 18 Oct 2026 15:04:00 GMT`).
//! RFC 3339 and naive `YYYY-MM-DD HH:MM:SS` values (read as UTC) are accepted too.
//! Serialisation always emits RFC 3339.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use time::{
    OffsetDateTime, PrimitiveDateTime,
    format_description::well_known::{Rfc2822, Rfc3339},
    macros::format_description,
};

pub fn parse(value: &str) -> Option<OffsetDateTime> {
    let trimmed = value.trim();

    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(parsed);
    }

    if let Ok(parsed) = OffsetDateTime::parse(&normalize_obsolete_zone(trimmed), &Rfc2822) {
        return Some(parsed);
    }

    if let Ok(parsed) = PrimitiveDateTime::parse(
        trimmed,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Some(parsed.assume_utc());
    }

    PrimitiveDateTime::parse(
        trimmed,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .ok()
    .map(PrimitiveDateTime::assume_utc)
}

// RFC 2822 obsolete zones; `GMT` is what HTTP-dates always carry.
fn normalize_obsolete_zone(value: &str) -> Cow<'_, str> {
    match value
        .strip_suffix(" GMT")
        .or_else(|| value.strip_suffix(" UTC"))
        .or_else(|| value.strip_suffix(" UT"))
    {
        Some(head) => Cow::Owned(format!("{head} +0000")),
        None => Cow::Borrowed(value),
    }
}

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    time::serde::rfc3339::serialize(value, serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| D::Error::custom(format!("unrecognised timestamp `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_http_date() {
        let parsed = parse("Sun, 18 Oct 2026 15:04:00 GMT").expect("http date");
        assert_eq!(parsed.unix_timestamp(), 1_792_335_840);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse("2026-10-18T17:04:00+02:00").expect("rfc3339");
        assert_eq!(parsed.unix_timestamp(), 1_792_335_840);
    }

    #[test]
    fn naive_values_are_utc() {
        let spaced = parse("2026-10-18 15:04:00").expect("naive");
        let tee = parse("2026-10-18T15:04:00").expect("naive T");
        assert_eq!(spaced.unix_timestamp(), 1_792_335_840);
        assert_eq!(spaced, tee);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_none());
    }
}
