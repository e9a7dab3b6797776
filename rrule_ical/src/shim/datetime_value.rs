//! Parses the DATE / DATE-TIME / UTC value syntax used by DTSTART, DUE and
//! UNTIL: `YYYYMMDD`, `YYYYMMDDTHHMMSS`, `YYYYMMDDTHHMMSSZ`.

use chrono::{NaiveDate, NaiveTime};

/// The calendar/time portion of a parsed iCalendar date value, before a
/// TZID parameter (if any) has been attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcalDateTimeValue {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub is_utc: bool,
}

/// Parses `YYYYMMDD[THHMMSS[Z]]`. Returns `None` for anything that isn't a
/// real calendar date — a malformed individual property is skipped by the
/// caller, never a hard parse failure.
pub fn parse_ical_date_time_value(value: &str) -> Option<IcalDateTimeValue> {
    let bytes = value.as_bytes();

    if value.len() < 8 || !bytes[..8].iter().all(u8::is_ascii_digit) {
        return None;
    }

    let year: i32 = value[0..4].parse().ok()?;
    let month: u32 = value[4..6].parse().ok()?;
    let day: u32 = value[6..8].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let rest = &value[8..];

    if rest.is_empty() {
        return Some(IcalDateTimeValue {
            date,
            time: None,
            is_utc: false,
        });
    }

    let Some(time_part) = rest.strip_prefix('T') else {
        return None;
    };

    let (time_digits, is_utc) = match time_part.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (time_part, false),
    };

    if time_digits.len() != 6 || !time_digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour: u32 = time_digits[0..2].parse().ok()?;
    let minute: u32 = time_digits[2..4].parse().ok()?;
    let second: u32 = time_digits[4..6].parse().ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;

    Some(IcalDateTimeValue {
        date,
        time: Some(time),
        is_utc,
    })
}
