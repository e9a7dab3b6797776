//! Calendar primitives: pure functions over naive Gregorian dates
//! that every other part of the engine depends on for correctness-critical
//! arithmetic. The engine never reaches past these into other date APIs.

use chrono::{Datelike, NaiveDate};

use rrule_ical::Weekday;

/// Gregorian leap-year rule.
pub fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap(year) {
                29
            } else {
                28
            }
        }
        _ => panic!("month out of range: {month}"),
    }
}

/// Resolves a possibly-negative day-of-month spec (`-1` = last day of the
/// month) to a concrete day, or `None` if the month has fewer than `|day|`
/// days.
pub fn resolve_month_day(year: i32, month: u32, day: i32) -> Option<u32> {
    debug_assert_ne!(day, 0);

    let length = days_in_month(year, month) as i32;

    let resolved = if day > 0 { day } else { length + day + 1 };

    if resolved < 1 || resolved > length {
        None
    } else {
        Some(resolved as u32)
    }
}

pub fn weekday_of(date: NaiveDate) -> Weekday {
    Weekday::from_chrono(date.weekday())
}

/// ISO-8601 `(iso_year, week_number)` for `date`. The ISO-week year can
/// diverge from the calendar year at the year boundary (e.g. 2024-12-31 is
/// ISO week 1 of 2025).
pub fn iso_week_of(date: NaiveDate) -> (i32, u32) {
    let iso_week = date.iso_week();
    (iso_week.year(), iso_week.week())
}

/// The Monday that starts ISO week `week` of `iso_year`.
pub fn first_monday_of_iso_week(iso_year: i32, week: u32) -> NaiveDate {
    NaiveDate::from_isoywd_opt(iso_year, week, chrono::Weekday::Mon)
        .expect("week 1..=53 is always representable for a valid ISO year")
}

/// Whether `iso_year` has a 53rd ISO week. An ISO-week year has 53 weeks
/// iff its January 1st falls on a Thursday, or on a Wednesday in a leap
/// year (equivalently: the Monday of week 53 exists and maps back to the
/// same `iso_year`).
pub fn year_has_week_53(iso_year: i32) -> bool {
    let jan1 = NaiveDate::from_ymd_opt(iso_year, 1, 1).expect("valid year");
    let jan1_weekday = jan1.weekday();

    jan1_weekday == chrono::Weekday::Thu
        || (jan1_weekday == chrono::Weekday::Wed && is_leap(iso_year))
}
