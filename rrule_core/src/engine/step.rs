//! Calendar-period stepping shared by both enumeration strategies.

use chrono::NaiveDate;

use rrule_ical::Weekday;

/// `(year, month)` shifted by `delta` months, wrapping the year as needed.
/// Never touches day-of-month — callers resolve that separately so a
/// nonexistent day (Feb 31) is skipped rather than rolled into March.
pub fn add_months(year: i32, month: u32, delta: i64) -> (i32, u32) {
    let zero_based = (month as i64 - 1) + delta;
    let year_delta = zero_based.div_euclid(12);
    let month0 = zero_based.rem_euclid(12);
    (year + year_delta as i32, (month0 + 1) as u32)
}

/// The first day of the WKST-aligned week containing `date`.
pub fn week_start(date: NaiveDate, wkst: Weekday) -> NaiveDate {
    let date_iso = crate::calendar::weekday_of(date).iso_index() as i64;
    let wkst_iso = wkst.iso_index() as i64;
    let diff = (date_iso - wkst_iso).rem_euclid(7);
    date - chrono::Duration::days(diff)
}
