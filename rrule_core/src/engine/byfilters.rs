//! Shared BY-filter expansion: given a calendar period (a day, a month, an
//! ISO week, a year), compute every candidate date that satisfies the
//! expandable BY-filters (everything except BYSETPOS). Both the
//! direct-cursor strategy (which emits every candidate of a period before
//! advancing) and the expand-then-select strategy (which additionally
//! ranks and picks by BYSETPOS) are built on these.

use chrono::{Datelike, NaiveDate};

use rrule_ical::{OrdinalWeekday, Weekday};

use crate::calendar;
use crate::rule::Rrule;

fn sorted_dedup(mut values: Vec<u32>) -> Vec<u32> {
    values.sort_unstable();
    values.dedup();
    values
}

fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, position: i32) -> Option<NaiveDate> {
    debug_assert_ne!(position, 0);

    let days_in_month = calendar::days_in_month(year, month);
    let matches: Vec<u32> = (1..=days_in_month)
        .filter(|&day| {
            calendar::weekday_of(NaiveDate::from_ymd_opt(year, month, day).expect("valid day"))
                == weekday
        })
        .collect();

    let index = if position > 0 {
        (position - 1) as usize
    } else {
        matches.len().checked_sub((-position) as usize)?
    };

    matches.get(index).copied().and_then(|day| NaiveDate::from_ymd_opt(year, month, day))
}

fn weekday_matches_in_month(by_day: &[OrdinalWeekday], year: i32, month: u32) -> Vec<NaiveDate> {
    let days_in_month = calendar::days_in_month(year, month);
    let mut dates = Vec::new();

    for item in by_day {
        match item.position {
            None => {
                for day in 1..=days_in_month {
                    let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid day");
                    if calendar::weekday_of(date) == item.weekday {
                        dates.push(date);
                    }
                }
            }
            Some(position) => {
                if let Some(date) = nth_weekday_of_month(year, month, item.weekday, position) {
                    dates.push(date);
                }
            }
        }
    }

    dates
}

/// Candidate dates within a single `(year, month)`, applying whichever of
/// BYMONTHDAY/BYDAY is present, or falling back to the anchor's
/// day-of-month when neither is (the "YEARLY + BYMONTH" case where the day
/// is implied by DTSTART).
pub fn month_candidates(rule: &Rrule, anchor_day: u32, year: i32, month: u32) -> Vec<NaiveDate> {
    let mut dates = if let Some(by_month_day) = &rule.by_month_day {
        by_month_day
            .iter()
            .filter_map(|&spec| {
                calendar::resolve_month_day(year, month, spec)
                    .and_then(|day| NaiveDate::from_ymd_opt(year, month, day))
            })
            .collect::<Vec<_>>()
    } else if let Some(by_day) = &rule.by_day {
        weekday_matches_in_month(by_day, year, month)
    } else {
        match calendar::resolve_month_day(year, month, anchor_day as i32) {
            Some(day) => NaiveDate::from_ymd_opt(year, month, day).into_iter().collect(),
            None => Vec::new(),
        }
    };

    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Resolves a possibly-negative BYWEEKNO spec to a concrete ISO week
/// number for `iso_year`, or `None` if that week doesn't exist in this
/// year (e.g. `-1` or `53` in a 52-week year).
pub fn resolve_week_no(iso_year: i32, spec: i32) -> Option<u32> {
    let max_week: i32 = if calendar::year_has_week_53(iso_year) {
        53
    } else {
        52
    };

    let week = if spec > 0 { spec } else { max_week + spec + 1 };

    if week < 1 || week > max_week {
        None
    } else {
        Some(week as u32)
    }
}

/// Candidate dates within a single ISO week, one per matching weekday
/// (BYDAY's weekdays if given, else the anchor's own weekday — the
/// "YEARLY + BYWEEKNO" case).
pub fn week_candidates(rule: &Rrule, anchor_weekday: Weekday, iso_year: i32, week: u32) -> Vec<NaiveDate> {
    let Some(monday) = checked_monday_of_iso_week(iso_year, week) else {
        return Vec::new();
    };

    let weekdays: Vec<Weekday> = match &rule.by_day {
        Some(by_day) => by_day.iter().map(|item| item.weekday).collect(),
        None => vec![anchor_weekday],
    };

    let mut dates: Vec<NaiveDate> = weekdays
        .iter()
        .map(|weekday| monday + chrono::Duration::days(weekday.iso_index() as i64 - 1))
        .collect();

    dates.sort_unstable();
    dates.dedup();
    dates
}

fn checked_monday_of_iso_week(iso_year: i32, week: u32) -> Option<NaiveDate> {
    if week == 53 && !calendar::year_has_week_53(iso_year) {
        return None;
    }
    Some(calendar::first_monday_of_iso_week(iso_year, week))
}

/// Candidate dates within a single WKST-aligned week starting on
/// `week_start`, one per BYDAY weekday, offset from `week_start` by however
/// many days that weekday falls after `wkst` — never via the ISO week's
/// Monday, which only coincides with `week_start` when `wkst` is MO.
pub fn week_candidates_from_start(rule: &Rrule, week_start: NaiveDate, wkst: Weekday) -> Vec<NaiveDate> {
    let by_day = rule.by_day.as_ref().expect("FREQ=WEEKLY requires BYDAY here");

    let mut dates: Vec<NaiveDate> = by_day
        .iter()
        .map(|item| {
            let offset = (item.weekday.iso_index() as i64 - wkst.iso_index() as i64).rem_euclid(7);
            week_start + chrono::Duration::days(offset)
        })
        .collect();

    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Every candidate date in `year` satisfying the rule's expandable
/// BY-filters (BYWEEKNO takes precedence, as its own period shape; then
/// BYMONTH / BYMONTHDAY / BYDAY, falling back to the anchor's month when
/// BYMONTH is absent).
pub fn year_candidates(rule: &Rrule, anchor_date: NaiveDate, year: i32) -> Vec<NaiveDate> {
    let anchor_weekday = calendar::weekday_of(anchor_date);

    if let Some(by_week_no) = &rule.by_week_no {
        let mut dates = Vec::new();

        for &spec in by_week_no {
            if let Some(week) = resolve_week_no(year, spec) {
                dates.extend(week_candidates(rule, anchor_weekday, year, week));
            }
        }

        dates.sort_unstable();
        dates.dedup();
        return dates;
    }

    let months: Vec<u32> = if let Some(by_month) = &rule.by_month {
        sorted_dedup(by_month.iter().map(|&m| m as u32).collect())
    } else if rule.by_day.is_some() && rule.by_month_day.is_none() {
        (1..=12).collect()
    } else {
        vec![anchor_date.month()]
    };

    let mut dates = Vec::new();
    for month in months {
        dates.extend(month_candidates(rule, anchor_date.day(), year, month));
    }

    dates.sort_unstable();
    dates.dedup();
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_candidates_falls_back_to_anchor_day() {
        let rule = crate::rule::Rrule::parse("FREQ=YEARLY;BYMONTH=3,6").unwrap();
        let dates = month_candidates(&rule, 29, 2024, 3);
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2024, 3, 29).unwrap()]);
    }

    #[test]
    fn month_candidates_skips_when_anchor_day_does_not_exist() {
        let rule = crate::rule::Rrule::parse("FREQ=YEARLY;BYMONTH=2").unwrap();
        let dates = month_candidates(&rule, 31, 2025, 2);
        assert!(dates.is_empty());
    }

    #[test]
    fn weekday_matches_respect_ordinal_from_end() {
        let rule = crate::rule::Rrule::parse("FREQ=MONTHLY;BYDAY=-1FR").unwrap();
        let dates = month_candidates(&rule, 1, 2024, 3);
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2024, 3, 29).unwrap()]);
    }

    #[test]
    fn resolve_week_no_handles_negative_specs() {
        assert_eq!(resolve_week_no(2020, -1), Some(53));
        assert_eq!(resolve_week_no(2021, -1), Some(52));
        assert_eq!(resolve_week_no(2021, 53), None);
    }
}
