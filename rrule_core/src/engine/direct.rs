//! Direct-cursor strategy: used whenever BYSETPOS is absent. Steps one
//! enclosing period at a time and emits every candidate of that period in
//! order before advancing — there is no selection step.

use std::collections::VecDeque;

use chrono::NaiveDate;

use rrule_ical::{Frequency, Weekday};

use crate::engine::byfilters;
use crate::engine::step::{add_months, week_start};
use crate::rule::Rrule;

/// Safety bound on consecutive candidate-less periods: guards against rules
/// like `BYMONTHDAY=31` on a run of 30-day months spinning forever.
const MAX_EMPTY_PERIODS: u32 = 50;

enum Kind {
    /// No expandable BY-filter: one candidate per period, every period.
    Simple { cursor: NaiveDate, step_days: i64 },
    /// `FREQ=DAILY;BYDAY=...`: step day-by-day, keep only matching weekdays.
    DailyByDay {
        cursor: NaiveDate,
        step_days: i64,
        weekdays: Vec<Weekday>,
    },
    /// `FREQ=WEEKLY;BYDAY=...`: step week-by-week (WKST-aligned), emit
    /// every matching weekday within each week.
    WeeklyByDay {
        week_start: NaiveDate,
        step_days: i64,
        wkst: Weekday,
        pending: VecDeque<NaiveDate>,
        first: bool,
    },
    /// `FREQ=MONTHLY` with BYMONTHDAY/BYDAY, or with neither (anchor's
    /// day-of-month, skipped in months it doesn't exist).
    Monthly {
        year: i32,
        month: u32,
        interval: i64,
        anchor_day: u32,
        pending: VecDeque<NaiveDate>,
        first: bool,
    },
    /// `FREQ=YEARLY`, any combination of BYMONTH/BYMONTHDAY/BYDAY/BYWEEKNO,
    /// or none of them.
    Yearly {
        year: i32,
        interval: i64,
        pending: VecDeque<NaiveDate>,
        first: bool,
    },
}

pub struct DirectCursor<'r> {
    rule: &'r Rrule,
    anchor_date: NaiveDate,
    kind: Kind,
}

impl<'r> DirectCursor<'r> {
    pub fn new(rule: &'r Rrule, anchor_date: NaiveDate) -> Self {
        let interval = rule.interval as i64;

        let kind = match (rule.freq, &rule.by_day) {
            (Frequency::Daily, Some(by_day)) => Kind::DailyByDay {
                cursor: anchor_date,
                step_days: interval,
                weekdays: by_day.iter().map(|item| item.weekday).collect(),
            },
            (Frequency::Daily, None) => Kind::Simple {
                cursor: anchor_date,
                step_days: interval,
            },
            (Frequency::Weekly, Some(_)) => Kind::WeeklyByDay {
                week_start: week_start(anchor_date, rule.wkst),
                step_days: 7 * interval,
                wkst: rule.wkst,
                pending: VecDeque::new(),
                first: true,
            },
            (Frequency::Weekly, None) => Kind::Simple {
                cursor: anchor_date,
                step_days: 7 * interval,
            },
            (Frequency::Monthly, _) => Kind::Monthly {
                year: anchor_date_year(anchor_date),
                month: anchor_date_month(anchor_date),
                interval,
                anchor_day: anchor_date_day(anchor_date),
                pending: VecDeque::new(),
                first: true,
            },
            (Frequency::Yearly, _) => Kind::Yearly {
                year: anchor_date_year(anchor_date),
                interval,
                pending: VecDeque::new(),
                first: true,
            },
        };

        Self {
            rule,
            anchor_date,
            kind,
        }
    }
}

fn anchor_date_year(date: NaiveDate) -> i32 {
    use chrono::Datelike;
    date.year()
}

fn anchor_date_month(date: NaiveDate) -> u32 {
    use chrono::Datelike;
    date.month()
}

fn anchor_date_day(date: NaiveDate) -> u32 {
    use chrono::Datelike;
    date.day()
}

impl<'r> Iterator for DirectCursor<'r> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        match &mut self.kind {
            Kind::Simple { cursor, step_days } => {
                let date = *cursor;
                *cursor += chrono::Duration::days(*step_days);
                Some(date)
            }
            Kind::DailyByDay {
                cursor,
                step_days,
                weekdays,
            } => {
                for _ in 0..MAX_EMPTY_PERIODS {
                    let candidate = *cursor;
                    *cursor += chrono::Duration::days(*step_days);
                    if weekdays
                        .iter()
                        .any(|weekday| *weekday == crate::calendar::weekday_of(candidate))
                    {
                        return Some(candidate);
                    }
                }
                None
            }
            Kind::WeeklyByDay {
                week_start,
                step_days,
                wkst,
                pending,
                first,
            } => {
                let mut empty_streak = 0;
                loop {
                    if let Some(date) = pending.pop_front() {
                        return Some(date);
                    }
                    if empty_streak >= MAX_EMPTY_PERIODS {
                        return None;
                    }

                    let mut candidates =
                        byfilters::week_candidates_from_start(self.rule, *week_start, *wkst);

                    if *first {
                        candidates.retain(|date| *date >= self.anchor_date);
                        *first = false;
                    }

                    *week_start += chrono::Duration::days(*step_days);

                    if candidates.is_empty() {
                        empty_streak += 1;
                        continue;
                    }

                    *pending = candidates.into_iter().collect();
                }
            }
            Kind::Monthly {
                year,
                month,
                interval,
                anchor_day,
                pending,
                first,
            } => {
                let mut empty_streak = 0;
                loop {
                    if let Some(date) = pending.pop_front() {
                        return Some(date);
                    }
                    if empty_streak >= MAX_EMPTY_PERIODS {
                        return None;
                    }

                    let mut candidates =
                        byfilters::month_candidates(self.rule, *anchor_day, *year, *month);

                    if *first {
                        candidates.retain(|date| *date >= self.anchor_date);
                        *first = false;
                    }

                    let (next_year, next_month) = add_months(*year, *month, *interval);
                    *year = next_year;
                    *month = next_month;

                    if candidates.is_empty() {
                        empty_streak += 1;
                        continue;
                    }

                    *pending = candidates.into_iter().collect();
                }
            }
            Kind::Yearly {
                year,
                interval,
                pending,
                first,
            } => {
                let mut empty_streak = 0;
                loop {
                    if let Some(date) = pending.pop_front() {
                        return Some(date);
                    }
                    if empty_streak >= MAX_EMPTY_PERIODS {
                        return None;
                    }

                    let mut candidates =
                        byfilters::year_candidates(self.rule, self.anchor_date, *year);

                    if *first {
                        candidates.retain(|date| *date >= self.anchor_date);
                        *first = false;
                    }

                    *year += *interval;

                    if candidates.is_empty() {
                        empty_streak += 1;
                        continue;
                    }

                    *pending = candidates.into_iter().collect();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rrule;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn simple_daily_steps_by_interval() {
        let rule = Rrule::parse("FREQ=DAILY;INTERVAL=3;COUNT=3").unwrap();
        let dates: Vec<_> = DirectCursor::new(&rule, date(2025, 1, 1)).take(3).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 1), date(2025, 1, 4), date(2025, 1, 7)]
        );
    }

    #[test]
    fn weekly_by_day_emits_in_week_order_respecting_wkst() {
        let rule = Rrule::parse("FREQ=WEEKLY;BYDAY=MO,WE,FR").unwrap();
        // 2025-06-04 is a Wednesday.
        let dates: Vec<_> = DirectCursor::new(&rule, date(2025, 6, 4)).take(4).collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 6, 4),
                date(2025, 6, 6),
                date(2025, 6, 9),
                date(2025, 6, 11),
            ]
        );
    }

    #[test]
    fn monthly_by_month_day_skips_months_without_that_day() {
        let rule = Rrule::parse("FREQ=MONTHLY;BYMONTHDAY=31").unwrap();
        let dates: Vec<_> = DirectCursor::new(&rule, date(2025, 1, 31)).take(3).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 31), date(2025, 3, 31), date(2025, 5, 31)]
        );
    }

    #[test]
    fn yearly_leap_day_anchor_only_fires_on_leap_years() {
        let rule = Rrule::parse("FREQ=YEARLY").unwrap();
        let dates: Vec<_> = DirectCursor::new(&rule, date(2024, 2, 29)).take(2).collect();
        assert_eq!(dates, vec![date(2024, 2, 29), date(2028, 2, 29)]);
    }

    #[test]
    fn monthly_by_day_last_weekday_of_month() {
        let rule = Rrule::parse("FREQ=MONTHLY;BYDAY=-1FR").unwrap();
        let dates: Vec<_> = DirectCursor::new(&rule, date(2024, 1, 1)).take(2).collect();
        assert_eq!(dates, vec![date(2024, 1, 26), date(2024, 2, 23)]);
    }
}
