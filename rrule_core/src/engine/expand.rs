//! Expand-then-select strategy: used whenever BYSETPOS is present. Each
//! enclosing period's full candidate set is expanded first,
//! then BYSETPOS selects specific 1-based positions from it (positive
//! counting from the start, negative from the end; out-of-range positions
//! are silently discarded).

use std::collections::VecDeque;

use chrono::{Datelike, NaiveDate};

use rrule_ical::{Frequency, Weekday};

use crate::engine::byfilters;
use crate::engine::step::{add_months, week_start};
use crate::rule::Rrule;

const MAX_EMPTY_PERIODS: u32 = 50;

/// Applies BYSETPOS to an already-sorted, deduplicated candidate list.
pub fn select_by_set_pos(candidates: &[NaiveDate], positions: &[i32]) -> Vec<NaiveDate> {
    let len = candidates.len() as i32;

    let mut selected: Vec<NaiveDate> = positions
        .iter()
        .filter_map(|&pos| {
            let index = if pos > 0 { pos - 1 } else { len + pos };
            if index < 0 || index >= len {
                None
            } else {
                Some(candidates[index as usize])
            }
        })
        .collect();

    selected.sort_unstable();
    selected.dedup();
    selected
}

enum SubPeriod {
    Month { year: i32, month: u32 },
    Week { iso_year: i32, week: u32 },
    /// A WKST-aligned week, used by `FREQ=WEEKLY`: candidates are offsets
    /// from `start` itself, never from the ISO week's Monday (those only
    /// coincide when `wkst` is MO).
    WeekFromStart { start: NaiveDate, wkst: Weekday },
    Year { year: i32 },
    /// A BYWEEKNO spec that doesn't resolve to a real week this year.
    Empty,
}

enum Kind {
    /// `FREQ=WEEKLY;BYSETPOS=...`: one sub-period per WKST-aligned week.
    Weekly {
        week_start: NaiveDate,
        step_days: i64,
    },
    /// `FREQ=MONTHLY;BYSETPOS=...`: one sub-period per month.
    Monthly {
        year: i32,
        month: u32,
        interval: i64,
    },
    /// `FREQ=YEARLY;BYSETPOS=...`: sub-periods are months when BYMONTH is
    /// given, weeks when BYWEEKNO is given, else the whole year is one
    /// sub-period.
    Yearly {
        year: i32,
        interval: i64,
        months: Option<Vec<u32>>,
        month_index: usize,
        weeks: Option<Vec<i32>>,
        week_index: usize,
    },
    /// `FREQ=DAILY;BYSETPOS=...`: degenerate one-candidate sub-period.
    Daily { cursor: NaiveDate, step_days: i64 },
}

pub struct ExpandCursor<'r> {
    rule: &'r Rrule,
    anchor_date: NaiveDate,
    kind: Kind,
    pending: VecDeque<NaiveDate>,
    first: bool,
}

impl<'r> ExpandCursor<'r> {
    pub fn new(rule: &'r Rrule, anchor_date: NaiveDate) -> Self {
        let interval = rule.interval as i64;

        let kind = match rule.freq {
            Frequency::Daily => Kind::Daily {
                cursor: anchor_date,
                step_days: interval,
            },
            Frequency::Weekly => Kind::Weekly {
                week_start: week_start(anchor_date, rule.wkst),
                step_days: 7 * interval,
            },
            Frequency::Monthly => Kind::Monthly {
                year: anchor_date.year(),
                month: anchor_date.month(),
                interval,
            },
            Frequency::Yearly => {
                let months = rule
                    .by_month
                    .as_ref()
                    .map(|months| {
                        let mut months: Vec<u32> = months.iter().map(|&m| m as u32).collect();
                        months.sort_unstable();
                        months.dedup();
                        months
                    });
                let weeks = rule.by_week_no.clone();

                Kind::Yearly {
                    year: anchor_date.year(),
                    interval,
                    months,
                    month_index: 0,
                    weeks,
                    week_index: 0,
                }
            }
        };

        Self {
            rule,
            anchor_date,
            kind,
            pending: VecDeque::new(),
            first: true,
        }
    }

    /// Pulls the next non-empty sub-period's selected candidates, or
    /// `None` once the safety bound is exceeded.
    fn refill(&mut self) -> Option<()> {
        let mut empty_streak = 0;

        loop {
            if empty_streak >= MAX_EMPTY_PERIODS {
                return None;
            }

            let Some(sub_period) = self.advance_sub_period() else {
                return None;
            };

            let mut candidates = match sub_period {
                SubPeriod::Month { year, month } => {
                    byfilters::month_candidates(self.rule, self.anchor_date.day(), year, month)
                }
                SubPeriod::Week { iso_year, week } => {
                    let anchor_weekday = crate::calendar::weekday_of(self.anchor_date);
                    byfilters::week_candidates(self.rule, anchor_weekday, iso_year, week)
                }
                SubPeriod::WeekFromStart { start, wkst } => {
                    byfilters::week_candidates_from_start(self.rule, start, wkst)
                }
                SubPeriod::Year { year } => {
                    byfilters::year_candidates(self.rule, self.anchor_date, year)
                }
                SubPeriod::Empty => Vec::new(),
            };

            if self.first {
                candidates.retain(|date| *date >= self.anchor_date);
                self.first = false;
            }

            let by_set_pos = self
                .rule
                .by_set_pos
                .as_ref()
                .expect("ExpandCursor requires BYSETPOS");
            let selected = select_by_set_pos(&candidates, by_set_pos);

            if selected.is_empty() {
                empty_streak += 1;
                continue;
            }

            self.pending = selected.into_iter().collect();
            return Some(());
        }
    }

    /// Advances internal state to the next sub-period and returns the one
    /// just consumed, or `None` if the underlying frequency cursor is
    /// exhausted (never happens for DAILY/WEEKLY/MONTHLY/YEARLY, which are
    /// unbounded, but keeps the type honest).
    fn advance_sub_period(&mut self) -> Option<SubPeriod> {
        match &mut self.kind {
            Kind::Daily { cursor, step_days } => {
                let date = *cursor;
                *cursor += chrono::Duration::days(*step_days);
                // A single-day sub-period is its own "month" of size 1 —
                // reuse Year's whole-period shape isn't applicable, so
                // express it directly as a one-candidate pseudo-period.
                Some(SubPeriod::Month {
                    year: date.year(),
                    month: date.month(),
                })
            }
            Kind::Weekly {
                week_start,
                step_days,
            } => {
                let start = *week_start;
                *week_start += chrono::Duration::days(*step_days);
                Some(SubPeriod::WeekFromStart {
                    start,
                    wkst: self.rule.wkst,
                })
            }
            Kind::Monthly {
                year,
                month,
                interval,
            } => {
                let period = SubPeriod::Month {
                    year: *year,
                    month: *month,
                };
                let (next_year, next_month) = add_months(*year, *month, *interval);
                *year = next_year;
                *month = next_month;
                Some(period)
            }
            Kind::Yearly {
                year,
                interval,
                months,
                month_index,
                weeks,
                week_index,
            } => {
                if let Some(months) = months {
                    let month = months[*month_index];
                    let current_year = *year;
                    *month_index += 1;
                    if *month_index >= months.len() {
                        *month_index = 0;
                        *year += *interval;
                    }
                    return Some(SubPeriod::Month {
                        year: current_year,
                        month,
                    });
                }

                if let Some(weeks) = weeks {
                    let spec = weeks[*week_index];
                    let current_year = *year;
                    *week_index += 1;
                    if *week_index >= weeks.len() {
                        *week_index = 0;
                        *year += *interval;
                    }
                    return match byfilters::resolve_week_no(current_year, spec) {
                        Some(week) => Some(SubPeriod::Week {
                            iso_year: current_year,
                            week,
                        }),
                        None => Some(SubPeriod::Empty),
                    };
                }

                let current_year = *year;
                *year += *interval;
                Some(SubPeriod::Year { year: current_year })
            }
        }
    }
}

impl<'r> Iterator for ExpandCursor<'r> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        loop {
            if let Some(date) = self.pending.pop_front() {
                return Some(date);
            }
            self.refill()?;
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
    fn select_by_set_pos_handles_positive_and_negative() {
        let candidates = vec![date(2025, 1, 1), date(2025, 1, 8), date(2025, 1, 15)];
        assert_eq!(
            select_by_set_pos(&candidates, &[1, -1]),
            vec![date(2025, 1, 1), date(2025, 1, 15)]
        );
    }

    #[test]
    fn select_by_set_pos_discards_out_of_range() {
        let candidates = vec![date(2025, 1, 1), date(2025, 1, 8)];
        assert!(select_by_set_pos(&candidates, &[5, -5]).is_empty());
    }

    #[test]
    fn monthly_last_weekday_via_bysetpos() {
        let rule = Rrule::parse("FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1").unwrap();
        let dates: Vec<_> = ExpandCursor::new(&rule, date(2025, 1, 1)).take(2).collect();
        assert_eq!(dates, vec![date(2025, 1, 31), date(2025, 2, 28)]);
    }

    #[test]
    fn yearly_bymonth_bysetpos_picks_first_weekday_per_selected_month() {
        let rule = Rrule::parse("FREQ=YEARLY;BYMONTH=1,7;BYDAY=MO;BYSETPOS=1").unwrap();
        let dates: Vec<_> = ExpandCursor::new(&rule, date(2025, 1, 1)).take(2).collect();
        assert_eq!(dates, vec![date(2025, 1, 6), date(2025, 7, 7)]);
    }

    #[test]
    fn weekly_bysetpos_honors_non_monday_wkst() {
        // 2025-01-05 is a Sunday; WKST=SU means this anchors the week
        // 2025-01-05..2025-01-11. Picking that week's candidates via the
        // ISO week's Monday (2024-12-30) instead of the WKST-aligned start
        // would shift every later week's selection by a day.
        let rule = Rrule::parse("FREQ=WEEKLY;BYDAY=SU,TU;BYSETPOS=1;WKST=SU").unwrap();
        let dates: Vec<_> = ExpandCursor::new(&rule, date(2025, 1, 5)).take(2).collect();
        assert_eq!(dates, vec![date(2025, 1, 5), date(2025, 1, 12)]);
    }
}
