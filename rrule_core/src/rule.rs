//! The `Rrule` value object: an immutable, validated aggregate of
//! every RRULE field, built either directly (§"construction") or by
//! parsing an RRULE string (`Rrule::parse`). Construction is the only
//! fallible step in the core's public API besides enumeration itself.

use std::fmt::Write as _;

use chrono::NaiveDateTime;

use serde::{Deserialize, Serialize};

use rrule_ical::{validators, Frequency, OrdinalWeekday, RruleError, RruleWarning, Weekday};

/// Mutually exclusive termination signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    Count(u32),
    Until(NaiveDateTime),
    /// Neither COUNT nor UNTIL was given — enumeration is open-ended and
    /// the caller must supply their own bound.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rrule {
    pub freq: Frequency,
    pub interval: u32,
    pub termination: Termination,
    pub by_day: Option<Vec<OrdinalWeekday>>,
    pub by_month_day: Option<Vec<i32>>,
    pub by_month: Option<Vec<i32>>,
    pub by_week_no: Option<Vec<i32>>,
    pub by_set_pos: Option<Vec<i32>>,
    pub wkst: Weekday,
}

/// Accumulates raw, per-field-validated values before the cross-field
/// invariants are checked. Mirrors the shape of a tokenized RRULE: every
/// setter matches one recognized parameter name.
#[derive(Debug, Clone, Default)]
pub struct RruleBuilder {
    freq: Option<Frequency>,
    interval: Option<u32>,
    count: Option<u32>,
    until: Option<NaiveDateTime>,
    by_day: Option<Vec<OrdinalWeekday>>,
    by_month_day: Option<Vec<i32>>,
    by_month: Option<Vec<i32>>,
    by_week_no: Option<Vec<i32>>,
    by_set_pos: Option<Vec<i32>>,
    wkst: Option<Weekday>,
    warnings: Vec<RruleWarning>,
}

impl RruleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn freq(mut self, freq: Frequency) -> Self {
        self.freq = Some(freq);
        self
    }

    pub fn interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn until(mut self, until: NaiveDateTime) -> Self {
        self.until = Some(until);
        self
    }

    pub fn by_day(mut self, by_day: Vec<OrdinalWeekday>) -> Self {
        self.by_day = Some(by_day);
        self
    }

    pub fn by_month_day(mut self, by_month_day: Vec<i32>) -> Self {
        self.by_month_day = Some(by_month_day);
        self
    }

    pub fn by_month(mut self, by_month: Vec<i32>) -> Self {
        self.by_month = Some(by_month);
        self
    }

    pub fn by_week_no(mut self, by_week_no: Vec<i32>) -> Self {
        self.by_week_no = Some(by_week_no);
        self
    }

    pub fn by_set_pos(mut self, by_set_pos: Vec<i32>) -> Self {
        self.by_set_pos = Some(by_set_pos);
        self
    }

    pub fn wkst(mut self, wkst: Weekday) -> Self {
        self.wkst = Some(wkst);
        self
    }

    /// Applies the RRULE tokens from an RRULE string's `(NAME, VALUE)`
    /// pairs, validating each one, then builds the rule. Unknown parameter
    /// names are soft-ignored: the engine never consults them, but each one
    /// is recorded in `self.warnings` for `Rrule::parse_with_warnings` to
    /// surface.
    pub fn apply_tokens(mut self, tokens: &[(String, String)]) -> Result<Self, RruleError> {
        for (name, value) in tokens {
            self = match name.as_str() {
                "FREQ" => self.freq(validators::freq(value)?),
                "INTERVAL" => self.interval(validators::interval(value)?),
                "COUNT" => self.count(validators::count(value)?),
                "UNTIL" => self.until(validators::until(value)?),
                "BYDAY" => self.by_day(validators::by_day(value)?),
                "BYMONTHDAY" => self.by_month_day(validators::by_month_day(value)?),
                "BYMONTH" => self.by_month(validators::by_month(value)?),
                "BYWEEKNO" => self.by_week_no(validators::by_week_no(value)?),
                "BYSETPOS" => self.by_set_pos(validators::by_set_pos(value)?),
                "WKST" => self.wkst(validators::wkst(value)?),
                _ => {
                    self.warnings.push(RruleWarning { param: name.clone() });
                    self
                }
            };
        }

        Ok(self)
    }

    /// Checks the cross-field invariants and freezes the result into an
    /// immutable `Rrule`, discarding any unknown-parameter warnings
    /// collected by `apply_tokens`. Use `build_with_warnings` to see them.
    pub fn build(self) -> Result<Rrule, RruleError> {
        self.build_with_warnings().map(|(rrule, _)| rrule)
    }

    /// Checks the cross-field invariants and freezes the result into an
    /// immutable `Rrule`, alongside every unknown-parameter warning
    /// `apply_tokens` collected along the way.
    pub fn build_with_warnings(self) -> Result<(Rrule, Vec<RruleWarning>), RruleError> {
        let warnings = self.warnings.clone();
        let freq = self.freq.ok_or_else(|| RruleError::InvalidCombination {
            reason: String::from("FREQ is required"),
        })?;

        if self.count.is_some() && self.until.is_some() {
            return Err(RruleError::InvalidCombination {
                reason: String::from("COUNT and UNTIL are mutually exclusive"),
            });
        }

        if self.by_week_no.is_some() && freq != Frequency::Yearly {
            return Err(RruleError::InvalidCombination {
                reason: String::from("BYWEEKNO is only permitted with FREQ=YEARLY"),
            });
        }

        if self.by_month_day.is_some()
            && !matches!(freq, Frequency::Monthly | Frequency::Yearly)
        {
            return Err(RruleError::InvalidCombination {
                reason: String::from("BYMONTHDAY is only permitted with FREQ=MONTHLY or FREQ=YEARLY"),
            });
        }

        if self.by_month.is_some() && freq != Frequency::Yearly {
            return Err(RruleError::InvalidCombination {
                reason: String::from("BYMONTH is only permitted with FREQ=YEARLY"),
            });
        }

        if self.by_set_pos.is_some()
            && self.by_day.is_none()
            && self.by_month_day.is_none()
            && self.by_month.is_none()
            && self.by_week_no.is_none()
        {
            return Err(RruleError::InvalidCombination {
                reason: String::from("BYSETPOS requires at least one other BY* field"),
            });
        }

        // §9's open question 3: full RFC 5545 ordinal-within-year BYDAY
        // semantics ("20MO" = 20th Monday of the year) are out of scope;
        // reject ordinal BYDAY items with YEARLY unless BYWEEKNO/BYMONTH
        // narrows the period back down to month-like granularity.
        if freq == Frequency::Yearly {
            if let Some(by_day) = &self.by_day {
                let ordinal_without_month_scope =
                    by_day.iter().any(|item| item.position.is_some())
                        && self.by_month.is_none()
                        && self.by_week_no.is_none();

                if ordinal_without_month_scope {
                    return Err(RruleError::InvalidCombination {
                        reason: String::from(
                            "ordinal BYDAY with bare FREQ=YEARLY (year-wide ordinal semantics) is not supported",
                        ),
                    });
                }
            }
        }

        let interval = self.interval.unwrap_or(1).max(1);

        let termination = match (self.count, self.until) {
            (Some(count), None) => Termination::Count(count),
            (None, Some(until)) => Termination::Until(until),
            (None, None) => Termination::None,
            (Some(_), Some(_)) => unreachable!("checked above"),
        };

        Ok((
            Rrule {
                freq,
                interval,
                termination,
                by_day: self.by_day,
                by_month_day: self.by_month_day,
                by_month: self.by_month,
                by_week_no: self.by_week_no,
                by_set_pos: self.by_set_pos,
                wkst: self.wkst.unwrap_or(Weekday::MO),
            },
            warnings,
        ))
    }
}

impl Rrule {
    /// Tokenizes and validates `input` and assembles it into a validated
    /// `Rrule`. Unrecognized parameters are silently ignored; use
    /// `parse_with_warnings` to see them.
    pub fn parse(input: &str) -> Result<Self, RruleError> {
        Self::parse_with_warnings(input).map(|(rrule, _)| rrule)
    }

    /// As `parse`, but also returns one `RruleWarning` per unrecognized
    /// parameter name encountered (forward-compatibility, per RRULE's
    /// extensibility story — the engine never consults them either way).
    pub fn parse_with_warnings(input: &str) -> Result<(Self, Vec<RruleWarning>), RruleError> {
        let tokens = rrule_ical::tokenizer::tokenize(input)?;

        RruleBuilder::new()
            .apply_tokens(&tokens)?
            .build_with_warnings()
    }

    /// Serializes to the canonical RRULE string: parameters in the order
    /// FREQ, INTERVAL, COUNT, UNTIL, BYDAY, BYMONTHDAY, BYMONTH, BYWEEKNO,
    /// BYSETPOS, WKST. `parse(rule.to_rrule_string())` is guaranteed to
    /// produce an equal `Rrule`.
    pub fn to_rrule_string(&self) -> String {
        let mut out = format!("FREQ={}", self.freq);

        if self.interval != 1 {
            let _ = write!(out, ";INTERVAL={}", self.interval);
        }

        match &self.termination {
            Termination::Count(count) => {
                let _ = write!(out, ";COUNT={count}");
            }
            Termination::Until(until) => {
                let _ = write!(out, ";UNTIL={}", until.format("%Y%m%dT%H%M%SZ"));
            }
            Termination::None => {}
        }

        if let Some(by_day) = &self.by_day {
            let rendered = by_day
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let _ = write!(out, ";BYDAY={rendered}");
        }

        if let Some(by_month_day) = &self.by_month_day {
            let _ = write!(out, ";BYMONTHDAY={}", join_ints(by_month_day));
        }

        if let Some(by_month) = &self.by_month {
            let _ = write!(out, ";BYMONTH={}", join_ints(by_month));
        }

        if let Some(by_week_no) = &self.by_week_no {
            let _ = write!(out, ";BYWEEKNO={}", join_ints(by_week_no));
        }

        if let Some(by_set_pos) = &self.by_set_pos {
            let _ = write!(out, ";BYSETPOS={}", join_ints(by_set_pos));
        }

        if self.wkst != Weekday::MO {
            let _ = write!(out, ";WKST={}", self.wkst);
        }

        out
    }
}

fn join_ints(values: &[i32]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
