//! Parameter validators: one pure `&str -> Result<T, RruleError>`
//! function per RRULE parameter. None of these panic — every failure mode
//! is reported through [`RruleError::InvalidValue`].

use chrono::NaiveDateTime;
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map_res, opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::pair;

use crate::error::RruleError;
use crate::frequency::Frequency;
use crate::ordinal_weekday::OrdinalWeekday;
use crate::weekday::Weekday;

fn invalid(param: &str, fragment: &str, reason: impl Into<String>) -> RruleError {
    RruleError::InvalidValue {
        param: param.to_string(),
        fragment: fragment.to_string(),
        reason: reason.into(),
    }
}

fn reject_whitespace(param: &str, value: &str) -> Result<(), RruleError> {
    if value.chars().any(char::is_whitespace) {
        return Err(invalid(param, value, "whitespace is not permitted"));
    }
    Ok(())
}

/// FREQ — must exactly match one of DAILY|WEEKLY|MONTHLY|YEARLY.
pub fn freq(value: &str) -> Result<Frequency, RruleError> {
    reject_whitespace("FREQ", value)?;

    value
        .parse::<Frequency>()
        .map_err(|reason| invalid("FREQ", value, reason))
}

fn non_negative_integer(param: &str, value: &str) -> Result<u32, RruleError> {
    reject_whitespace(param, value)?;

    all_consuming(digit1::<&str, nom::error::Error<&str>>)(value)
        .map_err(|_| invalid(param, value, "expected a non-negative decimal integer"))
        .and_then(|(_, digits)| {
            digits
                .parse::<u32>()
                .map_err(|_| invalid(param, value, "integer out of range"))
        })
}

/// INTERVAL — a non-empty decimal integer ≥ 0; 0 is accepted here and
/// normalized to 1 by the engine, per spec's documented ambiguity.
pub fn interval(value: &str) -> Result<u32, RruleError> {
    non_negative_integer("INTERVAL", value)
}

/// COUNT — a non-negative integer; 0 is accepted as the "produce nothing"
/// sentinel.
pub fn count(value: &str) -> Result<u32, RruleError> {
    non_negative_integer("COUNT", value)
}

/// UNTIL — exact pattern `YYYYMMDDTHHMMSSZ`, a real Gregorian UTC instant.
pub fn until(value: &str) -> Result<NaiveDateTime, RruleError> {
    reject_whitespace("UNTIL", value)?;

    if value.len() != 16 || !value.ends_with('Z') || value.as_bytes()[8] != b'T' {
        return Err(invalid(
            "UNTIL",
            value,
            "expected YYYYMMDDTHHMMSSZ",
        ));
    }

    NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%SZ")
        .map_err(|_| invalid("UNTIL", value, "not a real Gregorian UTC date-time"))
}

fn bounded_ranged_list(
    param: &str,
    value: &str,
    lower: i32,
    upper: i32,
) -> Result<Vec<i32>, RruleError> {
    reject_whitespace(param, value)?;

    let parser = separated_list1(
        char(','),
        map_res(
            recognize(pair(opt(nom::character::complete::one_of("+-")), digit1)),
            |item: &str| item.parse::<i32>(),
        ),
    );

    let (_, items) = all_consuming(parser)(value)
        .map_err(|_| invalid(param, value, "expected a comma-separated list of integers"))?;

    for item in &items {
        if *item == 0 {
            return Err(invalid(param, value, "0 is not a permitted ordinal"));
        }
        if *item < lower || *item > upper {
            return Err(invalid(
                param,
                value,
                format!("must be in [{lower},-1] ∪ [1,{upper}]"),
            ));
        }
    }

    Ok(items)
}

/// BYMONTHDAY — comma-separated integers in `[-31,-1] ∪ [1,31]`.
pub fn by_month_day(value: &str) -> Result<Vec<i32>, RruleError> {
    bounded_ranged_list("BYMONTHDAY", value, -31, 31)
}

/// BYMONTH — comma-separated integers in `[1,12]` (never negative).
pub fn by_month(value: &str) -> Result<Vec<i32>, RruleError> {
    reject_whitespace("BYMONTH", value)?;

    let parser = separated_list1(char(','), map_res(digit1, |item: &str| item.parse::<i32>()));
    let (_, items) = all_consuming(parser)(value)
        .map_err(|_| invalid("BYMONTH", value, "expected a comma-separated list of integers"))?;

    for item in &items {
        if *item < 1 || *item > 12 {
            return Err(invalid("BYMONTH", value, "must be in [1,12]"));
        }
    }

    Ok(items)
}

/// BYWEEKNO — comma-separated integers in `[-53,-1] ∪ [1,53]`.
pub fn by_week_no(value: &str) -> Result<Vec<i32>, RruleError> {
    bounded_ranged_list("BYWEEKNO", value, -53, 53)
}

/// BYSETPOS — comma-separated integers in `[-366,-1] ∪ [1,366]`.
pub fn by_set_pos(value: &str) -> Result<Vec<i32>, RruleError> {
    bounded_ranged_list("BYSETPOS", value, -366, 366)
}

/// BYDAY — comma-separated `[±N]WD` items; position 0 or |position| > 53
/// is rejected.
pub fn by_day(value: &str) -> Result<Vec<OrdinalWeekday>, RruleError> {
    reject_whitespace("BYDAY", value)?;

    let parser = separated_list1(char(','), OrdinalWeekday::parse);
    let (_, items) = all_consuming(parser)(value)
        .map_err(|_| invalid("BYDAY", value, "expected a comma-separated list of [+-N]WD items"))?;

    if items.is_empty() {
        return Err(invalid("BYDAY", value, "empty list is not permitted"));
    }

    for item in &items {
        if let Some(position) = item.position {
            if position == 0 || position.abs() > 53 {
                return Err(invalid(
                    "BYDAY",
                    value,
                    "ordinal position must be 0 < |N| <= 53",
                ));
            }
        }
    }

    Ok(items)
}

/// WKST — one of the seven two-letter weekday codes.
pub fn wkst(value: &str) -> Result<Weekday, RruleError> {
    reject_whitespace("WKST", value)?;

    value
        .parse::<Weekday>()
        .map_err(|reason| invalid("WKST", value, reason))
}
