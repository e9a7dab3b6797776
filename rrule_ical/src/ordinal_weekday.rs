//! `weekdaynum` — a `Weekday` with an optional ordinal prefix
//! (`BYDAY=2MO`, `BYDAY=-1FR`, `BYDAY=SU`).

use std::fmt;

use nom::character::complete::one_of;
use nom::combinator::{map, map_res, opt, recognize};
use nom::sequence::pair;
use nom::IResult;
use serde::{Deserialize, Serialize};

use crate::weekday::Weekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrdinalWeekday {
    /// `None` means "every occurrence of this weekday in the enclosing
    /// period". Otherwise in `[-53, -1] ∪ [1, 53]`.
    pub position: Option<i32>,
    pub weekday: Weekday,
}

impl OrdinalWeekday {
    pub fn every(weekday: Weekday) -> Self {
        Self {
            position: None,
            weekday,
        }
    }

    fn signed_ordinal(input: &str) -> IResult<&str, i32> {
        map_res(
            recognize(pair(opt(one_of("+-")), nom::character::complete::digit1)),
            |value: &str| value.parse::<i32>(),
        )(input)
    }

    pub(crate) fn parse(input: &str) -> IResult<&str, Self> {
        map(
            pair(opt(Self::signed_ordinal), Weekday::parse),
            |(position, weekday)| Self { position, weekday },
        )(input)
    }
}

impl fmt::Display for OrdinalWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(position) = self.position {
            write!(f, "{position}{}", self.weekday)
        } else {
            write!(f, "{}", self.weekday)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(input: &str) -> OrdinalWeekday {
        nom::combinator::all_consuming(OrdinalWeekday::parse)(input)
            .unwrap()
            .1
    }

    #[test]
    fn parses_bare_weekday() {
        let parsed = parse_all("SU");
        assert_eq!(parsed.position, None);
        assert_eq!(parsed.weekday, Weekday::SU);
    }

    #[test]
    fn parses_positive_and_negative_ordinals() {
        assert_eq!(parse_all("2MO").position, Some(2));
        assert_eq!(parse_all("-1FR").position, Some(-1));
        assert_eq!(parse_all("+1SA").position, Some(1));
    }

    #[test]
    fn displays_round_trip() {
        assert_eq!(parse_all("-1SU").to_string(), "-1SU");
        assert_eq!(parse_all("SA").to_string(), "SA");
    }
}
