//! The seven RRULE weekday codes (`weekday` in RFC 5545 §3.3.10).

use std::fmt;
use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::map;
use nom::IResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    MO,
    TU,
    WE,
    TH,
    FR,
    SA,
    SU,
}

impl Weekday {
    /// Canonical ISO-8601 index, Monday = 1 .. Sunday = 7.
    pub fn iso_index(self) -> u8 {
        match self {
            Self::MO => 1,
            Self::TU => 2,
            Self::WE => 3,
            Self::TH => 4,
            Self::FR => 5,
            Self::SA => 6,
            Self::SU => 7,
        }
    }

    pub fn from_iso_index(index: u8) -> Self {
        match ((index - 1) % 7) + 1 {
            1 => Self::MO,
            2 => Self::TU,
            3 => Self::WE,
            4 => Self::TH,
            5 => Self::FR,
            6 => Self::SA,
            _ => Self::SU,
        }
    }

    pub fn from_chrono(weekday: chrono::Weekday) -> Self {
        Self::from_iso_index(weekday.number_from_monday() as u8)
    }

    pub(crate) fn parse(input: &str) -> IResult<&str, Self> {
        alt((
            map(tag("MO"), |_| Self::MO),
            map(tag("TU"), |_| Self::TU),
            map(tag("WE"), |_| Self::WE),
            map(tag("TH"), |_| Self::TH),
            map(tag("FR"), |_| Self::FR),
            map(tag("SA"), |_| Self::SA),
            map(tag("SU"), |_| Self::SU),
        ))(input)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::MO => "MO",
            Self::TU => "TU",
            Self::WE => "WE",
            Self::TH => "TH",
            Self::FR => "FR",
            Self::SA => "SA",
            Self::SU => "SU",
        };
        write!(f, "{code}")
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match nom::combinator::all_consuming(Self::parse)(input) {
            Ok((_, weekday)) => Ok(weekday),
            Err(_) => Err(format!("'{input}' is not a valid weekday code")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_code() {
        for code in ["MO", "TU", "WE", "TH", "FR", "SA", "SU"] {
            let parsed = Weekday::from_str(code).unwrap();
            assert_eq!(parsed.to_string(), code);
        }
    }

    #[test]
    fn rejects_lowercase() {
        assert!(Weekday::from_str("mo").is_err());
    }

    #[test]
    fn iso_index_is_monday_based() {
        assert_eq!(Weekday::MO.iso_index(), 1);
        assert_eq!(Weekday::SU.iso_index(), 7);
    }
}
