//! `FREQ` values this core supports (RFC 5545 §3.3.10's `freq`, restricted
//! to the four frequencies in scope — SECONDLY/MINUTELY/HOURLY are
//! rejected, not silently accepted, per spec's sub-daily Non-goal).

use std::fmt;
use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::map;
use nom::IResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub(crate) fn parse(input: &str) -> IResult<&str, Self> {
        alt((
            map(tag("DAILY"), |_| Self::Daily),
            map(tag("WEEKLY"), |_| Self::Weekly),
            map(tag("MONTHLY"), |_| Self::Monthly),
            map(tag("YEARLY"), |_| Self::Yearly),
        ))(input)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match nom::combinator::all_consuming(Self::parse)(input) {
            Ok((_, freq)) => Ok(freq),
            Err(_) => Err(format!(
                "'{input}' is not FREQ=DAILY|WEEKLY|MONTHLY|YEARLY (HOURLY/MINUTELY/SECONDLY are out of scope)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_frequencies() {
        assert_eq!(Frequency::from_str("DAILY"), Ok(Frequency::Daily));
        assert_eq!(Frequency::from_str("WEEKLY"), Ok(Frequency::Weekly));
        assert_eq!(Frequency::from_str("MONTHLY"), Ok(Frequency::Monthly));
        assert_eq!(Frequency::from_str("YEARLY"), Ok(Frequency::Yearly));
    }

    #[test]
    fn rejects_sub_daily_and_lowercase() {
        assert!(Frequency::from_str("HOURLY").is_err());
        assert!(Frequency::from_str("daily").is_err());
    }
}
