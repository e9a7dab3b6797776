//! RRULE tokenizer.
//!
//! Splits an RRULE value into an ordered list of `(NAME, VALUE)` pairs over
//! `;` separators, rejecting duplicate parameter names. Unknown parameter
//! names are accepted here (they're only rejected, as warnings, once the
//! caller decides whether it recognizes them) so that forward-compatible
//! parameters never block a parse.

use std::collections::HashSet;

use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::combinator::all_consuming;
use nom::sequence::separated_pair;
use nom::IResult;

use crate::error::RruleError;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// `NAME=VALUE`, where `NAME` is non-empty and `VALUE` may be empty (an
/// empty value is still a well-formed segment — whether it's acceptable is
/// the validator's call, not the tokenizer's).
fn name_value_pair(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_while1(is_name_char), char('='), nom::combinator::rest)(input)
}

fn parse_segment(segment: &str) -> Result<(String, String), RruleError> {
    match all_consuming(name_value_pair)(segment) {
        Ok((_, (name, value))) => Ok((name.to_ascii_uppercase(), value.to_string())),
        Err(_) => Err(RruleError::MalformedParameter {
            fragment: segment.to_string(),
        }),
    }
}

/// Tokenize a single-line RRULE value into ordered `(NAME, VALUE)` pairs.
pub fn tokenize(input: &str) -> Result<Vec<(String, String)>, RruleError> {
    if input.is_empty() {
        return Err(RruleError::EmptyInput);
    }

    let mut seen = HashSet::new();
    let mut pairs = Vec::new();

    for segment in input.split(';') {
        if segment.is_empty() {
            return Err(RruleError::MalformedParameter {
                fragment: segment.to_string(),
            });
        }

        let (name, value) = parse_segment(segment)?;

        if !seen.insert(name.clone()) {
            return Err(RruleError::DuplicateParameter { param: name });
        }

        pairs.push((name, value));
    }

    Ok(pairs)
}
