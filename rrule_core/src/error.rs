//! Errors raised assembling a usable `(Anchor, Rrule)` pair from an
//! extracted iCalendar component — one level above `rrule_ical::RruleError`,
//! which only ever sees RRULE-string-level failures.

use std::fmt;

use rrule_ical::RruleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The RRULE string attached to a component failed tokenizing,
    /// validation, or a cross-field invariant check.
    Rrule(RruleError),
    /// A TZID parameter named a zone `chrono_tz` doesn't recognize.
    UnknownTimeZone(String),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rrule(inner) => write!(f, "{inner}"),
            Self::UnknownTimeZone(tzid) => write!(f, "unrecognized TZID '{tzid}'"),
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rrule(inner) => Some(inner),
            Self::UnknownTimeZone(_) => None,
        }
    }
}

impl From<RruleError> for RuleError {
    fn from(inner: RruleError) -> Self {
        Self::Rrule(inner)
    }
}
