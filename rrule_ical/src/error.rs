use std::fmt;

/// Structured error surfaced at the RRULE/iCalendar parsing boundary.
///
/// Every variant names the offending parameter (or cross-field rule) and the
/// offending fragment so that a caller can report a precise diagnostic
/// without the core ever handing back a stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RruleError {
    /// The RRULE value was empty.
    EmptyInput,

    /// A `;`-separated segment was not of the form `NAME=VALUE`.
    MalformedParameter { fragment: String },

    /// The same parameter name appeared more than once.
    DuplicateParameter { param: String },

    /// A parameter value failed validation for its parameter kind.
    InvalidValue {
        param: String,
        fragment: String,
        reason: String,
    },

    /// A cross-field invariant on the assembled rule was violated.
    InvalidCombination { reason: String },

    /// An anchor (DTSTART/DUE/UNTIL) date-time could not be parsed or does
    /// not name a real calendar date.
    InvalidAnchor { fragment: String, reason: String },
}

impl fmt::Display for RruleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "RRULE value is empty"),
            Self::MalformedParameter { fragment } => {
                write!(f, "malformed parameter '{fragment}', expected NAME=VALUE")
            }
            Self::DuplicateParameter { param } => {
                write!(f, "duplicate parameter '{param}'")
            }
            Self::InvalidValue {
                param,
                fragment,
                reason,
            } => write!(f, "invalid value for {param} '{fragment}': {reason}"),
            Self::InvalidCombination { reason } => write!(f, "invalid rule: {reason}"),
            Self::InvalidAnchor { fragment, reason } => {
                write!(f, "invalid anchor date-time '{fragment}': {reason}")
            }
        }
    }
}

impl std::error::Error for RruleError {}

/// A non-fatal finding surfaced alongside a successful tokenize/parse —
/// currently only unrecognized parameter names, which the engine never
/// consults (forward-compatibility, per RRULE's extensibility story).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RruleWarning {
    pub param: String,
}

impl fmt::Display for RruleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown parameter '{}' ignored", self.param)
    }
}
