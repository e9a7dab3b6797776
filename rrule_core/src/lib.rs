//! The recurrence-rule domain crate: calendar primitives, the validated
//! [`Rrule`] aggregate, the anchor date-time, and the occurrence engine
//! built on top of them.

pub mod anchor;
pub mod calendar;
pub mod engine;
pub mod error;
pub mod extraction;
pub mod rule;

pub use anchor::Anchor;
pub use engine::{enumerate, enumerate_in_range, Occurrences};
pub use error::RuleError;
pub use extraction::{resolve, ExtractedRule};
pub use rule::{Rrule, RruleBuilder, Termination};

pub use rrule_ical::{Frequency, OrdinalWeekday, RruleError, RruleWarning, Weekday};
