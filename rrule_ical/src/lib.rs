//! Text-level parsing for RRULE values and the iCalendar shim that locates
//! them: the tokenizer, the per-parameter validators, and the VEVENT/VTODO
//! anchor extraction. Pure string-in, typed-value-out — no engine state,
//! no calendar arithmetic beyond what validation needs.

pub mod error;
pub mod frequency;
pub mod ordinal_weekday;
pub mod shim;
pub mod tokenizer;
pub mod validators;
pub mod weekday;

pub use error::{RruleError, RruleWarning};
pub use frequency::Frequency;
pub use ordinal_weekday::OrdinalWeekday;
pub use weekday::Weekday;
