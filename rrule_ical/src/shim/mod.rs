//! The iCalendar shim: a narrow surface that locates VEVENT/VTODO
//! blocks in a pre-unfolded stream of content lines and extracts just
//! enough to hand an anchor and an RRULE string to the engine — line
//! unfolding, parameter handling beyond TZID, and the rest of the document
//! model are out of scope.

pub mod component;
pub mod content_line;
pub mod datetime_value;

pub use component::{extract_components, AnchorZone, ComponentKind, ExtractedComponent};
pub use content_line::ContentLine;
pub use datetime_value::{parse_ical_date_time_value, IcalDateTimeValue};
