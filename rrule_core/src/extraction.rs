//! Bridges the iCalendar shim's [`ExtractedComponent`] to this crate's own
//! [`Anchor`]/[`Rrule`] types — resolving the shim's string TZID against
//! `chrono_tz`'s zone table and parsing the attached RRULE string, if any.

use std::str::FromStr;

use chrono_tz::Tz;

use rrule_ical::shim::{AnchorZone, ExtractedComponent};

use crate::anchor::Anchor;
use crate::error::RuleError;
use crate::rule::Rrule;

/// The anchor date-time plus the rule recurring from it, if the component
/// carried an RRULE. A component with no RRULE is a one-off occurrence; its
/// anchor alone is still meaningful to callers that only need the event's
/// start.
pub struct ExtractedRule {
    pub anchor: Anchor,
    pub rrule: Option<Rrule>,
}

/// Assembles `component`'s anchor and, if present, its parsed RRULE.
pub fn resolve(component: &ExtractedComponent) -> Result<ExtractedRule, RuleError> {
    let anchor = resolve_anchor(component)?;
    let rrule = component
        .rrule
        .as_deref()
        .map(Rrule::parse)
        .transpose()?;

    Ok(ExtractedRule { anchor, rrule })
}

fn resolve_anchor(component: &ExtractedComponent) -> Result<Anchor, RuleError> {
    let date = component.anchor_date_time.date;
    let time = component
        .anchor_date_time
        .time
        .unwrap_or_else(|| chrono::NaiveTime::from_hms_opt(0, 0, 0).expect("midnight is valid"));
    let naive = date.and_time(time);

    match &component.zone {
        AnchorZone::Utc => Ok(Anchor::utc(naive)),
        AnchorZone::Floating => Ok(Anchor::floating(naive)),
        AnchorZone::Named(tzid) => Tz::from_str(tzid)
            .map(|tz| Anchor::zoned(naive, tz))
            .map_err(|_| RuleError::UnknownTimeZone(tzid.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rrule_ical::shim::{extract_components, ComponentKind};

    #[test]
    fn resolves_utc_anchor_and_rrule() {
        let ical = [
            "BEGIN:VEVENT",
            "DTSTART:19970902T090000Z",
            "RRULE:FREQ=DAILY;COUNT=5",
            "END:VEVENT",
        ];
        let component = &extract_components(ical)[0];

        let resolved = resolve(component).unwrap();
        assert!(matches!(resolved.anchor, Anchor::Utc(_)));
        assert_eq!(resolved.rrule.unwrap().freq, rrule_ical::Frequency::Daily);
    }

    #[test]
    fn resolves_named_zone() {
        let ical = [
            "BEGIN:VEVENT",
            "DTSTART;TZID=America/New_York:19970902T090000",
            "END:VEVENT",
        ];
        let component = &extract_components(ical)[0];

        let resolved = resolve(component).unwrap();
        assert!(matches!(resolved.anchor, Anchor::Zoned(_, tz) if tz == chrono_tz::America::New_York));
        assert!(resolved.rrule.is_none());
    }

    #[test]
    fn rejects_unknown_timezone() {
        let ical = [
            "BEGIN:VEVENT",
            "DTSTART;TZID=Not/AZone:19970902T090000",
            "END:VEVENT",
        ];
        let component = &extract_components(ical)[0];

        assert!(matches!(
            resolve(component),
            Err(RuleError::UnknownTimeZone(_))
        ));
    }

    #[test]
    fn date_only_anchor_defaults_to_midnight() {
        let ical = ["BEGIN:VTODO", "DUE:19970902", "END:VTODO"];
        let component = &extract_components(ical)[0];
        assert_eq!(component.kind, ComponentKind::VTodo);

        let resolved = resolve(component).unwrap();
        assert_eq!(resolved.anchor.time_of_day(), chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }
}
