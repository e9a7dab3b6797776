//! Component-envelope tracking: walks `BEGIN:X` / `END:X` nesting and
//! extracts the anchor date-time, its timezone, and the RRULE string for
//! each VEVENT/VTODO found. Everything else — VALARM, VTIMEZONE, VJOURNAL,
//! the calendar wrapper itself — is tracked for nesting only and ignored.

use super::content_line::ContentLine;
use super::datetime_value::{parse_ical_date_time_value, IcalDateTimeValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    VEvent,
    VTodo,
}

/// The anchor's attached timezone, as extracted from the raw property
/// value: a trailing `Z` marks UTC, a TZID parameter names an IANA zone,
/// and the absence of either means floating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorZone {
    Utc,
    Named(String),
    Floating,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedComponent {
    pub kind: ComponentKind,
    pub anchor_date_time: IcalDateTimeValue,
    pub zone: AnchorZone,
    pub rrule: Option<String>,
}

struct OpenComponent {
    kind: Option<ComponentKind>,
    dtstart: Option<(IcalDateTimeValue, AnchorZone)>,
    due: Option<(IcalDateTimeValue, AnchorZone)>,
    rrule: Option<String>,
}

impl OpenComponent {
    fn new(kind: Option<ComponentKind>) -> Self {
        Self {
            kind,
            dtstart: None,
            due: None,
            rrule: None,
        }
    }

    fn finish(self) -> Option<ExtractedComponent> {
        let kind = self.kind?;

        let (anchor_date_time, zone) = match kind {
            ComponentKind::VEvent => self.dtstart?,
            ComponentKind::VTodo => self.due.or(self.dtstart)?,
        };

        Some(ExtractedComponent {
            kind,
            anchor_date_time,
            zone,
            rrule: self.rrule,
        })
    }
}

fn component_kind_of(name: &str) -> Option<ComponentKind> {
    match name {
        "VEVENT" => Some(ComponentKind::VEvent),
        "VTODO" => Some(ComponentKind::VTodo),
        _ => None,
    }
}

fn zone_of(line: &ContentLine, value: &IcalDateTimeValue) -> AnchorZone {
    if value.is_utc {
        AnchorZone::Utc
    } else if let Some(tzid) = line.parameter("TZID") {
        AnchorZone::Named(tzid.to_string())
    } else {
        AnchorZone::Floating
    }
}

/// Walks a pre-unfolded sequence of content lines and returns every
/// VEVENT/VTODO with a usable anchor. Malformed individual lines are
/// skipped; a component missing a usable anchor is silently dropped.
pub fn extract_components<'a, I>(lines: I) -> Vec<ExtractedComponent>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stack: Vec<OpenComponent> = Vec::new();
    let mut found = Vec::new();

    for raw_line in lines {
        let Some(line) = ContentLine::parse(raw_line) else {
            continue;
        };

        match line.name.as_str() {
            "BEGIN" => {
                stack.push(OpenComponent::new(component_kind_of(line.value.trim())));
                continue;
            }
            "END" => {
                if let Some(open) = stack.pop() {
                    if let Some(extracted) = open.finish() {
                        found.push(extracted);
                    }
                }
                continue;
            }
            _ => {}
        }

        let Some(current) = stack.last_mut() else {
            continue;
        };

        if current.kind.is_none() {
            continue;
        }

        match line.name.as_str() {
            "DTSTART" => {
                if let Some(value) = parse_ical_date_time_value(&line.value) {
                    let zone = zone_of(&line, &value);
                    current.dtstart = Some((value, zone));
                }
            }
            "DUE" => {
                if let Some(value) = parse_ical_date_time_value(&line.value) {
                    let zone = zone_of(&line, &value);
                    current.due = Some((value, zone));
                }
            }
            "RRULE" => {
                current.rrule = Some(line.value.clone());
            }
            _ => {}
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_vevent_with_floating_dtstart() {
        let ical = [
            "BEGIN:VCALENDAR",
            "BEGIN:VEVENT",
            "UID:1",
            "DTSTART:19970902T090000",
            "RRULE:FREQ=DAILY;COUNT=5",
            "END:VEVENT",
            "END:VCALENDAR",
        ];

        let components = extract_components(ical);

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].kind, ComponentKind::VEvent);
        assert_eq!(components[0].zone, AnchorZone::Floating);
        assert_eq!(components[0].rrule.as_deref(), Some("FREQ=DAILY;COUNT=5"));
    }

    #[test]
    fn extracts_vtodo_due_with_tzid() {
        let ical = [
            "BEGIN:VTODO",
            "DUE;TZID=America/New_York:20250101T120000",
            "END:VTODO",
        ];

        let components = extract_components(ical);

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].kind, ComponentKind::VTodo);
        assert_eq!(
            components[0].zone,
            AnchorZone::Named(String::from("America/New_York"))
        );
    }

    #[test]
    fn vtodo_falls_back_to_dtstart_when_due_absent() {
        let ical = ["BEGIN:VTODO", "DTSTART:20250101T120000Z", "END:VTODO"];

        let components = extract_components(ical);

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].zone, AnchorZone::Utc);
    }

    #[test]
    fn ignores_valarm_properties_but_keeps_tracking_nesting() {
        let ical = [
            "BEGIN:VEVENT",
            "DTSTART:19970902T090000",
            "BEGIN:VALARM",
            "TRIGGER:-PT15M",
            "END:VALARM",
            "END:VEVENT",
        ];

        let components = extract_components(ical);

        assert_eq!(components.len(), 1);
    }

    #[test]
    fn drops_component_missing_usable_anchor() {
        let ical = ["BEGIN:VEVENT", "UID:1", "END:VEVENT"];

        assert!(extract_components(ical).is_empty());
    }

    #[test]
    fn skips_malformed_lines_without_failing_the_parse() {
        let ical = [
            "BEGIN:VEVENT",
            "NOCOLONHERE",
            "DTSTART:19970902T090000",
            "END:VEVENT",
        ];

        assert_eq!(extract_components(ical).len(), 1);
    }
}
