//! Universal invariants, checked against a spread of rules and anchors
//! rather than one scenario apiece.

use chrono::{Datelike, NaiveDate};

use rrule_core::{enumerate, Anchor, Rrule};

fn utc(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> Anchor {
    Anchor::utc(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, ss)
            .unwrap(),
    )
}

const FIXTURES: &[(&str, (i32, u32, u32, u32, u32, u32))] = &[
    ("FREQ=DAILY;COUNT=30", (2024, 1, 1, 9, 0, 0)),
    ("FREQ=DAILY;INTERVAL=3;COUNT=20", (2024, 2, 15, 0, 0, 0)),
    ("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=25", (2025, 1, 1, 10, 0, 0)),
    ("FREQ=WEEKLY;INTERVAL=2;BYDAY=TU;COUNT=15", (2025, 3, 4, 18, 30, 0)),
    ("FREQ=MONTHLY;COUNT=18", (2025, 1, 31, 9, 15, 30)),
    ("FREQ=MONTHLY;BYDAY=-1FR;COUNT=14", (2024, 1, 1, 0, 0, 0)),
    ("FREQ=MONTHLY;BYMONTHDAY=1,15;COUNT=20", (2024, 1, 1, 6, 0, 0)),
    ("FREQ=YEARLY;COUNT=6", (2024, 2, 29, 12, 0, 0)),
    ("FREQ=YEARLY;BYMONTH=3,6,9,12;BYDAY=FR;BYSETPOS=-1;COUNT=12", (2024, 3, 29, 10, 0, 0)),
    ("FREQ=YEARLY;BYWEEKNO=53;COUNT=4", (2020, 1, 1, 0, 0, 0)),
    ("FREQ=WEEKLY;BYDAY=MO,WE,FR;BYSETPOS=1;COUNT=12", (2025, 1, 1, 10, 0, 0)),
];

fn enumerated(rrule: &str, anchor_parts: (i32, u32, u32, u32, u32, u32)) -> (Rrule, Anchor, Vec<Anchor>) {
    let rule = Rrule::parse(rrule).unwrap();
    let (y, m, d, hh, mm, ss) = anchor_parts;
    let anchor = utc(y, m, d, hh, mm, ss);
    let occurrences: Vec<_> = enumerate(&rule, anchor).collect();
    (rule, anchor, occurrences)
}

#[test]
fn monotonicity() {
    for (rrule, anchor) in FIXTURES {
        let (_, _, occurrences) = enumerated(rrule, *anchor);
        for window in occurrences.windows(2) {
            assert!(
                window[0] < window[1],
                "{rrule}: {:?} is not strictly before {:?}",
                window[0].naive(),
                window[1].naive()
            );
        }
    }
}

#[test]
fn time_preservation() {
    for (rrule, anchor) in FIXTURES {
        let (_, anchor_value, occurrences) = enumerated(rrule, *anchor);
        for occurrence in &occurrences {
            assert_eq!(
                occurrence.time_of_day(),
                anchor_value.time_of_day(),
                "{rrule}: time-of-day drifted"
            );
        }
    }
}

#[test]
fn count_is_honored() {
    for (rrule, anchor) in FIXTURES {
        let rule = Rrule::parse(rrule).unwrap();
        if let rrule_core::Termination::Count(count) = &rule.termination {
            let (y, m, d, hh, mm, ss) = *anchor;
            let occurrences: Vec<_> = enumerate(&rule, utc(y, m, d, hh, mm, ss)).collect();
            assert_eq!(occurrences.len() as u32, *count, "{rrule}: COUNT not honored");
        }
    }
}

#[test]
fn until_is_honored() {
    let rule = Rrule::parse("FREQ=DAILY;UNTIL=20250110T000000Z").unwrap();
    let anchor = utc(2025, 1, 1, 0, 0, 0);
    let until = utc(2025, 1, 10, 0, 0, 0);

    for occurrence in enumerate(&rule, anchor) {
        assert!(occurrence <= until);
    }
}

#[test]
fn round_trip_serialization_reparses_equal() {
    for (rrule, _) in FIXTURES {
        let rule = Rrule::parse(rrule).unwrap();
        let serialized = rule.to_rrule_string();
        let reparsed = Rrule::parse(&serialized).unwrap();
        assert_eq!(rule, reparsed, "round-trip mismatch for {rrule}");
    }
}

#[test]
fn anchor_inclusion_matches_by_filter_satisfaction() {
    // BYDAY=MO,WE,FR and an anchor on Wednesday: the anchor satisfies the
    // filter and must be the first element.
    let rule = Rrule::parse("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=1").unwrap();
    let anchor = utc(2025, 1, 1, 10, 0, 0); // Wednesday
    let first = enumerate(&rule, anchor).next().unwrap();
    assert_eq!(first, anchor);

    // BYDAY=MO,FR and an anchor on Wednesday: the anchor does not satisfy
    // the filter and must not appear.
    let rule = Rrule::parse("FREQ=WEEKLY;BYDAY=MO,FR;COUNT=1").unwrap();
    let first = enumerate(&rule, anchor).next().unwrap();
    assert_ne!(first, anchor);
}

#[test]
fn leap_day_fidelity() {
    let rule = Rrule::parse("FREQ=YEARLY;COUNT=6").unwrap();
    let anchor = utc(2024, 2, 29, 12, 0, 0);
    for occurrence in enumerate(&rule, anchor) {
        assert_eq!(occurrence.date().month(), 2);
        assert_eq!(occurrence.date().day(), 29);
    }
}

#[test]
fn monthly_day_preservation_when_no_by_filters() {
    let rule = Rrule::parse("FREQ=MONTHLY;COUNT=18").unwrap();
    let anchor = utc(2025, 1, 31, 9, 15, 30);
    for occurrence in enumerate(&rule, anchor) {
        assert_eq!(occurrence.date().day(), 31);
    }
}

#[test]
fn bysetpos_selection_is_deterministic_across_runs() {
    let rule = Rrule::parse("FREQ=WEEKLY;BYDAY=MO,WE,FR;BYSETPOS=1;COUNT=10").unwrap();
    let anchor = utc(2025, 1, 1, 10, 0, 0);

    let first_run: Vec<_> = enumerate(&rule, anchor).collect();
    let second_run: Vec<_> = enumerate(&rule, anchor).collect();
    assert_eq!(first_run, second_run);
}
