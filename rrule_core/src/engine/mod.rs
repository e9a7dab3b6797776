//! The occurrence engine: turns a validated [`Rrule`] plus an
//! [`Anchor`] into an ordered, lazy stream of occurrences. Dispatches to
//! one of two strategies depending on whether BYSETPOS is present, then
//! applies termination uniformly across both.

mod byfilters;
mod direct;
mod expand;
mod step;

use chrono::NaiveDate;

use crate::anchor::Anchor;
use crate::rule::{Rrule, Termination};

enum Strategy<'r> {
    Direct(direct::DirectCursor<'r>),
    Expand(expand::ExpandCursor<'r>),
}

impl<'r> Iterator for Strategy<'r> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        match self {
            Self::Direct(cursor) => cursor.next(),
            Self::Expand(cursor) => cursor.next(),
        }
    }
}

/// The lazy occurrence stream returned by [`enumerate`]. Honors COUNT/UNTIL
/// termination and re-attaches the anchor's time-of-day and zone to every
/// date the underlying strategy produces.
pub struct Occurrences<'r> {
    anchor: Anchor,
    strategy: Strategy<'r>,
    termination: &'r Termination,
    emitted: u32,
    done: bool,
}

impl<'r> Iterator for Occurrences<'r> {
    type Item = Anchor;

    fn next(&mut self) -> Option<Anchor> {
        if self.done {
            return None;
        }

        if let Termination::Count(count) = self.termination {
            if self.emitted >= *count {
                self.done = true;
                return None;
            }
        }

        let date = self.strategy.next()?;
        let occurrence = self.anchor.with_date(date);

        if let Termination::Until(until) = self.termination {
            if occurrence.naive() > *until {
                self.done = true;
                return None;
            }
        }

        self.emitted += 1;
        Some(occurrence)
    }
}

/// Builds the occurrence stream for `rule` anchored at `anchor`. COUNT=0
/// yields nothing; an open-ended rule (no COUNT/UNTIL) yields forever —
/// callers must bound it themselves (`.take(n)`, [`enumerate_in_range`]).
pub fn enumerate<'r>(rule: &'r Rrule, anchor: Anchor) -> Occurrences<'r> {
    let anchor_date = anchor.date();

    let strategy = if rule.by_set_pos.is_some() {
        Strategy::Expand(expand::ExpandCursor::new(rule, anchor_date))
    } else {
        Strategy::Direct(direct::DirectCursor::new(rule, anchor_date))
    };

    Occurrences {
        anchor,
        strategy,
        termination: &rule.termination,
        emitted: 0,
        done: matches!(rule.termination, Termination::Count(0)),
    }
}

/// Occurrences of `rule` falling in `[range_start, range_end]` (both
/// inclusive), stopping the underlying stream as soon as it runs past
/// `range_end` rather than exhausting an open-ended rule.
pub fn enumerate_in_range<'r>(
    rule: &'r Rrule,
    anchor: Anchor,
    range_start: Anchor,
    range_end: Anchor,
) -> impl Iterator<Item = Anchor> + 'r {
    enumerate(rule, anchor)
        .take_while(move |occurrence| *occurrence <= range_end)
        .filter(move |occurrence| *occurrence >= range_start)
}
