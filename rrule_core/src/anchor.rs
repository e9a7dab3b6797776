//! The anchor / occurrence date-time: a naive local date-time plus an
//! attached zone. Arithmetic is always performed on the naive
//! calendar component; the zone is carried through unchanged and
//! re-attached on emission. Daylight-saving discontinuities are never
//! re-resolved — this type deliberately does no zone-aware arithmetic.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// No attached timezone; arithmetic never shifts it.
    Floating(NaiveDateTime),
    /// A named IANA zone.
    Zoned(NaiveDateTime, Tz),
    /// An explicit UTC marker.
    Utc(NaiveDateTime),
}

impl Anchor {
    pub fn floating(naive: NaiveDateTime) -> Self {
        Self::Floating(naive)
    }

    pub fn zoned(naive: NaiveDateTime, tz: Tz) -> Self {
        Self::Zoned(naive, tz)
    }

    pub fn utc(naive: NaiveDateTime) -> Self {
        Self::Utc(naive)
    }

    /// The naive local calendar component all engine arithmetic operates
    /// on.
    pub fn naive(&self) -> NaiveDateTime {
        match self {
            Self::Floating(naive) | Self::Zoned(naive, _) | Self::Utc(naive) => *naive,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.naive().date()
    }

    pub fn time_of_day(&self) -> NaiveTime {
        self.naive().time()
    }

    /// Produces a new occurrence on `date`, keeping this anchor's time of
    /// day and zone: the anchor's wall-clock time is the time component of
    /// every yielded occurrence.
    pub fn with_date(&self, date: NaiveDate) -> Self {
        let naive = date.and_time(self.time_of_day());
        match self {
            Self::Floating(_) => Self::Floating(naive),
            Self::Zoned(_, tz) => Self::Zoned(naive, *tz),
            Self::Utc(_) => Self::Utc(naive),
        }
    }
}

impl PartialOrd for Anchor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Anchor {
    /// Occurrences are always compared on their naive local component —
    /// the engine never mixes zones within a single enumeration, since
    /// every yielded value descends from the same anchor.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.naive().cmp(&other.naive())
    }
}
