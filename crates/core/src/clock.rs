//! Business calendar clock.
//!
//! The current day is always resolved in an explicit time zone so that a
//! deployment running in UTC still rolls the parcel sequence over at the
//! business's local midnight.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Source of the current business day
pub trait Clock: Send + Sync {
    /// Returns today's calendar date in the business time zone
    fn today(&self) -> NaiveDate;
}

/// Wall clock shifted into a fixed UTC offset
#[derive(Debug, Clone, Copy)]
pub struct BusinessClock {
    offset: FixedOffset,
}

impl BusinessClock {
    /// Creates a clock for the given offset
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Creates a clock from an offset in minutes east of UTC
    pub fn from_offset_minutes(minutes: i32) -> crate::Result<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
            .ok_or_else(|| crate::Error::Config(format!("UTC offset out of range: {} minutes", minutes)))
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `instant` in the business time zone
    pub fn date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

impl Clock for BusinessClock {
    fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }
}

/// Clock pinned to a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
