// dashkit/src/slider.rs
//
// Dual-handle date range slider over day offsets
//

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aggregate::date_bounds;
use crate::types::Record;

pub const SHORT_DATE_FORMAT: &str = "%b %-d";
pub const LONG_DATE_FORMAT: &str = "%b %-d, %Y";

/// Discrete date axis: day offsets `0..=total_days` counted from the
/// earliest dated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDomain {
    min_date: NaiveDate,
    total_days: u32,
}

impl DateDomain {
    pub fn new(min_date: NaiveDate, max_date: NaiveDate) -> Self {
        let span = (max_date - min_date).num_days().max(0);
        Self {
            min_date,
            total_days: u32::try_from(span).unwrap_or(u32::MAX),
        }
    }

    pub fn from_records(records: &[Record]) -> Option<Self> {
        date_bounds(records).map(|(lo, hi)| Self::new(lo, hi))
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.date_at(self.total_days)
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Signed so dates outside the domain stay comparable.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        (date - self.min_date).num_days()
    }

    pub fn date_at(&self, offset: u32) -> NaiveDate {
        let offset = offset.min(self.total_days);
        self.min_date
            .checked_add_days(Days::new(u64::from(offset)))
            .unwrap_or(NaiveDate::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    Min,
    Max,
}

/// Highlighted part of the track, in percent of its width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderFill {
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSlider {
    lo: u32,
    hi: u32,
    total_days: u32,
    last_moved: Option<Handle>,
}

impl RangeSlider {
    pub fn new(total_days: u32) -> Self {
        Self {
            lo: 0,
            hi: total_days,
            total_days,
            last_moved: None,
        }
    }

    pub fn lo(&self) -> u32 {
        self.lo
    }

    pub fn hi(&self) -> u32 {
        self.hi
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Move the min handle. Pushing past the max drags the max along.
    pub fn set_lo(&mut self, value: i64) {
        self.lo = self.clamp(value);
        if self.lo > self.hi {
            self.hi = self.lo;
        }
        self.last_moved = Some(Handle::Min);
    }

    /// Move the max handle. Pushing below the min drags the min along.
    pub fn set_hi(&mut self, value: i64) {
        self.hi = self.clamp(value);
        if self.hi < self.lo {
            self.lo = self.hi;
        }
        self.last_moved = Some(Handle::Max);
    }

    pub fn set(&mut self, handle: Handle, value: i64) {
        match handle {
            Handle::Min => self.set_lo(value),
            Handle::Max => self.set_hi(value),
        }
    }

    pub fn value(&self, handle: Handle) -> u32 {
        match handle {
            Handle::Min => self.lo,
            Handle::Max => self.hi,
        }
    }

    pub fn nudge(&mut self, handle: Handle, delta: i64) {
        let current = i64::from(self.value(handle));
        self.set(handle, current.saturating_add(delta));
    }

    pub fn reset(&mut self) {
        self.lo = 0;
        self.hi = self.total_days;
        self.last_moved = None;
    }

    pub fn is_full_range(&self) -> bool {
        self.lo == 0 && self.hi == self.total_days
    }

    pub fn fill(&self) -> SliderFill {
        if self.total_days == 0 {
            return SliderFill {
                left: 0.0,
                width: 100.0,
            };
        }
        let total = f64::from(self.total_days);
        SliderFill {
            left: f64::from(self.lo) / total * 100.0,
            width: f64::from(self.hi - self.lo) / total * 100.0,
        }
    }

    pub fn label(&self, domain: &DateDomain) -> String {
        format!(
            "{} – {}",
            domain.date_at(self.lo).format(SHORT_DATE_FORMAT),
            domain.date_at(self.hi).format(SHORT_DATE_FORMAT)
        )
    }

    /// Handle that keeps input priority while both handles sit on the same
    /// day, `None` while they are apart.
    ///
    /// At either end of the track only one handle can still travel inward,
    /// so that one wins; elsewhere the handle that was moved last stays on top.
    pub fn pinned_handle(&self) -> Option<Handle> {
        if self.lo != self.hi {
            return None;
        }
        if self.total_days > 0 && self.lo == 0 {
            return Some(Handle::Max);
        }
        if self.total_days > 0 && self.hi == self.total_days {
            return Some(Handle::Min);
        }
        Some(self.last_moved.unwrap_or(Handle::Max))
    }

    /// Stacking order for the presentation layer: the max handle sits on
    /// top unless a coincident min handle has been pinned.
    pub fn top_handle(&self) -> Handle {
        self.pinned_handle().unwrap_or(Handle::Max)
    }

    /// Which handle should receive pointer input aimed at `requested`.
    pub fn route(&self, requested: Handle) -> Handle {
        self.pinned_handle().unwrap_or(requested)
    }

    /// Which handle a relative step of `delta` days should move. While the
    /// handles coincide, the step goes to the handle on the side it moves
    /// toward, so the range widens instead of sliding both handles along.
    pub fn route_step(&self, requested: Handle, delta: i64) -> Handle {
        if self.lo != self.hi {
            return requested;
        }
        match delta.signum() {
            1 => Handle::Max,
            -1 => Handle::Min,
            _ => requested,
        }
    }

    fn clamp(&self, value: i64) -> u32 {
        // total_days fits in u32, so the clamped value does too
        value.clamp(0, i64::from(self.total_days)) as u32
    }
}
