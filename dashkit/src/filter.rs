// dashkit/src/filter.rs
//
// Filter state for one dashboard instance
//
// Holds the categorical selections plus the date interval and decides
// which records survive. Every mutation swaps in a complete new state.
//

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::slider::{DateDomain, Handle};
use crate::types::{InfoGathered, Record};

/// Either every value passes, or only the one named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn admits<U: ?Sized>(&self, value: Option<&U>) -> bool
    where
        T: PartialEq<U>,
    {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value.is_some_and(|v| wanted == v),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(v) => Some(v),
        }
    }
}

impl Selection<String> {
    /// Dropdown convention: the literal `"all"` means no filter.
    pub fn from_option(value: &str) -> Self {
        if value == "all" {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub operative: Selection<String>,
    pub activity_type: Selection<String>,
    pub info_gathered: Selection<InfoGathered>,
    pub date_min: u32,
    pub date_max: u32,
}

impl FilterState {
    /// Everything selected, full date span.
    pub fn unfiltered(total_days: u32) -> Self {
        Self {
            operative: Selection::All,
            activity_type: Selection::All,
            info_gathered: Selection::All,
            date_min: 0,
            date_max: total_days,
        }
    }

    /// Pure filter decision for one record.
    ///
    /// Undated records cannot be excluded by the date interval.
    pub fn admits(&self, domain: &DateDomain, record: &Record) -> bool {
        if !self.operative.admits(record.operative.as_deref()) {
            return false;
        }
        if !self.activity_type.admits(record.activity.as_deref()) {
            return false;
        }
        if !self.info_gathered.admits(Some(&record.info)) {
            return false;
        }
        if let Some(date) = record.date {
            let offset = domain.offset_of(date);
            if offset < i64::from(self.date_min) || offset > i64::from(self.date_max) {
                return false;
            }
        }
        true
    }
}

/// Discrete UI input, already translated from raw widget events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Operative(Selection<String>),
    ActivityType(Selection<String>),
    InfoGathered(Selection<InfoGathered>),
    /// Absolute day offset for the min handle
    DragMin(i64),
    /// Absolute day offset for the max handle
    DragMax(i64),
    /// Relative move of a handle, subject to the slider's pinning rule
    Nudge { handle: Handle, delta: i64 },
    Reset,
}

#[derive(Debug, Clone)]
pub struct FilterStore {
    state: FilterState,
    domain: DateDomain,
}

impl FilterStore {
    pub fn new(domain: DateDomain) -> Self {
        Self {
            state: FilterState::unfiltered(domain.total_days()),
            domain,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn domain(&self) -> &DateDomain {
        &self.domain
    }

    pub fn default_state(&self) -> FilterState {
        FilterState::unfiltered(self.domain.total_days())
    }

    pub fn is_default(&self) -> bool {
        self.state == self.default_state()
    }

    pub fn set_operative(&mut self, operative: Selection<String>) -> bool {
        self.replace(FilterState {
            operative,
            ..self.state.clone()
        })
    }

    pub fn set_activity_type(&mut self, activity_type: Selection<String>) -> bool {
        self.replace(FilterState {
            activity_type,
            ..self.state.clone()
        })
    }

    pub fn set_info_gathered(&mut self, info_gathered: Selection<InfoGathered>) -> bool {
        self.replace(FilterState {
            info_gathered,
            ..self.state.clone()
        })
    }

    /// Both ends are clamped into the domain; an inverted pair collapses
    /// onto `hi`.
    pub fn set_date_range(&mut self, lo: i64, hi: i64) -> bool {
        let total = i64::from(self.domain.total_days());
        let hi = hi.clamp(0, total);
        let lo = lo.clamp(0, total).min(hi);

        self.replace(FilterState {
            date_min: lo as u32,
            date_max: hi as u32,
            ..self.state.clone()
        })
    }

    pub fn reset(&mut self) -> bool {
        self.replace(self.default_state())
    }

    pub fn predicate(&self, record: &Record) -> bool {
        self.state.admits(&self.domain, record)
    }

    pub fn filter<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.predicate(r)).collect()
    }

    fn replace(&mut self, next: FilterState) -> bool {
        debug_assert!(next.date_min <= next.date_max);
        debug_assert!(next.date_max <= self.domain.total_days());

        if next == self.state {
            return false;
        }
        debug!("Filter state changed: {:?}", next);
        self.state = next;
        true
    }
}
