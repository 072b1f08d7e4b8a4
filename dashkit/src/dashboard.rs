// dashkit/src/dashboard.rs
//
// One dashboard instance: full record set, filter store, slider and the
// renderer it redraws on every change.
//

use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::distinct_values;
use crate::config::PanelLimits;
use crate::errors::{DashError, Result};
use crate::filter::{FilterEvent, FilterState, FilterStore};
use crate::palette::ColorMap;
use crate::preprocess::preprocess;
use crate::render::{ChartRenderer, RenderCoordinator};
use crate::slider::{DateDomain, RangeSlider};
use crate::types::{Field, RawRecord, Record};

/// Dropdown contents. The implicit "all" entry is not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub operatives: Vec<String>,
    pub activity_types: Vec<String>,
}

pub struct Dashboard<R: ChartRenderer> {
    records: Vec<Record>,
    store: FilterStore,
    slider: RangeSlider,
    coordinator: RenderCoordinator,
    options: FilterOptions,
    renderer: R,
    filtered: usize,
}

impl<R: ChartRenderer> Dashboard<R> {
    pub fn new(raw: &[RawRecord], limits: PanelLimits, renderer: R) -> Result<Self> {
        Self::from_records(preprocess(raw), limits, renderer)
    }

    /// Build and draw the initial, unfiltered view.
    ///
    /// Fails when no record carries a date: the slider has no domain then.
    pub fn from_records(records: Vec<Record>, limits: PanelLimits, renderer: R) -> Result<Self> {
        let domain = DateDomain::from_records(&records)
            .ok_or(DashError::NoDatedRecords(records.len()))?;

        let options = FilterOptions {
            operatives: distinct_values(&records, Field::Operative),
            activity_types: distinct_values(&records, Field::Activity),
        };
        let colors = ColorMap::build(&records);

        info!(
            "Dashboard initialized: {} records, {} operatives, {} activity types, {} days from {}",
            records.len(),
            options.operatives.len(),
            options.activity_types.len(),
            domain.total_days() + 1,
            domain.min_date()
        );

        let mut dashboard = Self {
            store: FilterStore::new(domain),
            slider: RangeSlider::new(domain.total_days()),
            coordinator: RenderCoordinator::new(limits, colors),
            records,
            options,
            renderer,
            filtered: 0,
        };
        dashboard.refresh();
        Ok(dashboard)
    }

    /// Apply one UI event and redraw if the filter state moved.
    /// Returns the number of records now visible.
    pub fn dispatch(&mut self, event: FilterEvent) -> usize {
        debug!("Dispatch: {:?}", event);

        let changed = match event {
            FilterEvent::Operative(sel) => self.store.set_operative(sel),
            FilterEvent::ActivityType(sel) => self.store.set_activity_type(sel),
            FilterEvent::InfoGathered(sel) => self.store.set_info_gathered(sel),
            FilterEvent::DragMin(value) => {
                self.slider.set_lo(value);
                self.sync_date_range()
            }
            FilterEvent::DragMax(value) => {
                self.slider.set_hi(value);
                self.sync_date_range()
            }
            FilterEvent::Nudge { handle, delta } => {
                let handle = self.slider.route_step(handle, delta);
                self.slider.nudge(handle, delta);
                self.sync_date_range()
            }
            FilterEvent::Reset => {
                self.slider.reset();
                self.store.reset()
            }
        };

        if changed {
            self.refresh();
        }
        self.filtered
    }

    /// Redraw every panel from the current state.
    pub fn refresh(&mut self) -> usize {
        self.filtered = self
            .coordinator
            .render(&self.records, &self.store, &mut self.renderer);
        self.filtered
    }

    pub fn state(&self) -> &FilterState {
        self.store.state()
    }

    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    pub fn slider(&self) -> &RangeSlider {
        &self.slider
    }

    pub fn domain(&self) -> &DateDomain {
        self.store.domain()
    }

    pub fn slider_label(&self) -> String {
        self.slider.label(self.store.domain())
    }

    pub fn colors(&self) -> &ColorMap {
        self.coordinator.colors()
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn sync_date_range(&mut self) -> bool {
        self.store
            .set_date_range(i64::from(self.slider.lo()), i64::from(self.slider.hi()))
    }
}
