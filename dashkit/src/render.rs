// dashkit/src/render.rs
//
// Render coordination: one filtered snapshot per pass, fanned out to every
// panel as declarative chart content.
//

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{bin_by_day, bin_by_hour, count_by, distinct_count, top_n, Count};
use crate::config::PanelLimits;
use crate::filter::FilterStore;
use crate::palette::{ColorMap, Rgb, ACCENT, GOLD, STEEL};
use crate::slider::LONG_DATE_FORMAT;
use crate::types::{Field, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    Kpis,
    Timeline,
    ActivityTypes,
    TimeOfDay,
    Operatives,
    LocationTypes,
    Subjects,
    Locations,
}

impl PanelId {
    pub const ALL: [PanelId; 8] = [
        PanelId::Kpis,
        PanelId::Timeline,
        PanelId::ActivityTypes,
        PanelId::TimeOfDay,
        PanelId::Operatives,
        PanelId::LocationTypes,
        PanelId::Subjects,
        PanelId::Locations,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PanelId::Kpis => "Summary",
            PanelId::Timeline => "Daily Activity Timeline",
            PanelId::ActivityTypes => "Activity Type Breakdown",
            PanelId::TimeOfDay => "Time of Day",
            PanelId::Operatives => "Operative Workload",
            PanelId::LocationTypes => "Location Types Surveilled",
            PanelId::Subjects => "Top Subjects Watched",
            PanelId::Locations => "Most Watched Locations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelWidth {
    Full,
    Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinInterval {
    Day,
    Hour,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datum {
    pub label: String,
    pub value: usize,
    pub color: Rgb,
}

/// Drawing primitives handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mark", rename_all = "snake_case")]
pub enum Mark {
    /// Horizontal bars, one per datum
    BarX { data: Vec<Datum>, sort_descending: bool },
    /// Pre-binned vertical rectangles
    RectY { data: Vec<Datum>, interval: BinInterval },
    RuleX { at: usize },
    RuleY { at: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub label: Option<String>,
    pub grid: bool,
}

impl Axis {
    fn labeled(label: &str, grid: bool) -> Self {
        Self {
            label: Some(label.to_string()),
            grid,
        }
    }

    fn bare() -> Self {
        Self {
            label: None,
            grid: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub width: PanelWidth,
    pub x: Axis,
    pub y: Axis,
    pub marks: Vec<Mark>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum PanelContent {
    Kpis(Vec<KpiCard>),
    Chart(ChartSpec),
    Placeholder(String),
}

impl PanelContent {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, PanelContent::Placeholder(_))
    }
}

/// Drawing side of the dashboard. `render` replaces whatever the panel
/// showed before; nothing accumulates between passes.
pub trait ChartRenderer {
    fn render(&mut self, panel: PanelId, content: PanelContent);

    /// Called once at the start of every pass, before any panel.
    fn set_record_count(&mut self, count: usize);
}

/// Renderer that keeps the latest content of every panel. Front ends draw
/// from it; headless callers serialize it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PanelBoard {
    record_count: usize,
    passes: u64,
    panels: BTreeMap<PanelId, PanelContent>,
}

impl PanelBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, panel: PanelId) -> Option<&PanelContent> {
        self.panels.get(&panel)
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of completed render passes
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn count_label(&self) -> String {
        format!("{} records", format_count(self.record_count))
    }
}

impl ChartRenderer for PanelBoard {
    fn render(&mut self, panel: PanelId, content: PanelContent) {
        self.panels.insert(panel, content);
    }

    fn set_record_count(&mut self, count: usize) {
        self.record_count = count;
        self.passes += 1;
    }
}

/// Turns the current filter state into panel content.
#[derive(Debug, Clone)]
pub struct RenderCoordinator {
    limits: PanelLimits,
    colors: ColorMap,
}

impl RenderCoordinator {
    pub fn new(limits: PanelLimits, colors: ColorMap) -> Self {
        Self { limits, colors }
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn limits(&self) -> &PanelLimits {
        &self.limits
    }

    /// Filter once, then redraw every panel from that one snapshot.
    /// Returns the size of the snapshot.
    pub fn render<R: ChartRenderer>(
        &self,
        records: &[Record],
        store: &FilterStore,
        renderer: &mut R,
    ) -> usize {
        let snapshot = store.filter(records);
        debug!(
            "Render pass: {} of {} records match",
            snapshot.len(),
            records.len()
        );

        renderer.set_record_count(snapshot.len());
        for panel in PanelId::ALL {
            renderer.render(panel, self.build_panel(panel, &snapshot));
        }
        snapshot.len()
    }

    pub fn build_panel(&self, panel: PanelId, snapshot: &[&Record]) -> PanelContent {
        match panel {
            PanelId::Kpis => kpi_panel(snapshot),
            PanelId::Timeline => timeline_panel(snapshot),
            PanelId::TimeOfDay => time_of_day_panel(snapshot),
            PanelId::ActivityTypes => ranking_panel(
                count_by(snapshot.iter().copied(), Field::Activity),
                self.limits.activity_types,
                PanelWidth::Half,
                |value| self.colors.color_for(value),
                "No data for current filters.",
            ),
            PanelId::Operatives => ranking_panel(
                count_by(snapshot.iter().copied(), Field::Operative),
                self.limits.operatives,
                PanelWidth::Half,
                |_| STEEL,
                "No data for current filters.",
            ),
            PanelId::LocationTypes => ranking_panel(
                count_by(snapshot.iter().copied(), Field::LocationType),
                self.limits.location_types,
                PanelWidth::Half,
                |_| GOLD,
                "No location type data for current filters.",
            ),
            PanelId::Subjects => ranking_panel(
                count_by(snapshot.iter().copied(), Field::Subject),
                self.limits.subjects,
                PanelWidth::Full,
                |_| ACCENT,
                "No subject data for current filters.",
            ),
            PanelId::Locations => ranking_panel(
                count_by(snapshot.iter().copied(), Field::LocationName),
                self.limits.locations,
                PanelWidth::Full,
                |_| ACCENT,
                "No location data for current filters.",
            ),
        }
    }
}

fn kpi_panel(snapshot: &[&Record]) -> PanelContent {
    let mut dates = snapshot.iter().filter_map(|r| r.date);
    let date_range = match dates.next() {
        None => "—".to_string(),
        Some(first) => {
            let (lo, hi) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
            if lo == hi {
                lo.format(LONG_DATE_FORMAT).to_string()
            } else {
                format!(
                    "{} – {}",
                    lo.format(LONG_DATE_FORMAT),
                    hi.format(LONG_DATE_FORMAT)
                )
            }
        }
    };

    PanelContent::Kpis(vec![
        KpiCard {
            label: "Activities",
            value: format_count(snapshot.len()),
            color: ACCENT,
        },
        KpiCard {
            label: "Date range",
            value: date_range,
            color: STEEL,
        },
        KpiCard {
            label: "Operatives",
            value: format_count(distinct_count(snapshot.iter().copied(), Field::Operative)),
            color: GOLD,
        },
        KpiCard {
            label: "Subjects watched",
            value: format_count(distinct_count(snapshot.iter().copied(), Field::Subject)),
            color: STEEL,
        },
    ])
}

/// Daily counts as a contiguous run of days, quiet days included.
fn timeline_panel(snapshot: &[&Record]) -> PanelContent {
    let bins = bin_by_day(snapshot.iter().copied());
    let (first, last) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => return PanelContent::Placeholder("No dated records match the current filters.".to_string()),
    };

    let by_day: BTreeMap<NaiveDate, usize> = bins.into_iter().collect();
    let data = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|day| Datum {
            label: day.format("%Y-%m-%d").to_string(),
            value: by_day.get(&day).copied().unwrap_or(0),
            color: ACCENT,
        })
        .collect();

    PanelContent::Chart(ChartSpec {
        width: PanelWidth::Full,
        x: Axis::labeled("Date", false),
        y: Axis::labeled("Activities", true),
        marks: vec![
            Mark::RectY {
                data,
                interval: BinInterval::Day,
            },
            Mark::RuleY { at: 0 },
        ],
    })
}

fn time_of_day_panel(snapshot: &[&Record]) -> PanelContent {
    let bins = bin_by_hour(snapshot.iter().copied());
    if bins.iter().all(|&n| n == 0) {
        return PanelContent::Placeholder("No timed records match the current filters.".to_string());
    }

    let data = bins
        .iter()
        .enumerate()
        .map(|(hour, &value)| Datum {
            label: hour.to_string(),
            value,
            color: STEEL,
        })
        .collect();

    PanelContent::Chart(ChartSpec {
        width: PanelWidth::Half,
        x: Axis::labeled("Hour of day", false),
        y: Axis::labeled("Activities", true),
        marks: vec![
            Mark::RectY {
                data,
                interval: BinInterval::Hour,
            },
            Mark::RuleY { at: 0 },
        ],
    })
}

fn ranking_panel(
    counts: Vec<Count>,
    limit: usize,
    width: PanelWidth,
    fill: impl Fn(&str) -> Rgb,
    placeholder: &str,
) -> PanelContent {
    let counts = top_n(counts, limit);
    if counts.is_empty() {
        return PanelContent::Placeholder(placeholder.to_string());
    }

    let data = counts
        .into_iter()
        .map(|c| Datum {
            color: fill(&c.value),
            label: c.value,
            value: c.count,
        })
        .collect();

    PanelContent::Chart(ChartSpec {
        width,
        x: Axis::labeled("Activities", true),
        y: Axis::bare(),
        marks: vec![
            Mark::BarX {
                data,
                sort_descending: true,
            },
            Mark::RuleX { at: 0 },
        ],
    })
}

/// Format counts with thousands separators
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
