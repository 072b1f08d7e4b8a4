// services/tui-dash/src/state.rs
//
// Terminal-side state: which control has focus, dropdown cursors, and the
// event log. Key presses become filter events here.

use chrono::{DateTime, Local};
use dashkit::{Dashboard, FilterEvent, Handle, InfoGathered, PanelBoard, Selection};

pub const INFO_CHOICES: [Selection<InfoGathered>; 3] = [
    Selection::All,
    Selection::Only(InfoGathered::Yes),
    Selection::Only(InfoGathered::No),
];

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Operative,
    ActivityType,
    InfoGathered,
    MinHandle,
    MaxHandle,
}

impl Control {
    const ORDER: [Control; 5] = [
        Control::Operative,
        Control::ActivityType,
        Control::InfoGathered,
        Control::MinHandle,
        Control::MaxHandle,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|c| *c == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|c| *c == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: String,  // INFO, WARN
    pub message: String,
}

pub struct DashboardState {
    pub dash: Dashboard<PanelBoard>,
    pub source: String,
    pub focus: Control,
    // 0 is "all", n is options[n - 1]
    pub operative_idx: usize,
    pub activity_idx: usize,
    pub info_idx: usize,
    pub activity_log: Vec<LogEntry>,
}

impl DashboardState {
    pub fn new(dash: Dashboard<PanelBoard>, source: &str) -> Self {
        let mut state = Self {
            dash,
            source: source.to_string(),
            focus: Control::Operative,
            operative_idx: 0,
            activity_idx: 0,
            info_idx: 0,
            activity_log: Vec::new(),
        };
        let message = format!(
            "Loaded {} records from {}",
            state.dash.total_count(),
            state.source
        );
        state.add_log("INFO", &message);
        state
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Left/right on the focused control.
    pub fn step(&mut self, delta: i64) {
        let event = match self.focus {
            Control::Operative => {
                let len = self.dash.options().operatives.len() + 1;
                self.operative_idx = cycle(self.operative_idx, len, delta);
                FilterEvent::Operative(self.operative_selection())
            }
            Control::ActivityType => {
                let len = self.dash.options().activity_types.len() + 1;
                self.activity_idx = cycle(self.activity_idx, len, delta);
                FilterEvent::ActivityType(self.activity_selection())
            }
            Control::InfoGathered => {
                self.info_idx = cycle(self.info_idx, INFO_CHOICES.len(), delta);
                FilterEvent::InfoGathered(self.info_selection())
            }
            Control::MinHandle => FilterEvent::Nudge {
                handle: Handle::Min,
                delta,
            },
            Control::MaxHandle => FilterEvent::Nudge {
                handle: Handle::Max,
                delta,
            },
        };
        self.apply(event);
    }

    pub fn reset(&mut self) {
        self.operative_idx = 0;
        self.activity_idx = 0;
        self.info_idx = 0;
        self.apply(FilterEvent::Reset);
    }

    pub fn operative_selection(&self) -> Selection<String> {
        option_at(&self.dash.options().operatives, self.operative_idx)
    }

    pub fn activity_selection(&self) -> Selection<String> {
        option_at(&self.dash.options().activity_types, self.activity_idx)
    }

    pub fn info_selection(&self) -> Selection<InfoGathered> {
        INFO_CHOICES[self.info_idx % INFO_CHOICES.len()].clone()
    }

    pub fn add_log(&mut self, level: &str, message: &str) {
        self.activity_log.push(LogEntry {
            timestamp: Local::now(),
            level: level.to_string(),
            message: message.to_string(),
        });

        if self.activity_log.len() > MAX_LOG_ENTRIES {
            self.activity_log.remove(0);
        }
    }

    fn apply(&mut self, event: FilterEvent) {
        let label = describe(&event);
        let before = self.dash.renderer().passes();
        let visible = self.dash.dispatch(event);

        if self.dash.renderer().passes() != before {
            let level = if visible == 0 { "WARN" } else { "INFO" };
            self.add_log(level, &format!("{} -> {} records", label, visible));
        }
    }
}

fn option_at(options: &[String], idx: usize) -> Selection<String> {
    match idx.checked_sub(1).and_then(|i| options.get(i)) {
        Some(value) => Selection::Only(value.clone()),
        None => Selection::All,
    }
}

fn cycle(idx: usize, len: usize, delta: i64) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (idx as i64 + delta).rem_euclid(len) as usize
}

fn describe(event: &FilterEvent) -> String {
    fn sel<T: ToString>(s: &Selection<T>) -> String {
        s.value().map(|v| v.to_string()).unwrap_or_else(|| "all".to_string())
    }

    match event {
        FilterEvent::Operative(s) => format!("Operative = {}", sel(s)),
        FilterEvent::ActivityType(s) => format!("Activity type = {}", sel(s)),
        FilterEvent::InfoGathered(s) => format!("Info gathered = {}", sel(s)),
        FilterEvent::DragMin(v) => format!("Date from = day {}", v),
        FilterEvent::DragMax(v) => format!("Date to = day {}", v),
        FilterEvent::Nudge { handle, delta } => format!("Date {:?} handle {:+}", handle, delta),
        FilterEvent::Reset => "Filters reset".to_string(),
    }
}
