// dashkit/src/lib.rs
//
// Core of the surveillance activity dashboard: record preprocessing,
// aggregation, the date range slider, filter state and render coordination.
//

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod filter;
pub mod palette;
pub mod preprocess;
pub mod render;
pub mod slider;
pub mod types;

pub use config::{load_config, DashboardConfig, PanelLimits};
pub use dashboard::{Dashboard, FilterOptions};
pub use errors::{DashError, Result};
pub use filter::{FilterEvent, FilterState, FilterStore, Selection};
pub use render::{ChartRenderer, PanelBoard, PanelContent, PanelId};
pub use slider::{DateDomain, Handle, RangeSlider};
pub use types::{Field, InfoGathered, RawRecord, Record};
