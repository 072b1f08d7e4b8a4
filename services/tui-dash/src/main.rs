// services/tui-dash/src/main.rs
//
// Terminal dashboard for surveillance activity records
//
// Run with: cargo run --bin tui-dash -- --demo

use std::fs::File;
use std::io::stdout;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use dashkit::preprocess::load_raw_records;
use dashkit::{
    load_config, Dashboard, DashboardConfig, FilterEvent, InfoGathered, PanelBoard, RawRecord,
    Selection,
};
use ratatui::prelude::*;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod mock;
mod state;
mod ui;

use mock::MockDataGenerator;
use state::DashboardState;

const WEEK: i64 = 7;

#[derive(Parser, Debug)]
#[command(name = "tui-dash")]
#[command(about = "Terminal dashboard for surveillance activity records")]
#[command(version = "0.1.0")]
struct Args {
    /// Run with a generated dataset instead of a records file
    #[arg(long, short)]
    demo: bool,

    /// Seed for the demo dataset
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of demo records
    #[arg(long, default_value = "600")]
    demo_records: usize,

    /// JSON array of raw activity records (overrides data_path from config)
    #[arg(long)]
    data: Option<String>,

    #[arg(short, long, default_value = "config/tui-dash.yaml")]
    config: String,

    /// Input poll interval in milliseconds (overrides tick_ms from config)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Render once with the filters below and print the panels as JSON
    #[arg(long)]
    snapshot: bool,

    #[arg(long)]
    operative: Option<String>,

    #[arg(long)]
    activity: Option<String>,

    /// all, yes or no
    #[arg(long)]
    info: Option<String>,

    /// First day offset of the date range (must not exceed --to)
    #[arg(long)]
    from: Option<i64>,

    /// Last day offset of the date range
    #[arg(long)]
    to: Option<i64>,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    source: &'a str,
    state: &'a dashkit::FilterState,
    date_range: String,
    board: &'a PanelBoard,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    init_tracing(&config, args.snapshot)?;

    let (raw, source) = load_dataset(&args, &config)?;
    info!("Loaded {} raw records from {}", raw.len(), source);

    let dash = Dashboard::new(&raw, config.limits, PanelBoard::new())
        .with_context(|| format!("cannot build dashboard from {}", source))?;

    if args.snapshot {
        return print_snapshot(dash, &args, &source);
    }

    let tick_rate = Duration::from_millis(args.tick_ms.unwrap_or(config.tick_ms));
    let mut state = DashboardState::new(dash, &source);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut state, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn init_tracing(config: &DashboardConfig, to_stderr: bool) -> Result<()> {
    let level = &config.observability.log_level;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tui_dash={},dashkit={}", level, level).into());

    if to_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        // the terminal belongs to the UI
        let file = File::create(&config.observability.log_file).with_context(|| {
            format!("cannot open log file {}", config.observability.log_file)
        })?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    }
    Ok(())
}

fn load_dataset(args: &Args, config: &DashboardConfig) -> Result<(Vec<RawRecord>, String)> {
    if args.demo {
        let raw = MockDataGenerator::new(args.seed).generate(args.demo_records);
        return Ok((raw, format!("DEMO seed {}", args.seed)));
    }

    match args.data.as_ref().or(config.data_path.as_ref()) {
        Some(path) => {
            let raw = load_raw_records(path)
                .with_context(|| format!("cannot load records from {}", path))?;
            Ok((raw, path.clone()))
        }
        None => bail!("no dataset: pass --data <path>, set data_path in the config, or use --demo"),
    }
}

fn parse_info(value: &str) -> Result<Selection<InfoGathered>> {
    match value.trim().to_lowercase().as_str() {
        "all" => Ok(Selection::All),
        "yes" => Ok(Selection::Only(InfoGathered::Yes)),
        "no" => Ok(Selection::Only(InfoGathered::No)),
        other => bail!("invalid --info value '{}': expected all, yes or no", other),
    }
}

fn snapshot_events(args: &Args) -> Result<Vec<FilterEvent>> {
    if let (Some(from), Some(to)) = (args.from, args.to) {
        if from > to {
            bail!("--from {} is after --to {}", from, to);
        }
    }

    let mut events = Vec::new();
    if let Some(op) = &args.operative {
        events.push(FilterEvent::Operative(Selection::from_option(op)));
    }
    if let Some(activity) = &args.activity {
        events.push(FilterEvent::ActivityType(Selection::from_option(activity)));
    }
    if let Some(info) = &args.info {
        events.push(FilterEvent::InfoGathered(parse_info(info)?));
    }
    if let Some(to) = args.to {
        events.push(FilterEvent::DragMax(to));
    }
    if let Some(from) = args.from {
        events.push(FilterEvent::DragMin(from));
    }
    Ok(events)
}

fn print_snapshot(mut dash: Dashboard<PanelBoard>, args: &Args, source: &str) -> Result<()> {
    for event in snapshot_events(args)? {
        dash.dispatch(event);
    }

    let snapshot = Snapshot {
        source,
        state: dash.state(),
        date_range: dash.slider_label(),
        board: dash.renderer(),
    };
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut DashboardState,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, state))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
                        WEEK
                    } else {
                        1
                    };
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Tab => state.focus_next(),
                        KeyCode::BackTab => state.focus_prev(),
                        KeyCode::Left => state.step(-step),
                        KeyCode::Right => state.step(step),
                        KeyCode::Char('r') => state.reset(),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["tui-dash", "--demo", "--snapshot"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_parse_info() {
        assert_eq!(parse_info("YES").unwrap(), Selection::Only(InfoGathered::Yes));
        assert_eq!(parse_info(" all ").unwrap(), Selection::All);
        assert!(parse_info("maybe").is_err());
    }

    #[test]
    fn test_snapshot_events_from_flags() {
        let events = snapshot_events(&args(&[
            "--operative",
            "Operative No. 5",
            "--info",
            "no",
            "--from",
            "3",
            "--to",
            "9",
        ]))
        .unwrap();

        assert_eq!(
            events,
            vec![
                FilterEvent::Operative(Selection::Only("Operative No. 5".to_string())),
                FilterEvent::InfoGathered(Selection::Only(InfoGathered::No)),
                FilterEvent::DragMax(9),
                FilterEvent::DragMin(3),
            ]
        );
    }

    #[test]
    fn test_inverted_date_flags_are_rejected() {
        let err = snapshot_events(&args(&["--from", "7", "--to", "3"])).unwrap_err();
        assert!(err.to_string().contains("--from 7 is after --to 3"));

        assert_eq!(
            snapshot_events(&args(&["--from", "4", "--to", "4"])).unwrap(),
            vec![FilterEvent::DragMax(4), FilterEvent::DragMin(4)]
        );
    }

    #[test]
    fn test_demo_dataset_builds_dashboard() {
        let args = args(&["--seed", "3", "--demo-records", "120"]);
        let (raw, source) = load_dataset(&args, &DashboardConfig::default()).unwrap();

        assert_eq!(raw.len(), 120);
        assert_eq!(source, "DEMO seed 3");
        let dash = Dashboard::new(&raw, Default::default(), PanelBoard::new()).unwrap();
        assert_eq!(dash.renderer().record_count(), 120);
    }

    #[test]
    fn test_missing_dataset_is_an_error() {
        let args = Args::parse_from(["tui-dash"]);
        assert!(load_dataset(&args, &DashboardConfig::default()).is_err());
    }
}
