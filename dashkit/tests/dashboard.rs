// dashkit/tests/dashboard.rs
//
// End-to-end: raw JSON records through preprocessing, filtering and rendering
//

use dashkit::palette::ColorMap;
use dashkit::render::Mark;
use dashkit::{
    Dashboard, FilterEvent, InfoGathered, PanelBoard, PanelContent, PanelId, PanelLimits,
    RawRecord, Selection,
};
use proptest::prelude::*;

const OPERATIVES: [&str; 3] = ["Agent A", "Agent B", "Agent C"];
const ACTIVITIES: [&str; 4] = ["tail", "bribe", "rope", "interview"];

/// Ten days of activity, Jan 1 to Jan 10, two records a day.
fn january() -> Vec<RawRecord> {
    let mut raw: Vec<RawRecord> = (0..20)
        .map(|i| {
            let day = i / 2 + 1;
            let information = match i % 3 {
                0 => "YES",
                1 => "no",
                _ => "",
            };
            let location_type = if i % 2 == 0 { "saloon" } else { "depot" };
            let json = serde_json::json!({
                "date": format!("1907-01-{:02}T00:00:00", day),
                "time": format!("{:02}:30", (i * 5) % 24),
                "operative": OPERATIVES[i % OPERATIVES.len()],
                "activity": ACTIVITIES[i % ACTIVITIES.len()],
                "subject": format!("Subject {}", i % 5),
                "information": information,
                "locations": [{ "location_type": location_type }],
            });
            serde_json::from_value(json).unwrap()
        })
        .collect();

    // one undated record, always visible through date filtering
    raw.push(serde_json::from_value(serde_json::json!({ "operative": "Agent A" })).unwrap());
    raw
}

fn dashboard() -> Dashboard<PanelBoard> {
    Dashboard::new(&january(), PanelLimits::default(), PanelBoard::new()).unwrap()
}

fn activity_colors(board: &PanelBoard) -> Vec<(String, String)> {
    match board.get(PanelId::ActivityTypes) {
        Some(PanelContent::Chart(spec)) => spec
            .marks
            .iter()
            .flat_map(|m| match m {
                Mark::BarX { data, .. } => data
                    .iter()
                    .map(|d| (d.label.clone(), d.color.to_string()))
                    .collect::<Vec<_>>(),
                _ => Vec::new(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[test]
fn test_single_day_range_keeps_that_day() {
    let mut dash = dashboard();

    dash.dispatch(FilterEvent::DragMin(5));
    dash.dispatch(FilterEvent::DragMax(5));

    let dated: Vec<_> = dash
        .store()
        .filter(dash.records())
        .into_iter()
        .filter_map(|r| r.date)
        .collect();
    assert_eq!(dated.len(), 2);
    assert!(dated.iter().all(|d| d.to_string() == "1907-01-06"));
    // plus the undated record
    assert_eq!(dash.filtered_count(), 3);
}

#[test]
fn test_information_normalization() {
    let dash = dashboard();
    let records = dash.records();

    assert_eq!(records[0].info, InfoGathered::Yes);
    assert_eq!(records[1].info, InfoGathered::No);
    assert_eq!(records[2].info, InfoGathered::NotRecorded);
    assert_eq!(records[20].info, InfoGathered::NotRecorded);
}

#[test]
fn test_reset_restores_full_count() {
    let mut dash = dashboard();
    let total = dash.total_count();
    assert_eq!(dash.filtered_count(), total);

    let narrowed = dash.dispatch(FilterEvent::Operative(Selection::from_option("Agent A")));
    assert!(narrowed < total);

    dash.dispatch(FilterEvent::InfoGathered(Selection::Only(InfoGathered::Yes)));
    dash.dispatch(FilterEvent::DragMin(3));

    assert_eq!(dash.dispatch(FilterEvent::Reset), total);
    assert!(dash.store().is_default());
    assert!(dash.slider().is_full_range());
    assert_eq!(dash.renderer().count_label(), "21 records");
}

#[test]
fn test_panels_share_one_snapshot() {
    let mut dash = dashboard();
    dash.dispatch(FilterEvent::ActivityType(Selection::Only("tail".to_string())));

    let board = dash.renderer();
    let visible = board.record_count();
    assert_eq!(visible, dash.filtered_count());

    match board.get(PanelId::Kpis) {
        Some(PanelContent::Kpis(cards)) => assert_eq!(cards[0].value, visible.to_string()),
        other => panic!("unexpected {:?}", other),
    }
    let ranked = activity_colors(board);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].0, "tail");
}

#[test]
fn test_unmatched_filters_render_placeholders() {
    let mut dash = dashboard();
    dash.dispatch(FilterEvent::Operative(Selection::Only("Agent C".to_string())));
    dash.dispatch(FilterEvent::ActivityType(Selection::Only("nonexistent".to_string())));

    assert_eq!(dash.filtered_count(), 0);
    assert_eq!(
        dash.renderer().get(PanelId::ActivityTypes),
        Some(&PanelContent::Placeholder("No data for current filters.".to_string()))
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_activity_colors_survive_filtering(
        op in prop::sample::select(OPERATIVES.to_vec()),
        act in prop::sample::select(ACTIVITIES.to_vec()),
        lo in 0i64..10,
        hi in 0i64..10,
    ) {
        let mut dash = dashboard();
        let reference = ColorMap::build(dash.records());

        dash.dispatch(FilterEvent::Operative(Selection::Only(op.to_string())));
        dash.dispatch(FilterEvent::DragMin(lo));
        dash.dispatch(FilterEvent::DragMax(hi));
        for (label, color) in activity_colors(dash.renderer()) {
            prop_assert_eq!(color, reference.color_for(&label).to_string());
        }

        dash.dispatch(FilterEvent::Operative(Selection::All));
        dash.dispatch(FilterEvent::ActivityType(Selection::Only(act.to_string())));
        for (label, color) in activity_colors(dash.renderer()) {
            prop_assert_eq!(color, reference.color_for(&label).to_string());
        }
    }
}
