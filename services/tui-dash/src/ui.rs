// services/tui-dash/src/ui.rs
//
// Drawing. Everything here reads the panel board and control state; nothing
// filters or aggregates on its own.

use dashkit::palette::Rgb;
use dashkit::render::{ChartSpec, Mark};
use dashkit::{PanelContent, PanelId};
use ratatui::{
    prelude::*,
    widgets::*,
};

use crate::state::{Control, DashboardState, INFO_CHOICES};

// Dark slate background, record palette on top
mod colors {
    use ratatui::style::Color;

    pub const ACCENT: Color = Color::Rgb(181, 56, 30);
    pub const GOLD: Color = Color::Rgb(200, 160, 74);
    pub const STEEL: Color = Color::Rgb(93, 122, 107);
    pub const WHITE: Color = Color::Rgb(253, 246, 227);
    pub const SILVER: Color = Color::Rgb(147, 161, 161);
    pub const BG_DARK: Color = Color::Rgb(20, 14, 10);
    pub const BG_PANEL: Color = Color::Rgb(36, 26, 18);
}

fn tint(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

pub fn draw_ui(frame: &mut Frame, state: &DashboardState) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(colors::BG_DARK)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(4),  // Filter bar
            Constraint::Length(5),  // KPI cards
            Constraint::Length(9),  // Timeline
            Constraint::Min(8),     // Activity types + time of day
            Constraint::Min(8),     // Operatives + location types
            Constraint::Min(8),     // Subjects + locations
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    draw_header(frame, chunks[0], state);
    draw_filter_bar(frame, chunks[1], state);
    draw_panel(frame, chunks[2], state, PanelId::Kpis);
    draw_panel(frame, chunks[3], state, PanelId::Timeline);

    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[4]);
    draw_panel(frame, mid[0], state, PanelId::ActivityTypes);
    draw_panel(frame, mid[1], state, PanelId::TimeOfDay);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[5]);
    draw_panel(frame, lower[0], state, PanelId::Operatives);
    draw_panel(frame, lower[1], state, PanelId::LocationTypes);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[6]);
    draw_panel(frame, bottom[0], state, PanelId::Subjects);
    draw_panel(frame, bottom[1], state, PanelId::Locations);

    draw_footer(frame, chunks[7], state);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let board = state.dash.renderer();
    let title = Line::from(vec![
        Span::styled(
            " SURVEILLANCE ACTIVITY ",
            Style::default().fg(colors::WHITE).bg(colors::ACCENT).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", state.source),
            Style::default().fg(colors::GOLD).bold(),
        ),
        Span::raw("  "),
        Span::styled(board.count_label(), Style::default().fg(colors::WHITE).bold()),
        Span::styled(
            format!(" of {}", dashkit::render::format_count(state.dash.total_count())),
            Style::default().fg(colors::SILVER),
        ),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors::ACCENT))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(header, area);
}

fn focus_style(state: &DashboardState, control: Control) -> Style {
    if state.focus == control {
        Style::default().fg(colors::BG_DARK).bg(colors::GOLD).bold()
    } else {
        Style::default().fg(colors::WHITE)
    }
}

fn draw_filter_bar(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SILVER))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let label = Style::default().fg(colors::SILVER);
    let operative = state
        .operative_selection()
        .value()
        .cloned()
        .unwrap_or_else(|| "All operatives".to_string());
    let activity = state
        .activity_selection()
        .value()
        .cloned()
        .unwrap_or_else(|| "All types".to_string());

    let mut spans = vec![
        Span::styled("Operative ", label),
        Span::styled(format!("‹ {} ›", operative), focus_style(state, Control::Operative)),
        Span::raw("   "),
        Span::styled("Activity type ", label),
        Span::styled(format!("‹ {} ›", activity), focus_style(state, Control::ActivityType)),
        Span::raw("   "),
        Span::styled("Info gathered: ", label),
    ];
    let active_info = state.info_selection();
    for choice in INFO_CHOICES.iter() {
        let text = choice.value().map(|v| v.as_str()).unwrap_or("All");
        let style = if *choice == active_info {
            if state.focus == Control::InfoGathered {
                focus_style(state, Control::InfoGathered)
            } else {
                Style::default().fg(colors::WHITE).bg(colors::ACCENT)
            }
        } else {
            Style::default().fg(colors::SILVER)
        };
        spans.push(Span::styled(format!(" {} ", text), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    let track_width = rows[1].width.saturating_sub(40).clamp(10, 60) as usize;
    let mut slider = vec![Span::styled("Date range ", label)];
    slider.extend(slider_track(state, track_width));
    slider.push(Span::raw("  "));
    slider.push(Span::styled(
        state.dash.slider_label(),
        Style::default().fg(colors::ACCENT).bold(),
    ));
    frame.render_widget(Paragraph::new(Line::from(slider)), rows[1]);
}

/// Track with the selected span filled; handles drawn on top, the routed
/// handle last so it wins when both land on one cell.
fn slider_track(state: &DashboardState, width: usize) -> Vec<Span<'static>> {
    let fill = state.dash.slider().fill();
    let last = width.saturating_sub(1) as f64;
    let lo = ((fill.left / 100.0) * last).round() as usize;
    let hi = (((fill.left + fill.width) / 100.0) * last).round() as usize;

    let mut cells: Vec<Span<'static>> = (0..width)
        .map(|i| {
            if i >= lo && i <= hi {
                Span::styled("━", Style::default().fg(colors::ACCENT))
            } else {
                Span::styled("─", Style::default().fg(colors::SILVER))
            }
        })
        .collect();

    let handle_style = |control: Control| {
        if state.focus == control {
            Style::default().fg(colors::GOLD).bold()
        } else {
            Style::default().fg(colors::WHITE)
        }
    };
    let (min_cell, max_cell) = (
        Span::styled("◀", handle_style(Control::MinHandle)),
        Span::styled("▶", handle_style(Control::MaxHandle)),
    );
    let top = state.dash.slider().top_handle();
    let ordered = match top {
        dashkit::Handle::Max => [(lo, min_cell), (hi, max_cell)],
        dashkit::Handle::Min => [(hi, max_cell), (lo, min_cell)],
    };
    for (pos, span) in ordered {
        if let Some(cell) = cells.get_mut(pos) {
            *cell = span;
        }
    }
    cells
}

fn draw_panel(frame: &mut Frame, area: Rect, state: &DashboardState, panel: PanelId) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", panel.title().to_uppercase()),
            Style::default().fg(colors::GOLD).bold(),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SILVER))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL));

    match state.dash.renderer().get(panel) {
        Some(PanelContent::Kpis(cards)) => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cards.len().max(1) as u32); cards.len()])
                .split(inner);
            for (card, col) in cards.iter().zip(cols.iter()) {
                draw_stat_box(frame, *col, card.label, &card.value, tint(card.color));
            }
        }
        Some(PanelContent::Chart(spec)) => draw_chart(frame, area, block, spec),
        Some(PanelContent::Placeholder(text)) => {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                text.as_str(),
                Style::default().fg(colors::SILVER).add_modifier(Modifier::ITALIC),
            )))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(paragraph, area);
        }
        None => frame.render_widget(block, area),
    }
}

fn draw_stat_box(frame: &mut Frame, area: Rect, label: &str, value: &str, value_color: Color) {
    let text = vec![
        Line::from(Span::styled(
            label.to_uppercase(),
            Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(value_color).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_chart(frame: &mut Frame, area: Rect, block: Block, spec: &ChartSpec) {
    for mark in &spec.marks {
        match mark {
            Mark::BarX { data, .. } => {
                let label_width = data
                    .iter()
                    .map(|d| d.label.chars().count())
                    .max()
                    .unwrap_or(0)
                    .min(24);
                let bars: Vec<Bar> = data
                    .iter()
                    .map(|d| {
                        Bar::default()
                            .value(d.value as u64)
                            .label(Line::from(truncate(&d.label, label_width)))
                            .style(Style::default().fg(tint(d.color)))
                            .value_style(Style::default().fg(colors::BG_DARK).bg(tint(d.color)))
                    })
                    .collect();
                let chart = BarChart::default()
                    .block(block)
                    .direction(Direction::Horizontal)
                    .bar_width(1)
                    .bar_gap(0)
                    .data(BarGroup::default().bars(&bars));
                frame.render_widget(chart, area);
                return;
            }
            Mark::RectY { data, .. } => {
                let inner_width = area.width.saturating_sub(2) as usize;
                let bar_width = if data.is_empty() {
                    1
                } else {
                    (inner_width / data.len()).clamp(1, 3) as u16
                };
                let gap = if bar_width > 1 { 1 } else { 0 };
                // the tail of long timelines is what fits
                let visible = inner_width / (bar_width + gap).max(1) as usize;
                let skip = data.len().saturating_sub(visible);
                let bars: Vec<Bar> = data
                    .iter()
                    .skip(skip)
                    .map(|d| {
                        Bar::default()
                            .value(d.value as u64)
                            .text_value(String::new())
                            .style(Style::default().fg(tint(d.color)))
                    })
                    .collect();
                let chart = BarChart::default()
                    .block(block)
                    .bar_width(bar_width)
                    .bar_gap(gap)
                    .data(BarGroup::default().bars(&bars));
                frame.render_widget(chart, area);
                return;
            }
            Mark::RuleX { .. } | Mark::RuleY { .. } => {}
        }
    }
    frame.render_widget(block, area);
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let last = state
        .activity_log
        .last()
        .map(|entry| {
            let color = if entry.level == "WARN" { colors::GOLD } else { colors::STEEL };
            Span::styled(
                format!("  {} {}", entry.timestamp.format("%H:%M:%S"), entry.message),
                Style::default().fg(color),
            )
        })
        .unwrap_or_else(|| Span::raw(""));

    let help = Line::from(vec![
        Span::styled(" [Q] ", Style::default().fg(colors::BG_DARK).bg(colors::ACCENT)),
        Span::styled(" Quit ", Style::default().fg(colors::SILVER)),
        Span::raw(" "),
        Span::styled(" [TAB] ", Style::default().fg(colors::BG_DARK).bg(colors::GOLD)),
        Span::styled(" Next filter ", Style::default().fg(colors::SILVER)),
        Span::raw(" "),
        Span::styled(" [←/→] ", Style::default().fg(colors::BG_DARK).bg(colors::WHITE)),
        Span::styled(" Change (shift: week) ", Style::default().fg(colors::SILVER)),
        Span::raw(" "),
        Span::styled(" [R] ", Style::default().fg(colors::BG_DARK).bg(colors::SILVER)),
        Span::styled(" Reset ", Style::default().fg(colors::SILVER)),
        last,
    ]);

    let footer = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::ACCENT))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(footer, area);
}
