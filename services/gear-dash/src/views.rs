// services/gear-dash/src/views.rs
//
// Rendering for the three dashboard views

use gearkit::assessment::{self, GaugeTone, RiskBand, WearBand};
use gearkit::catalog;
use gearkit::simulator::Phase;
use gearkit::types::{
    ComponentStatus, FaultVerdict, HealthStatus, KpiStatus, NotificationVariant, Priority,
    Severity, StatusItem, Trend,
};
use gearkit::VibrationSeries;
use ratatui::{
    prelude::*,
    symbols,
    widgets::*,
};

use crate::state::{DashboardState, InputMode, LogLevel, View};

// Color palette: Steel, Amber, Signal green, Alarm red
mod colors {
    use ratatui::style::Color;

    pub const WHITE: Color = Color::Rgb(236, 239, 244);
    pub const SILVER: Color = Color::Rgb(147, 161, 161);
    pub const STEEL: Color = Color::Rgb(76, 86, 106);
    pub const PRIMARY: Color = Color::Rgb(255, 140, 0);
    pub const BG_DARK: Color = Color::Rgb(15, 17, 21);
    pub const BG_PANEL: Color = Color::Rgb(28, 32, 40);
    pub const SUCCESS: Color = Color::Rgb(133, 153, 0);
    pub const WARNING: Color = Color::Rgb(255, 193, 37);
    pub const INFO: Color = Color::Rgb(38, 139, 210);
    pub const ERROR: Color = Color::Rgb(220, 50, 47);
    pub const ACCENT: Color = Color::Rgb(211, 54, 130);

    pub const SENSORS: [Color; 4] = [PRIMARY, SUCCESS, ERROR, ACCENT];
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
            Constraint::Length(3), // Header
            Constraint::Min(10),   // View
            Constraint::Length(2), // Footer
        ])
        .split(area);

    draw_header(frame, chunks[0], state);
    match state.view {
        View::Dashboard => draw_dashboard(frame, chunks[1], state),
        View::Predictive => draw_predictive(frame, chunks[1], state),
        View::Upload => draw_upload(frame, chunks[1], state),
    }
    draw_footer(frame, chunks[2], state);
    draw_toasts(frame, area, state);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title.to_uppercase()),
            Style::default().fg(colors::WHITE).bold(),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::STEEL))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL))
}

fn badge(label: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", label),
        Style::default().fg(colors::BG_DARK).bg(color).bold(),
    )
}

/// Textual meter, e.g. `███████░░░`. `percent` may exceed 100; the bar is
/// drawn full in that case.
fn meter(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn health_color(status: HealthStatus) -> Color {
    match status {
        HealthStatus::Healthy => colors::SUCCESS,
        HealthStatus::Warning => colors::WARNING,
        HealthStatus::Critical => colors::ERROR,
    }
}

fn tone_color(tone: GaugeTone) -> Color {
    match tone {
        GaugeTone::Nominal => colors::SUCCESS,
        GaugeTone::Warning => colors::WARNING,
        GaugeTone::Critical => colors::ERROR,
    }
}

fn band_color(band: RiskBand) -> Color {
    match band {
        RiskBand::Low => colors::SUCCESS,
        RiskBand::Medium => colors::WARNING,
        RiskBand::High => colors::ERROR,
    }
}

fn wear_color(band: WearBand) -> Color {
    match band {
        WearBand::Nominal => colors::SUCCESS,
        WearBand::Moderate => colors::INFO,
        WearBand::Elevated => colors::WARNING,
        WearBand::Critical => colors::ERROR,
    }
}

fn component_color(status: ComponentStatus) -> Color {
    match status {
        ComponentStatus::Excellent => colors::SUCCESS,
        ComponentStatus::Good => colors::INFO,
        ComponentStatus::Monitor => colors::WARNING,
        ComponentStatus::Critical => colors::ERROR,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => colors::SUCCESS,
        Priority::Medium => colors::INFO,
        Priority::High => colors::WARNING,
        Priority::Critical => colors::ERROR,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => colors::SUCCESS,
        Severity::Medium => colors::WARNING,
        Severity::High => colors::ERROR,
    }
}

fn kpi_color(status: KpiStatus) -> Color {
    match status {
        KpiStatus::Good => colors::SUCCESS,
        KpiStatus::Monitor => colors::INFO,
        KpiStatus::Warning => colors::WARNING,
        KpiStatus::Critical => colors::ERROR,
    }
}

fn verdict_color(verdict: FaultVerdict) -> Color {
    match verdict {
        FaultVerdict::Healthy | FaultVerdict::Optimal => colors::SUCCESS,
        FaultVerdict::Monitor => colors::WARNING,
        FaultVerdict::Detected => colors::ERROR,
    }
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

fn draw_header(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(colors::PRIMARY))
        .style(Style::default().bg(colors::BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(48)])
        .split(inner);

    let brand = Line::from(vec![
        Span::styled(
            " GEAR WHISPERER ",
            Style::default().fg(colors::BG_DARK).bg(colors::PRIMARY).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            "AI-Powered Predictive Maintenance System",
            Style::default().fg(colors::SILVER),
        ),
        Span::raw("  "),
        Span::styled("● SYSTEM ONLINE", Style::default().fg(colors::SUCCESS).bold()),
    ]);
    frame.render_widget(Paragraph::new(brand), chunks[0]);

    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| Line::from(format!("{} {}", i + 1, v.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.view.index())
        .style(Style::default().fg(colors::SILVER))
        .highlight_style(Style::default().fg(colors::PRIMARY).bold())
        .divider("|");
    frame.render_widget(tabs, chunks[1]);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let keys: Vec<(&str, &str)> = if state.input_mode == InputMode::Editing {
        vec![("ENTER", "Analyze"), ("ESC", "Cancel"), ("BKSP", "Delete")]
    } else if state.view == View::Upload {
        vec![("Q", "Quit"), ("1-3/TAB", "Switch view"), ("I", "Select dataset"), ("R", "Regenerate")]
    } else {
        vec![("Q", "Quit"), ("1-3/TAB", "Switch view"), ("R", "Regenerate")]
    };

    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(
            format!(" [{}] ", key),
            Style::default().fg(colors::BG_DARK).bg(colors::SILVER),
        ));
        spans.push(Span::styled(format!(" {}  ", label), Style::default().fg(colors::SILVER)));
    }

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::STEEL))
                .style(Style::default().bg(colors::BG_DARK)),
        );
    frame.render_widget(footer, area);
}

fn draw_toasts(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(toast) = state.toasts.last() else {
        return;
    };
    let width = area.width.min(56);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height: 4.min(area.height),
    };

    let color = match toast.notification.variant {
        NotificationVariant::Info => colors::SUCCESS,
        NotificationVariant::Destructive => colors::ERROR,
    };
    let popup = Paragraph::new(toast.notification.description.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(colors::WHITE))
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", toast.notification.title),
                    Style::default().fg(color).bold(),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(colors::BG_PANEL)),
        );

    frame.render_widget(Clear, rect);
    frame.render_widget(popup, rect);
}

// ---------------------------------------------------------------------------
// Dashboard view
// ---------------------------------------------------------------------------

fn draw_dashboard(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Status tiles
            Constraint::Min(10),   // Charts
            Constraint::Length(8), // Analytics
        ])
        .split(area);

    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    for (item, rect) in state.status_items.iter().zip(tiles.iter()) {
        draw_status_tile(frame, *rect, item);
    }

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    draw_vibration_chart(
        frame,
        charts[0],
        "Real-Time Vibration Analysis",
        "SENSOR-01-04",
        state.realtime_chart.as_ref(),
    );
    draw_vibration_chart(
        frame,
        charts[1],
        "Frequency Domain Analysis",
        "FFT-SPECTRUM",
        state.spectrum_chart.as_ref(),
    );

    let analytics = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, 3); 3])
        .split(rows[2]);
    draw_load_analysis(frame, analytics[0], state);
    draw_fault_detection(frame, analytics[1], state);
    draw_sensor_network(frame, analytics[2], state);
}

fn draw_status_tile(frame: &mut Frame, area: Rect, item: &StatusItem) {
    let color = health_color(item.status);
    let border = if item.status == HealthStatus::Healthy {
        colors::STEEL
    } else {
        color
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors::BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut value = vec![Span::styled(
        item.value.clone(),
        Style::default().fg(colors::WHITE).bold(),
    )];
    if let Some(unit) = &item.unit {
        value.push(Span::styled(format!(" {}", unit), Style::default().fg(colors::SILVER)));
    }

    let mut text = vec![
        Line::from(vec![
            Span::styled(
                item.title.to_uppercase(),
                Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
            ),
            Span::raw(" "),
            badge(item.status.label(), color),
        ]),
        Line::from(value),
    ];
    if let Some(description) = &item.description {
        text.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(colors::SILVER),
        )));
    }

    frame.render_widget(Paragraph::new(text), inner);
}

fn draw_vibration_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    sensor_id: &str,
    series: Option<&VibrationSeries>,
) {
    let mut title_spans = vec![
        Span::styled(format!(" {} ", title.to_uppercase()), Style::default().fg(colors::WHITE).bold()),
        Span::styled(format!("[{}] ", sensor_id), Style::default().fg(colors::PRIMARY)),
    ];
    if let Some(series) = series {
        let tag_color = if series.is_synthetic() {
            colors::WARNING
        } else {
            colors::SUCCESS
        };
        title_spans.push(badge(series.source().tag(), tag_color));
    }

    let block = Block::default()
        .title(Line::from(title_spans))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::STEEL))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL));

    let Some(series) = series else {
        frame.render_widget(
            Paragraph::new("Waiting for data...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(colors::SILVER))
                .block(block),
            area,
        );
        return;
    };

    let points: Vec<Vec<(f64, f64)>> = (0..gearkit::vibration::CHANNELS)
        .map(|ch| series.channel_points(ch))
        .collect();
    let datasets: Vec<Dataset> = points
        .iter()
        .enumerate()
        .map(|(ch, data)| {
            Dataset::default()
                .name(format!("Sensor {}", ch + 1))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors::SENSORS[ch]))
                .data(data)
        })
        .collect();

    let ([x_min, x_max], [y_min, y_max]) = series.bounds();
    let y_bounds = [y_min.floor(), y_max.ceil()];
    let axis_style = Style::default().fg(colors::SILVER);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([x_min, x_max])
                .labels(vec![format!("{:.0}", x_min), format!("{:.0}", x_max)]),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds(y_bounds)
                .labels(vec![format!("{:.1}", y_bounds[0]), format!("{:.1}", y_bounds[1])]),
        )
        .legend_position(Some(LegendPosition::TopRight));

    frame.render_widget(chart, area);
}

fn draw_load_analysis(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let load = &state.load;
    let row = |label: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<18}", label), Style::default().fg(colors::SILVER)),
            Span::styled(value, Style::default().fg(color).bold()),
        ])
    };
    let lines = vec![
        row("Current Load:", format!("{:.0}%", load.current_percent), colors::WHITE),
        row("Peak Load (24h):", format!("{:.0}%", load.peak_24h_percent), colors::WARNING),
        row("Avg Load (24h):", format!("{:.0}%", load.average_24h_percent), colors::WHITE),
        row("Efficiency:", format!("{:.1}%", load.efficiency_percent), colors::SUCCESS),
    ];
    frame.render_widget(Paragraph::new(lines).block(panel("Load Analysis")), area);
}

fn draw_fault_detection(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let lines: Vec<Line> = state
        .findings
        .iter()
        .map(|f| {
            Line::from(vec![
                Span::styled(format!("{:<16}", format!("{}:", f.check)), Style::default().fg(colors::SILVER)),
                badge(f.verdict.label(), verdict_color(f.verdict)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(panel("AI Fault Detection")), area);
}

fn draw_sensor_network(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let lines: Vec<Line> = state
        .sensors
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled(
                    format!("{:<20}", format!("{} ({}):", s.channel.label, s.channel.axis)),
                    Style::default().fg(colors::SILVER),
                ),
                Span::styled("● ACTIVE ", Style::default().fg(colors::SUCCESS)),
                Span::styled(format!("({:.1}%)", s.availability), Style::default().fg(colors::SILVER)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(panel("Sensor Network")), area);
}

// ---------------------------------------------------------------------------
// Predictive view
// ---------------------------------------------------------------------------

fn draw_predictive(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    draw_maintenance_timeline(frame, top[0], state);
    draw_risk_assessment(frame, top[1], state);
    draw_component_wear(frame, bottom[0], state);
    draw_performance_trends(frame, bottom[1], state);
}

fn draw_maintenance_timeline(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = panel("Maintenance Timeline");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let rows: Vec<Row> = state
        .maintenance
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(Span::styled(e.status.glyph(), Style::default().fg(colors::PRIMARY))),
                Cell::from(Span::styled(e.title.clone(), Style::default().fg(colors::WHITE))),
                Cell::from(Span::styled(
                    e.priority.label(),
                    Style::default().fg(priority_color(e.priority)).bold(),
                )),
                Cell::from(Span::styled(
                    format!("{} days", e.days_until),
                    Style::default().fg(colors::PRIMARY),
                )),
                Cell::from(Span::styled(e.duration.clone(), Style::default().fg(colors::SILVER))),
                Cell::from(Span::styled(
                    assessment::format_cost(e.estimated_cost as u64),
                    Style::default().fg(colors::ACCENT),
                )),
            ])
        })
        .collect();

    let header_style = Style::default().fg(colors::PRIMARY).bold();
    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Min(18),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(vec![
            Cell::from(""),
            Cell::from(Span::styled("TASK", header_style)),
            Cell::from(Span::styled("PRIORITY", header_style)),
            Cell::from(Span::styled("DUE IN", header_style)),
            Cell::from(Span::styled("DURATION", header_style)),
            Cell::from(Span::styled("COST", header_style)),
        ])
        .bottom_margin(1),
    );
    frame.render_widget(table, chunks[0]);

    let horizon = state.config.ui.maintenance_horizon_days;
    let total = assessment::maintenance_cost_within(&state.maintenance, horizon);
    let summary = Line::from(vec![
        Span::styled(
            format!("Total Maintenance Cost ({} days): ", horizon),
            Style::default().fg(colors::SILVER),
        ),
        Span::styled(assessment::format_cost(total), Style::default().fg(colors::PRIMARY).bold()),
    ]);
    frame.render_widget(Paragraph::new(summary).alignment(Alignment::Right), chunks[1]);
}

fn draw_risk_assessment(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let score = assessment::overall_risk(&state.risk_factors);
    let band = RiskBand::from_score(score);

    let block = panel("Risk Assessment").title(
        Line::from(badge(&format!("{}% Risk", score), band_color(band))).right_aligned(),
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4), Constraint::Length(3)])
        .split(inner);

    let overall = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(tone_color(GaugeTone::from_ratio(score as f64, 100.0)))
                .bg(colors::BG_DARK),
        )
        .percent(score.min(100) as u16)
        .label(format!("Overall System Risk {}% - {}", score, band.label()));
    frame.render_widget(overall, Rect { height: 1, ..chunks[0] });

    let mut lines = Vec::new();
    for factor in &state.risk_factors {
        let ratio = assessment::factor_ratio(factor);
        let tone = GaugeTone::from_ratio(factor.current, factor.threshold);
        let mut bar = vec![
            Span::styled(meter(ratio, 16), Style::default().fg(tone_color(tone))),
            Span::styled(
                format!(" {:.0}/{:.0}", factor.current, factor.threshold),
                Style::default().fg(colors::WHITE),
            ),
        ];
        if assessment::is_over_threshold(factor) {
            bar.push(Span::styled(
                format!(" ▲ OVER {:.0}%", ratio),
                Style::default().fg(colors::ERROR).bold(),
            ));
        }

        lines.push(Line::from(vec![
            Span::styled(format!("{:<18}", factor.category), Style::default().fg(colors::WHITE)),
            Span::styled(format!("{} ", factor.trend.arrow()), Style::default().fg(trend_color(factor.trend))),
            badge(factor.severity.label(), severity_color(factor.severity)),
        ]));
        lines.push(Line::from(bar));
    }
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    let recommendations: Vec<Line> = catalog::RISK_RECOMMENDATIONS
        .iter()
        .take(chunks[2].height as usize)
        .map(|r| Line::from(Span::styled(format!("• {}", r), Style::default().fg(colors::SILVER))))
        .collect();
    frame.render_widget(Paragraph::new(recommendations), chunks[2]);
}

fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Increasing => colors::WARNING,
        Trend::Decreasing => colors::INFO,
        Trend::Stable => colors::SILVER,
    }
}

fn draw_component_wear(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = panel("Component Wear Analysis");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let summary = assessment::summarize_components(&state.components);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} Critical", summary.critical), Style::default().fg(colors::ERROR).bold()),
            Span::raw("  |  "),
            Span::styled(format!("{} Monitor", summary.monitor), Style::default().fg(colors::WARNING).bold()),
            Span::raw("  |  "),
            Span::styled(format!("{} Good", summary.good), Style::default().fg(colors::SUCCESS).bold()),
        ]),
        Line::from(""),
    ];

    for component in &state.components {
        let band = WearBand::from_wear(component.wear_level);
        lines.push(Line::from(vec![
            Span::styled(format!("{:<24}", component.name), Style::default().fg(colors::WHITE)),
            badge(component.status.label(), component_color(component.status)),
        ]));

        let mut detail = vec![
            Span::styled(meter(component.wear_level as f64, 12), Style::default().fg(wear_color(band))),
            Span::styled(format!(" {:>3}%", component.wear_level), Style::default().fg(colors::WHITE)),
            Span::styled(
                format!(
                    "  left {} of {}  replaced {}",
                    component.remaining_life, component.expected_life, component.last_replaced
                ),
                Style::default().fg(colors::SILVER),
            ),
        ];
        if assessment::needs_replacement(component) {
            detail.push(Span::styled(
                "  ⚠ Replacement Required Soon",
                Style::default().fg(colors::ERROR).bold(),
            ));
        }
        lines.push(Line::from(detail));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Next Maintenance Window",
        Style::default().fg(colors::PRIMARY).bold(),
    )));
    for (label, note) in catalog::MAINTENANCE_WINDOW {
        lines.push(Line::from(vec![
            Span::styled(format!("• {}: ", label), Style::default().fg(colors::WHITE)),
            Span::styled(note, Style::default().fg(colors::SILVER)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_performance_trends(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = panel("Performance Trends");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let kpi_rows = state.kpis.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(kpi_rows), Constraint::Min(5)])
        .split(chunks[0]);

    let kpis: Vec<Line> = state
        .kpis
        .iter()
        .map(|k| {
            Line::from(vec![
                Span::styled(format!("{:<19}", k.metric), Style::default().fg(colors::SILVER)),
                Span::styled(
                    format!("{} {:<4}", k.current, k.unit),
                    Style::default().fg(colors::WHITE).bold(),
                ),
                Span::styled(
                    format!(" {} {:>6}", k.trend.arrow(), assessment::format_change(k.change_percent)),
                    Style::default().fg(kpi_color(k.status)),
                ),
                Span::styled(
                    format!("  base {} {}", k.baseline, k.unit),
                    Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(kpis), left[0]);

    draw_efficiency_chart(frame, left[1], state);

    let mut lines = vec![Line::from(Span::styled(
        "Degradation Factors",
        Style::default().fg(colors::PRIMARY).bold(),
    ))];
    for factor in &state.degradation {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", factor.name), Style::default().fg(colors::WHITE)),
            Span::styled(factor.impact.clone(), Style::default().fg(colors::ERROR)),
        ]));
        lines.push(Line::from(vec![
            Span::styled(meter(factor.weight as f64, 12), Style::default().fg(colors::WARNING)),
            Span::styled(format!(" {}", factor.note), Style::default().fg(colors::SILVER)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Performance Forecast",
        Style::default().fg(colors::PRIMARY).bold(),
    )));
    for (label, note) in catalog::PERFORMANCE_FORECAST {
        lines.push(Line::from(vec![
            Span::styled(format!("• {}: ", label), Style::default().fg(colors::WHITE)),
            Span::styled(note, Style::default().fg(colors::SILVER)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[1]);
}

fn draw_efficiency_chart(frame: &mut Frame, area: Rect, state: &DashboardState) {
    if state.performance.is_empty() {
        return;
    }
    let points: Vec<(f64, f64)> = state
        .performance
        .iter()
        .enumerate()
        .map(|(i, s)| (i as f64, s.efficiency))
        .collect();

    let (min, max) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));
    let y_bounds = [min - 1.0, max + 1.0];
    let x_max = (points.len() - 1) as f64;

    let dataset = Dataset::default()
        .name("Efficiency %")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(colors::PRIMARY))
        .data(&points);

    let months: Vec<String> = state.performance.iter().map(|s| s.month.clone()).collect();
    let axis_style = Style::default().fg(colors::SILVER);
    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(Span::styled(" Efficiency Trend (6 Months) ", Style::default().fg(colors::SILVER)))
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::STEEL)),
        )
        .x_axis(Axis::default().style(axis_style).bounds([0.0, x_max]).labels(months))
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds(y_bounds)
                .labels(vec![format!("{:.1}", y_bounds[0]), format!("{:.1}", y_bounds[1])]),
        )
        .legend_position(None);

    frame.render_widget(chart, area);
}

// ---------------------------------------------------------------------------
// Upload view
// ---------------------------------------------------------------------------

fn draw_upload(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(4), // Progress
            Constraint::Length(7), // Selected files
            Constraint::Min(7),    // Results
        ])
        .split(columns[0]);

    draw_path_input(frame, left[0], state);
    draw_upload_progress(frame, left[1], state);
    draw_selected_files(frame, left[2], state);
    draw_analysis_results(frame, left[3], state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(5)])
        .split(columns[1]);
    draw_dataset_help(frame, right[0], state);
    draw_activity_panel(frame, right[1], state);
}

fn draw_path_input(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let editing = state.input_mode == InputMode::Editing;
    let (text, style) = if !state.input_enabled() {
        ("input disabled while analysis is running".to_string(), Style::default().fg(colors::STEEL))
    } else if editing {
        (format!("{}▏", state.path_input), Style::default().fg(colors::WHITE))
    } else if state.path_input.is_empty() {
        ("press [I] and type a folder or files (space separated)".to_string(), Style::default().fg(colors::SILVER))
    } else {
        (state.path_input.clone(), Style::default().fg(colors::WHITE))
    };

    let border = if editing { colors::PRIMARY } else { colors::STEEL };
    let input = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .title(Span::styled(
                " DATASET FOLDER OR FILES (HEALTHY & BROKEN TEETH) ",
                Style::default().fg(colors::WHITE).bold(),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors::BG_PANEL)),
    );
    frame.render_widget(input, area);
}

fn draw_upload_progress(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = panel("Progress");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let phase = state.phase();
    let files = state
        .simulator
        .session()
        .map(|s| s.selection().len())
        .unwrap_or(0);
    let (status, color) = match phase {
        Phase::Idle => ("Waiting for a dataset".to_string(), colors::SILVER),
        Phase::Uploading => (format!("Processing {} files...", files), colors::PRIMARY),
        Phase::Analyzing => ("Analyzing vibration patterns...".to_string(), colors::WARNING),
        Phase::Complete => (format!("Analyzed {} files", files), colors::SUCCESS),
        Phase::Failed => ("Analysis failed".to_string(), colors::ERROR),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            badge(phase.label(), color),
            Span::styled(format!(" {}", status), Style::default().fg(color)),
        ])),
        chunks[0],
    );

    if phase.is_active() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(colors::PRIMARY).bg(colors::BG_DARK))
            .percent(state.simulator.progress().min(100) as u16)
            .label(format!("{}%", state.simulator.progress()));
        frame.render_widget(gauge, chunks[1]);
    }
}

fn draw_selected_files(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(session) = state.simulator.session() else {
        frame.render_widget(
            Paragraph::new("No dataset selected")
                .style(Style::default().fg(colors::SILVER))
                .block(panel("Selected Files")),
            area,
        );
        return;
    };

    let files = session.selection().files();
    let visible = area.height.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = files
        .iter()
        .take(visible.saturating_sub(1))
        .map(|f| {
            let (marker, color) = if f.accepted {
                ("  ", colors::WHITE)
            } else {
                ("? ", colors::WARNING)
            };
            Line::from(Span::styled(
                format!("{}{}", marker, f.path.display()),
                Style::default().fg(color),
            ))
        })
        .collect();
    if files.len() > lines.len() {
        lines.push(Line::from(Span::styled(
            format!("  ... and {} more", files.len() - lines.len()),
            Style::default().fg(colors::SILVER),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(panel(&format!("Selected Files ({})", files.len()))),
        area,
    );
}

fn draw_analysis_results(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = panel("Analysis Results");
    let result = state.simulator.session().and_then(|s| s.result());

    let Some(result) = result else {
        frame.render_widget(
            Paragraph::new("No analysis results yet")
                .style(Style::default().fg(colors::SILVER))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    };

    let subset = |label: &str, color: Color, files: usize, vibration: f64, status: &str| {
        vec![
            Line::from(vec![
                badge(label, color),
                Span::styled(format!(" {} files", files), Style::default().fg(colors::WHITE).bold()),
            ]),
            Line::from(Span::styled(
                format!("  Avg Vibration: {} mm/s", vibration),
                Style::default().fg(colors::SILVER),
            )),
            Line::from(Span::styled(format!("  Status: {}", status), Style::default().fg(colors::SILVER))),
        ]
    };

    let mut lines = subset(
        "HEALTHY",
        colors::SUCCESS,
        result.healthy.files,
        result.healthy.avg_vibration,
        &result.healthy.status,
    );
    lines.extend(subset(
        "FAULTY",
        colors::ERROR,
        result.faulty.files,
        result.faulty.avg_vibration,
        &result.faulty.status,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Total Files Analyzed: ", Style::default().fg(colors::SILVER)),
        Span::styled(result.total_files.to_string(), Style::default().fg(colors::PRIMARY).bold()),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_dataset_help(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let mut lines = vec![Line::from(Span::styled(
        "Supported formats:",
        Style::default().fg(colors::WHITE).bold(),
    ))];
    for f in catalog::SUPPORTED_FORMATS {
        lines.push(Line::from(Span::styled(format!("• {}", f), Style::default().fg(colors::SILVER))));
    }
    lines.push(Line::from(Span::styled(
        "Dataset Requirements:",
        Style::default().fg(colors::PRIMARY).bold(),
    )));
    for r in catalog::DATASET_REQUIREMENTS {
        lines.push(Line::from(Span::styled(format!("• {}", r), Style::default().fg(colors::SILVER))));
    }
    lines.push(Line::from(vec![
        Span::styled("Sample dataset: ", Style::default().fg(colors::WHITE)),
        Span::styled(
            state.config.dataset.sample_url.clone(),
            Style::default().fg(colors::INFO).add_modifier(Modifier::UNDERLINED),
        ),
    ]));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(panel("Dataset Upload")),
        area,
    );
}

fn draw_activity_panel(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let logs: Vec<Line> = state
        .activity_log
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| {
            let (prefix, color) = match entry.level {
                LogLevel::Error => ("[ERR]", colors::ERROR),
                LogLevel::Warn => ("[WRN]", colors::WARNING),
                LogLevel::Info => ("[INF]", colors::SUCCESS),
            };

            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
                ),
                Span::styled(format!("{} ", prefix), Style::default().fg(color)),
                Span::styled(entry.message.clone(), Style::default().fg(colors::WHITE)),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(logs).block(panel("Activity Log")).wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearkit::config::DashboardConfig;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_meter_fills_proportionally() {
        assert_eq!(meter(50.0, 10), "█████░░░░░");
        assert_eq!(meter(0.0, 4), "░░░░");
        // Over-threshold values draw a full bar.
        assert_eq!(meter(102.2, 4), "████");
    }

    fn render(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|frame| draw_ui(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_every_view_renders() {
        let mut state = DashboardState::new(DashboardConfig::default());
        for view in View::ALL {
            state.select_view(view);
            let screen = render(&state);
            assert!(screen.contains("GEAR WHISPERER"));
        }
    }

    #[test]
    fn test_upload_view_lists_selected_files() {
        let mut state = DashboardState::new(DashboardConfig::default());
        state.select_view(View::Upload);
        state.start_analysis(gearkit::FileSelection::synthetic(12), std::time::Instant::now());

        let screen = render(&state);
        assert!(screen.contains("SELECTED FILES (12)"));
        assert!(screen.contains("sample_0000.csv"));
        assert!(screen.contains("and 8 more"));
    }

    #[test]
    fn test_predictive_view_shows_overall_risk() {
        let mut state = DashboardState::new(DashboardConfig::default());
        state.select_view(View::Predictive);
        let screen = render(&state);
        assert!(screen.contains("91% Risk"));
        assert!(screen.contains("$3,600"));
    }
}
