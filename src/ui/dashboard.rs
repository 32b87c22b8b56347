use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, SessionStatus};
use crate::ui::charting::{bar_data, chart_max};

const HORIZONTAL_MARGIN: u16 = 2;

pub fn render_dashboard(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1), // welcome
            Constraint::Length(5), // timer
            Constraint::Length(3), // stats
            Constraint::Length(3), // environment
            Constraint::Min(6),    // chart
            Constraint::Length(1), // legend
        ])
        .split(f.area());

    render_header(app, f, chunks[0]);
    render_timer(app, f, chunks[1]);
    render_stats(app, f, chunks[2]);
    render_env(app, f, chunks[3]);
    render_chart(app, f, chunks[4]);

    let legend = Paragraph::new(Span::styled(
        "(s)tart / (p)ause / stop (x) / (m/M) lo-fi / (h)omework / (e)xam / (q)uit",
        Style::default()
            .add_modifier(Modifier::ITALIC)
            .add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    f.render_widget(legend, chunks[5]);
}

fn render_header(app: &App, f: &mut Frame, area: Rect) {
    let user = app.user();
    let line = Line::from(vec![
        Span::styled(
            format!("Welcome {}", user.display_name()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", user.initials),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_timer(app: &App, f: &mut Frame, area: Rect) {
    let status_color = match app.status {
        SessionStatus::Ready => Color::Gray,
        SessionStatus::Running => Color::Green,
        SessionStatus::Paused => Color::Yellow,
        SessionStatus::Finished => Color::Cyan,
    };
    let timer = Paragraph::new(vec![
        Line::from(Span::styled(
            app.status.to_string(),
            Style::default().fg(status_color),
        )),
        Line::from(Span::styled(
            app.clock.display(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Session"));
    f.render_widget(timer, area);
}

fn render_stats(app: &App, f: &mut Frame, area: Rect) {
    let stats = &app.stats;
    let cells = [
        ("Today", stats.today_count.to_string()),
        ("Total", format!("{} min", stats.total_minutes)),
        ("Streak", stats.streak.to_string()),
        ("Completion", format!("{}%", stats.completion_pct)),
    ];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value), column) in cells.into_iter().zip(columns.iter()) {
        let widget = Paragraph::new(Span::styled(
            value,
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(widget, *column);
    }
}

fn render_env(app: &App, f: &mut Frame, area: Rect) {
    let text = match app.env() {
        Some(env) => format!(
            "Light {} lx   Air {}   Noise {} dB",
            env.lux, env.air, env.noise
        ),
        None => "Waiting for sensors…".to_string(),
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Environment"));
    f.render_widget(widget, area);
}

fn render_chart(app: &App, f: &mut Frame, area: Rect) {
    let data = bar_data(&app.chart);
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("This week (min, demo)"),
        )
        .data(data.as_slice())
        .max(chart_max(&app.chart))
        .bar_width(5)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Red))
        .value_style(Style::default().fg(Color::Black).bg(Color::Red));
    f.render_widget(chart, area);
}
