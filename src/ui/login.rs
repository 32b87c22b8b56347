use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, LoginField};
use crate::ui::centered_rect;

const FORM_WIDTH: u16 = 64;
const FORM_HEIGHT: u16 = 14;

pub fn render_login(app: &App, f: &mut Frame) {
    let area = centered_rect(FORM_WIDTH, FORM_HEIGHT, f.area());
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" StudyBuddy+ ")
        .title_alignment(Alignment::Center);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // heading
            Constraint::Length(1), // padding
            Constraint::Length(3), // email
            Constraint::Length(3), // password
            Constraint::Min(0),
            Constraint::Length(2), // hints
        ])
        .split(inner);

    let heading = Paragraph::new(Span::styled(
        "Sign in to start studying",
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    let form = &app.login;
    let field_style = |field: LoginField| {
        if form.focus == field {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    };

    let email = Paragraph::new(form.email.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Email")
            .border_style(field_style(LoginField::Email)),
    );
    f.render_widget(email, chunks[2]);

    let password_title = if form.reveal_password {
        "Password (visible)"
    } else {
        "Password"
    };
    let password = Paragraph::new(form.password_display()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(password_title)
            .border_style(field_style(LoginField::Password)),
    );
    f.render_widget(password, chunks[3]);

    let dim = Style::default().add_modifier(Modifier::DIM);
    let hints = Paragraph::new(vec![
        Line::from(Span::styled("(enter) sign in / (tab) next field", dim)),
        Line::from(Span::styled(
            "(f2) show password / (ctrl+n) create account / (esc) quit",
            dim,
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(hints, chunks[5]);
}
