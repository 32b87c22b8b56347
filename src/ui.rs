pub mod charting;
pub mod dashboard;
pub mod login;
pub mod screen;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

/// Draw the current screen with any pending notices on top
pub fn draw(app: &App, f: &mut Frame) {
    screen::current_view(&app.screen).render(app, f);
    render_toasts(app, f);
}

/// A `width` x `height` rect centered in `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Stack notices in the bottom-right corner, newest at the bottom
fn render_toasts(app: &App, f: &mut Frame) {
    let area = f.area();
    let toasts: Vec<_> = app.toasts.iter().collect();
    let mut bottom = area.y + area.height;

    for toast in toasts.iter().rev() {
        let width = (toast.message.width() as u16 + 4).min(area.width);
        let height = 3;
        if bottom < area.y + height {
            break;
        }
        bottom -= height;
        let rect = Rect {
            x: area.x + area.width - width,
            y: bottom,
            width,
            height,
        };
        let widget = Paragraph::new(toast.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).bg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(Clear, rect);
        f.render_widget(widget, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(60, 10, area), Rect::new(20, 15, 60, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(5, 5, 20, 8);
        assert_eq!(centered_rect(60, 10, area), area);
    }
}
