use ratatui::Frame;

use crate::{
    app::{App, Screen},
    ui::{dashboard::render_dashboard, login::render_login},
};

/// A UI view boundary: responsible for rendering one screen
pub trait View {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Login gate
pub struct LoginView;

impl View for LoginView {
    fn render(&self, app: &App, f: &mut Frame) {
        render_login(app, f);
    }
}

/// Study dashboard
pub struct DashboardView;

impl View for DashboardView {
    fn render(&self, app: &App, f: &mut Frame) {
        render_dashboard(app, f);
    }
}

/// Helper to construct the appropriate view for the current screen
pub fn current_view(screen: &Screen) -> Box<dyn View> {
    match screen {
        Screen::Login => Box::new(LoginView),
        Screen::Dashboard => Box::new(DashboardView),
    }
}
