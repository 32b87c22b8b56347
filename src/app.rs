use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::clock::SessionClock;
use crate::config::Config;
use crate::env::{EnvPoller, EnvReading};
use crate::session::{User, UserState};
use crate::stats::{compute_stats, CompletionMetric, Stats};
use crate::store::SessionStore;
use crate::toast::Toasts;
use crate::ui::charting::{demo_week, DAYS_IN_WEEK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub reveal_password: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            reveal_password: false,
        }
    }
}

impl LoginForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    /// Password as it should be drawn
    pub fn password_display(&self) -> String {
        if self.reveal_password {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }
}

/// Status line shown above the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionStatus {
    Ready,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything the UI needs, owned in one place and passed by reference.
pub struct App {
    pub screen: Screen,
    pub login: LoginForm,
    pub state: UserState,
    pub clock: SessionClock,
    pub status: SessionStatus,
    pub stats: Stats,
    pub chart: [u64; DAYS_IN_WEEK],
    pub toasts: Toasts,
    store: SessionStore,
    env_poller: Option<EnvPoller>,
    metric: Box<dyn CompletionMetric>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("status", &self.status)
            .field("elapsed", &self.clock.elapsed())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

impl App {
    /// Hydrate from the store. A remembered user skips the login gate.
    pub fn new(store: SessionStore, config: &Config, now: Instant) -> Self {
        let metric = config.completion_metric();
        let state = store.load();
        let mut app = Self {
            screen: Screen::Login,
            login: LoginForm::default(),
            state,
            clock: SessionClock::new(),
            status: SessionStatus::Ready,
            stats: Stats::default(),
            chart: [0; DAYS_IN_WEEK],
            toasts: Toasts::new(Duration::from_millis(config.toast_ms)),
            store,
            env_poller: None,
            metric,
        };

        if app.state.has_logged_in_user() {
            info!("remembered user, skipping login");
            app.show_dashboard(now);
        }
        app
    }

    /// Replace the completion metric, e.g. with a deterministic one.
    pub fn with_metric(mut self, metric: impl CompletionMetric + 'static) -> Self {
        self.metric = Box::new(metric);
        self.refresh_stats();
        self
    }

    pub fn user(&self) -> User {
        self.state.user.clone().unwrap_or_else(User::guest)
    }

    /// Latest simulated environment sample
    pub fn env(&self) -> Option<&EnvReading> {
        self.state.last_env.as_ref()
    }

    pub fn submit_login(&mut self, now: Instant) {
        let email = self.login.email.trim();
        if email.is_empty() || self.login.password.is_empty() {
            self.toasts.push("Fill in both fields", now);
            return;
        }
        let user = User::from_email(email);
        info!(email = %user.email, "logged in");
        self.store.record_login(&mut self.state, user);
        self.login.password.clear();
        self.show_dashboard(now);
    }

    pub fn create_account(&mut self, now: Instant) {
        self.toasts.push(
            "Account creation is simulated: enter an email and password",
            now,
        );
    }

    pub fn show_dashboard(&mut self, now: Instant) {
        self.screen = Screen::Dashboard;
        self.chart = demo_week(&mut rand::thread_rng());
        self.env_poller = Some(EnvPoller::new(now));
        self.poll_env(now);
        self.refresh_stats();
    }

    pub fn refresh_stats(&mut self) {
        let today = Local::now().date_naive();
        self.stats = compute_stats(&self.state, today, self.metric.as_ref());
    }

    pub fn start_session(&mut self, now: Instant) {
        match self.clock.start(now) {
            Ok(()) => {
                self.store.record_start(&mut self.state, now_millis());
                self.status = SessionStatus::Running;
                self.toasts.push("Session started", now);
            }
            Err(notice) => self.toasts.push(notice.to_string(), now),
        }
    }

    pub fn pause_session(&mut self, now: Instant) {
        match self.clock.pause() {
            Ok(()) => {
                self.status = SessionStatus::Paused;
                self.toasts.push("Session paused", now);
            }
            Err(notice) => self.toasts.push(notice.to_string(), now),
        }
    }

    pub fn stop_session(&mut self, now: Instant) {
        match self.clock.stop(now_millis()) {
            Ok(session) => {
                info!(duration = session.duration, "session recorded");
                self.store.record_session(&mut self.state, session);
                self.status = SessionStatus::Finished;
                self.refresh_stats();
                self.toasts.push("Session saved", now);
            }
            Err(notice) => self.toasts.push(notice.to_string(), now),
        }
    }

    fn poll_env(&mut self, now: Instant) -> bool {
        let Some(poller) = self.env_poller.as_mut() else {
            return false;
        };
        match poller.poll(&mut rand::thread_rng(), now, now_millis()) {
            Some(reading) => {
                self.store.record_env(&mut self.state, reading);
                true
            }
            None => false,
        }
    }

    /// Earliest instant at which `on_tick` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.clock.next_tick(),
            self.env_poller.as_ref().map(EnvPoller::next_due),
            self.toasts.next_expiry(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Advance timers. Returns true when something visible changed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let ticked = self.clock.poll(now) > 0;
        let env_changed = self.poll_env(now);
        let toasts_changed = self.toasts.expire(now);
        ticked || env_changed || toasts_changed
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }
        match self.screen {
            Screen::Login => self.on_login_key(key, now),
            Screen::Dashboard => self.on_dashboard_key(key, now),
        }
    }

    fn on_login_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Enter => self.submit_login(now),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus()
            }
            KeyCode::F(2) => self.login.reveal_password = !self.login.reveal_password,
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.create_account(now)
            }
            KeyCode::Backspace => {
                self.login.focused_mut().pop();
            }
            KeyCode::Char(c) => self.login.focused_mut().push(c),
            _ => {}
        }
        Flow::Continue
    }

    fn on_dashboard_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('s') => self.start_session(now),
            KeyCode::Char('p') => self.pause_session(now),
            KeyCode::Char('x') => self.stop_session(now),
            KeyCode::Char('m') => self.toasts.push("Lo-fi: playback simulated", now),
            KeyCode::Char('M') => self.toasts.push("Lo-fi: stop simulated", now),
            KeyCode::Char('h') => self.toasts.push("Add homework (simulated)", now),
            KeyCode::Char('e') => self.toasts.push("Add exam (simulated)", now),
            _ => {}
        }
        Flow::Continue
    }
}
