use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the event loop hands to the app
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// Nothing arrived before the wait ran out; time to advance timers
    Tick,
}

/// Anything that can deliver terminal input with a timeout
pub trait AppEventSource: Send + 'static {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// A plain channel works as a source; tests feed key presses through one.
impl AppEventSource for Receiver<AppEvent> {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        Receiver::recv_timeout(self, timeout)
    }
}

/// Reads crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Release events arrive on some platforms; only presses count
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    tx.send(AppEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(e) => {
                    tracing::error!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AppEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Pulls one event at a time for the main loop.
///
/// Input is waited for until either the UI interval runs out or the app's
/// own next deadline (clock tick, sensor reading, notice expiry) arrives,
/// whichever comes first. The session timer therefore redraws on the
/// second rather than up to one interval late.
pub struct Runner<E: AppEventSource> {
    event_source: E,
    interval: Duration,
}

impl<E: AppEventSource> Runner<E> {
    pub fn new(event_source: E, interval: Duration) -> Self {
        Self {
            event_source,
            interval,
        }
    }

    /// How long `step` would block at `now` given the app's next deadline
    pub fn wait_for(&self, now: Instant, deadline: Option<Instant>) -> Duration {
        match deadline {
            Some(due) => due.saturating_duration_since(now).min(self.interval),
            None => self.interval,
        }
    }

    /// Next input event, or `Tick` once the wait runs out.
    ///
    /// A disconnected source also yields `Tick` so timers keep running.
    pub fn step(&self, now: Instant, deadline: Option<Instant>) -> AppEvent {
        match self.event_source.recv_timeout(self.wait_for(now, deadline)) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}
