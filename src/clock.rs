use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use crate::session::Session;
use crate::util::format_hms;

/// Period of one clock tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Lifecycle of the current study session.
///
/// The tick schedule only exists inside `Running`, so leaving that state is
/// what cancels it and there is never more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running { next_tick: Instant },
    Paused,
}

/// Rejected transitions. None of these change clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockNotice {
    #[error("Session already running")]
    AlreadyRunning,
    #[error("No session running")]
    NothingRunning,
    #[error("No session to stop")]
    NothingToStop,
}

#[derive(Debug, Clone)]
pub struct SessionClock {
    state: ClockState,
    elapsed: u64,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Idle,
            elapsed: 0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    /// When the next tick comes due, if the clock is running
    pub fn next_tick(&self) -> Option<Instant> {
        match self.state {
            ClockState::Running { next_tick } => Some(next_tick),
            ClockState::Idle | ClockState::Paused => None,
        }
    }

    /// Elapsed time as `HH:MM:SS`
    pub fn display(&self) -> String {
        format_hms(self.elapsed)
    }

    pub fn start(&mut self, now: Instant) -> Result<(), ClockNotice> {
        match self.state {
            ClockState::Running { .. } => Err(ClockNotice::AlreadyRunning),
            ClockState::Idle | ClockState::Paused => {
                self.state = ClockState::Running {
                    next_tick: now + TICK_PERIOD,
                };
                debug!(elapsed = self.elapsed, "clock started");
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) -> Result<(), ClockNotice> {
        match self.state {
            ClockState::Running { .. } => {
                self.state = ClockState::Paused;
                debug!(elapsed = self.elapsed, "clock paused");
                Ok(())
            }
            ClockState::Idle | ClockState::Paused => Err(ClockNotice::NothingRunning),
        }
    }

    /// Finish the current session, stamping it with `when` (epoch millis).
    ///
    /// With nothing elapsed this is rejected and a running clock keeps
    /// running.
    pub fn stop(&mut self, when: i64) -> Result<Session, ClockNotice> {
        let session = Session::new(self.elapsed, when).ok_or(ClockNotice::NothingToStop)?;
        self.state = ClockState::Idle;
        self.elapsed = 0;
        debug!(duration = session.duration, "clock stopped");
        Ok(session)
    }

    /// Advance one tick. Returns false when the clock is not running.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.elapsed += 1;
            true
        } else {
            false
        }
    }

    /// Fire every tick that has come due by `now`, returning how many fired.
    pub fn poll(&mut self, now: Instant) -> u64 {
        let mut fired = 0;
        while let ClockState::Running { next_tick } = self.state {
            if now < next_tick {
                break;
            }
            self.elapsed += 1;
            self.state = ClockState::Running {
                next_tick: next_tick + TICK_PERIOD,
            };
            fired += 1;
        }
        fired
    }
}
