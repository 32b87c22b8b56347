use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Minimum gap between two simulated readings
pub const POLL_BASE: Duration = Duration::from_millis(4_000);
/// Upper bound (exclusive) of the random delay added to `POLL_BASE`
pub const POLL_JITTER: Duration = Duration::from_millis(3_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum AirQuality {
    Good,
    Fair,
    Poor,
}

/// A fabricated ambient-sensor sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvReading {
    /// Epoch milliseconds when the sample was taken
    pub time: i64,
    pub lux: u32,
    pub air: AirQuality,
    /// Decibels
    pub noise: u32,
}

pub fn random_env<R: Rng + ?Sized>(rng: &mut R, time: i64) -> EnvReading {
    let air = match rng.gen_range(0..3) {
        0 => AirQuality::Good,
        1 => AirQuality::Fair,
        _ => AirQuality::Poor,
    };
    EnvReading {
        time,
        lux: rng.gen_range(100..=800),
        air,
        noise: rng.gen_range(30..=90),
    }
}

/// Decides when the next simulated reading is due
#[derive(Debug, Clone)]
pub struct EnvPoller {
    next_due: Instant,
}

impl EnvPoller {
    /// A poller whose first reading is due immediately
    pub fn new(now: Instant) -> Self {
        Self { next_due: now }
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Produce a reading if one is due, rescheduling the following one.
    pub fn poll<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant, time: i64) -> Option<EnvReading> {
        if now < self.next_due {
            return None;
        }
        let jitter = rng.gen_range(0..POLL_JITTER.as_millis() as u64);
        self.next_due = now + POLL_BASE + Duration::from_millis(jitter);
        Some(random_env(rng, time))
    }
}
