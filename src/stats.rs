use std::collections::BTreeSet;

use chrono::{Local, NaiveDate, TimeZone};
use rand::Rng;

use crate::session::{Session, UserState};
use crate::util::rounded_minutes;

/// Aggregates shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub today_count: usize,
    pub total_minutes: u64,
    pub streak: u32,
    /// Always within 0..=100
    pub completion_pct: u8,
}

/// Source of the completion percentage
pub trait CompletionMetric {
    fn completion_pct(&self, state: &UserState, today: NaiveDate) -> u8;
}

/// Placeholder metric: a uniformly random percentage
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCompletion;

impl CompletionMetric for RandomCompletion {
    fn completion_pct(&self, _state: &UserState, _today: NaiveDate) -> u8 {
        rand::thread_rng().gen_range(0..=100)
    }
}

/// Today's studied minutes as a share of a daily goal, capped at 100
#[derive(Debug, Clone, Copy)]
pub struct DailyGoal {
    pub minutes: u32,
}

impl CompletionMetric for DailyGoal {
    fn completion_pct(&self, state: &UserState, today: NaiveDate) -> u8 {
        if self.minutes == 0 {
            return 100;
        }
        let studied = sessions_on(&state.sessions, today)
            .map(|s| rounded_minutes(s.duration))
            .fold(0, u64::saturating_add);
        (studied.saturating_mul(100) / u64::from(self.minutes)).min(100) as u8
    }
}

/// Local calendar date of an epoch-millisecond timestamp
pub fn local_date(when: i64) -> Option<NaiveDate> {
    Local
        .timestamp_millis_opt(when)
        .earliest()
        .map(|dt| dt.date_naive())
}

fn sessions_on(sessions: &[Session], day: NaiveDate) -> impl Iterator<Item = &Session> {
    sessions
        .iter()
        .filter(move |s| local_date(s.when) == Some(day))
}

pub fn compute_stats(state: &UserState, today: NaiveDate, metric: &dyn CompletionMetric) -> Stats {
    Stats {
        today_count: sessions_on(&state.sessions, today).count(),
        total_minutes: state
            .sessions
            .iter()
            .map(|s| rounded_minutes(s.duration))
            .fold(0, u64::saturating_add),
        streak: compute_streak(&state.sessions, today),
        completion_pct: metric.completion_pct(state, today).min(100),
    }
}

/// Consecutive days ending today with at least one session.
///
/// Today must itself have a session, otherwise the streak is 0 even if
/// yesterday had one.
pub fn compute_streak(sessions: &[Session], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = sessions.iter().filter_map(|s| local_date(s.when)).collect();

    let mut streak = 0;
    let mut cursor = Some(today);
    while let Some(day) = cursor.filter(|d| days.contains(d)) {
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}
