use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use chrono::{Days, Local, NaiveDate, NaiveTime, TimeZone};
use tempfile::tempdir;

use studybuddy::clock::{ClockNotice, ClockState, SessionClock};
use studybuddy::session::{Session, UserState};
use studybuddy::stats::{compute_stats, compute_streak, CompletionMetric};
use studybuddy::store::{FileBackend, SessionStore};

// Integration tests for the session lifecycle and statistics engine.
// These drive the clock, hand its sessions to the store, and read stats
// back the way the dashboard does.

struct Zero;

impl CompletionMetric for Zero {
    fn completion_pct(&self, _state: &UserState, _today: NaiveDate) -> u8 {
        0
    }
}

fn millis_at(day: NaiveDate, hour: u32) -> i64 {
    Local
        .from_local_datetime(&day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap()))
        .earliest()
        .unwrap()
        .timestamp_millis()
}

#[test]
fn start_five_ticks_stop_records_one_session() {
    let dir = tempdir().unwrap();
    let store = SessionStore::new(FileBackend::with_path(dir.path().join("state.json")));
    let mut state = store.load();
    let mut clock = SessionClock::new();

    clock.start(Instant::now()).unwrap();
    for _ in 0..5 {
        assert!(clock.tick());
    }
    let session = clock.stop(Local::now().timestamp_millis()).unwrap();
    store.record_session(&mut state, session);

    assert_eq!(state.sessions.len(), 1);
    assert_eq!(state.sessions[0].duration, 5);
    assert_eq!(clock.elapsed(), 0);
    assert_eq!(clock.state(), ClockState::Idle);
}

#[test]
fn stop_with_zero_elapsed_changes_nothing() {
    let today = Local::now().date_naive();
    let dir = tempdir().unwrap();
    let store = SessionStore::new(FileBackend::with_path(dir.path().join("state.json")));
    let mut state = store.load();
    store.record_session(
        &mut state,
        Session::new(60, millis_at(today, 9)).unwrap(),
    );
    let streak_before = compute_streak(&state.sessions, today);

    let mut clock = SessionClock::new();
    assert_matches!(clock.stop(0), Err(ClockNotice::NothingToStop));
    clock.start(Instant::now()).unwrap();
    assert_matches!(clock.stop(0), Err(ClockNotice::NothingToStop));

    assert_eq!(state.sessions.len(), 1);
    assert_eq!(compute_streak(&state.sessions, today), streak_before);
}

#[test]
fn double_start_counts_each_second_once() {
    let t0 = Instant::now();
    let mut clock = SessionClock::new();
    clock.start(t0).unwrap();
    assert_matches!(clock.start(t0), Err(ClockNotice::AlreadyRunning));

    for secs in 1..=4 {
        clock.poll(t0 + Duration::from_secs(secs));
    }
    assert_eq!(clock.elapsed(), 4);
}

#[test]
fn saved_sessions_reload_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let store = SessionStore::new(FileBackend::with_path(&path));
    let mut state = store.load();

    let durations = [1u64, 59, 60, 3_600, 90_000, 7];
    for (i, d) in durations.iter().enumerate() {
        store.record_session(
            &mut state,
            Session::new(*d, 1_700_000_000_000 + i as i64 * 1_000).unwrap(),
        );
    }

    let reloaded = SessionStore::new(FileBackend::with_path(&path)).load();
    assert_eq!(reloaded.sessions, state.sessions);
}

#[test]
fn total_minutes_rounds_each_session() {
    let today = Local::now().date_naive();
    let durations = [125u64, 61, 29, 30, 89, 3_601];
    let state = UserState {
        sessions: durations
            .iter()
            .map(|d| Session::new(*d, millis_at(today, 10)).unwrap())
            .collect(),
        ..Default::default()
    };
    let expected: u64 = durations
        .iter()
        .map(|d| (*d as f64 / 60.0).round() as u64)
        .sum();
    assert_eq!(compute_stats(&state, today, &Zero).total_minutes, expected);
}

#[test]
fn two_sessions_today_scenario() {
    let today = Local::now().date_naive();
    let state = UserState {
        sessions: vec![
            Session::new(125, millis_at(today, 8)).unwrap(),
            Session::new(61, millis_at(today, 9)).unwrap(),
        ],
        ..Default::default()
    };
    let stats = compute_stats(&state, today, &Zero);
    assert_eq!(stats.total_minutes, 3);
    assert_eq!(stats.today_count, 2);
    assert_eq!(stats.streak, 1);
}

#[test]
fn streak_scenarios() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
    let two_days_ago = today.checked_sub_days(Days::new(2)).unwrap();

    assert_eq!(compute_streak(&[], today), 0);

    let consecutive = vec![
        Session::new(60, millis_at(yesterday, 20)).unwrap(),
        Session::new(60, millis_at(today, 7)).unwrap(),
    ];
    assert_eq!(compute_streak(&consecutive, today), 2);

    let stale = vec![Session::new(60, millis_at(two_days_ago, 12)).unwrap()];
    assert_eq!(compute_streak(&stale, today), 0);
}
