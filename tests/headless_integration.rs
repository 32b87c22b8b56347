use std::rc::Rc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use studybuddy::app::{App, Flow, Screen, SessionStatus};
use studybuddy::config::Config;
use studybuddy::runtime::{AppEvent, Runner};
use studybuddy::store::{MemoryBackend, SessionStore};

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

// Headless integration using the internal runtime + App without a TTY.
// Verifies that login and a short session complete through Runner fed by a plain channel.
#[test]
fn headless_login_and_session_flow() {
    let backend = Rc::new(MemoryBackend::new());
    let start = Instant::now();
    let mut app = App::new(SessionStore::new(backend.clone()), &Config::default(), start);
    assert_eq!(app.screen, Screen::Login);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(rx, Duration::from_millis(5));

    for c in "ana@campus.org".chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    tx.send(key(KeyCode::Tab)).unwrap();
    for c in "pw".chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Char('s'))).unwrap();

    // Simulated clock: each runner tick jumps straight to the app's next
    // deadline, the way the real loop wakes up for it
    let mut simulated = start;
    for _ in 0..200u32 {
        match runner.step(simulated, app.next_deadline()) {
            AppEvent::Tick => {
                if let Some(due) = app.next_deadline() {
                    simulated = simulated.max(due);
                }
                app.on_tick(simulated);
                if app.clock.elapsed() == 3 {
                    break;
                }
            }
            AppEvent::Resize => {}
            AppEvent::Key(k) => {
                assert_eq!(app.on_key(k, simulated), Flow::Continue);
            }
        }
    }

    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(app.status, SessionStatus::Running);
    assert_eq!(app.clock.elapsed(), 3);
    // the third second landed exactly on schedule
    assert_eq!(simulated, start + Duration::from_secs(3));

    app.stop_session(simulated);
    assert_eq!(app.status, SessionStatus::Finished);
    assert_eq!(app.state.sessions.len(), 1);
    assert_eq!(app.state.sessions[0].duration, 3);
    assert_eq!(app.stats.today_count, 1);

    let stored = backend.contents().expect("record persisted");
    assert!(stored.contains("\"duration\":3"));
    assert!(stored.contains("ana@campus.org"));
}

#[test]
fn headless_quit_from_dashboard() {
    let backend = MemoryBackend::with_contents(r#"{"user":{"email":"a@b.c","initials":"A"}}"#);
    let now = Instant::now();
    let mut app = App::new(SessionStore::new(backend), &Config::default(), now);
    assert_eq!(app.screen, Screen::Dashboard);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(rx, Duration::from_millis(5));
    tx.send(key(KeyCode::Char('q'))).unwrap();

    let mut quit = false;
    for _ in 0..10u32 {
        if let AppEvent::Key(k) = runner.step(now, app.next_deadline()) {
            quit = app.on_key(k, now) == Flow::Quit;
            break;
        }
    }
    assert!(quit, "q should quit from the dashboard");
}

#[test]
fn headless_notices_expire() {
    let backend = MemoryBackend::with_contents(r#"{"user":{"email":"a@b.c","initials":"A"}}"#);
    let now = Instant::now();
    let config = Config {
        toast_ms: 100,
        ..Config::default()
    };
    let mut app = App::new(SessionStore::new(backend), &config, now);

    app.pause_session(now);
    assert_eq!(app.toasts.latest(), Some("No session running"));
    assert!(app.on_tick(now + Duration::from_millis(150)));
    assert!(app.toasts.is_empty());
}
