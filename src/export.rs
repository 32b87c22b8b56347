use std::io::Write;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::session::Session;
use crate::util::rounded_minutes;

#[derive(Debug, Serialize)]
struct SessionRow {
    ended_at: String,
    duration_secs: u64,
    minutes: u64,
}

impl From<&Session> for SessionRow {
    fn from(s: &Session) -> Self {
        let ended_at = Local
            .timestamp_millis_opt(s.when)
            .earliest()
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();
        Self {
            ended_at,
            duration_secs: s.duration,
            minutes: rounded_minutes(s.duration),
        }
    }
}

/// Write the session history as CSV, one row per session in stop order.
pub fn write_sessions_csv<W: Write>(sessions: &[Session], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    if sessions.is_empty() {
        wtr.write_record(["ended_at", "duration_secs", "minutes"])?;
    }
    for session in sessions {
        wtr.serialize(SessionRow::from(session))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let sessions = vec![
            Session {
                duration: 125,
                when: 1_700_000_000_000,
            },
            Session {
                duration: 20,
                when: 1_700_000_500_000,
            },
        ];
        let mut out = Vec::new();
        write_sessions_csv(&sessions, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ended_at,duration_secs,minutes");
        assert!(lines[1].ends_with(",125,2"), "row: {}", lines[1]);
        assert!(lines[2].ends_with(",20,0"), "row: {}", lines[2]);
    }

    #[test]
    fn empty_history_still_has_header() {
        let mut out = Vec::new();
        write_sessions_csv(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ended_at,duration_secs,minutes\n");
    }
}
