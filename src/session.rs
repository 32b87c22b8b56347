use serde::{Deserialize, Serialize};

use crate::env::EnvReading;

/// One completed, timed study interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Length of the session in whole seconds, always > 0
    pub duration: u64,
    /// Epoch milliseconds at the moment the session was stopped
    pub when: i64,
}

impl Session {
    /// Returns `None` for a zero-length session, which is never recorded.
    pub fn new(duration: u64, when: i64) -> Option<Self> {
        (duration > 0).then_some(Self { duration, when })
    }
}

/// Identity captured by the (simulated) login gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub initials: String,
}

impl User {
    pub fn from_email(email: &str) -> Self {
        let email = email.trim();
        Self {
            email: email.to_string(),
            initials: crate::util::initials(email),
        }
    }

    /// Placeholder identity shown when nobody has logged in
    pub fn guest() -> Self {
        Self {
            email: "Guest".to_string(),
            initials: "SB".to_string(),
        }
    }

    /// Name used in the dashboard greeting: the local part of the email
    pub fn display_name(&self) -> &str {
        match self.email.split('@').next() {
            Some(local) if !local.is_empty() => local,
            _ => "Student",
        }
    }
}

/// The single persisted record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub sessions: Vec<Session>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_env: Option<EnvReading>,
}

impl UserState {
    /// True when the record carries a user who can skip the login gate.
    pub fn has_logged_in_user(&self) -> bool {
        self.user.as_ref().is_some_and(|u| !u.email.is_empty())
    }

    /// Drop entries that violate the positive-duration invariant.
    pub(crate) fn sanitize(&mut self) {
        self.sessions.retain(|s| s.duration > 0);
    }
}
