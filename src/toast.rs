use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Most notices kept on screen at once
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

/// Transient user-visible notices
#[derive(Debug, Clone)]
pub struct Toasts {
    queue: VecDeque<Toast>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::info!(%message, "notice");
        self.queue.push_back(Toast {
            message,
            expires_at: now + self.lifetime,
        });
        while self.queue.len() > MAX_VISIBLE {
            self.queue.pop_front();
        }
    }

    /// Drop expired notices, returning true if any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.expires_at > now);
        self.queue.len() != before
    }

    /// When the oldest visible notice goes away
    pub fn next_expiry(&self) -> Option<Instant> {
        self.queue.iter().map(|t| t.expires_at).min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn latest(&self) -> Option<&str> {
        self.queue.back().map(|t| t.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
