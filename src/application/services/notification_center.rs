//! In-memory [`NotificationSink`] for the CLI.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::ports::NotificationSink;

const DEFAULT_CAPACITY: usize = 32;

/// Bounded queue of error notices, drained by whatever renders them.
#[derive(Debug)]
pub struct NotificationCenter {
    queue: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl NotificationCenter {
    /// Creates a queue keeping at most `capacity` notices; the oldest are
    /// dropped first.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Removes and returns every queued message, oldest first.
    pub fn drain(&self) -> Vec<String> {
        self.queue.lock().drain(..).collect()
    }
}

impl NotificationSink for NotificationCenter {
    fn dismiss_all(&self) {
        let mut queue = self.queue.lock();
        if !queue.is_empty() {
            debug!(count = queue.len(), "Dismissing notifications");
            queue.clear();
        }
    }

    fn error(&self, message: &str) {
        let mut queue = self.queue.lock();
        if queue.len() == self.capacity {
            queue.pop_front();
        }
        queue.push_back(message.to_string());
    }
}
