//! Turn clock.
//!
//! Nothing here ticks. A room records when the current turn started and an
//! external poller asks whether the turn has expired.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};

/// Time source for a room.
///
/// `now` is monotonic, read as the elapsed time since an arbitrary origin,
/// and drives the turn clock. `utc_now` dates hand ids and history entries.
pub trait Clock: Debug + Send {
    fn now(&self) -> Duration;
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Wall-clock source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for tests. Clones share the same reading, so a test can
/// keep a handle after moving one into a room. Wall time is `epoch` plus the
/// elapsed reading; the epoch defaults to 1970-01-01T00:00:00Z.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
    epoch: DateTime<Utc>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epoch(epoch: DateTime<Utc>) -> Self {
        Self {
            now: Arc::default(),
            epoch,
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }

    pub fn set(&self, to: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now = to;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        TimeDelta::from_std(self.now())
            .ok()
            .and_then(|elapsed| self.epoch.checked_add_signed(elapsed))
            .unwrap_or(self.epoch)
    }
}

/// Start timestamp and allowance for the seat currently on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnClock {
    started_at: Option<Duration>,
    timeout: Duration,
}

impl TurnClock {
    pub fn new(timeout: Duration) -> Self {
        Self {
            started_at: None,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn arm(&mut self, now: Duration) {
        self.started_at = Some(now);
    }

    pub fn disarm(&mut self) {
        self.started_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.started_at.is_some()
    }

    /// `now - started_at >= timeout`. A disarmed clock never expires.
    pub fn is_expired(&self, now: Duration) -> bool {
        self.started_at
            .is_some_and(|start| now.saturating_sub(start) >= self.timeout)
    }

    /// Time left on the current turn; the full allowance when disarmed.
    pub fn remaining(&self, now: Duration) -> Duration {
        match self.started_at {
            Some(start) => self.timeout.saturating_sub(now.saturating_sub(start)),
            None => self.timeout,
        }
    }
}
