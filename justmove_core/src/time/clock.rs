use std::sync::atomic::Ordering;
use std::sync::Arc;

use atomic_float::AtomicF64;

/// Elapsed-time clock of the playing phase, driven by the host's monotonic
/// `now` (seconds). The latest elapsed value is mirrored into a shared
/// playhead so other threads can read progress without locking.
pub struct SessionClock {
    started_at: Option<f64>,
    last_elapsed: f64,
    playhead: Arc<AtomicF64>,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionClock {
    pub fn new() -> Self {
        Self {
            started_at: None,
            last_elapsed: 0.0,
            playhead: Arc::new(AtomicF64::new(0.0)),
        }
    }

    /// Elapsed time is 0 at `now`.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
        self.last_elapsed = 0.0;
        self.playhead.store(0.0, Ordering::Release);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Seconds since [`SessionClock::start`]. Never runs backwards, even if
    /// the host hands in an older `now`. Returns 0 while stopped.
    pub fn update(&mut self, now: f64) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        self.last_elapsed = (now - started_at).max(self.last_elapsed);
        self.playhead.store(self.last_elapsed, Ordering::Release);
        self.last_elapsed
    }

    /// Value from the most recent update.
    pub fn elapsed(&self) -> f64 {
        self.last_elapsed
    }

    pub fn playhead(&self) -> Arc<AtomicF64> {
        Arc::clone(&self.playhead)
    }
}
