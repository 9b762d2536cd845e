use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handed to the host scheduler when a run starts. Once cancelled the host
/// should stop ticking; cancelling twice is harmless.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
