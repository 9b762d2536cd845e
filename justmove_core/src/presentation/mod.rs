//! Outbound side of the core: everything the renderer needs arrives as a
//! [`GameEvent`] on this queue.

pub mod events;

use self::events::GameEvent;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Holds about a minute of per-frame traffic at 60 Hz.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Bounded event channel. The host is expected to drain it every frame; if
/// it falls behind, the oldest events are dropped so memory stays flat.
pub struct EventQueue {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self { sender, receiver }
    }

    pub fn push(&self, event: GameEvent) {
        let mut event = event;
        loop {
            match self.sender.try_send(event) {
                Ok(()) => return,
                Err(TrySendError::Full(rejected)) => {
                    let dropped = self.receiver.try_recv().ok();
                    tracing::trace!(?dropped, "event queue full, dropping oldest");
                    event = rejected;
                }
                // both ends live in `self`
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }

    /// Non-blocking.
    pub fn pop(&self) -> Option<GameEvent> {
        self.receiver.try_recv().ok()
    }

    /// Everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// A receiver for a render thread; events are delivered to exactly one
    /// of the receivers.
    pub fn receiver(&self) -> Receiver<GameEvent> {
        self.receiver.clone()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
