//! Hand-off point between the pose estimator and the game loop.
//!
//! The estimator runs at its own cadence and only ever overwrites a single
//! slot; the game loop reads whatever frame is held at the start of a tick
//! and never waits for a new one.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::pose::LandmarkFrame;

#[derive(Debug, Default)]
struct Slot {
    frame: Option<LandmarkFrame>,
    /// Bumped on every frame actually stored.
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct FrameMailbox {
    slot: Arc<Mutex<Slot>>,
}

impl FrameMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle the estimator thread can publish through.
    pub fn publisher(&self) -> FramePublisher {
        FramePublisher {
            slot: Arc::clone(&self.slot),
        }
    }

    /// Clone of the most recent frame, if one has ever arrived.
    pub fn latest(&self) -> Option<LandmarkFrame> {
        self.slot.lock().frame.clone()
    }

    /// Number of frames stored so far.
    pub fn generation(&self) -> u64 {
        self.slot.lock().generation
    }

    /// Forgets the held frame. The generation count is kept.
    pub fn clear(&self) {
        self.slot.lock().frame = None;
    }
}

#[derive(Debug, Clone)]
pub struct FramePublisher {
    slot: Arc<Mutex<Slot>>,
}

impl FramePublisher {
    /// Last write wins. A `None` delivery (no person detected) keeps the
    /// previously held frame.
    pub fn publish(&self, frame: Option<LandmarkFrame>) {
        let Some(frame) = frame else {
            tracing::trace!("estimator delivered no landmarks");
            return;
        };
        let mut slot = self.slot.lock();
        slot.frame = Some(frame);
        slot.generation += 1;
    }
}
