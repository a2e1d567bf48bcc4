//! Manually driven frame scheduler.

use glrec_core::{FrameCallback, FrameScheduler};
use parking_lot::Mutex;

/// A [`FrameScheduler`] whose frames only happen when [`fire`] is called.
///
/// [`fire`]: ManualFrameScheduler::fire
#[derive(Default)]
pub struct ManualFrameScheduler {
    pending: Mutex<Vec<FrameCallback>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame: every callback registered so far fires once. Callbacks
    /// registered while firing wait for the next frame.
    pub fn fire(&self) {
        let due = std::mem::take(&mut *self.pending.lock());
        for callback in due {
            callback();
        }
    }

    /// Run `frames` frames.
    pub fn advance(&self, frames: u32) {
        for _ in 0..frames {
            self.fire();
        }
    }

    /// Callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending.lock().push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glrec_core::FrameCounter;
    use std::sync::Arc;

    #[test]
    fn test_drives_frame_counter() {
        let scheduler = Arc::new(ManualFrameScheduler::new());
        let frames = FrameCounter::start(scheduler.clone());

        scheduler.advance(4);
        assert_eq!(frames.current(), 4);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_fire_without_callbacks() {
        let scheduler = ManualFrameScheduler::new();
        scheduler.fire();
        assert_eq!(scheduler.pending(), 0);
    }
}
