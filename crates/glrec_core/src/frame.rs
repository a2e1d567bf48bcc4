//! Animation frame counter
//!
//! A monotonically increasing count of animation frames, advanced once per
//! tick of the host's per-frame scheduling primitive. It is the only time
//! signal the recorder uses: when the count moves between two recorded calls,
//! the calls belong to different frames.
//!
//! [`FrameCounter`] is a read-only view. The only writer is the tick callback
//! installed by [`FrameCounter::start`] (or [`start_global`]), which advances
//! the count by one and registers itself again for the next frame.
//!
//! ```ignore
//! // At host startup
//! glrec_core::frame::start_global(Arc::new(RafScheduler::new()))?;
//!
//! // Anywhere
//! let frame = FrameCounter::global().current();
//! ```

use crate::error::FrameError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// One-shot callback run on the next animation frame.
pub type FrameCallback = Box<dyn FnOnce() + Send + 'static>;

/// The host's "call me on the next frame" primitive.
pub trait FrameScheduler: Send + Sync + 'static {
    fn request_frame(&self, callback: FrameCallback);
}

static GLOBAL_COUNTER: OnceLock<FrameCounter> = OnceLock::new();
static GLOBAL_STARTED: AtomicBool = AtomicBool::new(false);

/// Read-only view of an animation frame count.
#[derive(Clone, Debug, Default)]
pub struct FrameCounter {
    count: Arc<AtomicU64>,
}

impl FrameCounter {
    /// A counter nothing will ever advance.
    pub fn stopped() -> Self {
        Self::default()
    }

    /// Create a counter and start ticking it on `scheduler`.
    pub fn start(scheduler: Arc<dyn FrameScheduler>) -> Self {
        let counter = Self::default();
        schedule_tick(scheduler, Arc::clone(&counter.count));
        counter
    }

    /// The process-wide counter.
    ///
    /// Stays at zero until [`start_global`] is called.
    pub fn global() -> &'static FrameCounter {
        GLOBAL_COUNTER.get_or_init(FrameCounter::default)
    }

    /// Frames elapsed since ticking started.
    pub fn current(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }
}

/// Start ticking the process-wide counter. Only the first call succeeds.
pub fn start_global(scheduler: Arc<dyn FrameScheduler>) -> Result<(), FrameError> {
    if GLOBAL_STARTED.swap(true, Ordering::AcqRel) {
        return Err(FrameError::AlreadyStarted);
    }
    tracing::debug!("starting global frame counter");
    schedule_tick(scheduler, Arc::clone(&FrameCounter::global().count));
    Ok(())
}

fn schedule_tick(scheduler: Arc<dyn FrameScheduler>, count: Arc<AtomicU64>) {
    let next = Arc::clone(&scheduler);
    scheduler.request_frame(Box::new(move || {
        count.fetch_add(1, Ordering::AcqRel);
        schedule_tick(next, count);
    }));
}
