//! Test harness wiring a headless canvas, a manual frame scheduler and a
//! recording canvas together.

use super::headless::HeadlessCanvas;
use super::scheduler::ManualFrameScheduler;
use super::scripted::ScriptedContext;
use crate::canvas::RecordingCanvas;
use crate::config::RecorderConfig;
use crate::interceptor::RecordingContext;
use glrec_core::FrameCounter;
use std::sync::Arc;

/// Everything needed to record against a fake WebGL context with
/// deterministic frames.
pub struct TestHarness {
    canvas: RecordingCanvas<HeadlessCanvas>,
    scheduler: Arc<ManualFrameScheduler>,
    frames: FrameCounter,
}

impl TestHarness {
    /// A harness with the default recorder config.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(width, height, RecorderConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: RecorderConfig) -> Self {
        let scheduler = Arc::new(ManualFrameScheduler::new());
        let frames = FrameCounter::start(scheduler.clone());
        let canvas = RecordingCanvas::with_config(
            Arc::new(HeadlessCanvas::new(width, height)),
            config,
            frames.clone(),
        );
        Self {
            canvas,
            scheduler,
            frames,
        }
    }

    pub fn canvas(&self) -> &RecordingCanvas<HeadlessCanvas> {
        &self.canvas
    }

    /// The underlying surface, for resizing.
    pub fn surface(&self) -> &HeadlessCanvas {
        self.canvas.surface()
    }

    pub fn frames(&self) -> &FrameCounter {
        &self.frames
    }

    /// Acquire a recorded WebGL context.
    pub fn webgl(&self) -> Option<RecordingContext<ScriptedContext>> {
        self.canvas.get_context("webgl")?.into_recording()
    }

    /// Let `frames` animation frames elapse.
    pub fn tick(&self, frames: u32) {
        self.scheduler.advance(frames);
    }
}
