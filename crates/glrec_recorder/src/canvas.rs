//! Session bootstrap
//!
//! [`RecordingCanvas`] sits in front of a surface's context acquisition. A
//! request for one of the configured context kinds (WebGL by default) comes
//! back wrapped in a [`RecordingContext`] with a fresh session; every other
//! request is passed through untouched.

use crate::config::RecorderConfig;
use crate::interceptor::RecordingContext;
use glrec_core::{ContextKind, FrameCounter, GraphicsContext, Member, Result, Surface, Value};
use std::sync::Arc;

/// Result of a context acquisition through a [`RecordingCanvas`].
pub enum AcquiredContext<C> {
    /// A recorded context.
    Recording(RecordingContext<C>),
    /// An unrecorded context of some other kind.
    Passthrough(C),
}

impl<C: GraphicsContext> AcquiredContext<C> {
    pub fn is_recording(&self) -> bool {
        matches!(self, AcquiredContext::Recording(_))
    }

    pub fn as_recording(&self) -> Option<&RecordingContext<C>> {
        match self {
            AcquiredContext::Recording(context) => Some(context),
            AcquiredContext::Passthrough(_) => None,
        }
    }

    pub fn as_recording_mut(&mut self) -> Option<&mut RecordingContext<C>> {
        match self {
            AcquiredContext::Recording(context) => Some(context),
            AcquiredContext::Passthrough(_) => None,
        }
    }

    pub fn into_recording(self) -> Option<RecordingContext<C>> {
        match self {
            AcquiredContext::Recording(context) => Some(context),
            AcquiredContext::Passthrough(_) => None,
        }
    }
}

impl<C: GraphicsContext> GraphicsContext for AcquiredContext<C> {
    fn members(&self) -> Vec<Member> {
        match self {
            AcquiredContext::Recording(context) => context.members(),
            AcquiredContext::Passthrough(context) => context.members(),
        }
    }

    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value> {
        match self {
            AcquiredContext::Recording(context) => context.invoke(method, args),
            AcquiredContext::Passthrough(context) => context.invoke(method, args),
        }
    }

    fn property(&self, name: &str) -> Option<Value> {
        match self {
            AcquiredContext::Recording(context) => context.property(name),
            AcquiredContext::Passthrough(context) => context.property(name),
        }
    }
}

/// A surface whose WebGL contexts are recorded.
pub struct RecordingCanvas<S> {
    surface: Arc<S>,
    config: Arc<RecorderConfig>,
    frames: FrameCounter,
}

impl<S: Surface + 'static> RecordingCanvas<S> {
    /// Record with the default config against the process-wide frame counter.
    pub fn new(surface: Arc<S>) -> Self {
        Self::with_config(
            surface,
            RecorderConfig::default(),
            FrameCounter::global().clone(),
        )
    }

    pub fn with_config(surface: Arc<S>, config: RecorderConfig, frames: FrameCounter) -> Self {
        Self {
            surface,
            config: Arc::new(config),
            frames,
        }
    }

    pub fn surface(&self) -> &Arc<S> {
        &self.surface
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Acquire a context. The real acquisition always happens first; only
    /// recordable kinds are then wrapped, each in its own session.
    pub fn get_context(&self, kind: impl Into<ContextKind>) -> Option<AcquiredContext<S::Context>> {
        let kind = kind.into();
        let context = self.surface.get_context(&kind)?;

        if !self.config.records(&kind) {
            return Some(AcquiredContext::Passthrough(context));
        }

        tracing::debug!(kind = %kind, "intercepting context acquisition");
        Some(AcquiredContext::Recording(RecordingContext::wrap(
            context,
            self.surface.clone(),
            Arc::clone(&self.config),
            self.frames.clone(),
        )))
    }
}
