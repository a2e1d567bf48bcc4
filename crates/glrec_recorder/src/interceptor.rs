//! Call interceptor
//!
//! [`RecordingContext`] stands in for a real graphics context. It is built by
//! walking the real context's member table once, at wrap time: every method
//! gets a recording shim, every property is forwarded untouched. A recorded
//! call behaves exactly like the real one (same arguments, same return value,
//! same error), with one trace line as a side effect.

use crate::annotation::PopOutcome;
use crate::compiler::{self, ScriptArtifact};
use crate::config::RecorderConfig;
use crate::download::{DownloadError, DownloadSink};
use crate::session::Session;
use glrec_core::{
    ContextError, FrameCounter, GraphicsContext, Member, MemberKind, Result, SurfaceSize, Value,
};
use rustc_hash::FxHashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// How the proxy handles one member of the wrapped context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shim {
    /// Delegate and record.
    Record,
    /// Forward reads, no recording.
    PassThrough,
}

/// A recording proxy around a graphics context.
pub struct RecordingContext<C> {
    inner: C,
    surface: Arc<dyn SurfaceSize>,
    members: Vec<Member>,
    shims: FxHashMap<String, Shim>,
    session: Session,
}

impl<C: GraphicsContext> RecordingContext<C> {
    /// Wrap `inner`, whose drawing surface is `surface`, in a fresh session.
    pub fn wrap(
        inner: C,
        surface: Arc<dyn SurfaceSize>,
        config: Arc<RecorderConfig>,
        frames: FrameCounter,
    ) -> Self {
        let members = inner.members();
        let shims = members
            .iter()
            .map(|member| {
                let shim = match member.kind {
                    MemberKind::Method => Shim::Record,
                    MemberKind::Property => Shim::PassThrough,
                };
                (member.name.clone(), shim)
            })
            .collect();
        let session = Session::new(config, frames, surface.width(), surface.height());

        Self {
            inner,
            surface,
            members,
            shims,
            session,
        }
    }

    /// The wrapped context. Calls made on it directly are not recorded.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Stop recording and get the wrapped context back.
    pub fn into_inner(self) -> C {
        self.inner
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The raw trace lines recorded so far.
    pub fn trace(&self) -> Vec<String> {
        self.session.lines()
    }

    /// Compile the trace into a replay routine.
    pub fn compile_trace(&self) -> String {
        compiler::compile(&self.session)
    }

    /// Compile the trace and hand it to `sink` as a script file.
    pub fn download_trace(&self, sink: &dyn DownloadSink) -> std::result::Result<(), DownloadError> {
        let artifact: ScriptArtifact = compiler::artifact(&self.session);
        sink.save(&artifact)
    }

    /// Open a labeled block in the trace.
    pub fn push_annotation(&mut self, label: &str) {
        self.session.push_annotation(label);
    }

    /// Close the innermost labeled block. Misuse is logged, never fatal.
    pub fn pop_annotation(&mut self, expected: Option<&str>) -> PopOutcome {
        self.session.pop_annotation(expected)
    }

    /// Run `body` inside a labeled block. The block is closed even if `body`
    /// panics; the panic then continues unwinding.
    pub fn with_annotation<R>(&mut self, label: &str, body: impl FnOnce(&mut Self) -> R) -> R {
        self.push_annotation(label);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(&mut *self)));
        self.pop_annotation(Some(label));
        match outcome {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Invoke a method through the recorder. Same as [`GraphicsContext::invoke`].
    pub fn call(&mut self, method: &str, args: &[Value]) -> Result<Value> {
        self.invoke(method, args)
    }
}

impl<C: GraphicsContext> GraphicsContext for RecordingContext<C> {
    fn members(&self) -> Vec<Member> {
        self.members.clone()
    }

    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value> {
        if self.shims.get(method) != Some(&Shim::Record) {
            return Err(ContextError::NoSuchMethod(method.to_string()));
        }

        self.session.check_frame();
        self.session
            .check_dimensions(self.surface.width(), self.surface.height());

        let result = match self.inner.invoke(method, args) {
            Ok(result) => result,
            Err(err) => {
                self.session.note_failed_call(method, &err);
                return Err(err);
            }
        };

        self.session.record_call(method, args, &result);
        Ok(result)
    }

    fn property(&self, name: &str) -> Option<Value> {
        match self.shims.get(name) {
            Some(Shim::PassThrough) => self.inner.property(name),
            _ => None,
        }
    }
}
