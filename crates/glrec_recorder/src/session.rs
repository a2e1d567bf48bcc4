//! Recording session state
//!
//! One [`Session`] exists per intercepted context acquisition. It owns the
//! trace, the resource registry and the annotation stack, plus the shadow
//! copies of the surface size and frame count used to detect changes.
//! All mutation goes through the recording proxy, one call at a time.

use crate::annotation::{AnnotationStack, PopOutcome};
use crate::config::RecorderConfig;
use crate::literal;
use crate::registry::{ResourceRegistry, Symbol};
use crate::trace::{CallArgs, Instruction, TraceBuffer, TraceEntry};
use glrec_core::{FrameCounter, HandleKind, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A non-fatal problem noticed while recording.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An argument could not be expressed and was recorded as `null`.
    UnsupportedArgument {
        method: String,
        position: usize,
        value: String,
    },
    /// A return value is a host object that is not a known resource handle.
    UnsupportedReturn { method: String, value: String },
    /// Pop on an empty annotation stack.
    EmptyAnnotationStack,
    /// Pop under a label that was not at the top of the stack.
    MismatchedAnnotation { expected: String, found: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedArgument {
                method,
                position,
                value,
            } => write!(
                f,
                "unsupported value {} as argument {} of {}",
                value, position, method
            ),
            Diagnostic::UnsupportedReturn { method, value } => {
                write!(f, "unsupported value {} returned from {}", value, method)
            }
            Diagnostic::EmptyAnnotationStack => {
                f.write_str("tried to pop annotation from empty annotation stack")
            }
            Diagnostic::MismatchedAnnotation { expected, found } => write!(
                f,
                "mismatched annotation push/pop: expected {} to be popped, but {} was at the top of the annotation stack",
                expected, found
            ),
        }
    }
}

/// Counters describing a recording.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingStats {
    /// Calls that produced a trace line.
    pub calls_recorded: u64,
    /// Calls whose delegate failed; nothing was recorded for them.
    pub failed_calls: u64,
    /// Recorded calls with at least one unexpressible value.
    pub degraded_calls: u64,
    /// `yield` markers emitted.
    pub frames_observed: u64,
    /// Dimension changes after the initial seeding.
    pub resizes: u64,
    /// Annotations opened.
    pub annotations: u64,
}

/// Structured snapshot of a session for external tooling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceExport {
    pub config: RecorderConfig,
    /// Script arrays to declare, in declaration order.
    pub declarations: Vec<HandleKind>,
    pub entries: Vec<TraceEntry>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: RecordingStats,
}

impl TraceExport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }
}

pub struct Session {
    config: Arc<RecorderConfig>,
    frames: FrameCounter,
    trace: TraceBuffer,
    registry: ResourceRegistry,
    annotations: AnnotationStack,
    width: u32,
    height: u32,
    last_frame: u64,
    diagnostics: Vec<Diagnostic>,
    stats: RecordingStats,
}

impl Session {
    /// Start a session for a surface of the given size. The size is written
    /// to the trace immediately.
    pub fn new(config: Arc<RecorderConfig>, frames: FrameCounter, width: u32, height: u32) -> Self {
        let last_frame = frames.current();
        let mut session = Self {
            config,
            frames,
            trace: TraceBuffer::new(),
            registry: ResourceRegistry::new(),
            annotations: AnnotationStack::new(),
            width,
            height,
            last_frame,
            diagnostics: Vec::new(),
            stats: RecordingStats::default(),
        };
        session.append(Instruction::Resize { width, height });
        tracing::debug!(width, height, frame = last_frame, "recording session started");
        session
    }

    /// The only way lines enter the trace: stamped with the current
    /// annotation depth.
    fn append(&mut self, instruction: Instruction) {
        self.trace.push(self.annotations.depth(), instruction);
    }

    fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Emit a single `yield` if the frame counter moved since last observed.
    pub(crate) fn check_frame(&mut self) {
        let now = self.frames.current();
        if now != self.last_frame {
            self.last_frame = now;
            self.stats.frames_observed += 1;
            self.append(Instruction::Yield);
        }
    }

    /// Emit the new size if either dimension differs from the shadow copy.
    pub(crate) fn check_dimensions(&mut self, width: u32, height: u32) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.stats.resizes += 1;
            self.append(Instruction::Resize { width, height });
        }
    }

    pub(crate) fn push_annotation(&mut self, label: &str) {
        self.check_frame();
        self.append(Instruction::OpenAnnotation {
            label: label.to_string(),
        });
        self.annotations.push(label);
        self.stats.annotations += 1;
    }

    pub(crate) fn pop_annotation(&mut self, expected: Option<&str>) -> PopOutcome {
        let outcome = self.annotations.pop(expected);
        match &outcome {
            PopOutcome::Empty => self.warn(Diagnostic::EmptyAnnotationStack),
            PopOutcome::Mismatched { expected, popped } => {
                self.warn(Diagnostic::MismatchedAnnotation {
                    expected: expected.clone(),
                    found: popped.clone(),
                });
                self.append(Instruction::CloseAnnotation);
            }
            PopOutcome::Popped(_) => self.append(Instruction::CloseAnnotation),
        }
        outcome
    }

    pub(crate) fn note_failed_call(&mut self, method: &str, error: &glrec_core::ContextError) {
        self.stats.failed_calls += 1;
        tracing::debug!(method, %error, "delegate failed, call not recorded");
    }

    /// Serialize a completed call and append it.
    pub(crate) fn record_call(&mut self, method: &str, args: &[Value], result: &Value) {
        let mut rendered = CallArgs::new();
        let mut degraded = false;

        for (position, arg) in args.iter().enumerate() {
            match self.express(arg) {
                Some(text) => rendered.push(text),
                None => {
                    degraded = true;
                    self.warn(Diagnostic::UnsupportedArgument {
                        method: method.to_string(),
                        position,
                        value: arg.to_string(),
                    });
                    rendered.push("null".to_string());
                }
            }
        }

        let assign = self.registry.symbolize(result);
        if assign.is_none() {
            if let Value::Opaque(_) = result {
                degraded = true;
                self.warn(Diagnostic::UnsupportedReturn {
                    method: method.to_string(),
                    value: result.to_string(),
                });
            }
        }

        self.stats.calls_recorded += 1;
        if degraded {
            self.stats.degraded_calls += 1;
        }
        self.append(Instruction::Call {
            assign,
            method: method.to_string(),
            args: rendered,
            degraded,
        });
    }

    fn express(&mut self, value: &Value) -> Option<String> {
        literal::literal(value).or_else(|| {
            self.registry
                .symbolize(value)
                .map(|symbol: Symbol| symbol.to_string())
        })
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    /// Rendered trace lines, indented.
    pub fn lines(&self) -> Vec<String> {
        self.trace.lines(&self.config)
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn annotations(&self) -> &AnnotationStack {
        &self.annotations
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn stats(&self) -> &RecordingStats {
        &self.stats
    }

    /// Last recorded surface size.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Frame count at the last observation.
    pub fn last_frame(&self) -> u64 {
        self.last_frame
    }

    pub fn export(&self) -> TraceExport {
        TraceExport {
            config: (*self.config).clone(),
            declarations: self.registry.kinds().collect(),
            entries: self.trace.entries().to_vec(),
            diagnostics: self.diagnostics.clone(),
            stats: self.stats.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glrec_core::{BufferView, ResourceHandle};

    fn session() -> Session {
        Session::new(
            Arc::new(RecorderConfig::default()),
            FrameCounter::stopped(),
            300,
            150,
        )
    }

    #[test]
    fn test_seeds_dimensions() {
        let session = session();
        assert_eq!(
            session.lines(),
            vec!["  gl.canvas.width = 300;", "  gl.canvas.height = 150;"]
        );
        assert_eq!(session.stats().resizes, 0);
    }

    #[test]
    fn test_unchanged_dimensions_emit_nothing() {
        let mut session = session();
        session.check_dimensions(300, 150);
        session.check_dimensions(300, 150);
        assert_eq!(session.trace().len(), 1);

        session.check_dimensions(300, 200);
        session.check_dimensions(300, 200);
        assert_eq!(session.trace().len(), 2);
        assert_eq!(session.dimensions(), (300, 200));
        assert_eq!(session.stats().resizes, 1);
    }

    #[test]
    fn test_unsupported_argument_becomes_null() {
        let mut session = session();
        session.record_call(
            "texImage2D",
            &[Value::from(3553), Value::Opaque("HTMLVideoElement".into())],
            &Value::Undefined,
        );

        let lines = session.lines();
        assert_eq!(lines.last().unwrap(), "  gl.texImage2D(3553, null);");
        assert_eq!(
            session.diagnostics(),
            [Diagnostic::UnsupportedArgument {
                method: "texImage2D".into(),
                position: 1,
                value: "<HTMLVideoElement>".into(),
            }]
        );
        assert_eq!(session.stats().degraded_calls, 1);
    }

    #[test]
    fn test_undefined_argument_is_unsupported() {
        let mut session = session();
        session.record_call(
            "bindTexture",
            &[Value::from(3553), Value::Undefined],
            &Value::Undefined,
        );
        assert_eq!(
            session.lines().last().unwrap(),
            "  gl.bindTexture(3553, null);"
        );
        assert_eq!(session.diagnostics().len(), 1);
    }

    #[test]
    fn test_return_value_assignment() {
        let mut session = session();
        let texture = ResourceHandle::new(HandleKind::Texture);
        session.record_call("createTexture", &[], &Value::from(texture.clone()));
        session.record_call(
            "bindTexture",
            &[Value::from(3553), Value::from(texture)],
            &Value::Undefined,
        );

        let lines = session.lines();
        assert_eq!(lines[2], "  WebGLTextures[0] = gl.createTexture();");
        assert_eq!(lines[3], "  gl.bindTexture(3553, WebGLTextures[0]);");
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_primitive_return_is_bare_call() {
        let mut session = session();
        session.record_call("getError", &[], &Value::from(0));
        assert_eq!(session.lines().last().unwrap(), "  gl.getError();");
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_opaque_return_is_flagged() {
        let mut session = session();
        session.record_call(
            "getExtension",
            &[Value::from("OES_texture_float")],
            &Value::Opaque("OES_texture_float".into()),
        );
        assert_eq!(
            session.lines().last().unwrap(),
            "  gl.getExtension(\"OES_texture_float\");"
        );
        assert!(matches!(
            session.diagnostics(),
            [Diagnostic::UnsupportedReturn { .. }]
        ));
    }

    #[test]
    fn test_buffer_view_argument() {
        let mut session = session();
        session.record_call(
            "bufferData",
            &[
                Value::from(34962),
                Value::from(BufferView::float32(&[0.0, 1.0])),
                Value::from(35044),
            ],
            &Value::Undefined,
        );
        assert_eq!(
            session.lines().last().unwrap(),
            "  gl.bufferData(34962, new Float32Array([0,1]), 35044);"
        );
    }

    #[test]
    fn test_annotation_lines_and_depth() {
        let mut session = session();
        session.push_annotation("setup");
        session.record_call("clear", &[Value::from(16384)], &Value::Undefined);
        session.pop_annotation(Some("setup"));

        let lines = session.lines();
        assert_eq!(&lines[2..], ["  { // setup", "    gl.clear(16384);", "  }"]);
        assert!(session.diagnostics().is_empty());
        assert!(session.annotations().is_empty());
    }

    #[test]
    fn test_pop_empty_warns_without_line() {
        let mut session = session();
        let before = session.trace().len();
        assert_eq!(session.pop_annotation(None), PopOutcome::Empty);
        assert_eq!(session.trace().len(), before);
        assert_eq!(session.diagnostics(), [Diagnostic::EmptyAnnotationStack]);
    }

    #[test]
    fn test_diagnostic_messages() {
        let mismatch = Diagnostic::MismatchedAnnotation {
            expected: "a".into(),
            found: "b".into(),
        };
        assert_eq!(
            mismatch.to_string(),
            "mismatched annotation push/pop: expected a to be popped, but b was at the top of the annotation stack"
        );
    }

    #[test]
    fn test_export_round_trip() {
        let mut session = session();
        let buffer = ResourceHandle::new(HandleKind::Buffer);
        session.record_call("createBuffer", &[], &Value::from(buffer));

        let export = session.export();
        assert_eq!(export.declarations, vec![HandleKind::Buffer]);
        assert_eq!(export.stats.calls_recorded, 1);

        let json = export.to_json().unwrap();
        assert_eq!(TraceExport::from_json(&json).unwrap(), export);
    }
}
