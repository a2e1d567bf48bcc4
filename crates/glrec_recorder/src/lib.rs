//! Call recording and replay script generation for WebGL-style contexts.
//!
//! This crate provides:
//! - `RecordingCanvas` - Intercepts context acquisition and wraps WebGL contexts
//! - `RecordingContext` - The recording proxy; behaves exactly like the wrapped context
//! - `ResourceRegistry` - Stable symbolic names for opaque resource handles
//! - `compile` - Renders a session into a `function* render(gl) { ... }` routine
//! - `testing` - Headless fixtures for exercising recorders without a GPU
//!
//! # Example
//!
//! ```rust
//! use glrec_recorder::testing::TestHarness;
//! use glrec_core::Value;
//!
//! let harness = TestHarness::new(300, 150);
//! let mut gl = harness.webgl().unwrap();
//!
//! let buffer = gl.call("createBuffer", &[]).unwrap();
//! gl.call("bindBuffer", &[Value::from(34962), buffer]).unwrap();
//!
//! let script = gl.compile_trace();
//! assert!(script.contains("WebGLBuffers[0] = gl.createBuffer();"));
//! assert!(script.contains("gl.bindBuffer(34962, WebGLBuffers[0]);"));
//! ```

pub mod annotation;
pub mod canvas;
pub mod compiler;
pub mod config;
pub mod download;
pub mod interceptor;
pub mod literal;
pub mod registry;
pub mod session;
pub mod testing;
pub mod trace;

pub use annotation::{AnnotationStack, PopOutcome};
pub use canvas::{AcquiredContext, RecordingCanvas};
pub use compiler::{artifact, compile, ScriptArtifact};
pub use config::{ConfigError, RecorderConfig};
pub use download::{DirectorySink, DownloadError, DownloadSink, MemorySink};
pub use interceptor::RecordingContext;
pub use registry::{ResourceRegistry, Symbol};
pub use session::{Diagnostic, RecordingStats, Session, TraceExport};
pub use trace::{Instruction, TraceBuffer, TraceEntry};
