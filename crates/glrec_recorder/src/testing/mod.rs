//! Testing utilities for recorder users and the recorder itself.
//!
//! This module provides:
//! - `HeadlessCanvas` - A resizable surface with no window behind it
//! - `ScriptedContext` - A fake WebGL context that hands out real handles
//! - `ManualFrameScheduler` - Animation frames that tick only when told to
//! - `TestHarness` - All of the above wired to a `RecordingCanvas`
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
//! gl.call("clearColor", &[Value::from(1), Value::from(0), Value::from(0), Value::from(1)])
//!     .unwrap();
//! harness.tick(1);
//! gl.call("clear", &[Value::from(16384)]).unwrap();
//!
//! assert!(gl.trace().contains(&"  yield;".to_string()));
//! ```

mod headless;
mod runner;
mod scheduler;
mod scripted;

pub use headless::HeadlessCanvas;
pub use runner::TestHarness;
pub use scheduler::ManualFrameScheduler;
pub use scripted::ScriptedContext;
