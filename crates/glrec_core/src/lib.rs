//! glrec Core
//!
//! This crate provides the types shared by every part of the glrec call
//! recorder:
//!
//! - **Context capability**: the `GraphicsContext` and `Surface` traits a real
//!   graphics context implements so that it can be wrapped
//! - **Values**: the dynamic argument/return type crossing the context boundary
//! - **Resource handles**: the closed set of opaque WebGL object kinds, compared
//!   by identity
//! - **Frame counter**: the process-wide animation frame tick
//!
//! # Example
//!
//! ```rust
//! use glrec_core::{HandleKind, ResourceHandle, Value};
//!
//! let buffer = ResourceHandle::new(HandleKind::Buffer);
//! let arg = Value::from(buffer.clone());
//!
//! assert_eq!(arg.as_handle(), Some(&buffer));
//! assert_eq!(HandleKind::Buffer.type_name(), "WebGLBuffer");
//! ```

pub mod context;
pub mod error;
pub mod frame;
pub mod handle;
pub mod value;

pub use context::{ContextKind, GraphicsContext, Member, MemberKind, Surface, SurfaceSize};
pub use error::{ContextError, FrameError, Result};
pub use frame::{FrameCallback, FrameCounter, FrameScheduler};
pub use handle::{HandleKind, ResourceHandle};
pub use value::{BufferView, Value, ViewKind};
