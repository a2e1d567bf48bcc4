//! Opaque graphics resource handles
//!
//! Handles are session-scoped objects handed out by a graphics context
//! (buffers, textures, programs, ...). They carry no printable value, so the
//! recorder refers to them by identity only: two clones of the same handle are
//! the same resource, two separately created handles never are.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// The closed set of opaque object kinds a WebGL context hands out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandleKind {
    ActiveInfo,
    Buffer,
    Framebuffer,
    Program,
    Renderbuffer,
    Shader,
    ShaderPrecisionFormat,
    Texture,
    UniformLocation,
}

impl HandleKind {
    /// Every handle kind, in declaration order.
    pub const ALL: [HandleKind; 9] = [
        HandleKind::ActiveInfo,
        HandleKind::Buffer,
        HandleKind::Framebuffer,
        HandleKind::Program,
        HandleKind::Renderbuffer,
        HandleKind::Shader,
        HandleKind::ShaderPrecisionFormat,
        HandleKind::Texture,
        HandleKind::UniformLocation,
    ];

    /// The host type name of this kind, e.g. `WebGLBuffer`.
    pub fn type_name(self) -> &'static str {
        match self {
            HandleKind::ActiveInfo => "WebGLActiveInfo",
            HandleKind::Buffer => "WebGLBuffer",
            HandleKind::Framebuffer => "WebGLFramebuffer",
            HandleKind::Program => "WebGLProgram",
            HandleKind::Renderbuffer => "WebGLRenderbuffer",
            HandleKind::Shader => "WebGLShader",
            HandleKind::ShaderPrecisionFormat => "WebGLShaderPrecisionFormat",
            HandleKind::Texture => "WebGLTexture",
            HandleKind::UniformLocation => "WebGLUniformLocation",
        }
    }

    /// Look a kind up by its host type name.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[derive(Debug)]
struct HandleInner {
    kind: HandleKind,
    id: u64,
    raw: Option<u64>,
}

/// An opaque resource handle.
///
/// Cloning shares the instance. Equality is identity: `a == b` holds only when
/// both were cloned from the same [`ResourceHandle::new`] call.
#[derive(Clone)]
pub struct ResourceHandle {
    inner: Arc<HandleInner>,
}

impl ResourceHandle {
    /// Create a fresh handle of the given kind.
    pub fn new(kind: HandleKind) -> Self {
        Self::build(kind, None)
    }

    /// Create a fresh handle that carries the native object name of the
    /// underlying API (e.g. a GL buffer name).
    pub fn with_raw(kind: HandleKind, raw: u64) -> Self {
        Self::build(kind, Some(raw))
    }

    fn build(kind: HandleKind, raw: Option<u64>) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                kind,
                id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
                raw,
            }),
        }
    }

    /// The kind of resource this handle refers to.
    pub fn kind(&self) -> HandleKind {
        self.inner.kind
    }

    /// Process-unique instance id. Stable for the lifetime of the handle and
    /// shared by all of its clones.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Native object name, if the context supplied one.
    pub fn raw(&self) -> Option<u64> {
        self.inner.raw
    }

    /// Whether `other` is the same instance as `self`.
    pub fn same_instance(&self, other: &ResourceHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for ResourceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Eq for ResourceHandle {}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.inner.kind.type_name(), self.inner.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_identity() {
        let a = ResourceHandle::new(HandleKind::Texture);
        let b = a.clone();

        assert!(a.same_instance(&b));
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_distinct_handles_never_equal() {
        let a = ResourceHandle::with_raw(HandleKind::Buffer, 7);
        let b = ResourceHandle::with_raw(HandleKind::Buffer, 7);

        // Same kind, same native name, still two different instances
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.raw(), Some(7));
    }

    #[test]
    fn test_type_names_round_trip() {
        for kind in HandleKind::ALL {
            assert_eq!(HandleKind::from_type_name(kind.type_name()), Some(kind));
        }
        assert_eq!(HandleKind::from_type_name("WebGLQuery"), None);
    }

    #[test]
    fn test_debug_format() {
        let handle = ResourceHandle::new(HandleKind::Shader);
        let text = format!("{:?}", handle);
        assert!(text.starts_with("WebGLShader#"));
    }
}
