//! Dynamic values crossing the graphics context boundary
//!
//! Every argument passed to and every value returned from a context method is
//! a [`Value`]. The variants mirror what a WebGL call can carry: primitives,
//! typed-array views over binary data, opaque resource handles, and anything
//! else the recorder cannot express (kept as a description only).

use crate::handle::ResourceHandle;
use std::fmt;

/// Element type of a binary buffer view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl ViewKind {
    /// Constructor name of the typed array, e.g. `Float32Array`.
    pub fn constructor_name(self) -> &'static str {
        match self {
            ViewKind::Int8 => "Int8Array",
            ViewKind::Uint8 => "Uint8Array",
            ViewKind::Uint8Clamped => "Uint8ClampedArray",
            ViewKind::Int16 => "Int16Array",
            ViewKind::Uint16 => "Uint16Array",
            ViewKind::Int32 => "Int32Array",
            ViewKind::Uint32 => "Uint32Array",
            ViewKind::Float32 => "Float32Array",
            ViewKind::Float64 => "Float64Array",
        }
    }
}

/// A typed view over binary data.
///
/// Elements are widened to `f64`, which represents every supported element
/// type exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct BufferView {
    kind: ViewKind,
    elements: Vec<f64>,
}

impl BufferView {
    /// Create a view from already-widened elements.
    pub fn new(kind: ViewKind, elements: Vec<f64>) -> Self {
        Self { kind, elements }
    }

    fn widen<T: Copy + Into<f64>>(kind: ViewKind, data: &[T]) -> Self {
        Self::new(kind, data.iter().map(|&v| v.into()).collect())
    }

    pub fn int8(data: &[i8]) -> Self {
        Self::widen(ViewKind::Int8, data)
    }

    pub fn uint8(data: &[u8]) -> Self {
        Self::widen(ViewKind::Uint8, data)
    }

    pub fn int16(data: &[i16]) -> Self {
        Self::widen(ViewKind::Int16, data)
    }

    pub fn uint16(data: &[u16]) -> Self {
        Self::widen(ViewKind::Uint16, data)
    }

    pub fn int32(data: &[i32]) -> Self {
        Self::widen(ViewKind::Int32, data)
    }

    pub fn uint32(data: &[u32]) -> Self {
        Self::widen(ViewKind::Uint32, data)
    }

    pub fn float32(data: &[f32]) -> Self {
        Self::widen(ViewKind::Float32, data)
    }

    pub fn float64(data: &[f64]) -> Self {
        Self::widen(ViewKind::Float64, data)
    }

    /// Element type of the view.
    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    /// The elements, widened to `f64`.
    pub fn elements(&self) -> &[f64] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A value passed to or returned from a graphics context method.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// No value (the return of a void method).
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    BufferView(BufferView),
    Handle(ResourceHandle),
    /// Any other host object, kept only as a description.
    Opaque(String),
}

impl Value {
    /// The resource handle carried by this value, if any.
    pub fn as_handle(&self) -> Option<&ResourceHandle> {
        match self {
            Value::Handle(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Whether this is a number, boolean, string or null.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::BufferView(view) => {
                write!(f, "{}({})", view.kind().constructor_name(), view.len())
            }
            Value::Handle(handle) => write!(f, "{:?}", handle),
            Value::Opaque(description) => write!(f, "<{}>", description),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<BufferView> for Value {
    fn from(view: BufferView) -> Self {
        Value::BufferView(view)
    }
}

impl From<ResourceHandle> for Value {
    fn from(handle: ResourceHandle) -> Self {
        Value::Handle(handle)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
