//! Graphics context capability
//!
//! The recorder never talks to a graphics API directly. It talks to anything
//! implementing [`GraphicsContext`]: an object whose members can be enumerated
//! and whose methods can be invoked by name with dynamic [`Value`] arguments.
//! A [`Surface`] is the canvas-like object contexts are acquired from.

use crate::error::Result;
use crate::value::Value;
use std::fmt;

/// Whether a context member is callable or a plain property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Property,
}

/// One entry of a context's member table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
}

impl Member {
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
        }
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property,
        }
    }

    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }
}

/// A graphics context whose calls can be observed.
pub trait GraphicsContext {
    /// The full member table, methods and properties.
    fn members(&self) -> Vec<Member>;

    /// Invoke a method by name.
    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value>;

    /// Read a non-function member. `None` if there is no such property.
    fn property(&self, name: &str) -> Option<Value>;
}

/// The requested context type of a context acquisition, e.g. `"webgl"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContextKind {
    Webgl,
    ExperimentalWebgl,
    Webgl2,
    TwoD,
    Other(String),
}

impl ContextKind {
    pub fn as_str(&self) -> &str {
        match self {
            ContextKind::Webgl => "webgl",
            ContextKind::ExperimentalWebgl => "experimental-webgl",
            ContextKind::Webgl2 => "webgl2",
            ContextKind::TwoD => "2d",
            ContextKind::Other(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name {
            "webgl" => ContextKind::Webgl,
            "experimental-webgl" => ContextKind::ExperimentalWebgl,
            "webgl2" => ContextKind::Webgl2,
            "2d" => ContextKind::TwoD,
            other => ContextKind::Other(other.to_string()),
        }
    }
}

impl From<&str> for ContextKind {
    fn from(name: &str) -> Self {
        ContextKind::parse(name)
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current drawing dimensions of a surface.
///
/// Read on every recorded call, so implementations should be cheap.
pub trait SurfaceSize {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// A canvas-like surface contexts are acquired from.
pub trait Surface: SurfaceSize {
    type Context: GraphicsContext;

    /// Acquire a rendering context of the given kind. `None` if the surface
    /// cannot provide one.
    fn get_context(&self, kind: &ContextKind) -> Option<Self::Context>;
}
