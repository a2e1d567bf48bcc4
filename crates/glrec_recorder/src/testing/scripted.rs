//! Scripted fake graphics context.

use glrec_core::{
    ContextError, ContextKind, GraphicsContext, HandleKind, Member, ResourceHandle, Result, Value,
};
use rustc_hash::FxHashMap;

/// What a scripted method returns.
#[derive(Clone, Copy, Debug)]
enum Returns {
    Nothing,
    Handle(HandleKind),
    Number(f64),
    Bool(bool),
    /// An extension object for string arguments, `null` otherwise.
    Extension,
}

/// Method name, return behavior, and whether the first argument must be a
/// resource handle.
const METHODS: &[(&str, Returns, bool)] = &[
    ("activeTexture", Returns::Nothing, false),
    ("attachShader", Returns::Nothing, true),
    ("bindBuffer", Returns::Nothing, false),
    ("bindFramebuffer", Returns::Nothing, false),
    ("bindRenderbuffer", Returns::Nothing, false),
    ("bindTexture", Returns::Nothing, false),
    ("blendFunc", Returns::Nothing, false),
    ("bufferData", Returns::Nothing, false),
    ("bufferSubData", Returns::Nothing, false),
    ("clear", Returns::Nothing, false),
    ("clearColor", Returns::Nothing, false),
    ("clearDepth", Returns::Nothing, false),
    ("compileShader", Returns::Nothing, true),
    ("createBuffer", Returns::Handle(HandleKind::Buffer), false),
    ("createFramebuffer", Returns::Handle(HandleKind::Framebuffer), false),
    ("createProgram", Returns::Handle(HandleKind::Program), false),
    ("createRenderbuffer", Returns::Handle(HandleKind::Renderbuffer), false),
    ("createShader", Returns::Handle(HandleKind::Shader), false),
    ("createTexture", Returns::Handle(HandleKind::Texture), false),
    ("deleteBuffer", Returns::Nothing, false),
    ("deleteTexture", Returns::Nothing, false),
    ("disable", Returns::Nothing, false),
    ("drawArrays", Returns::Nothing, false),
    ("drawElements", Returns::Nothing, false),
    ("enable", Returns::Nothing, false),
    ("enableVertexAttribArray", Returns::Nothing, false),
    ("getActiveAttrib", Returns::Handle(HandleKind::ActiveInfo), true),
    ("getActiveUniform", Returns::Handle(HandleKind::ActiveInfo), true),
    ("getAttribLocation", Returns::Number(0.0), true),
    ("getError", Returns::Number(0.0), false),
    ("getExtension", Returns::Extension, false),
    ("getProgramParameter", Returns::Bool(true), true),
    ("getShaderParameter", Returns::Bool(true), true),
    (
        "getShaderPrecisionFormat",
        Returns::Handle(HandleKind::ShaderPrecisionFormat),
        false,
    ),
    (
        "getUniformLocation",
        Returns::Handle(HandleKind::UniformLocation),
        true,
    ),
    ("linkProgram", Returns::Nothing, true),
    ("pixelStorei", Returns::Nothing, false),
    ("shaderSource", Returns::Nothing, true),
    ("texImage2D", Returns::Nothing, false),
    ("texParameteri", Returns::Nothing, false),
    ("uniform1f", Returns::Nothing, false),
    ("uniform1i", Returns::Nothing, false),
    ("uniform4fv", Returns::Nothing, false),
    ("uniformMatrix4fv", Returns::Nothing, false),
    ("useProgram", Returns::Nothing, false),
    ("vertexAttribPointer", Returns::Nothing, false),
    ("viewport", Returns::Nothing, false),
];

const PROPERTIES: &[&str] = &["canvas", "drawingBufferHeight", "drawingBufferWidth"];

/// A fake WebGL context.
///
/// Creation methods hand out fresh [`ResourceHandle`]s, methods that operate
/// on a program or shader reject a non-handle first argument, and failures
/// can be injected per method. Every successful call is logged.
#[derive(Debug)]
pub struct ScriptedContext {
    kind: ContextKind,
    width: u32,
    height: u32,
    calls: Vec<(String, Vec<Value>)>,
    created: Vec<ResourceHandle>,
    failures: FxHashMap<String, ContextError>,
}

impl ScriptedContext {
    pub fn new(kind: ContextKind, width: u32, height: u32) -> Self {
        Self {
            kind,
            width,
            height,
            calls: Vec::new(),
            created: Vec::new(),
            failures: FxHashMap::default(),
        }
    }

    /// A WebGL context with a default-sized drawing buffer.
    pub fn webgl() -> Self {
        Self::new(ContextKind::Webgl, 300, 150)
    }

    pub fn kind(&self) -> &ContextKind {
        &self.kind
    }

    /// Make the next call of `method` fail with `error`.
    pub fn fail_next(&mut self, method: &str, error: ContextError) {
        self.failures.insert(method.to_string(), error);
    }

    /// Successful calls, in order.
    pub fn calls(&self) -> &[(String, Vec<Value>)] {
        &self.calls
    }

    /// Handles handed out, in order.
    pub fn created(&self) -> &[ResourceHandle] {
        &self.created
    }

    fn lookup(method: &str) -> Option<(Returns, bool)> {
        METHODS
            .iter()
            .find(|(name, _, _)| *name == method)
            .map(|&(_, returns, needs_handle)| (returns, needs_handle))
    }
}

impl GraphicsContext for ScriptedContext {
    fn members(&self) -> Vec<Member> {
        METHODS
            .iter()
            .map(|(name, _, _)| Member::method(*name))
            .chain(PROPERTIES.iter().map(|name| Member::property(*name)))
            .collect()
    }

    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value> {
        let (returns, needs_handle) =
            Self::lookup(method).ok_or_else(|| ContextError::NoSuchMethod(method.to_string()))?;

        if let Some(error) = self.failures.remove(method) {
            return Err(error);
        }
        if needs_handle && args.first().and_then(Value::as_handle).is_none() {
            return Err(ContextError::InvalidArguments {
                method: method.to_string(),
                reason: "first argument must be a resource handle".to_string(),
            });
        }

        let result = match returns {
            Returns::Nothing => Value::Undefined,
            Returns::Number(n) => Value::Number(n),
            Returns::Bool(b) => Value::Bool(b),
            Returns::Handle(kind) => {
                let handle = ResourceHandle::with_raw(kind, self.created.len() as u64 + 1);
                self.created.push(handle.clone());
                Value::Handle(handle)
            }
            Returns::Extension => match args.first().and_then(Value::as_str) {
                Some(name) => Value::Opaque(name.to_string()),
                None => Value::Null,
            },
        };

        self.calls.push((method.to_string(), args.to_vec()));
        Ok(result)
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "drawingBufferWidth" => Some(Value::from(self.width)),
            "drawingBufferHeight" => Some(Value::from(self.height)),
            "canvas" => Some(Value::Opaque("HTMLCanvasElement".to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_hands_out_distinct_handles() {
        let mut gl = ScriptedContext::webgl();
        let a = gl.invoke("createTexture", &[]).unwrap();
        let b = gl.invoke("createTexture", &[]).unwrap();

        assert_ne!(a, b);
        assert_eq!(gl.created().len(), 2);
    }

    #[test]
    fn test_handle_argument_required() {
        let mut gl = ScriptedContext::webgl();
        assert!(gl.invoke("compileShader", &[Value::from(1)]).is_err());

        let shader = gl.invoke("createShader", &[Value::from(35633)]).unwrap();
        assert!(gl.invoke("compileShader", &[shader]).is_ok());
    }

    #[test]
    fn test_injected_failure_is_one_shot() {
        let mut gl = ScriptedContext::webgl();
        gl.fail_next("clear", ContextError::ContextLost);

        assert_eq!(
            gl.invoke("clear", &[Value::from(16384)]),
            Err(ContextError::ContextLost)
        );
        assert!(gl.invoke("clear", &[Value::from(16384)]).is_ok());
        assert_eq!(gl.calls().len(), 1);
    }

    #[test]
    fn test_members_and_properties() {
        let gl = ScriptedContext::new(ContextKind::Webgl, 800, 600);
        let members = gl.members();

        assert!(members.contains(&Member::method("drawArrays")));
        assert!(members.contains(&Member::property("drawingBufferWidth")));
        assert_eq!(gl.property("drawingBufferHeight"), Some(Value::from(600)));
        assert_eq!(gl.property("drawArrays"), None);
    }
}
