//! Trace compiler
//!
//! Renders a session into a standalone generator routine:
//!
//! ```text
//! function* render(gl) {
//!   // Recorded using glrec
//!   var WebGLBuffers = [];
//!   gl.canvas.width = 300;
//!   gl.canvas.height = 150;
//!   WebGLBuffers[0] = gl.createBuffer();
//!   gl.bindBuffer(34962, WebGLBuffers[0]);
//! }
//! ```
//!
//! A replay driver steps the generator once per animation frame; each
//! `yield;` in the body hands control back to it.

use crate::registry::Symbol;
use crate::session::Session;

/// A compiled script ready to be saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

/// Render the session's trace as a replay routine. Does not mutate the
/// session; compiling twice yields the same text.
pub fn compile(session: &Session) -> String {
    let config = session.config();
    let indent = &config.indent;

    let mut text = format!(
        "function* {}({}) {{\n",
        config.routine_name, config.target_name
    );
    text.push_str(&format!("{}// {}\n", indent, config.provenance));
    for kind in session.registry().kinds() {
        text.push_str(&format!("{}var {} = [];\n", indent, Symbol::array_name(kind)));
    }
    text.push_str(&session.lines().join("\n"));
    text.push_str("\n}\n");
    text
}

/// Compile the session into a named script file.
pub fn artifact(session: &Session) -> ScriptArtifact {
    let config = session.config();
    ScriptArtifact {
        file_name: config.file_name.clone(),
        mime_type: config.mime_type.clone(),
        contents: compile(session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecorderConfig;
    use glrec_core::{FrameCounter, HandleKind, ResourceHandle, Value};
    use std::sync::Arc;

    fn session(config: RecorderConfig) -> Session {
        Session::new(Arc::new(config), FrameCounter::stopped(), 300, 150)
    }

    #[test]
    fn test_fresh_session() {
        let session = session(RecorderConfig::default());
        assert_eq!(
            compile(&session),
            "function* render(gl) {\n  // Recorded using glrec\n  gl.canvas.width = 300;\n  gl.canvas.height = 150;\n}\n"
        );
    }

    #[test]
    fn test_declarations_in_first_sighting_order() {
        let mut session = session(RecorderConfig::default());
        let program = ResourceHandle::new(HandleKind::Program);
        let shader = ResourceHandle::new(HandleKind::Shader);
        session.record_call("createProgram", &[], &Value::from(program.clone()));
        session.record_call("createShader", &[Value::from(35633)], &Value::from(shader.clone()));
        session.record_call(
            "attachShader",
            &[Value::from(program), Value::from(shader)],
            &Value::Undefined,
        );

        let text = compile(&session);
        let expected = "\
function* render(gl) {
  // Recorded using glrec
  var WebGLPrograms = [];
  var WebGLShaders = [];
  gl.canvas.width = 300;
  gl.canvas.height = 150;
  WebGLPrograms[0] = gl.createProgram();
  WebGLShaders[0] = gl.createShader(35633);
  gl.attachShader(WebGLPrograms[0], WebGLShaders[0]);
}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_compile_is_repeatable() {
        let mut session = session(RecorderConfig::default());
        session.record_call("clear", &[Value::from(16384)], &Value::Undefined);

        let first = compile(&session);
        let lines_before = session.trace().len();
        assert_eq!(compile(&session), first);
        assert_eq!(session.trace().len(), lines_before);
    }

    #[test]
    fn test_custom_names() {
        let config = RecorderConfig::default()
            .with_target_name("ctx")
            .with_provenance("captured");
        let session = session(config);
        let text = compile(&session);

        assert!(text.starts_with("function* render(ctx) {\n  // captured\n"));
        assert!(text.contains("  ctx.canvas.width = 300;"));
    }

    #[test]
    fn test_artifact_metadata() {
        let session = session(RecorderConfig::default());
        let artifact = artifact(&session);
        assert_eq!(artifact.file_name, "trace.js");
        assert_eq!(artifact.mime_type, "application/javascript");
        assert_eq!(artifact.contents, compile(&session));
    }
}
