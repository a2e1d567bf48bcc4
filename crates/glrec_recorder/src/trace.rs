//! Trace buffer
//!
//! The trace is kept as structured instructions and only turned into script
//! text when rendered, so rendering can be tested (and changed) independently
//! of interception.

use crate::config::RecorderConfig;
use crate::registry::Symbol;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Rendered argument literals of one call.
pub type CallArgs = SmallVec<[String; 4]>;

/// One recorded instruction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Suspension point: one or more animation frames elapsed.
    Yield,
    /// Surface dimensions changed (or were seeded).
    Resize { width: u32, height: u32 },
    /// A successful context method call.
    Call {
        assign: Option<Symbol>,
        method: String,
        args: CallArgs,
        /// Some argument or the return value could not be expressed.
        degraded: bool,
    },
    OpenAnnotation { label: String },
    CloseAnnotation,
}

impl Instruction {
    pub fn is_call(&self) -> bool {
        matches!(self, Instruction::Call { .. })
    }

    /// Render to script lines, without indentation.
    pub fn render(&self, target: &str) -> SmallVec<[String; 2]> {
        let mut lines = SmallVec::new();
        match self {
            Instruction::Yield => lines.push("yield;".to_string()),
            Instruction::Resize { width, height } => {
                lines.push(format!("{}.canvas.width = {};", target, width));
                lines.push(format!("{}.canvas.height = {};", target, height));
            }
            Instruction::Call {
                assign,
                method,
                args,
                ..
            } => {
                let call = format!("{}.{}({});", target, method, args.join(", "));
                lines.push(match assign {
                    Some(symbol) => format!("{} = {}", symbol, call),
                    None => call,
                });
            }
            Instruction::OpenAnnotation { label } => lines.push(format!("{{ // {}", label)),
            Instruction::CloseAnnotation => lines.push("}".to_string()),
        }
        lines
    }
}

/// An instruction stamped with the annotation depth it was appended at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub depth: usize,
    pub instruction: Instruction,
}

/// Append-only list of trace entries.
#[derive(Clone, Debug, Default)]
pub struct TraceBuffer {
    entries: Vec<TraceEntry>,
}

impl TraceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, depth: usize, instruction: Instruction) {
        self.entries.push(TraceEntry { depth, instruction });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Script lines with indentation. Every line sits one level inside the
    /// replay routine, plus one level per enclosing annotation.
    pub fn lines(&self, config: &RecorderConfig) -> Vec<String> {
        let mut out = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let indent = config.indent.repeat(entry.depth + 1);
            for line in entry.instruction.render(&config.target_name) {
                out.push(format!("{}{}", indent, line));
            }
        }
        out
    }
}
