//! Annotation stack
//!
//! User-supplied labels that bracket recorded calls. The stack is permissive:
//! popping an empty stack or popping under the wrong label is reported to the
//! caller, never treated as a failure.

/// Result of a pop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopOutcome {
    /// The top label was removed.
    Popped(String),
    /// The top label was removed, but it was not the expected one.
    Mismatched { expected: String, popped: String },
    /// Nothing to pop; the stack is unchanged.
    Empty,
}

impl PopOutcome {
    /// The removed label, if anything was removed.
    pub fn popped(&self) -> Option<&str> {
        match self {
            PopOutcome::Popped(label) | PopOutcome::Mismatched { popped: label, .. } => {
                Some(label)
            }
            PopOutcome::Empty => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnnotationStack {
    labels: Vec<String>,
}

impl AnnotationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
    }

    /// Pop the top label. With `expected` set, a different top label is
    /// reported as a mismatch but popped anyway.
    pub fn pop(&mut self, expected: Option<&str>) -> PopOutcome {
        let Some(popped) = self.labels.pop() else {
            return PopOutcome::Empty;
        };
        match expected {
            Some(expected) if expected != popped => PopOutcome::Mismatched {
                expected: expected.to_string(),
                popped,
            },
            _ => PopOutcome::Popped(popped),
        }
    }

    pub fn depth(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Innermost label.
    pub fn top(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    /// Labels from outermost to innermost.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
