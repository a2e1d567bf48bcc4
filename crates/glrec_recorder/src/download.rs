//! Delivering compiled scripts
//!
//! The recorder hands a [`ScriptArtifact`] to a [`DownloadSink`] exactly once
//! per request. Browser hosts implement the sink with a blob download; native
//! hosts can use [`DirectorySink`].

use crate::compiler::ScriptArtifact;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Writing the artifact failed
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The host refused the download
    #[error("Download rejected: {0}")]
    Rejected(String),
}

/// Something that can save a compiled script.
pub trait DownloadSink {
    fn save(&self, artifact: &ScriptArtifact) -> Result<(), DownloadError>;
}

/// Writes artifacts into a directory under their file name.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, artifact: &ScriptArtifact) -> Result<(), DownloadError> {
        let path = self.dir.join(&artifact.file_name);
        fs::write(&path, artifact.contents.as_bytes())
            .map_err(|source| DownloadError::Io { path: path.clone(), source })?;
        tracing::info!(path = %path.display(), bytes = artifact.contents.len(), "trace saved");
        Ok(())
    }
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Mutex<Vec<ScriptArtifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything saved so far, oldest first.
    pub fn saved(&self) -> Vec<ScriptArtifact> {
        self.saved.lock().clone()
    }
}

impl DownloadSink for MemorySink {
    fn save(&self, artifact: &ScriptArtifact) -> Result<(), DownloadError> {
        self.saved.lock().push(artifact.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> ScriptArtifact {
        ScriptArtifact {
            file_name: "trace.js".into(),
            mime_type: "application/javascript".into(),
            contents: "function* render(gl) {\n}\n".into(),
        }
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        sink.save(&artifact()).unwrap();

        let written = fs::read_to_string(dir.path().join("trace.js")).unwrap();
        assert_eq!(written, artifact().contents);
    }

    #[test]
    fn test_directory_sink_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("missing").join("nested"));

        let err = sink.save(&artifact()).unwrap_err();
        assert!(matches!(err, DownloadError::Io { .. }));
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        let mut second = artifact();
        second.contents.push_str("// again\n");

        sink.save(&artifact()).unwrap();
        sink.save(&second).unwrap();

        assert_eq!(sink.saved(), vec![artifact(), second]);
    }
}
