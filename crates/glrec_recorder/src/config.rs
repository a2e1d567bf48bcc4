//! Recorder configuration
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! target_name = "gl"
//! routine_name = "render"
//! context_kinds = ["webgl", "experimental-webgl"]
//! ```

use glrec_core::ContextKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the config document
    #[error("Invalid recorder config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How traces are recorded and rendered.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecorderConfig {
    /// Name of the replay routine's context parameter.
    #[serde(default = "default_target_name")]
    pub target_name: String,
    /// Name of the generated replay routine.
    #[serde(default = "default_routine_name")]
    pub routine_name: String,
    /// Comment line placed at the top of the routine body.
    #[serde(default = "default_provenance")]
    pub provenance: String,
    /// File name of the downloaded script.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// MIME type of the downloaded script.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    /// One level of indentation.
    #[serde(default = "default_indent")]
    pub indent: String,
    /// Context type names that get a recording proxy.
    #[serde(default = "default_context_kinds")]
    pub context_kinds: Vec<String>,
}

fn default_target_name() -> String {
    "gl".to_string()
}

fn default_routine_name() -> String {
    "render".to_string()
}

fn default_provenance() -> String {
    "Recorded using glrec".to_string()
}

fn default_file_name() -> String {
    "trace.js".to_string()
}

fn default_mime_type() -> String {
    "application/javascript".to_string()
}

fn default_indent() -> String {
    "  ".to_string()
}

fn default_context_kinds() -> Vec<String> {
    vec!["webgl".to_string(), "experimental-webgl".to_string()]
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            target_name: default_target_name(),
            routine_name: default_routine_name(),
            provenance: default_provenance(),
            file_name: default_file_name(),
            mime_type: default_mime_type(),
            indent: default_indent(),
            context_kinds: default_context_kinds(),
        }
    }
}

impl RecorderConfig {
    /// Parse a config from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Whether acquiring a context of this kind should be recorded.
    pub fn records(&self, kind: &ContextKind) -> bool {
        self.context_kinds.iter().any(|name| name == kind.as_str())
    }

    /// Set the replay target parameter name.
    pub fn with_target_name(mut self, name: impl Into<String>) -> Self {
        self.target_name = name.into();
        self
    }

    /// Set the provenance comment.
    pub fn with_provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = provenance.into();
        self
    }
}
