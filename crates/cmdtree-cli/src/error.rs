// Dweve cmdtree - Hierarchical Command Tree Shell
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the cmdtree binary.

use cmdtree_config::ConfigError;
use cmdtree_core::TreeError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// A file could not be read or written.
    #[error("I/O error for '{path}': {message}")]
    Io { path: PathBuf, message: String },

    /// The file exceeds `CMDTREE_MAX_FILE_SIZE`.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// A tree document did not load.
    #[error("{path}: {source}")]
    Tree { path: PathBuf, source: TreeError },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {message}")]
    Json { message: String },

    /// The line editor failed for a reason other than end of input.
    #[error("Terminal error: {0}")]
    Readline(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `check` found error-level diagnostics.
    #[error("Lint errors found")]
    LintErrors,
}

impl CliError {
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    pub fn tree(path: impl Into<PathBuf>, source: TreeError) -> Self {
        Self::Tree {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            message: source.to_string(),
        }
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(source: rustyline::error::ReadlineError) -> Self {
        Self::Readline(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdtree_core::TreeErrorKind;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "op.json",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("op.json"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_file_too_large_display() {
        let err = CliError::file_too_large("big.json", 200_000_000, 64 * 1024 * 1024);
        let msg = err.to_string();
        assert!(msg.contains("big.json"));
        assert!(msg.contains("200000000 bytes"));
        assert!(msg.contains("64 MB"));
    }

    #[test]
    fn test_tree_error_names_file() {
        let source = TreeError::new(TreeErrorKind::NodeType, "unknown type 'x'", &["show".to_string()]);
        let msg = CliError::tree("op.json", source).to_string();
        assert!(msg.starts_with("op.json: "));
        assert!(msg.contains("unknown type 'x'"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = ConfigError::Json("expected value".to_string()).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: CliError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error: "));
    }
}
