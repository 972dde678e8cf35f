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

//! Error types for tree loading, line processing and command execution.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The kind of error that occurred while loading a tree document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeErrorKind {
    /// The document is not valid JSON.
    Json,
    /// A node is not a JSON object.
    Structure,
    /// Unknown value for the `type` metadata key.
    NodeType,
    /// A metadata key holds a value of the wrong shape.
    Metadata,
}

impl fmt::Display for TreeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JsonError"),
            Self::Structure => write!(f, "StructureError"),
            Self::NodeType => write!(f, "NodeTypeError"),
            Self::Metadata => write!(f, "MetadataError"),
        }
    }
}

/// An error that occurred while loading a tree document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {}: {message}", dotted_path(.path))]
pub struct TreeError {
    /// The kind of error.
    pub kind: TreeErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Keys from the root to the offending node.
    pub path: Vec<String>,
}

impl TreeError {
    /// Create a new error.
    pub fn new(kind: TreeErrorKind, message: impl Into<String>, path: &[String]) -> Self {
        Self {
            kind,
            message: message.into(),
            path: path.to_vec(),
        }
    }

    pub fn structure(message: impl Into<String>, path: &[String]) -> Self {
        Self::new(TreeErrorKind::Structure, message, path)
    }

    pub fn node_type(message: impl Into<String>, path: &[String]) -> Self {
        Self::new(TreeErrorKind::NodeType, message, path)
    }

    pub fn metadata(message: impl Into<String>, path: &[String]) -> Self {
        Self::new(TreeErrorKind::Metadata, message, path)
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(TreeErrorKind::Json, err.to_string(), &[])
    }
}

/// Result type for tree loading.
pub type TreeResult<T> = Result<T, TreeError>;

fn dotted_path(path: &[String]) -> String {
    if path.is_empty() {
        "root".to_string()
    } else {
        path.join(".")
    }
}

/// Render a consumed path for operator-facing messages.
pub fn path_label(path: &[String]) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.join(" ")
    }
}

/// A per-line failure. Never fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// A token matched no child and the cursor was not on a tag node.
    #[error("Unknown token '{token}' at {}", path_label(.path))]
    UnknownToken { token: String, path: Vec<String> },

    /// The line resolved but names nothing runnable or settable.
    #[error("Incomplete command: {}", path_label(.path))]
    IncompleteCommand { path: Vec<String> },
}

/// Failure to run an operator command or commit script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("failed to start '{command}': {message}")]
    Spawn { command: String, message: String },

    #[error("'{command}' timed out after {:.1}s", .timeout.as_secs_f64())]
    TimedOut { command: String, timeout: Duration },

    #[error("I/O error while running '{command}': {message}")]
    Io { command: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_display_root() {
        let err = TreeError::structure("tree node must be a JSON object", &[]);
        assert_eq!(
            err.to_string(),
            "StructureError at root: tree node must be a JSON object"
        );
    }

    #[test]
    fn test_tree_error_display_nested() {
        let path = vec!["show".to_string(), "ip".to_string()];
        let err = TreeError::node_type("unknown node type 'branch'", &path);
        assert_eq!(
            err.to_string(),
            "NodeTypeError at show.ip: unknown node type 'branch'"
        );
    }

    #[test]
    fn test_tree_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TreeError = json_err.into();
        assert_eq!(err.kind, TreeErrorKind::Json);
        assert!(err.path.is_empty());
    }

    #[test]
    fn test_unknown_token_message() {
        let err = LineError::UnknownToken {
            token: "bogus".to_string(),
            path: vec!["show".to_string(), "ip".to_string()],
        };
        assert_eq!(err.to_string(), "Unknown token 'bogus' at show ip");
    }

    #[test]
    fn test_unknown_token_at_root() {
        let err = LineError::UnknownToken {
            token: "bogus".to_string(),
            path: vec![],
        };
        assert_eq!(err.to_string(), "Unknown token 'bogus' at (root)");
    }

    #[test]
    fn test_incomplete_command_message() {
        let err = LineError::IncompleteCommand {
            path: vec!["show".to_string()],
        };
        assert_eq!(err.to_string(), "Incomplete command: show");
    }

    #[test]
    fn test_timed_out_message() {
        let err = RunError::TimedOut {
            command: "sleep 5".to_string(),
            timeout: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "'sleep 5' timed out after 1.5s");
    }
}
