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

//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The document does not have the shape of a configuration document.
    #[error("invalid configuration document at {path}: {message}")]
    InvalidDocument { path: String, message: String },

    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    /// A validator rejected a value.
    #[error("{0}")]
    Validation(String),

    #[error("validator not found: {0}")]
    ValidatorNotFound(String),

    #[error("Script not found: {script}")]
    ScriptNotFound { script: String },

    #[error("Error running {script}: {message}")]
    ScriptExecution { script: String, message: String },
}

impl ConfigError {
    pub fn invalid_document(path: &[String], message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path: if path.is_empty() {
                "root".to_string()
            } else {
                path.join(".")
            },
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
