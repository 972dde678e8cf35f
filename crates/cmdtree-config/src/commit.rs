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

//! Commit: merge, persist, and pick the scripts that apply the change.

use crate::diff::{deep_diff, DiffLine};
use crate::error::{ConfigError, ConfigResult};
use crate::persist::ConfigPersistence;
use crate::store::ConfigStore;
use cmdtree_core::{CommandOutput, ProcessRunner, RunError, TreeNode, ValueMode};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// What a commit changed and which scripts should apply it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitPlan {
    pub lines: Vec<DiffLine>,
    /// Scripts in first-seen order, each once.
    pub scripts: Vec<String>,
}

impl ConfigStore {
    /// Merge the candidate into the working copy and persist the result.
    ///
    /// On success the merged document becomes both the committed document
    /// and the working copy, and the candidate is cleared. The returned plan
    /// lists the diff against the previous committed document and the
    /// scripts bound to the changed paths; running them is up to the caller
    /// (see [`run_commit_scripts`]).
    ///
    /// # Arguments
    ///
    /// * `schema` - Schema tree the scripts are looked up in
    /// * `persistence` - Backend the merged document is saved to
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the save fails. The store is left
    /// exactly as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdtree_config::{ConfigStore, MemoryPersistence};
    /// use cmdtree_core::{TagValues, TreeNode, ValueMode};
    ///
    /// let mut host_name = TreeNode::tag();
    /// host_name.meta_mut().value_mode = ValueMode::Scalar;
    /// let mut system = TreeNode::container().with_child("host-name", host_name);
    /// system.meta_mut().script = Some("apply_system.sh".to_string());
    /// let schema = TreeNode::container().with_child("system", system);
    ///
    /// let mut store = ConfigStore::default();
    /// let values = TagValues::from([("host-name".to_string(), "r1".to_string())]);
    /// store.apply_set(&schema, &["system", "host-name"], &values);
    ///
    /// let mut persistence = MemoryPersistence::default();
    /// let plan = store.commit(&schema, &mut persistence)?;
    /// assert_eq!(plan.lines[0].to_string(), "+ system host-name r1");
    /// assert_eq!(plan.scripts, vec!["apply_system.sh"]);
    /// assert!(store.candidate().is_empty());
    /// # Ok::<(), cmdtree_config::ConfigError>(())
    /// ```
    pub fn commit(
        &mut self,
        schema: &TreeNode,
        persistence: &mut dyn ConfigPersistence,
    ) -> ConfigResult<CommitPlan> {
        let merged = self.working_view();
        let lines = deep_diff(&self.committed, &merged);
        let scripts = scripts_for_lines(schema, &lines);

        persistence.save(&merged)?;

        self.working = merged.clone();
        self.committed = merged;
        self.candidate.clear();
        debug!(
            changes = lines.len(),
            scripts = scripts.len(),
            location = %persistence.location(),
            "configuration committed"
        );
        Ok(CommitPlan { lines, scripts })
    }
}

/// The script bound nearest the end of a changed path.
///
/// Walks the schema the way `set` does: a child key descends, a value under
/// a segment-mode tag node is skipped, and a scalar-mode tag node ends the
/// walk since the remaining token is its value.
pub fn find_script_for_path<'t, S: AsRef<str>>(schema: &'t TreeNode, path: &[S]) -> Option<&'t str> {
    let mut current = schema;
    let mut script = None;

    for token in path {
        if let Some(child) = current.child(token.as_ref()) {
            current = child;
            if let Some(s) = current.meta().script.as_deref().filter(|s| !s.is_empty()) {
                script = Some(s);
            }
        } else if current.is_tag() && current.meta().value_mode == ValueMode::Segment {
            continue;
        } else {
            break;
        }
    }
    script
}

fn scripts_for_lines(schema: &TreeNode, lines: &[DiffLine]) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .filter_map(|line| find_script_for_path(schema, &line.path))
        .filter(|script| seen.insert(*script))
        .map(str::to_string)
        .collect()
}

/// The result of running one commit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptReport {
    NotFound { script: String },
    Finished { script: String, output: CommandOutput },
    Failed { script: String, error: RunError },
}

impl ScriptReport {
    pub fn script(&self) -> &str {
        match self {
            Self::NotFound { script } | Self::Finished { script, .. } | Self::Failed { script, .. } => {
                script
            }
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Finished { output, .. } if output.success())
    }

    /// The failure as a [`ConfigError`], if the script did not run.
    pub fn error(&self) -> Option<ConfigError> {
        match self {
            Self::NotFound { script } => Some(ConfigError::ScriptNotFound {
                script: script.clone(),
            }),
            Self::Failed { script, error } => Some(ConfigError::ScriptExecution {
                script: script.clone(),
                message: error.to_string(),
            }),
            Self::Finished { .. } => None,
        }
    }

    /// The operator-facing status line; `None` for a clean exit.
    pub fn summary(&self) -> Option<String> {
        match self {
            Self::Finished { script, output } if !output.success() => {
                Some(format!("{script} exited with code {}", output.exit_code()))
            }
            _ => self.error().map(|e| e.to_string()),
        }
    }
}

/// Run each script once, in order. A failing script does not stop the rest.
///
/// Script paths are taken relative to the working directory.
pub fn run_commit_scripts(scripts: &[String], runner: &dyn ProcessRunner) -> Vec<ScriptReport> {
    scripts
        .iter()
        .map(|script| {
            let path = Path::new(script);
            if !path.exists() {
                warn!(script = %script, "commit script not found");
                return ScriptReport::NotFound {
                    script: script.clone(),
                };
            }
            debug!(script = %script, "running commit script");
            match runner.run_script(path) {
                Ok(output) => {
                    if !output.success() {
                        warn!(script = %script, code = output.exit_code(), "commit script failed");
                    }
                    ScriptReport::Finished {
                        script: script.clone(),
                        output,
                    }
                }
                Err(error) => {
                    warn!(script = %script, %error, "commit script did not run");
                    ScriptReport::Failed {
                        script: script.clone(),
                        error,
                    }
                }
            }
        })
        .collect()
}
