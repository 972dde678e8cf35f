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

//! Line dispatch for the configuration shell.
//!
//! A [`ConfigSession`] owns the schema, the transaction store and the
//! current shell tree. Each call to [`ConfigSession::process_line`] fully
//! handles one line and reports what happened; rendering is left to the
//! caller.

use crate::commit::{run_commit_scripts, CommitPlan, ScriptReport};
use crate::diff::DiffLine;
use crate::error::{ConfigError, ConfigResult};
use crate::persist::ConfigPersistence;
use crate::shell::config_shell_tree;
use crate::store::ConfigStore;
use crate::validators::{validate_set_path, ValidatorRegistry};
use crate::value::{get_path, ConfigValue};
use cmdtree_core::op::is_exit;
use cmdtree_core::{
    extract_tag_values, resolve, split_tokens, value_entered_in_text, LineError, ProcessRunner,
    TreeNode,
};
use serde_json::Value as JsonValue;
use tracing::debug;

/// What happened to one configuration-shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigOutcome {
    /// Blank line.
    Skipped,
    Exit,
    /// A validator refused a value. The line should be offered again.
    Rejected { line: String, message: String },
    Committed {
        location: String,
        plan: CommitPlan,
        reports: Vec<ScriptReport>,
    },
    Show(JsonValue),
    Compare(Vec<DiffLine>),
    Discarded,
    /// A `set` or `delete` edit was applied to the candidate.
    Applied,
    /// The line did not resolve to a complete command.
    Failed(LineError),
    Error(ConfigError),
}

/// An interactive configuration session.
pub struct ConfigSession<P: ConfigPersistence> {
    schema: TreeNode,
    store: ConfigStore,
    tree: TreeNode,
    validators: ValidatorRegistry,
    persistence: P,
}

impl<P: ConfigPersistence> ConfigSession<P> {
    /// Load the committed document from `persistence` and build the tree.
    pub fn new(schema: TreeNode, persistence: P) -> ConfigResult<Self> {
        let store = ConfigStore::new(persistence.load()?);
        let mut session = Self {
            tree: TreeNode::container(),
            schema,
            store,
            validators: ValidatorRegistry::default(),
            persistence,
        };
        session.rebuild_tree();
        Ok(session)
    }

    pub fn with_validators(mut self, validators: ValidatorRegistry) -> Self {
        self.validators = validators;
        self
    }

    /// The shell tree for the next prompt.
    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn schema(&self) -> &TreeNode {
        &self.schema
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn location(&self) -> String {
        self.persistence.location()
    }

    fn rebuild_tree(&mut self) {
        self.tree = config_shell_tree(
            &self.schema,
            &self.store.working_view(),
            self.store.committed(),
        );
    }

    /// Handle one line. Commit scripts run through `runner`.
    pub fn process_line(&mut self, line: &str, runner: &dyn ProcessRunner) -> ConfigOutcome {
        let line = line.trim();
        if line.is_empty() {
            return ConfigOutcome::Skipped;
        }
        if is_exit(line) {
            return ConfigOutcome::Exit;
        }

        let tokens = split_tokens(line);
        let words: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let Some(&head) = words.first() else {
            return ConfigOutcome::Skipped;
        };
        match words.as_slice() {
            ["commit"] => return self.commit(runner),
            ["compare"] => return ConfigOutcome::Compare(self.store.compare()),
            ["discard"] => {
                self.store.discard();
                self.rebuild_tree();
                return ConfigOutcome::Discarded;
            }
            ["show"] => return ConfigOutcome::Show(self.store.show_committed::<&str>(&[])),
            ["show", "candidate"] => return ConfigOutcome::Show(self.store.show_candidate()),
            ["show", path @ ..] => return ConfigOutcome::Show(self.store.show_committed(path)),
            _ => {}
        }

        if let Err(err) = self.validate(line, &tokens) {
            return ConfigOutcome::Rejected {
                line: line.to_string(),
                message: err.to_string(),
            };
        }

        let resolution = resolve(&self.tree, &tokens);

        if let Some(token) = &resolution.error_token {
            if head == "delete" && resolution.consumed.len() > 1 {
                let base = &resolution.consumed[1..];
                if self.store.delete_list_item(base, token) {
                    self.rebuild_tree();
                    return ConfigOutcome::Applied;
                }
                if tokens.last() == Some(token) && self.holds_scalar(base, token) {
                    let scalar_tag = deleted_schema_node(&self.schema, base);
                    self.store.apply_delete(&tokens[1..], scalar_tag);
                    self.rebuild_tree();
                    return ConfigOutcome::Applied;
                }
            }
            return ConfigOutcome::Failed(LineError::UnknownToken {
                token: token.clone(),
                path: resolution.consumed,
            });
        }

        let Some(node) = resolution.node else {
            return ConfigOutcome::Failed(LineError::IncompleteCommand {
                path: resolution.consumed,
            });
        };
        let complete = if head == "delete" {
            tokens.len() > 1
        } else if node.is_tag() {
            value_entered_in_text(&self.tree, node, line)
        } else {
            node.is_leaf()
        };
        if !complete {
            return ConfigOutcome::Failed(LineError::IncompleteCommand {
                path: resolution.consumed,
            });
        }

        match head {
            "set" => {
                let values = extract_tag_values(&self.tree, &tokens);
                self.store
                    .apply_set(&self.schema, &resolution.consumed[1..], &values);
            }
            "delete" => self.store.apply_delete(&tokens[1..], Some(node)),
            _ => {
                return ConfigOutcome::Failed(LineError::IncompleteCommand {
                    path: resolution.consumed,
                })
            }
        }
        self.rebuild_tree();
        ConfigOutcome::Applied
    }

    /// Whether the working view stores `value` as the scalar at `path`.
    fn holds_scalar(&self, path: &[String], value: &str) -> bool {
        matches!(
            get_path(&self.store.working_view(), path),
            Some(ConfigValue::Scalar(s)) if s == value
        )
    }

    /// Run the validators of every tag node on a `set` line.
    fn validate(&self, line: &str, tokens: &[String]) -> ConfigResult<()> {
        if tokens.first().map(String::as_str) != Some("set") {
            return Ok(());
        }
        let resolution = resolve(&self.tree, tokens);
        let Some(path) = resolution.consumed.get(1..) else {
            return Ok(());
        };
        let values = extract_tag_values(&self.tree, tokens);
        let result = validate_set_path(&self.schema, path, &values, &self.validators);
        if let Err(err) = &result {
            debug!(line, %err, "set line rejected");
        }
        result
    }

    fn commit(&mut self, runner: &dyn ProcessRunner) -> ConfigOutcome {
        let plan = match self.store.commit(&self.schema, &mut self.persistence) {
            Ok(plan) => plan,
            Err(err) => return ConfigOutcome::Error(err),
        };
        self.rebuild_tree();
        let reports = run_commit_scripts(&plan.scripts, runner);
        ConfigOutcome::Committed {
            location: self.persistence.location(),
            plan,
            reports,
        }
    }
}

/// The schema node a document path ends on.
///
/// Values under tag nodes are skipped the way `set` lays them out.
fn deleted_schema_node<'t>(schema: &'t TreeNode, path: &[String]) -> Option<&'t TreeNode> {
    let mut current = schema;
    let mut matched = None;
    for key in path {
        if let Some(child) = current.child(key) {
            current = child;
            matched = Some(child);
        } else if !current.is_tag() {
            return None;
        }
    }
    matched
}
