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

//! Authoring diagnostics for tree documents.
//!
//! Tree documents load leniently; these rules point at metadata that loads
//! fine but can never take effect, and at templates that would fall back to
//! their raw text at run time.

use crate::template::placeholder_names;
use crate::traverse::{traverse, TreeVisitor, VisitorContext};
use crate::tree::{TreeNode, ValueMode};

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational hint
    Hint,
    /// Warning - might be an issue
    Warning,
    /// Error - definitely an issue
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hint => write!(f, "hint"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Kind of diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `tagCommand` on a node that never takes a value
    TagCommandOnNonTag,
    /// Value metadata on a node that never takes a value
    IneffectiveValueMetadata,
    /// Validator name with no registered validator
    UnknownValidator,
    /// Template that cannot be interpolated
    MalformedTemplate,
    /// Placeholder naming no tag node on the path
    UnboundPlaceholder,
    /// Container with neither children nor a command
    EmptyContainer,
}

/// A lint diagnostic
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    kind: DiagnosticKind,
    message: String,
    /// Dotted path of the offending node
    path: String,
    rule_id: String,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            path: path.into(),
            rule_id: rule_id.into(),
        }
    }

    pub fn warning(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, kind, message, rule_id, path)
    }

    pub fn error(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, kind, message, rule_id, path)
    }

    pub fn hint(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Hint, kind, message, rule_id, path)
    }

    // Public getters
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: [{}] {}: {}",
            self.path, self.rule_id, self.severity, self.message
        )
    }
}

/// Lint a tree. `known_validators` lists the validator names that resolve.
pub fn lint_tree(root: &TreeNode, known_validators: &[String]) -> Vec<Diagnostic> {
    let mut linter = Linter {
        known_validators,
        tag_scope: Vec::new(),
        diagnostics: Vec::new(),
    };
    // Infallible visitor.
    let _ = traverse(root, &mut linter);
    linter.diagnostics
}

struct Linter<'v> {
    known_validators: &'v [String],
    /// Names of the tag nodes enclosing the node being visited.
    tag_scope: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Linter<'_> {
    fn check_template(&mut self, key: &str, node: &TreeNode, template: &str, path: &str) {
        match placeholder_names(template) {
            Err(err) => self.diagnostics.push(Diagnostic::error(
                DiagnosticKind::MalformedTemplate,
                format!("template '{}' is malformed ({}); it will run verbatim", template, err),
                "template",
                path,
            )),
            Ok(names) => {
                for name in names {
                    let bound = self.tag_scope.contains(&name) || (node.is_tag() && name == key);
                    if !bound {
                        self.diagnostics.push(Diagnostic::warning(
                            DiagnosticKind::UnboundPlaceholder,
                            format!("placeholder '{{{}}}' names no enclosing tag node", name),
                            "placeholder",
                            path,
                        ));
                    }
                }
            }
        }
    }
}

impl TreeVisitor for Linter<'_> {
    type Error = std::convert::Infallible;

    fn visit_node(
        &mut self,
        key: &str,
        node: &TreeNode,
        ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        let path = ctx.path_string();
        let meta = node.meta();

        if !node.is_tag() {
            if meta.tag_command.is_some() {
                self.diagnostics.push(Diagnostic::warning(
                    DiagnosticKind::TagCommandOnNonTag,
                    "tagCommand only runs on tag nodes",
                    "tag-command",
                    path.as_str(),
                ));
            }
            let ineffective: Vec<&str> = [
                ("valueMode", meta.value_mode == ValueMode::Scalar),
                ("multi", meta.multi),
                ("validator", !meta.validators.is_empty()),
                ("values", !meta.values.is_empty()),
            ]
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect();
            if !ineffective.is_empty() {
                self.diagnostics.push(Diagnostic::warning(
                    DiagnosticKind::IneffectiveValueMetadata,
                    format!("{} has no effect on a {}", ineffective.join(", "), node.kind()),
                    "value-metadata",
                    path.as_str(),
                ));
            }
        }

        for name in &meta.validators {
            if !self.known_validators.contains(name) {
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticKind::UnknownValidator,
                    format!("validator not found: {}", name),
                    "validator",
                    path.as_str(),
                ));
            }
        }

        if let Some(template) = &meta.command {
            self.check_template(key, node, template, &path);
        }
        if let Some(template) = meta.tag_command.as_ref().filter(|_| node.is_tag()) {
            self.check_template(key, node, template, &path);
        }

        if let TreeNode::Container { children, .. } = node {
            if children.is_empty() && meta.command.is_none() {
                self.diagnostics.push(Diagnostic::hint(
                    DiagnosticKind::EmptyContainer,
                    "container has neither children nor a command",
                    "empty-container",
                    path.as_str(),
                ));
            }
        }
        Ok(())
    }

    fn begin_children(
        &mut self,
        key: &str,
        node: &TreeNode,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        if node.is_tag() {
            self.tag_scope.push(key.to_string());
        }
        Ok(())
    }

    fn end_children(
        &mut self,
        _key: &str,
        node: &TreeNode,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        if node.is_tag() {
            self.tag_scope.pop();
        }
        Ok(())
    }
}
