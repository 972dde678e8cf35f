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

//! Inline help shown when the operator presses `?`.

use crate::complete::completion_context;
use crate::tags::{value_entered, value_entered_in_text};
use crate::tokenize::parse_input;
use crate::tree::{TreeNode, ValueSpec};
use std::collections::BTreeMap;

/// First column of the row offered when the current line is runnable.
pub const ENTER_ROW: &str = "<Enter>";

/// Named value placeholders that `values` entries may refer to.
#[derive(Debug, Clone)]
pub struct ValueHelpRegistry {
    entries: BTreeMap<String, (String, String)>,
}

impl Default for ValueHelpRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(
            "ipv4addr",
            "<x.x.x.x>",
            "Show IP routes of specified IP address",
        );
        registry.register(
            "ipv4net",
            "<x.x.x.x/24>",
            "Show IP routes of specified IP address or prefix",
        );
        registry
    }
}

impl ValueHelpRegistry {
    /// A registry without the built-in entries.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        placeholder: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.entries
            .insert(name.into(), (placeholder.into(), description.into()));
    }

    pub fn lookup(&self, name: &str) -> Option<(&str, &str)> {
        self.entries
            .get(name)
            .map(|(p, d)| (p.as_str(), d.as_str()))
    }

    /// Placeholder rows for a node's `values`. Unknown names show as-is.
    pub fn placeholders(&self, node: &TreeNode) -> Vec<(String, String)> {
        node.meta()
            .values
            .iter()
            .map(|spec| match spec {
                ValueSpec::Inline {
                    placeholder,
                    description,
                } => (placeholder.clone(), description.clone()),
                ValueSpec::Named(name) => match self.lookup(name) {
                    Some((p, d)) => (p.to_string(), d.to_string()),
                    None => (name.clone(), String::new()),
                },
            })
            .collect()
    }
}

/// One line of the help table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HelpRow {
    pub name: String,
    pub description: String,
}

impl HelpRow {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Rows for the `?` table, sorted by name.
///
/// `None` means the text does not resolve at all.
pub fn help_rows(root: &TreeNode, text: &str, registry: &ValueHelpRegistry) -> Option<Vec<HelpRow>> {
    let ctx = completion_context(root, text);
    let node = ctx.node?;
    let mut rows = Vec::new();

    let runnable = node.meta().command.is_some()
        || (node.is_tag()
            && node.meta().tag_command.is_some()
            && value_entered(root, node, &parse_input(text).path));
    if runnable {
        rows.push(HelpRow::new(ENTER_ROW, "Execute the current command"));
    }

    let entered = node.is_tag() && value_entered_in_text(root, node, text);
    for key in &ctx.candidates {
        let Some(child) = node.child(key) else {
            continue;
        };
        if node.is_tag() && child.is_leaf() == entered {
            continue;
        }
        rows.push(HelpRow::new(key.as_str(), child.description().unwrap_or_default()));
    }

    if node.is_tag() && !entered {
        for (placeholder, description) in registry.placeholders(node) {
            rows.push(HelpRow::new(placeholder, description));
        }
    }

    rows.sort_by(|a, b| a.name.cmp(&b.name));
    Some(rows)
}

/// Render help rows as printed below the prompt.
pub fn render_help(rows: Option<&[HelpRow]>) -> String {
    let mut out = String::from("Possible completions:\n");
    let rows = match rows {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            out.push_str("(no suggestions)\n");
            return out;
        }
    };

    let width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);
    for row in rows {
        let line = format!("{:<width$}  {}", row.name, row.description, width = width);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeMeta;

    fn tree() -> TreeNode {
        let mut route = TreeNode::tag()
            .with_description("Show IP routing table")
            .with_command("show ip route")
            .with_tag_command("show ip route {route}")
            .with_child(
                "summary",
                TreeNode::leaf().with_description("Summary of all routes"),
            )
            .with_child("test", TreeNode::tag().with_description("Test a route"));
        route.meta_mut().values = vec![
            ValueSpec::Inline {
                placeholder: "<x.x.x.x/24>".to_string(),
                description: "Prefix".to_string(),
            },
            ValueSpec::Named("ipv4addr".to_string()),
            ValueSpec::Named("word".to_string()),
        ];
        TreeNode::Container {
            children: [("route".to_string(), route)].into_iter().collect(),
            meta: NodeMeta::default(),
        }
    }

    #[test]
    fn test_registry_builtins() {
        let registry = ValueHelpRegistry::default();
        assert_eq!(
            registry.lookup("ipv4net"),
            Some((
                "<x.x.x.x/24>",
                "Show IP routes of specified IP address or prefix"
            ))
        );
        assert_eq!(registry.lookup("nope"), None);
    }

    #[test]
    fn test_rows_before_value() {
        let tree = tree();
        let rows = help_rows(&tree, "route ", &ValueHelpRegistry::default()).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["<Enter>", "<x.x.x.x/24>", "<x.x.x.x>", "summary", "word"]
        );
    }

    #[test]
    fn test_rows_after_value() {
        let tree = tree();
        let rows = help_rows(&tree, "route 10.0.0.0/8 ", &ValueHelpRegistry::default()).unwrap();
        assert_eq!(
            rows,
            vec![
                HelpRow::new("<Enter>", "Execute the current command"),
                HelpRow::new("test", "Test a route"),
            ]
        );
    }

    #[test]
    fn test_rows_unresolved() {
        let tree = tree();
        assert_eq!(help_rows(&tree, "bogus ", &ValueHelpRegistry::default()), None);
    }

    #[test]
    fn test_render_table() {
        let rows = vec![
            HelpRow::new("<Enter>", "Execute the current command"),
            HelpRow::new("summary", "Summary of all routes"),
        ];
        assert_eq!(
            render_help(Some(&rows)),
            "Possible completions:\n<Enter>  Execute the current command\nsummary  Summary of all routes\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_help(None), "Possible completions:\n(no suggestions)\n");
        assert_eq!(
            render_help(Some(&[])),
            "Possible completions:\n(no suggestions)\n"
        );
    }

    #[test]
    fn test_render_missing_description() {
        let rows = vec![HelpRow::new("abc", ""), HelpRow::new("a", "x")];
        assert_eq!(render_help(Some(&rows)), "Possible completions:\nabc\na    x\n");
    }
}
