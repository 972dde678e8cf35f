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

//! The command-tree data model.
//!
//! A tree document is a nested JSON object. Entries whose key is one of
//! [`META_KEYS`] describe the node itself; every other object-valued entry is
//! a child node. Loading turns that loosely-typed document into a
//! [`TreeNode`], so the engines match on node kind instead of probing keys.

use crate::error::{TreeError, TreeResult};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Keys that carry node metadata rather than naming a child.
pub const META_KEYS: &[&str] = &[
    "description",
    "type",
    "command",
    "tagCommand",
    "values",
    "validator",
    "valueMode",
    "multi",
    "script",
];

/// Child nodes keyed by the token that selects them. Iteration is sorted.
pub type Children = BTreeMap<String, TreeNode>;

static NO_CHILDREN: Children = BTreeMap::new();

/// The three node kinds of a tree document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Plain container (`"node"`, also the default).
    Node,
    /// Accepts a free-form value token (`"tagNode"`).
    TagNode,
    /// Terminal command or flag (`"leafNode"`).
    LeafNode,
}

impl NodeKind {
    /// Parse the `type` metadata value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "node" => Some(Self::Node),
            "tagNode" => Some(Self::TagNode),
            "leafNode" => Some(Self::LeafNode),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::TagNode => "tagNode",
            Self::LeafNode => "leafNode",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a tag node's captured value is stored in a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueMode {
    /// The value becomes an extra path segment (`interfaces eth0 ...`).
    #[default]
    Segment,
    /// The value is stored at the node's own path (`host-name router1`).
    Scalar,
}

/// One entry of a node's `values` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSpec {
    /// An explicit `["<placeholder>", "description"]` pair.
    Inline {
        placeholder: String,
        description: String,
    },
    /// A name looked up in a value-help registry.
    Named(String),
}

/// Node metadata. Every field is optional in the document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeMeta {
    pub description: Option<String>,
    /// Command template run when the node is selected.
    pub command: Option<String>,
    /// Command template run once a tag node's value is entered.
    pub tag_command: Option<String>,
    pub values: Vec<ValueSpec>,
    pub validators: Vec<String>,
    pub value_mode: ValueMode,
    pub multi: bool,
    /// Executable invoked on commit when this part of the schema changed.
    pub script: Option<String>,
}

impl NodeMeta {
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// A node of a command or configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Container { children: Children, meta: NodeMeta },
    Tag { children: Children, meta: NodeMeta },
    Leaf { meta: NodeMeta },
}

impl Default for TreeNode {
    fn default() -> Self {
        Self::container()
    }
}

impl TreeNode {
    /// An empty container.
    pub fn container() -> Self {
        Self::Container {
            children: Children::new(),
            meta: NodeMeta::default(),
        }
    }

    /// An empty tag node.
    pub fn tag() -> Self {
        Self::Tag {
            children: Children::new(),
            meta: NodeMeta::default(),
        }
    }

    /// A leaf without metadata.
    pub fn leaf() -> Self {
        Self::Leaf {
            meta: NodeMeta::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.meta_mut().description = Some(description.into());
        self
    }

    /// Set the command template.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.meta_mut().command = Some(command.into());
        self
    }

    /// Set the tag command template.
    pub fn with_tag_command(mut self, command: impl Into<String>) -> Self {
        self.meta_mut().tag_command = Some(command.into());
        self
    }

    /// Add a child. Leaves have no children, so this is a no-op on a leaf.
    pub fn with_child(mut self, key: impl Into<String>, child: TreeNode) -> Self {
        if let Some(children) = self.children_mut() {
            children.insert(key.into(), child);
        }
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Container { .. } => NodeKind::Node,
            Self::Tag { .. } => NodeKind::TagNode,
            Self::Leaf { .. } => NodeKind::LeafNode,
        }
    }

    pub fn meta(&self) -> &NodeMeta {
        match self {
            Self::Container { meta, .. } | Self::Tag { meta, .. } | Self::Leaf { meta } => meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut NodeMeta {
        match self {
            Self::Container { meta, .. } | Self::Tag { meta, .. } | Self::Leaf { meta } => meta,
        }
    }

    /// Child nodes; always empty for a leaf.
    pub fn children(&self) -> &Children {
        match self {
            Self::Container { children, .. } | Self::Tag { children, .. } => children,
            Self::Leaf { .. } => &NO_CHILDREN,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Children> {
        match self {
            Self::Container { children, .. } | Self::Tag { children, .. } => Some(children),
            Self::Leaf { .. } => None,
        }
    }

    pub fn child(&self, key: &str) -> Option<&TreeNode> {
        self.children().get(key)
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Self::Tag { .. })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    pub fn description(&self) -> Option<&str> {
        self.meta().description.as_deref()
    }

    /// Parse a tree document from JSON text.
    pub fn from_json_str(text: &str) -> TreeResult<Self> {
        let value: JsonValue = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Convert a parsed tree document.
    pub fn from_json(value: &JsonValue) -> TreeResult<Self> {
        let mut path = Vec::new();
        node_from_json(value, &mut path)
    }
}

fn node_from_json(value: &JsonValue, path: &mut Vec<String>) -> TreeResult<TreeNode> {
    let obj = value
        .as_object()
        .ok_or_else(|| TreeError::structure("tree node must be a JSON object", path))?;

    let kind = match obj.get("type") {
        None => NodeKind::Node,
        Some(JsonValue::String(s)) => NodeKind::parse(s)
            .ok_or_else(|| TreeError::node_type(format!("unknown node type '{}'", s), path))?,
        Some(_) => return Err(TreeError::node_type("'type' must be a string", path)),
    };
    let meta = meta_from_json(obj, path)?;

    let mut children = Children::new();
    for (key, child) in obj {
        if META_KEYS.contains(&key.as_str()) || !child.is_object() {
            continue;
        }
        path.push(key.clone());
        let node = node_from_json(child, path)?;
        path.pop();
        children.insert(key.clone(), node);
    }

    Ok(match kind {
        NodeKind::Node => TreeNode::Container { children, meta },
        NodeKind::TagNode => TreeNode::Tag { children, meta },
        NodeKind::LeafNode => {
            if !children.is_empty() {
                warn!(
                    path = %path.join("."),
                    dropped = children.len(),
                    "leafNode declares children; ignoring them"
                );
            }
            TreeNode::Leaf { meta }
        }
    })
}

fn meta_from_json(obj: &Map<String, JsonValue>, path: &[String]) -> TreeResult<NodeMeta> {
    let mut meta = NodeMeta {
        description: string_meta(obj, "description", path)?,
        command: string_meta(obj, "command", path)?,
        tag_command: string_meta(obj, "tagCommand", path)?,
        script: string_meta(obj, "script", path)?,
        ..NodeMeta::default()
    };

    if let Some(mode) = string_meta(obj, "valueMode", path)? {
        if mode == "scalar" {
            meta.value_mode = ValueMode::Scalar;
        }
    }

    match obj.get("multi") {
        None => {}
        Some(JsonValue::Bool(b)) => meta.multi = *b,
        Some(_) => return Err(TreeError::metadata("'multi' must be a boolean", path)),
    }

    match obj.get("validator") {
        None => {}
        Some(JsonValue::String(name)) => meta.validators.push(name.clone()),
        Some(JsonValue::Array(names)) => {
            meta.validators = names.iter().map(display_json).collect();
        }
        Some(_) => {
            return Err(TreeError::metadata(
                "'validator' must be a string or a list of strings",
                path,
            ))
        }
    }

    // Malformed `values` entries only cost a help row, so they are skipped.
    if let Some(JsonValue::Array(items)) = obj.get("values") {
        for item in items {
            match item {
                JsonValue::String(name) => meta.values.push(ValueSpec::Named(name.clone())),
                JsonValue::Array(pair) if !pair.is_empty() => meta.values.push(ValueSpec::Inline {
                    placeholder: display_json(&pair[0]),
                    description: pair.get(1).map(display_json).unwrap_or_default(),
                }),
                _ => {}
            }
        }
    }

    Ok(meta)
}

fn string_meta(
    obj: &Map<String, JsonValue>,
    key: &str,
    path: &[String],
) -> TreeResult<Option<String>> {
    match obj.get(key) {
        None => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(TreeError::metadata(
            format!("'{}' must be a string", key),
            path,
        )),
    }
}

fn display_json(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
