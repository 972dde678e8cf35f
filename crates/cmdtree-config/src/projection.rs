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

//! Projection of a configuration document into a navigable tree.
//!
//! `show` and `delete` complete over what is actually configured. Each
//! document key becomes a node; descriptions come from the schema where the
//! document path lines up with it.

use crate::value::{ConfigMap, ConfigValue};
use cmdtree_core::{Children, NodeMeta, TreeNode, ValueMode};

/// Project `doc` into tree children.
///
/// A non-empty map becomes a container; a list becomes a container with one
/// leaf per element; anything else becomes a leaf. Under a segment-mode tag
/// node the keys are the tag's values: they take the tag's description and
/// their own keys resolve against the tag's children.
///
/// # Examples
///
/// ```
/// use cmdtree_config::{project, value::map_from_json};
/// use cmdtree_core::TreeNode;
/// use serde_json::json;
///
/// let doc = map_from_json(&json!({
///     "system": {"name-server": ["192.0.2.53", "192.0.2.54"]}
/// }))?;
/// let children = project(&doc, None);
///
/// let servers = children["system"].child("name-server").unwrap();
/// assert_eq!(servers.children().len(), 2);
/// assert!(servers.children().values().all(TreeNode::is_leaf));
/// # Ok::<(), cmdtree_config::ConfigError>(())
/// ```
pub fn project(doc: &ConfigMap, schema: Option<&TreeNode>) -> Children {
    doc.iter()
        .map(|(key, value)| {
            let node_schema = schema.and_then(|s| s.child(key));
            (key.clone(), project_value(value, node_schema, true))
        })
        .collect()
}

/// `keyed` is false for a node that stands for a tag value.
fn project_value(value: &ConfigValue, schema: Option<&TreeNode>, keyed: bool) -> TreeNode {
    let meta = NodeMeta {
        description: schema.and_then(TreeNode::description).map(str::to_string),
        ..NodeMeta::default()
    };
    let segment_tag =
        schema.filter(|s| s.is_tag() && s.meta().value_mode == ValueMode::Segment);

    match value {
        ConfigValue::Map(map) if !map.is_empty() => {
            let children = match segment_tag {
                Some(tag) if keyed => map
                    .iter()
                    .map(|(value, sub)| (value.clone(), project_value(sub, Some(tag), false)))
                    .collect(),
                _ => project(map, schema),
            };
            TreeNode::Container { children, meta }
        }
        ConfigValue::List(items) => TreeNode::Container {
            children: items
                .iter()
                .map(|item| (item.clone(), TreeNode::leaf()))
                .collect(),
            meta,
        },
        _ => TreeNode::Leaf { meta },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::map_from_json;
    use cmdtree_core::NodeKind;
    use serde_json::json;

    fn schema() -> TreeNode {
        TreeNode::container().with_child(
            "interfaces",
            TreeNode::tag()
                .with_description("Network interfaces")
                .with_child(
                    "address",
                    TreeNode::tag().with_description("IP address"),
                ),
        )
    }

    #[test]
    fn test_projection_shapes() {
        let doc = map_from_json(&json!({
            "interfaces": {"eth0": {"address": ["10.0.0.1/24", "10.0.0.2/24"], "disable": true}},
            "empty": {}
        }))
        .unwrap();
        let children = project(&doc, None);

        assert_eq!(children["empty"].kind(), NodeKind::LeafNode);
        let eth0 = &children["interfaces"].children()["eth0"];
        assert_eq!(eth0.kind(), NodeKind::Node);
        assert_eq!(eth0.child("disable").map(TreeNode::kind), Some(NodeKind::LeafNode));

        let address = eth0.child("address").unwrap();
        let items: Vec<&String> = address.children().keys().collect();
        assert_eq!(items, vec!["10.0.0.1/24", "10.0.0.2/24"]);
        assert!(address.children().values().all(TreeNode::is_leaf));
    }

    #[test]
    fn test_projection_descriptions_follow_schema() {
        let doc = map_from_json(&json!({
            "interfaces": {"eth0": {"address": ["10.0.0.1/24"]}}
        }))
        .unwrap();
        let schema = schema();
        let children = project(&doc, Some(&schema));

        let interfaces = &children["interfaces"];
        assert_eq!(interfaces.description(), Some("Network interfaces"));
        let eth0 = interfaces.child("eth0").unwrap();
        assert_eq!(eth0.description(), Some("Network interfaces"));
        assert_eq!(
            eth0.child("address").and_then(TreeNode::description),
            Some("IP address")
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(project(&ConfigMap::new(), None).is_empty());
    }
}
