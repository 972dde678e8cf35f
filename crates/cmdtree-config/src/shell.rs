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

//! The command tree of the configuration shell.

use crate::projection::project;
use crate::value::ConfigMap;
use cmdtree_core::{NodeMeta, TreeNode};

pub const SET_DESCRIPTION: &str = "Set the value of a parameter or create a new element";
pub const SHOW_DESCRIPTION: &str = "Show the configuration";
pub const CANDIDATE_DESCRIPTION: &str = "Show candidate (uncommitted) configuration";
pub const COMMIT_DESCRIPTION: &str = "Commit the current set of changes";
pub const COMPARE_DESCRIPTION: &str = "Compare configuration revisions";
pub const DISCARD_DESCRIPTION: &str = "Discard uncommitted changes";
pub const DELETE_DESCRIPTION: &str = "Delete a configuration element";

/// Build the configuration shell tree.
///
/// `set` exposes the schema, `show` the committed document and `delete` the
/// working view, so completion only offers what can actually be shown or
/// deleted. Rebuild after every edit.
pub fn config_shell_tree(schema: &TreeNode, working_view: &ConfigMap, committed: &ConfigMap) -> TreeNode {
    let set = TreeNode::Container {
        children: schema.children().clone(),
        meta: NodeMeta::with_description(SET_DESCRIPTION),
    };

    let mut show_children = project(committed, Some(schema));
    show_children.insert(
        "candidate".to_string(),
        TreeNode::leaf().with_description(CANDIDATE_DESCRIPTION),
    );
    let show = TreeNode::Container {
        children: show_children,
        meta: NodeMeta::with_description(SHOW_DESCRIPTION),
    };

    let delete = TreeNode::Container {
        children: project(working_view, Some(schema)),
        meta: NodeMeta::with_description(DELETE_DESCRIPTION),
    };

    TreeNode::container()
        .with_child("set", set)
        .with_child("show", show)
        .with_child("commit", TreeNode::leaf().with_description(COMMIT_DESCRIPTION))
        .with_child("compare", TreeNode::leaf().with_description(COMPARE_DESCRIPTION))
        .with_child("discard", TreeNode::leaf().with_description(DISCARD_DESCRIPTION))
        .with_child("delete", delete)
}
