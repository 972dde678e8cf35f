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

//! Tree counting helpers.

use cmdtree_core::{traverse, TreeNode, TreeStats};

/// Node counts of `tree`, root excluded.
pub fn stats(tree: &TreeNode) -> TreeStats {
    let mut stats = TreeStats::default();
    match traverse(tree, &mut stats) {
        Ok(()) => stats,
        Err(never) => match never {},
    }
}

/// Number of nodes below the root.
pub fn count_nodes(tree: &TreeNode) -> usize {
    stats(tree).total()
}

/// Every root-to-node path, space separated, in traversal order.
pub fn all_paths(tree: &TreeNode) -> Vec<String> {
    fn walk(node: &TreeNode, prefix: &mut Vec<String>, out: &mut Vec<String>) {
        for (key, child) in node.children() {
            prefix.push(key.clone());
            out.push(prefix.join(" "));
            walk(child, prefix, out);
            prefix.pop();
        }
    }
    let mut out = Vec::new();
    walk(tree, &mut Vec::new(), &mut out);
    out
}
