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

//! Tree traversal for analysis passes.
//!
//! The visitor pattern separates the recursive walk from what is done at each
//! node. Analyses such as [`TreeStats`] and the linter implement
//! [`TreeVisitor`]; [`traverse`] drives them in sorted key order.
//!
//! # Example
//!
//! ```text
//! use cmdtree_core::traverse::{traverse, TreeStats};
//!
//! let mut stats = TreeStats::default();
//! traverse(&tree, &mut stats)?;
//! println!("{} tag nodes", stats.tag_nodes);
//! ```

use crate::tree::{NodeKind, TreeNode};
use serde::Serialize;

/// Context provided to visitors during traversal.
#[derive(Debug, Clone, Default)]
pub struct VisitorContext<'a> {
    /// Nesting depth of the node being visited (1 = child of the root).
    pub depth: usize,
    /// Keys from the root to the node being visited, inclusive.
    pub path: Vec<&'a str>,
}

impl<'a> VisitorContext<'a> {
    /// Context for the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child context with incremented depth.
    pub fn child(&self, key: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(key);
        Self {
            depth: self.depth + 1,
            path,
        }
    }

    /// Get the current path as a string (for diagnostics).
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            "root".to_string()
        } else {
            self.path.join(".")
        }
    }
}

/// Trait for visiting the nodes of a tree.
///
/// Only [`TreeVisitor::visit_node`] is required.
pub trait TreeVisitor {
    /// Error type returned by visitor methods.
    type Error;

    /// Called before any node is visited.
    fn begin_tree(&mut self, _root: &TreeNode) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after every node was visited.
    fn end_tree(&mut self, _root: &TreeNode) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for every node below the root. `ctx.path` ends with `key`.
    fn visit_node(
        &mut self,
        key: &str,
        node: &TreeNode,
        ctx: &VisitorContext,
    ) -> Result<(), Self::Error>;

    /// Called before a node's children are visited.
    fn begin_children(
        &mut self,
        _key: &str,
        _node: &TreeNode,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after a node's children were visited.
    fn end_children(
        &mut self,
        _key: &str,
        _node: &TreeNode,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk every node of `root` depth-first, calling `visitor`.
pub fn traverse<V: TreeVisitor>(root: &TreeNode, visitor: &mut V) -> Result<(), V::Error> {
    visitor.begin_tree(root)?;
    let ctx = VisitorContext::new();
    for (key, child) in root.children() {
        traverse_node(key, child, visitor, &ctx)?;
    }
    visitor.end_tree(root)
}

fn traverse_node<'a, V: TreeVisitor>(
    key: &'a str,
    node: &'a TreeNode,
    visitor: &mut V,
    parent: &VisitorContext<'a>,
) -> Result<(), V::Error> {
    let ctx = parent.child(key);
    visitor.visit_node(key, node, &ctx)?;

    if !node.children().is_empty() {
        visitor.begin_children(key, node, &ctx)?;
        for (child_key, child) in node.children() {
            traverse_node(child_key, child, visitor, &ctx)?;
        }
        visitor.end_children(key, node, &ctx)?;
    }
    Ok(())
}

/// Node counts collected by a traversal.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub containers: usize,
    pub tag_nodes: usize,
    pub leaves: usize,
    /// Nodes with a `command` or `tagCommand`.
    pub runnable: usize,
    /// Nodes declaring a commit `script`.
    pub scripted: usize,
    pub max_depth: usize,
}

impl TreeStats {
    pub fn total(&self) -> usize {
        self.containers + self.tag_nodes + self.leaves
    }
}

impl TreeVisitor for TreeStats {
    type Error = std::convert::Infallible;

    fn visit_node(
        &mut self,
        _key: &str,
        node: &TreeNode,
        ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        match node.kind() {
            NodeKind::Node => self.containers += 1,
            NodeKind::TagNode => self.tag_nodes += 1,
            NodeKind::LeafNode => self.leaves += 1,
        }
        let meta = node.meta();
        if meta.command.is_some() || meta.tag_command.is_some() {
            self.runnable += 1;
        }
        if meta.script.is_some() {
            self.scripted += 1;
        }
        self.max_depth = self.max_depth.max(ctx.depth);
        Ok(())
    }
}
