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

//! Path resolution with tag-node consumption.
//!
//! Tokens are matched against child keys from the root down. A token that
//! names no child is swallowed as a value when the cursor sits on a tag node;
//! the cursor then stays where it is so the tag node's own children remain
//! reachable. Anywhere else the token ends resolution.
//!
//! Child keys always win over value consumption: a value that happens to
//! spell a child key descends into that child.

use crate::error::LineError;
use crate::tree::TreeNode;
use tracing::debug;

/// Outcome of walking a token sequence down a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'t> {
    /// The final node, or on failure the last node descended into
    /// (`None` when the first token already failed).
    pub node: Option<&'t TreeNode>,
    /// Child keys matched, in order. Consumed values are not included.
    pub consumed: Vec<String>,
    /// The first token that could not be placed.
    pub error_token: Option<String>,
}

impl<'t> Resolution<'t> {
    pub fn is_resolved(&self) -> bool {
        self.error_token.is_none()
    }

    /// The resolved node, only when every token was placed.
    pub fn resolved(&self) -> Option<&'t TreeNode> {
        if self.is_resolved() {
            self.node
        } else {
            None
        }
    }

    /// Convert into the resolved node and path, or an `UnknownToken` error.
    pub fn into_result(self) -> Result<(&'t TreeNode, Vec<String>), LineError> {
        match (self.error_token, self.node) {
            (None, Some(node)) => Ok((node, self.consumed)),
            (Some(token), _) => Err(LineError::UnknownToken {
                token,
                path: self.consumed,
            }),
            (None, None) => Err(LineError::IncompleteCommand {
                path: self.consumed,
            }),
        }
    }
}

/// Walk `tokens` from `root`.
///
/// Each token either names a child of the current node (the walk descends
/// and records the key) or, on a tag node, is taken as that node's value
/// (the walk stays put). Any other token stops the walk.
///
/// # Arguments
///
/// * `root` - Tree to walk
/// * `tokens` - Complete tokens of the line, in order
///
/// # Returns
///
/// A [`Resolution`] holding the node reached, the child keys consumed and,
/// on failure, the first token that could not be placed.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{resolve, TreeNode};
///
/// let tree = TreeNode::container().with_child(
///     "show",
///     TreeNode::container().with_child("route", TreeNode::tag()),
/// );
///
/// let res = resolve(&tree, &["show", "route", "10.0.0.0/8"]);
/// assert!(res.is_resolved());
/// assert_eq!(res.consumed, vec!["show", "route"]);
///
/// let res = resolve(&tree, &["show", "bogus"]);
/// assert_eq!(res.error_token.as_deref(), Some("bogus"));
/// assert_eq!(res.consumed, vec!["show"]);
/// ```
pub fn resolve<'t, S: AsRef<str>>(root: &'t TreeNode, tokens: &[S]) -> Resolution<'t> {
    let mut current = root;
    let mut consumed = Vec::new();
    let mut descended = false;

    for token in tokens {
        let token = token.as_ref();
        if let Some(child) = current.child(token) {
            current = child;
            consumed.push(token.to_string());
            descended = true;
        } else if current.is_tag() {
            continue;
        } else {
            debug!(token, path = %consumed.join(" "), "token matches no child");
            return Resolution {
                node: descended.then_some(current),
                consumed,
                error_token: Some(token.to_string()),
            };
        }
    }

    Resolution {
        node: Some(current),
        consumed,
        error_token: None,
    }
}
