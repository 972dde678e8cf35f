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

//! Tag-value tracking.
//!
//! Both queries walk tokens exactly like [`crate::resolve`]. There are two
//! framings of the value-entered query: [`value_entered`] takes tokens that
//! are already complete (the in-progress prefix stripped), which is what
//! completion wants while the operator is typing; [`value_entered_in_text`]
//! re-tokenizes a whole line, which is what execution wants. On a line that
//! ends mid-token the two can disagree.

use crate::tokenize::split_tokens;
use crate::tree::TreeNode;
use std::collections::BTreeMap;
use std::ptr;

/// Tag-node key name to captured value for one input line.
pub type TagValues = BTreeMap<String, String>;

/// Whether a value token was supplied for `target` in `tokens`.
///
/// `target` must be a node of `root`; identity, not equality, is compared.
pub fn value_entered<S: AsRef<str>>(root: &TreeNode, target: &TreeNode, tokens: &[S]) -> bool {
    let mut current = root;
    for token in tokens {
        let token = token.as_ref();
        if let Some(child) = current.child(token) {
            current = child;
        } else if current.is_tag() {
            if ptr::eq(current, target) {
                return true;
            }
        } else {
            return false;
        }
    }
    false
}

/// [`value_entered`] over a raw line.
pub fn value_entered_in_text(root: &TreeNode, target: &TreeNode, text: &str) -> bool {
    value_entered(root, target, &split_tokens(text))
}

/// Capture the first value token seen on each tag node.
///
/// Further non-matching tokens on the same tag node are skipped without
/// being captured. An unplaceable token stops the walk, keeping what was
/// captured so far.
pub fn extract_tag_values<S: AsRef<str>>(root: &TreeNode, tokens: &[S]) -> TagValues {
    let mut values = TagValues::new();
    let mut current = root;
    let mut key: Option<&str> = None;

    for token in tokens {
        let token = token.as_ref();
        if let Some(child) = current.child(token) {
            current = child;
            key = Some(token);
            continue;
        }
        match key {
            Some(name) if current.is_tag() => {
                values
                    .entry(name.to_string())
                    .or_insert_with(|| token.to_string());
            }
            _ => break,
        }
    }
    values
}

/// [`extract_tag_values`] over a raw line.
pub fn extract_tag_values_in_text(root: &TreeNode, text: &str) -> TagValues {
    extract_tag_values(root, &split_tokens(text))
}
