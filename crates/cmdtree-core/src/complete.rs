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

//! Completion engine.
//!
//! Everything here is a pure function of the tree and the text before the
//! cursor; the line editor calls it on every keystroke.
//!
//! Tag nodes filter their children by whether a value has been typed:
//! before the value only leaf children are offered (commands that act on the
//! tag as a whole), after it only non-leaf children (structure below the
//! value).

use crate::resolve::resolve;
use crate::tags::value_entered;
use crate::tokenize::parse_input;
use crate::tree::TreeNode;

/// Where the cursor sits and what may be typed next.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionContext<'t> {
    /// Node the completed tokens resolve to; `None` on a resolution error.
    pub node: Option<&'t TreeNode>,
    /// The token under the cursor.
    pub prefix: String,
    pub at_boundary: bool,
    /// Sorted candidate keys, already filtered by `prefix`.
    pub candidates: Vec<String>,
}

/// Compute the completion context for `text` (the text before the cursor).
///
/// The last token is the in-progress prefix unless `text` ends in a space.
/// The remaining tokens are resolved; a resolution error yields no
/// candidates.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{completion_context, TreeNode};
///
/// let tree = TreeNode::container().with_child(
///     "route",
///     TreeNode::tag()
///         .with_child("summary", TreeNode::leaf())
///         .with_child("detail", TreeNode::tag()),
/// );
///
/// // Before a value only leaf children are offered.
/// assert_eq!(completion_context(&tree, "route ").candidates, vec!["summary"]);
///
/// // After it only the structure below the value.
/// let ctx = completion_context(&tree, "route 10.0.0.0/8 d");
/// assert_eq!(ctx.prefix, "d");
/// assert_eq!(ctx.candidates, vec!["detail"]);
/// ```
pub fn completion_context<'t>(root: &'t TreeNode, text: &str) -> CompletionContext<'t> {
    let input = parse_input(text);
    let Some(node) = resolve(root, &input.path).resolved() else {
        return CompletionContext {
            node: None,
            prefix: input.prefix,
            at_boundary: input.at_boundary,
            candidates: Vec::new(),
        };
    };

    let mut candidates = visible_children(root, node, &input.path);
    if !input.at_boundary {
        candidates.retain(|key| key.starts_with(input.prefix.as_str()));
    }

    CompletionContext {
        node: Some(node),
        prefix: input.prefix,
        at_boundary: input.at_boundary,
        candidates,
    }
}

/// Sorted child keys of `node` after tag-node visibility filtering.
pub fn visible_children<S: AsRef<str>>(root: &TreeNode, node: &TreeNode, tokens: &[S]) -> Vec<String> {
    let entered = node.is_tag() && value_entered(root, node, tokens);
    node.children()
        .iter()
        .filter(|(_, child)| !node.is_tag() || child.is_leaf() != entered)
        .map(|(key, _)| key.clone())
        .collect()
}

/// Longest common prefix of `strings`.
///
/// Only the lexicographically smallest and largest strings need comparing:
/// every other string sorts between them and so shares their common prefix.
pub fn longest_common_prefix<S: AsRef<str>>(strings: &[S]) -> String {
    let mut iter = strings.iter().map(AsRef::as_ref);
    let Some(first) = iter.next() else {
        return String::new();
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)));

    let end = min
        .char_indices()
        .zip(max.chars())
        .find(|((_, a), b)| a != b)
        .map(|((i, _), _)| i)
        .unwrap_or(min.len());
    min[..end].to_string()
}

/// Whether completing a uniquely-resolved token should also add a space.
pub fn needs_trailing_space(buffer: &str) -> bool {
    !buffer.ends_with(' ')
}

/// Fish-style inline suggestion: the text to show greyed after the cursor.
pub fn suggest(root: &TreeNode, text: &str) -> Option<String> {
    let ctx = completion_context(root, text);
    if ctx.candidates.is_empty() || ctx.at_boundary || ctx.prefix.is_empty() {
        return None;
    }

    if let [only] = ctx.candidates.as_slice() {
        if only == &ctx.prefix {
            return None;
        }
        return Some(format!("{} ", &only[ctx.prefix.len()..]));
    }

    let common = longest_common_prefix(&ctx.candidates);
    (common.len() > ctx.prefix.len()).then(|| common[ctx.prefix.len()..].to_string())
}

/// Text the Tab key inserts at the cursor, if any.
pub fn tab_completion(root: &TreeNode, text: &str) -> Option<String> {
    if let Some(suggestion) = suggest(root, text) {
        let mut insert = suggestion;
        let completed = format!("{}{}", text, insert);
        if needs_trailing_space(&completed) {
            let ctx = completion_context(root, &completed);
            if matches!(ctx.candidates.as_slice(), [only] if only == &ctx.prefix) {
                insert.push(' ');
            }
        }
        return Some(insert);
    }

    let ctx = completion_context(root, text);
    if ctx.candidates.is_empty() {
        return None;
    }

    if ctx.at_boundary {
        let common = longest_common_prefix(&ctx.candidates);
        return (!common.is_empty()).then_some(common);
    }

    if let [only] = ctx.candidates.as_slice() {
        let mut insert = only[ctx.prefix.len()..].to_string();
        if needs_trailing_space(&format!("{}{}", text, insert)) {
            insert.push(' ');
        }
        return Some(insert);
    }

    let common = longest_common_prefix(&ctx.candidates);
    (common.len() > ctx.prefix.len()).then(|| common[ctx.prefix.len()..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> TreeNode {
        TreeNode::container()
            .with_child(
                "show",
                TreeNode::container()
                    .with_child("interfaces", TreeNode::leaf())
                    .with_child("interface-stats", TreeNode::leaf())
                    .with_child("version", TreeNode::leaf())
                    .with_child(
                        "route",
                        TreeNode::tag()
                            .with_child("summary", TreeNode::leaf())
                            .with_child("test", TreeNode::tag()),
                    ),
            )
            .with_child("ping", TreeNode::tag())
    }

    #[test]
    fn test_root_candidates() {
        let tree = tree();
        let ctx = completion_context(&tree, "");
        assert_eq!(ctx.candidates, vec!["ping", "show"]);
        assert!(!ctx.at_boundary);
    }

    #[test]
    fn test_prefix_filter() {
        let tree = tree();
        let ctx = completion_context(&tree, "show in");
        assert_eq!(ctx.prefix, "in");
        assert_eq!(ctx.candidates, vec!["interface-stats", "interfaces"]);
    }

    #[test]
    fn test_tag_before_value_offers_leaves() {
        let tree = tree();
        let ctx = completion_context(&tree, "show route ");
        assert_eq!(ctx.candidates, vec!["summary"]);
    }

    #[test]
    fn test_tag_after_value_offers_structure() {
        let tree = tree();
        let ctx = completion_context(&tree, "show route 10.0.0.0/8 ");
        assert_eq!(ctx.candidates, vec!["test"]);
    }

    #[test]
    fn test_half_typed_value_is_not_entered() {
        let tree = tree();
        let ctx = completion_context(&tree, "show route 10.0");
        assert!(ctx.node.unwrap().is_tag());
        assert!(ctx.candidates.is_empty());
        let ctx = completion_context(&tree, "show route su");
        assert_eq!(ctx.candidates, vec!["summary"]);
    }

    #[test]
    fn test_resolution_error_has_no_candidates() {
        let tree = tree();
        let ctx = completion_context(&tree, "bogus ");
        assert!(ctx.node.is_none());
        assert!(ctx.candidates.is_empty());
    }

    #[test]
    fn test_lcp() {
        assert_eq!(longest_common_prefix(&["interfaces", "interface-stats"]), "interface");
        assert_eq!(longest_common_prefix(&["abc"]), "abc");
        assert_eq!(longest_common_prefix(&["abc", "xyz"]), "");
        assert_eq!(longest_common_prefix::<&str>(&[]), "");
        assert_eq!(longest_common_prefix(&["ab", "abc", "abd"]), "ab");
    }

    #[test]
    fn test_needs_trailing_space() {
        assert!(needs_trailing_space("show"));
        assert!(!needs_trailing_space("show "));
    }

    #[test]
    fn test_suggest_single_candidate() {
        let tree = tree();
        assert_eq!(suggest(&tree, "sh"), Some("ow ".to_string()));
        assert_eq!(suggest(&tree, "show ver"), Some("sion ".to_string()));
    }

    #[test]
    fn test_suggest_lcp() {
        let tree = tree();
        assert_eq!(suggest(&tree, "show i"), Some("nterface".to_string()));
        assert_eq!(suggest(&tree, "show interface"), None);
    }

    #[test]
    fn test_suggest_none_cases() {
        let tree = tree();
        assert_eq!(suggest(&tree, ""), None);
        assert_eq!(suggest(&tree, "show "), None);
        assert_eq!(suggest(&tree, "show zz"), None);
        assert_eq!(suggest(&tree, "show version"), None);
    }

    #[test]
    fn test_tab_unique() {
        let tree = tree();
        assert_eq!(tab_completion(&tree, "sh"), Some("ow ".to_string()));
    }

    #[test]
    fn test_tab_exact_match_gets_space() {
        let tree = tree();
        assert_eq!(tab_completion(&tree, "show version"), Some(" ".to_string()));
    }

    #[test]
    fn test_tab_at_boundary_inserts_lcp() {
        let tree = tree();
        assert_eq!(tab_completion(&tree, "show route "), Some("summary".to_string()));
        assert_eq!(tab_completion(&tree, "show "), None);
    }

    #[test]
    fn test_tab_partial() {
        let tree = tree();
        assert_eq!(tab_completion(&tree, "show i"), Some("nterface".to_string()));
        assert_eq!(tab_completion(&tree, "show interface"), None);
    }
}
