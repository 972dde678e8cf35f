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

//! Property-based tests for completion.

use cmdtree_core::{completion_context, longest_common_prefix, suggest};
use cmdtree_test::fixtures::op_tree;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: the LCP prefixes every input and cannot be extended.
    #[test]
    fn prop_lcp_bounds(strings in prop::collection::vec("[a-c]{0,6}", 1..6)) {
        let lcp = longest_common_prefix(&strings);
        for s in &strings {
            prop_assert!(s.starts_with(&lcp));
        }
        let min_len = strings.iter().map(String::len).min().unwrap_or(0);
        prop_assert!(lcp.len() <= min_len);
        if lcp.len() < min_len {
            let next: Vec<char> = strings
                .iter()
                .filter_map(|s| s[lcp.len()..].chars().next())
                .collect();
            prop_assert!(next.iter().any(|c| *c != next[0]));
        }
    }

    /// Property: candidates are sorted and all extend the prefix.
    #[test]
    fn prop_candidates_match_prefix(
        path in prop::sample::select(vec!["", "show ", "show ip ", "show ip route ", "show ip route 1.1.1.1 "]),
        prefix in "[a-z]{0,3}",
    ) {
        let tree = op_tree();
        let text = format!("{path}{prefix}");
        let ctx = completion_context(&tree, &text);

        let mut sorted = ctx.candidates.clone();
        sorted.sort();
        prop_assert_eq!(&sorted, &ctx.candidates);
        for c in &ctx.candidates {
            prop_assert!(c.starts_with(&ctx.prefix));
        }
    }

    /// Property: a suggestion always continues a candidate key.
    #[test]
    fn prop_suggestion_extends_a_candidate(prefix in "[a-z]{1,3}") {
        let tree = op_tree();
        let text = format!("show {prefix}");
        if let Some(s) = suggest(&tree, &text) {
            let completed = format!("{prefix}{}", s.trim_end());
            let ctx = completion_context(&tree, &text);
            prop_assert!(ctx.candidates.iter().any(|c| c.starts_with(&completed)));
        }
    }
}
