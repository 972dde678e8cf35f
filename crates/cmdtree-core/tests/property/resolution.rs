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

//! Property-based tests for path resolution and tag values.

use cmdtree_core::{extract_tag_values, format_command, resolve, TagValues};
use cmdtree_test::fixtures::op_tree;
use proptest::prelude::*;

/// Words that name nodes of the router fixture, plus a few that do not.
fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("show".to_string()),
        Just("ip".to_string()),
        Just("route".to_string()),
        Just("bgp".to_string()),
        Just("summary".to_string()),
        Just("test".to_string()),
        Just("ping".to_string()),
        "[a-z0-9./]{1,12}",
    ]
}

fn ipv4_prefix() -> impl Strategy<Value = String> {
    (any::<[u8; 4]>(), 0u8..=32).prop_map(|(o, len)| format!("{}.{}.{}.{}/{len}", o[0], o[1], o[2], o[3]))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: resolving the same tokens twice gives the same result.
    #[test]
    fn prop_resolution_is_deterministic(tokens in prop::collection::vec(word(), 0..8)) {
        let tree = op_tree();
        let first = resolve(&tree, &tokens);
        let second = resolve(&tree, &tokens);
        prop_assert_eq!(first, second);
    }

    /// Property: consumed keys are an in-order subsequence of the input.
    #[test]
    fn prop_consumed_is_subsequence(tokens in prop::collection::vec(word(), 0..8)) {
        let tree = op_tree();
        let res = resolve(&tree, &tokens);
        let mut rest = tokens.iter();
        for key in &res.consumed {
            prop_assert!(rest.any(|t| t == key), "{} out of order in {:?}", key, tokens);
        }
        if let Some(bad) = &res.error_token {
            prop_assert!(tokens.contains(bad));
        }
    }

    /// Property: a route value is consumed but never appended to the path.
    #[test]
    fn prop_route_value_is_consumed(prefix in ipv4_prefix()) {
        let tree = op_tree();
        let tokens = ["show", "ip", "route", prefix.as_str()];
        let res = resolve(&tree, &tokens);
        prop_assert!(res.is_resolved());
        prop_assert_eq!(res.consumed, vec!["show", "ip", "route"]);

        let values = extract_tag_values(&tree, &tokens);
        prop_assert_eq!(values.get("route"), Some(&prefix));
    }

    /// Property: only the first value on a tag node is captured.
    #[test]
    fn prop_first_value_wins(first in ipv4_prefix(), second in ipv4_prefix()) {
        let tree = op_tree();
        let tokens = ["show", "ip", "route", first.as_str(), second.as_str()];
        let values = extract_tag_values(&tree, &tokens);
        prop_assert_eq!(values.len(), 1);
        prop_assert_eq!(values.get("route"), Some(&first));
    }

    /// Property: formatting never fails and brace-free text is unchanged.
    #[test]
    fn prop_format_never_fails(template in "\\PC{0,40}", value in "[a-z0-9]{1,8}") {
        let mut values = TagValues::new();
        values.insert("host".to_string(), value);
        let _ = format_command(&template, &values);

        let plain: String = template.chars().filter(|c| *c != '{' && *c != '}').collect();
        prop_assert_eq!(format_command(&plain, &values), plain);
    }
}
