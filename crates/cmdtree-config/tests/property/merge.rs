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

//! Merge and diff agree with each other.

use cmdtree_config::value::get_path;
use cmdtree_config::{deep_diff, deep_merge, ConfigMap, ConfigValue, Sign};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn leaf() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        Just(ConfigValue::Presence),
        "[xyz]".prop_map(ConfigValue::Scalar),
    ]
}

fn value() -> impl Strategy<Value = ConfigValue> {
    leaf().prop_recursive(3, 24, 3, |inner| {
        prop::collection::btree_map("[abc]", inner, 1..4).prop_map(ConfigValue::Map)
    })
}

fn doc() -> impl Strategy<Value = ConfigMap> {
    prop::collection::btree_map("[abc]", value(), 0..4)
}

/// Every leaf of `map` with its path.
fn leaves(map: &ConfigMap) -> Vec<(Vec<String>, ConfigValue)> {
    fn walk(prefix: &mut Vec<String>, map: &ConfigMap, out: &mut Vec<(Vec<String>, ConfigValue)>) {
        for (key, value) in map {
            prefix.push(key.clone());
            match value {
                ConfigValue::Map(sub) => walk(prefix, sub, out),
                other => out.push((prefix.clone(), other.clone())),
            }
            prefix.pop();
        }
    }
    let mut out = Vec::new();
    walk(&mut Vec::new(), map, &mut out);
    out
}

fn line_for(path: &[String], value: &ConfigValue) -> String {
    match value {
        ConfigValue::Scalar(s) => format!("{} {}", path.join(" "), s),
        _ => path.join(" "),
    }
}

fn lines_with(doc: &ConfigMap, sign: Sign, other: &ConfigMap) -> BTreeSet<String> {
    deep_diff(doc, other)
        .into_iter()
        .filter(|l| l.sign == sign)
        .map(|l| l.path.join(" "))
        .collect()
}

proptest! {
    #[test]
    fn prop_diff_against_self_is_empty(c in doc()) {
        prop_assert!(deep_diff(&c, &c).is_empty());
        prop_assert_eq!(deep_merge(&c, &c), c);
    }

    #[test]
    fn prop_merge_is_idempotent(c in doc(), d in doc()) {
        let once = deep_merge(&c, &d);
        prop_assert_eq!(deep_merge(&once, &d), once);
    }

    #[test]
    fn prop_added_lines_are_changed_overlay_leaves(c in doc(), d in doc()) {
        let merged = deep_merge(&c, &d);
        let added = lines_with(&c, Sign::Add, &merged);

        let expected: BTreeSet<String> = leaves(&d)
            .into_iter()
            .filter(|(path, leaf)| get_path(&c, path) != Some(leaf))
            .map(|(path, leaf)| line_for(&path, &leaf))
            .collect();
        prop_assert_eq!(added, expected);
    }

    #[test]
    fn prop_removed_lines_come_from_base(c in doc(), d in doc()) {
        let merged = deep_merge(&c, &d);
        let removed = lines_with(&c, Sign::Remove, &merged);
        let base: BTreeSet<String> = leaves(&c)
            .iter()
            .map(|(path, leaf)| line_for(path, leaf))
            .collect();
        prop_assert!(removed.is_subset(&base));
    }

    #[test]
    fn prop_overlay_leaves_survive_merge(c in doc(), d in doc()) {
        let merged = deep_merge(&c, &d);
        for (path, leaf) in leaves(&d) {
            prop_assert_eq!(get_path(&merged, &path), Some(&leaf));
        }
    }
}
