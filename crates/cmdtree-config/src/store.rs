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

//! The configuration transaction store.
//!
//! Edits live in [`crate::apply`], commit in [`crate::commit`]; this module
//! holds the state and the read-only views.

use crate::diff::{deep_diff, DiffLine};
use crate::merge::deep_merge;
use crate::value::{get_path, map_to_json, ConfigMap, ConfigValue};
use serde_json::{json, Value as JsonValue};

/// Committed document, its working copy and the candidate edits.
///
/// Every method takes `&self` or `&mut self`; sharing a store between
/// threads needs a lock around it so commit's read-merge-write stays whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    pub(crate) committed: ConfigMap,
    pub(crate) working: ConfigMap,
    pub(crate) candidate: ConfigMap,
}

impl ConfigStore {
    pub fn new(committed: ConfigMap) -> Self {
        Self {
            working: committed.clone(),
            committed,
            candidate: ConfigMap::new(),
        }
    }

    pub fn committed(&self) -> &ConfigMap {
        &self.committed
    }

    /// Committed document with deletes applied.
    pub fn working(&self) -> &ConfigMap {
        &self.working
    }

    pub fn candidate(&self) -> &ConfigMap {
        &self.candidate
    }

    /// What the committed document would become on commit.
    pub fn working_view(&self) -> ConfigMap {
        deep_merge(&self.working, &self.candidate)
    }

    /// Whether there is anything to commit.
    pub fn is_dirty(&self) -> bool {
        !self.candidate.is_empty() || self.working != self.committed
    }

    /// Pending changes as diff lines.
    pub fn compare(&self) -> Vec<DiffLine> {
        deep_diff(&self.committed, &self.working_view())
    }

    /// Committed entries that deletes have removed from the working copy.
    pub fn removed(&self) -> ConfigMap {
        collect_removed(&self.committed, &self.working)
    }

    /// `{"add": candidate, "delete": removed}`.
    pub fn show_candidate(&self) -> JsonValue {
        json!({
            "add": map_to_json(&self.candidate),
            "delete": map_to_json(&self.removed()),
        })
    }

    /// Committed value at `path`, or `{}` when absent.
    pub fn show_committed<S: AsRef<str>>(&self, path: &[S]) -> JsonValue {
        if path.is_empty() {
            return map_to_json(&self.committed);
        }
        get_path(&self.committed, path)
            .map(ConfigValue::to_json)
            .unwrap_or_else(|| json!({}))
    }

    /// Drop candidate edits and undo deletes.
    pub fn discard(&mut self) {
        self.candidate.clear();
        self.working = self.committed.clone();
    }
}

fn collect_removed(before: &ConfigMap, after: &ConfigMap) -> ConfigMap {
    let mut removed = ConfigMap::new();
    for (key, old) in before {
        match (old, after.get(key)) {
            (_, None) => {
                removed.insert(key.clone(), old.clone());
            }
            (ConfigValue::Map(a), Some(ConfigValue::Map(b))) => {
                let sub = collect_removed(a, b);
                if !sub.is_empty() {
                    removed.insert(key.clone(), ConfigValue::Map(sub));
                }
            }
            (ConfigValue::Map(_), Some(_)) => {
                removed.insert(key.clone(), old.clone());
            }
            (ConfigValue::List(a), Some(ConfigValue::List(b))) => {
                let gone: Vec<String> = a.iter().filter(|v| !b.contains(v)).cloned().collect();
                if !gone.is_empty() {
                    removed.insert(key.clone(), ConfigValue::List(gone));
                }
            }
            _ => {}
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{map_from_json, remove_path, set_path};

    fn doc(value: JsonValue) -> ConfigMap {
        map_from_json(&value).unwrap()
    }

    #[test]
    fn test_new_store_is_clean() {
        let store = ConfigStore::new(doc(json!({"a": "1"})));
        assert!(!store.is_dirty());
        assert!(store.compare().is_empty());
        assert_eq!(store.working_view(), *store.committed());
    }

    #[test]
    fn test_candidate_makes_dirty() {
        let mut store = ConfigStore::new(ConfigMap::new());
        set_path(&mut store.candidate, &["a"], ConfigValue::Presence);
        assert!(store.is_dirty());
        assert_eq!(store.compare()[0].to_string(), "+ a");
    }

    #[test]
    fn test_discard_restores_committed() {
        let mut store = ConfigStore::new(doc(json!({"a": "1", "b": "2"})));
        set_path(&mut store.candidate, &["c"], ConfigValue::Presence);
        remove_path(&mut store.working, &["b"]);
        store.discard();
        assert!(!store.is_dirty());
        assert_eq!(store.working(), store.committed());
    }

    #[test]
    fn test_show_candidate() {
        let mut store = ConfigStore::new(doc(json!({
            "system": {"host-name": "r1", "dns": ["a", "b"]},
            "keep": true
        })));
        remove_path(&mut store.working, &["system", "host-name"]);
        set_path(
            &mut store.working,
            &["system", "dns"],
            ConfigValue::list(["b"]),
        );
        set_path(&mut store.candidate, &["new"], ConfigValue::scalar("x"));

        assert_eq!(
            store.show_candidate(),
            json!({
                "add": {"new": "x"},
                "delete": {"system": {"host-name": "r1", "dns": ["a"]}}
            })
        );
    }

    #[test]
    fn test_show_committed_paths() {
        let store = ConfigStore::new(doc(json!({"system": {"host-name": "r1"}})));
        assert_eq!(store.show_committed::<&str>(&[]), json!({"system": {"host-name": "r1"}}));
        assert_eq!(store.show_committed(&["system"]), json!({"host-name": "r1"}));
        assert_eq!(store.show_committed(&["nope"]), json!({}));
    }
}
