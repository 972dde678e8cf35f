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

//! `set` and `delete` edits.

use crate::store::ConfigStore;
use crate::value::{get_path, remove_path, set_path, ConfigValue};
use cmdtree_core::{TagValues, TreeNode, ValueMode};
use tracing::debug;

impl ConfigStore {
    /// Apply a `set` line.
    ///
    /// `path` holds the schema keys below `set` and `values` the captured
    /// tag values. A segment-mode tag node adds its value as a path segment;
    /// a scalar-mode tag node at the end of the path stores its value at its
    /// own key. A path ending without a value stores a presence flag. When
    /// the final schema node is `multi`, the value is appended to a list
    /// seeded from the candidate, then the working copy; duplicates are not
    /// appended.
    ///
    /// Returns the document path written, or `None` for an empty path.
    pub fn apply_set<S: AsRef<str>>(
        &mut self,
        schema: &TreeNode,
        path: &[S],
        values: &TagValues,
    ) -> Option<Vec<String>> {
        let mut key_parts = Vec::new();
        let mut terminal = ConfigValue::Presence;
        let mut cursor = Some(schema);
        let last = path.len().checked_sub(1)?;

        for (index, key) in path.iter().enumerate() {
            let key = key.as_ref();
            key_parts.push(key.to_string());
            cursor = cursor.and_then(|node| node.child(key));

            let Some(node) = cursor.filter(|node| node.is_tag()) else {
                continue;
            };
            let Some(value) = values.get(key) else {
                continue;
            };
            match node.meta().value_mode {
                ValueMode::Segment => key_parts.push(value.clone()),
                ValueMode::Scalar if index == last => {
                    terminal = ConfigValue::Scalar(value.clone());
                }
                ValueMode::Scalar => {}
            }
        }

        let multi = cursor.is_some_and(|node| node.meta().multi);
        if multi {
            let mut items = match get_path(&self.candidate, &key_parts)
                .or_else(|| get_path(&self.working, &key_parts))
            {
                Some(ConfigValue::List(items)) => items.clone(),
                Some(ConfigValue::Scalar(s)) => vec![s.clone()],
                _ => Vec::new(),
            };
            if let ConfigValue::Scalar(value) = terminal {
                if !items.contains(&value) {
                    items.push(value);
                }
            }
            set_path(&mut self.candidate, &key_parts, ConfigValue::List(items));
        } else {
            set_path(&mut self.candidate, &key_parts, terminal);
        }

        debug!(path = %key_parts.join(" "), multi, "set applied");
        Some(key_parts)
    }

    /// Apply a `delete` line. `path` holds the tokens after `delete`.
    ///
    /// A trailing token naming an element of a list at the parent path
    /// removes just that element. Everything else removes the whole path.
    /// Both the candidate and the working copy are edited, so a delete of a
    /// committed value shows up before the commit.
    pub fn apply_delete<S: AsRef<str>>(&mut self, path: &[S], resolved: Option<&TreeNode>) {
        let mut key_parts: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
        let scalar_tag =
            resolved.is_some_and(|node| node.is_tag() && node.meta().value_mode == ValueMode::Scalar);
        if scalar_tag && key_parts.len() >= 2 {
            key_parts.pop();
        }

        if let Some((item, base)) = key_parts.split_last() {
            if !base.is_empty() && self.delete_list_item(base, item) {
                return;
            }
        }

        if !key_parts.is_empty() {
            remove_path(&mut self.candidate, &key_parts);
            remove_path(&mut self.working, &key_parts);
            debug!(path = %key_parts.join(" "), "delete applied");
        }
    }

    /// Remove `item` from the list at `base`. The path goes away with its
    /// last element. Returns false when there is no such element.
    pub fn delete_list_item<S: AsRef<str>>(&mut self, base: &[S], item: &str) -> bool {
        let current = match get_path(&self.candidate, base) {
            Some(ConfigValue::List(items)) => items.clone(),
            _ => match get_path(&self.working, base) {
                Some(ConfigValue::List(items)) => items.clone(),
                _ => return false,
            },
        };
        if !current.iter().any(|v| v == item) {
            return false;
        }

        let remaining: Vec<String> = current.into_iter().filter(|v| v != item).collect();
        if remaining.is_empty() {
            remove_path(&mut self.candidate, base);
            remove_path(&mut self.working, base);
        } else {
            set_path(&mut self.candidate, base, ConfigValue::List(remaining.clone()));
            set_path(&mut self.working, base, ConfigValue::List(remaining));
        }
        debug!(item, "list element deleted");
        true
    }
}
