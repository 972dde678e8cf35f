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

//! Deep merge of configuration maps.

use crate::value::{ConfigMap, ConfigValue};

/// Recursive union of `base` and `overlay`.
///
/// Keys holding maps on both sides merge recursively; otherwise the overlay
/// value replaces the base value.
pub fn deep_merge(base: &ConfigMap, overlay: &ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay);
    merged
}

fn merge_into(target: &mut ConfigMap, overlay: &ConfigMap) {
    for (key, value) in overlay {
        match (target.get_mut(key), value) {
            (Some(ConfigValue::Map(existing)), ConfigValue::Map(incoming)) => {
                merge_into(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}
