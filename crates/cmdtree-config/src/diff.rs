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

//! Deep diff of configuration maps into signed, path-shaped lines.
//!
//! Every line names one terminal path, in the same words an operator would
//! type after `set`: `+ interfaces eth0 address 10.0.0.1/24`. Keys are
//! visited in sorted order at every level.
//!
//! - a presence flag emits its path alone
//! - a scalar emits its path plus the value
//! - a list emits one line per element; a changed list emits only the
//!   elements that were removed or added
//! - an empty map emits its path alone
//! - a leaf replaced by a map (or the reverse) emits every old line as a
//!   removal followed by every new line as an addition

use crate::value::{ConfigMap, ConfigValue};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    Add,
    Remove,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Remove => write!(f, "-"),
        }
    }
}

/// One line of a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub sign: Sign,
    pub path: Vec<String>,
}

impl DiffLine {
    fn new(sign: Sign, prefix: &[String], value: Option<&str>) -> Self {
        let mut path = prefix.to_vec();
        if let Some(value) = value {
            path.push(value.to_string());
        }
        Self { sign, path }
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sign, self.path.join(" "))
    }
}

/// Lines turning `old` into `new`.
pub fn deep_diff(old: &ConfigMap, new: &ConfigMap) -> Vec<DiffLine> {
    let mut out = Vec::new();
    diff_maps(&mut Vec::new(), old, new, &mut out);
    out
}

fn diff_maps(prefix: &mut Vec<String>, old: &ConfigMap, new: &ConfigMap, out: &mut Vec<DiffLine>) {
    let mut keys: Vec<&String> = old.keys().chain(new.keys()).collect();
    keys.sort();
    keys.dedup();

    for key in keys {
        prefix.push(key.clone());
        diff_values(prefix, old.get(key), new.get(key), out);
        prefix.pop();
    }
}

fn diff_values(
    prefix: &mut Vec<String>,
    old: Option<&ConfigValue>,
    new: Option<&ConfigValue>,
    out: &mut Vec<DiffLine>,
) {
    match (old, new) {
        (Some(ConfigValue::Map(a)), Some(ConfigValue::Map(b))) => diff_maps(prefix, a, b, out),
        (Some(ConfigValue::List(a)), Some(ConfigValue::List(b))) => {
            for item in a.iter().filter(|item| !b.contains(item)) {
                out.push(DiffLine::new(Sign::Remove, prefix, Some(item)));
            }
            for item in b.iter().filter(|item| !a.contains(item)) {
                out.push(DiffLine::new(Sign::Add, prefix, Some(item)));
            }
        }
        (Some(a), Some(b)) if a == b => {}
        (old, new) => {
            if let Some(old) = old {
                emit(Sign::Remove, prefix, old, out);
            }
            if let Some(new) = new {
                emit(Sign::Add, prefix, new, out);
            }
        }
    }
}

/// Emit every line of `value` with one sign.
fn emit(sign: Sign, prefix: &mut Vec<String>, value: &ConfigValue, out: &mut Vec<DiffLine>) {
    match value {
        ConfigValue::Map(map) if map.is_empty() => out.push(DiffLine::new(sign, prefix, None)),
        ConfigValue::Map(map) => {
            for (key, child) in map {
                prefix.push(key.clone());
                emit(sign, prefix, child, out);
                prefix.pop();
            }
        }
        ConfigValue::Presence => out.push(DiffLine::new(sign, prefix, None)),
        ConfigValue::Scalar(s) => out.push(DiffLine::new(sign, prefix, Some(s))),
        ConfigValue::List(items) if items.is_empty() => out.push(DiffLine::new(sign, prefix, None)),
        ConfigValue::List(items) => {
            for item in items {
                out.push(DiffLine::new(sign, prefix, Some(item)));
            }
        }
    }
}
