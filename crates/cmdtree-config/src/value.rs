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

//! Configuration document values.
//!
//! JSON mapping: `true` is a presence flag, a string is a scalar, an array
//! of strings is a list, an object is a nested map. Numbers are read as their
//! decimal text. `false`, `null` and nested arrays are rejected.

use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// A nested configuration map, sorted by key.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// A node of a configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Map(ConfigMap),
    /// A flag that is set.
    Presence,
    Scalar(String),
    /// Ordered values of a `multi` field.
    List(Vec<String>),
}

impl ConfigValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// An empty map counts as absent when reading nested values.
    pub fn is_empty_map(&self) -> bool {
        matches!(self, Self::Map(map) if map.is_empty())
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Map(map) => map_to_json(map),
            Self::Presence => JsonValue::Bool(true),
            Self::Scalar(s) => JsonValue::String(s.clone()),
            Self::List(items) => {
                JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
            }
        }
    }

    pub fn from_json(value: &JsonValue) -> ConfigResult<Self> {
        let mut path = Vec::new();
        value_from_json(value, &mut path)
    }
}

/// Convert a JSON object into a configuration map.
pub fn map_from_json(value: &JsonValue) -> ConfigResult<ConfigMap> {
    match value {
        JsonValue::Object(obj) => object_from_json(obj, &mut Vec::new()),
        _ => Err(ConfigError::invalid_document(
            &[],
            "configuration document must be a JSON object",
        )),
    }
}

pub fn map_to_json(map: &ConfigMap) -> JsonValue {
    JsonValue::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<Map<String, JsonValue>>(),
    )
}

fn object_from_json(obj: &Map<String, JsonValue>, path: &mut Vec<String>) -> ConfigResult<ConfigMap> {
    let mut map = ConfigMap::new();
    for (key, value) in obj {
        path.push(key.clone());
        let converted = value_from_json(value, path)?;
        path.pop();
        map.insert(key.clone(), converted);
    }
    Ok(map)
}

fn value_from_json(value: &JsonValue, path: &mut Vec<String>) -> ConfigResult<ConfigValue> {
    match value {
        JsonValue::Object(obj) => object_from_json(obj, path).map(ConfigValue::Map),
        JsonValue::Bool(true) => Ok(ConfigValue::Presence),
        JsonValue::String(s) => Ok(ConfigValue::Scalar(s.clone())),
        JsonValue::Number(n) => Ok(ConfigValue::Scalar(n.to_string())),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| match item {
                JsonValue::String(s) => Ok(s.clone()),
                JsonValue::Number(n) => Ok(n.to_string()),
                other => Err(ConfigError::invalid_document(
                    path,
                    format!("list items must be strings, found {}", other),
                )),
            })
            .collect::<ConfigResult<Vec<_>>>()
            .map(ConfigValue::List),
        JsonValue::Bool(false) | JsonValue::Null => Err(ConfigError::invalid_document(
            path,
            format!("{} is not a configuration value", value),
        )),
    }
}

/// Value at `path`, treating empty maps as absent.
pub fn get_path<'a, S: AsRef<str>>(map: &'a ConfigMap, path: &[S]) -> Option<&'a ConfigValue> {
    let (last, parents) = path.split_last()?;
    let mut current = map;
    for key in parents {
        current = current.get(key.as_ref())?.as_map()?;
    }
    current
        .get(last.as_ref())
        .filter(|value| !value.is_empty_map())
}

/// Write `value` at `path`, creating maps on the way and replacing any leaf
/// that sits where a map is needed.
pub fn set_path<S: AsRef<str>>(map: &mut ConfigMap, path: &[S], value: ConfigValue) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = map;
    for key in parents {
        let entry = current
            .entry(key.as_ref().to_string())
            .or_insert_with(|| ConfigValue::Map(ConfigMap::new()));
        if !entry.is_map() {
            *entry = ConfigValue::Map(ConfigMap::new());
        }
        current = match entry {
            ConfigValue::Map(next) => next,
            _ => return,
        };
    }
    current.insert(last.as_ref().to_string(), value);
}

/// Remove the value at `path`. Parents left empty are kept.
pub fn remove_path<S: AsRef<str>>(map: &mut ConfigMap, path: &[S]) -> bool {
    let Some((last, parents)) = path.split_last() else {
        return false;
    };
    let mut current = map;
    for key in parents {
        match current.get_mut(key.as_ref()) {
            Some(ConfigValue::Map(next)) => current = next,
            _ => return false,
        }
    }
    current.remove(last.as_ref()).is_some()
}
