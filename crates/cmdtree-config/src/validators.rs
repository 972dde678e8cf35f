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

//! Named value validators bound to schema tag nodes.

use crate::error::{ConfigError, ConfigResult};
use cmdtree_core::{TagValues, TreeNode};
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

/// A validator: `Ok` accepts the value, `Err` carries the operator message.
pub type ValidatorFn = Box<dyn Fn(&str) -> Result<(), String>>;

/// Validators by name.
pub struct ValidatorRegistry {
    validators: BTreeMap<String, ValidatorFn>,
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("ipv4_address", |v| {
            ipv4_address(v).ok_or_else(|| "Must be a valid IPv4 address".to_string())
        });
        registry.register("ipv4_network", |v| {
            ipv4_network(v).ok_or_else(|| "Must be a valid IPv4 network".to_string())
        });
        registry.register("ipv4_interface", |v| {
            ipv4_interface(v).ok_or_else(|| "Must be a valid IPv4 interface address".to_string())
        });
        registry
    }
}

impl ValidatorRegistry {
    /// A registry without the built-in validators.
    pub fn empty() -> Self {
        Self {
            validators: BTreeMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, validator: F)
    where
        F: Fn(&str) -> Result<(), String> + 'static,
    {
        self.validators.insert(name.into(), Box::new(validator));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.validators.keys().cloned().collect()
    }

    /// Run one validator. Unknown names fail validation.
    pub fn validate(&self, name: &str, value: &str) -> ConfigResult<()> {
        let validator = self
            .validators
            .get(name)
            .ok_or_else(|| ConfigError::ValidatorNotFound(name.to_string()))?;
        validator(value).map_err(|message| {
            ConfigError::Validation(if message.is_empty() {
                "Validation failed".to_string()
            } else {
                message
            })
        })
    }
}

/// Check every captured tag value on a `set` path against its validators.
///
/// `path` holds the schema keys below `set`; `values` the captured tag
/// values of the line.
pub fn validate_set_path<S: AsRef<str>>(
    schema: &TreeNode,
    path: &[S],
    values: &TagValues,
    registry: &ValidatorRegistry,
) -> ConfigResult<()> {
    let mut cursor = schema;
    for key in path {
        let key = key.as_ref();
        let Some(next) = cursor.child(key) else {
            break;
        };
        cursor = next;
        if !cursor.is_tag() {
            continue;
        }
        let Some(value) = values.get(key) else {
            continue;
        };
        for name in &cursor.meta().validators {
            registry.validate(name, value)?;
        }
    }
    Ok(())
}

fn ipv4_address(value: &str) -> Option<()> {
    value.parse::<Ipv4Addr>().ok().map(|_| ())
}

/// Split `a.b.c.d[/len]`; a missing length is `/32`.
fn parse_prefix(value: &str) -> Option<(Ipv4Addr, u32)> {
    let (addr, len) = match value.split_once('/') {
        Some((addr, len)) => {
            if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            (addr, len.parse::<u32>().ok().filter(|l| *l <= 32)?)
        }
        None => (value, 32),
    };
    Some((addr.parse().ok()?, len))
}

fn ipv4_network(value: &str) -> Option<()> {
    let (addr, len) = parse_prefix(value)?;
    let mask = u32::MAX.checked_shl(32 - len).unwrap_or(0);
    (u32::from(addr) & !mask == 0).then_some(())
}

fn ipv4_interface(value: &str) -> Option<()> {
    parse_prefix(value).map(|_| ())
}
