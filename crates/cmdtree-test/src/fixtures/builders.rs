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

//! Builder for configuration documents.

use cmdtree_config::value::set_path;
use cmdtree_config::{ConfigMap, ConfigValue};

/// Fluent builder for [`ConfigMap`] fixtures.
///
/// ```
/// use cmdtree_test::fixtures::builders::ConfigDocBuilder;
///
/// let doc = ConfigDocBuilder::new()
///     .scalar(&["system", "host-name"], "r1")
///     .list(&["system", "name-server"], ["10.0.0.53"])
///     .flag(&["interfaces", "eth1", "disable"])
///     .build();
///
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigDocBuilder {
    doc: ConfigMap,
}

impl ConfigDocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A presence flag at `path`.
    pub fn flag(mut self, path: &[&str]) -> Self {
        set_path(&mut self.doc, path, ConfigValue::Presence);
        self
    }

    pub fn scalar(mut self, path: &[&str], value: &str) -> Self {
        set_path(&mut self.doc, path, ConfigValue::scalar(value));
        self
    }

    pub fn list<I, S>(mut self, path: &[&str], items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        set_path(&mut self.doc, path, ConfigValue::list(items));
        self
    }

    /// An empty map at `path`.
    pub fn empty(mut self, path: &[&str]) -> Self {
        set_path(&mut self.doc, path, ConfigValue::Map(ConfigMap::new()));
        self
    }

    pub fn build(self) -> ConfigMap {
        self.doc
    }
}

/// A committed document matching [`super::config_schema`].
pub fn committed_router() -> ConfigMap {
    ConfigDocBuilder::new()
        .list(&["interfaces", "eth0", "address"], ["192.0.2.1/24"])
        .scalar(&["interfaces", "eth0", "alias"], "uplink")
        .scalar(&["system", "host-name"], "r1")
        .list(&["system", "name-server"], ["192.0.2.53", "198.51.100.53"])
        .list(
            &["protocols", "static", "route", "0.0.0.0/0", "next-hop"],
            ["192.0.2.254"],
        )
        .build()
}
