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

//! Canonical fixtures: sample trees and configuration documents.

pub mod builders;
mod trees;

pub use builders::{committed_router, ConfigDocBuilder};
pub use trees::{config_schema, deep_tag_chain, op_tree, CONFIG_SCHEMA_JSON, OP_TREE_JSON};

use cmdtree_core::TreeNode;

/// Named tree fixture constructors.
pub type FixtureList = Vec<(&'static str, fn() -> TreeNode)>;

/// Every named tree fixture.
pub fn all() -> FixtureList {
    vec![("op_tree", op_tree), ("config_schema", config_schema)]
}
