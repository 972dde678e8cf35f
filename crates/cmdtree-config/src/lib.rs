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

//! Configuration transaction engine.
//!
//! Router-style staged editing over a schema tree: `set` and `delete` edit a
//! candidate layered on the committed document, `compare` shows the pending
//! diff, `commit` persists the merged result and runs the scripts bound to
//! the parts of the schema that changed.
//!
//! # Documents
//!
//! A configuration document is a tree of [`ConfigValue`]s. Leaves are a
//! presence flag, a scalar string or an ordered list of strings.
//!
//! # State
//!
//! [`ConfigStore`] owns three documents:
//!
//! - **committed**: what was last persisted
//! - **working**: a copy of committed that deletes edit directly, so a
//!   deleted committed value disappears before the commit
//! - **candidate**: pending additions and overrides
//!
//! The working view is `deep_merge(working, candidate)` and is never stored.
//!
//! # Shell
//!
//! [`ConfigSession`] wires the store to the schema, the validators and a
//! persistence backend, and processes one operator line at a time.

mod apply;
mod commit;
pub mod diff;
mod error;
pub mod merge;
pub mod persist;
pub mod projection;
pub mod session;
pub mod shell;
mod store;
pub mod validators;
pub mod value;

pub use commit::{find_script_for_path, run_commit_scripts, CommitPlan, ScriptReport};
pub use diff::{deep_diff, DiffLine, Sign};
pub use error::{ConfigError, ConfigResult};
pub use merge::deep_merge;
pub use persist::{ConfigPersistence, JsonFileStore, MemoryPersistence};
pub use projection::project;
pub use session::{ConfigOutcome, ConfigSession};
pub use shell::{config_shell_tree, SET_DESCRIPTION};
pub use store::ConfigStore;
pub use validators::{validate_set_path, ValidatorRegistry};
pub use value::{ConfigMap, ConfigValue};
