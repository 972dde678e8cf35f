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

//! Shared test fixtures and utilities for cmdtree crates.
//!
//! Canonical sample trees, configuration documents and a recording process
//! runner, so every crate's tests exercise the same shapes.
//!
//! # Quick Start
//!
//! ```rust
//! use cmdtree_test::{fixtures, RecordingRunner};
//! use cmdtree_core::OperationalShell;
//!
//! let shell = OperationalShell::new(fixtures::op_tree());
//! let runner = RecordingRunner::new();
//! shell.dispatch_line("show ip route 10.0.0.0/8", &runner);
//! assert_eq!(runner.commands(), vec!["ip route get 10.0.0.0/8"]);
//! ```

/// Canonical fixtures.
pub mod fixtures;

/// Recording process runner.
pub mod runner;

/// Tree counting utilities.
pub mod counts;

pub use counts::{all_paths, count_nodes, stats};
pub use fixtures::*;
pub use runner::{Invocation, RecordingRunner};
