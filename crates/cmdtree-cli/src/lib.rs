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

//! # cmdtree-cli
//!
//! The `cmdtree` binary: an operational shell that runs the commands bound
//! in a command tree, and a configuration shell that edits, diffs and
//! commits a configuration document against a schema tree.
//!
//! ```text
//! cmdtree op --tree op.json
//! cmdtree config --schema config.json --committed committed_config.json
//! cmdtree check op.json
//! cmdtree completion bash
//! ```
//!
//! Both shells read through [`editor::LineSource`], so piped input runs the
//! same dispatch as an interactive terminal.

pub mod cli;
pub mod commands;
pub mod editor;
pub mod error;

pub use error::{CliError, CliResult};
