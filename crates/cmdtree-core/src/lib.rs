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

//! Grammar engine for hierarchical command trees.
//!
//! A command tree is a declarative document whose nodes are plain containers,
//! tag nodes that swallow a free-form value token, or leaves. This crate
//! resolves operator input against such a tree and answers the questions an
//! interactive shell asks on every keystroke.
//!
//! # Components
//!
//! - [`tree`]: the [`TreeNode`] tagged union and JSON loading
//! - [`tokenize`]: shell-style tokenizing with a whitespace fallback
//! - [`resolve`]: walking tokens down the tree with tag-node consumption
//! - [`tags`]: the value-entered queries and tag-value extraction
//! - [`complete`]: completion candidates, fish-style suggestions and Tab
//! - [`template`]: `{name}` interpolation of bound command strings
//! - [`help`]: the rows shown for `?`
//! - [`traverse`] and [`lint`]: tree statistics and authoring diagnostics
//! - [`process`]: the boundary to the external process runner
//! - [`op`]: line dispatch for the operational shell
//!
//! # Example
//!
//! ```text
//! use cmdtree_core::{resolve, TreeNode};
//!
//! let tree = TreeNode::from_json_str(r#"{"show": {"route": {"type": "tagNode"}}}"#)?;
//! let res = resolve(&tree, &["show", "route", "10.0.0.0/8"]);
//! assert_eq!(res.consumed, vec!["show", "route"]);
//! ```

pub mod complete;
mod error;
pub mod help;
pub mod lint;
pub mod op;
pub mod process;
pub mod resolve;
pub mod tags;
pub mod template;
pub mod tokenize;
pub mod traverse;
pub mod tree;

pub use complete::{
    completion_context, longest_common_prefix, needs_trailing_space, suggest, tab_completion,
    CompletionContext,
};
pub use error::{path_label, LineError, RunError, TreeError, TreeErrorKind, TreeResult};
pub use help::{help_rows, render_help, HelpRow, ValueHelpRegistry};
pub use lint::{lint_tree, Diagnostic, DiagnosticKind, Severity};
pub use op::{LineOutcome, OperationalShell};
pub use process::{CommandOutput, ProcessRunner, SystemRunner};
pub use resolve::{resolve, Resolution};
pub use tags::{
    extract_tag_values, extract_tag_values_in_text, value_entered, value_entered_in_text, TagValues,
};
pub use template::{format_command, interpolate, Formatted, TemplateError};
pub use tokenize::{parse_input, split_tokens, InputTokens};
pub use traverse::{traverse, TreeStats, TreeVisitor, VisitorContext};
pub use tree::{Children, NodeKind, NodeMeta, TreeNode, ValueMode, ValueSpec, META_KEYS};
