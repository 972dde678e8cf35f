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

use super::load_tree;
use crate::error::{CliError, CliResult};
use cmdtree_config::ValidatorRegistry;
use cmdtree_core::{lint_tree, traverse, Diagnostic, Severity, TreeStats};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CheckReport<'a> {
    file: String,
    stats: &'a TreeStats,
    diagnostics: Vec<DiagnosticReport<'a>>,
}

#[derive(Serialize)]
struct DiagnosticReport<'a> {
    severity: String,
    rule: &'a str,
    path: &'a str,
    message: &'a str,
}

impl<'a> From<&'a Diagnostic> for DiagnosticReport<'a> {
    fn from(d: &'a Diagnostic) -> Self {
        Self {
            severity: d.severity().to_string(),
            rule: d.rule_id(),
            path: d.path(),
            message: d.message(),
        }
    }
}

/// Load a tree file, print its shape and lint it.
///
/// # Arguments
///
/// * `file` - Path to the tree document
/// * `format` - `text` for the human report, `json` for a machine-readable one
/// * `warn_error` - If `true`, warnings fail the check as errors do
///
/// # Errors
///
/// Returns `Err` if:
/// - The file cannot be read or exceeds the size limit
/// - The document is not a valid tree
/// - Lint reports an error, or a warning with `warn_error`
pub fn check(file: &Path, format: &str, warn_error: bool) -> CliResult<()> {
    let tree = match load_tree(file) {
        Ok(tree) => tree,
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file.display());
            return Err(e);
        }
    };

    let mut stats = TreeStats::default();
    if let Err(never) = traverse(&tree, &mut stats) {
        match never {}
    }
    let diagnostics = lint_tree(&tree, &ValidatorRegistry::default().names());
    let has_errors = diagnostics.iter().any(|d| d.severity() == Severity::Error);
    let has_warnings = diagnostics.iter().any(|d| d.severity() == Severity::Warning);

    match format {
        "json" => {
            let report = CheckReport {
                file: file.display().to_string(),
                stats: &stats,
                diagnostics: diagnostics.iter().map(DiagnosticReport::from).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            let mark = if has_errors {
                "✗".red().bold()
            } else {
                "✓".green().bold()
            };
            println!("{} {}", mark, file.display());
            println!("  Containers: {}", stats.containers);
            println!("  Tag nodes: {}", stats.tag_nodes);
            println!("  Leaves: {}", stats.leaves);
            println!("  Runnable: {}", stats.runnable);
            println!("  Scripted: {}", stats.scripted);
            println!("  Max depth: {}", stats.max_depth);

            if diagnostics.is_empty() {
                println!("  No issues found");
            } else {
                println!("  {} issue(s) found:", diagnostics.len());
                for diag in &diagnostics {
                    let severity = match diag.severity() {
                        Severity::Error => "error".red(),
                        Severity::Warning => "warning".yellow(),
                        Severity::Hint => "hint".blue(),
                    };
                    println!(
                        "    {}: {} [{}]: {}",
                        diag.path(),
                        severity,
                        diag.rule_id(),
                        diag.message()
                    );
                }
            }
        }
    }

    if has_errors || (warn_error && has_warnings) {
        Err(CliError::LintErrors)
    } else {
        Ok(())
    }
}
