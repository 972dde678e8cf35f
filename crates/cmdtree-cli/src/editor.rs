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

//! Where shell input comes from.
//!
//! Interactive sessions read through rustyline with the command tree wired
//! into it: the hint is the fish-style autosuggestion, Tab inserts the
//! completion, and `?` prints help for the text before the cursor without
//! touching the line. Piped input is read line by line with none of that.

use crate::error::{CliError, CliResult};
use cmdtree_core::{help_rows, render_help, suggest, tab_completion, TreeNode, ValueHelpRegistry};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, CompletionType, ConditionalEventHandler, Config, Context, Editor, Event, EventContext,
    EventHandler, ExternalPrinter, Helper, KeyEvent, RepeatCount,
};
use std::borrow::Cow;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, warn};

/// A stream of shell input.
pub trait LineSource {
    /// Read the next input. `initial` pre-fills the editable line where the
    /// source supports it. `Ok(None)` is end of input.
    ///
    /// One read may return several lines (a paste).
    fn read(&mut self, prompt: &str, initial: &str) -> CliResult<Option<String>>;

    /// Tree used for completion and help from the next read on.
    fn set_tree(&mut self, _tree: &TreeNode) {}

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Plain line reader for piped input. Prompts are not printed.
pub struct BatchSource<R> {
    reader: R,
}

impl<R: BufRead> BatchSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BatchSource<R> {
    fn read(&mut self, _prompt: &str, _initial: &str) -> CliResult<Option<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(e) => Err(CliError::io_error("<stdin>", e)),
        }
    }
}

/// rustyline glue over a shared command tree.
pub struct ShellHelper {
    tree: Arc<RwLock<TreeNode>>,
}

impl ShellHelper {
    pub fn new(tree: Arc<RwLock<TreeNode>>) -> Self {
        Self { tree }
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let Ok(tree) = self.tree.read() else {
            return Ok((pos, Vec::new()));
        };
        let insert = tab_completion(&tree, &line[..pos]).filter(|s| !s.is_empty());
        Ok(match insert {
            Some(insert) => (
                pos,
                vec![Pair {
                    display: insert.clone(),
                    replacement: insert,
                }],
            ),
            None => (pos, Vec::new()),
        })
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        // Only at the end of the line.
        if pos < line.len() {
            return None;
        }
        let tree = self.tree.read().ok()?;
        suggest(&tree, line)
    }
}

impl Highlighter for ShellHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

/// `?` key: print help above the prompt and leave the line alone.
struct HelpKey {
    tree: Arc<RwLock<TreeNode>>,
    registry: ValueHelpRegistry,
    printer: Mutex<Box<dyn ExternalPrinter + Send>>,
}

impl ConditionalEventHandler for HelpKey {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext,
    ) -> Option<Cmd> {
        let text = &ctx.line()[..ctx.pos()];
        let help = {
            let tree = self.tree.read().ok()?;
            render_help(help_rows(&tree, text, &self.registry).as_deref())
        };
        if let Ok(mut printer) = self.printer.lock() {
            if let Err(e) = printer.print(help.trim_end().to_string()) {
                debug!(error = %e, "help output failed");
            }
        }
        Some(Cmd::Noop)
    }
}

/// Line editor on the controlling terminal.
pub struct InteractiveSource {
    editor: Editor<ShellHelper, DefaultHistory>,
    tree: Arc<RwLock<TreeNode>>,
    history: Option<PathBuf>,
}

impl InteractiveSource {
    /// `history` is loaded now and saved after every line.
    pub fn new(tree: &TreeNode, history: Option<PathBuf>) -> CliResult<Self> {
        let shared = Arc::new(RwLock::new(tree.clone()));
        let config = Config::builder()
            .auto_add_history(true)
            .completion_type(CompletionType::List)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(ShellHelper::new(Arc::clone(&shared))));

        match editor.create_external_printer() {
            Ok(printer) => {
                let handler = HelpKey {
                    tree: Arc::clone(&shared),
                    registry: ValueHelpRegistry::default(),
                    printer: Mutex::new(Box::new(printer)),
                };
                editor.bind_sequence(
                    KeyEvent::from('?'),
                    EventHandler::Conditional(Box::new(handler)),
                );
            }
            Err(e) => warn!(error = %e, "inline help unavailable on this terminal"),
        }

        if let Some(path) = &history {
            if let Err(e) = editor.load_history(path) {
                debug!(path = %path.display(), error = %e, "no history loaded");
            }
        }

        Ok(Self {
            editor,
            tree: shared,
            history,
        })
    }
}

impl LineSource for InteractiveSource {
    fn read(&mut self, prompt: &str, initial: &str) -> CliResult<Option<String>> {
        let result = if initial.is_empty() {
            self.editor.readline(prompt)
        } else {
            self.editor.readline_with_initial(prompt, (initial, ""))
        };
        match result {
            Ok(line) => {
                if let Some(path) = &self.history {
                    if let Err(e) = self.editor.save_history(path) {
                        debug!(path = %path.display(), error = %e, "history not saved");
                    }
                }
                Ok(Some(line))
            }
            // Ctrl-C abandons the line.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_tree(&mut self, tree: &TreeNode) {
        if let Ok(mut shared) = self.tree.write() {
            *shared = tree.clone();
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Line editing on a terminal, plain reads otherwise or with `batch`.
pub fn open_source(
    batch: bool,
    tree: &TreeNode,
    history: Option<PathBuf>,
) -> CliResult<Box<dyn LineSource>> {
    let stdin = io::stdin();
    if batch || !stdin.is_terminal() {
        return Ok(Box::new(BatchSource::new(stdin.lock())));
    }
    Ok(Box::new(InteractiveSource::new(tree, history)?))
}
