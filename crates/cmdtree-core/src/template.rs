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

//! Command template interpolation.
//!
//! Templates use `{name}` placeholders filled from [`TagValues`]. `{{` and
//! `}}` are literal braces. A placeholder with no value is kept verbatim.
//! Placeholder names are plain identifiers: empty names, positional indices
//! and field access (`.`, `[`, `:` or `!`) make the template malformed.

use crate::tags::TagValues;
use thiserror::Error;
use tracing::debug;

/// A malformed template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unmatched '{{' at byte {0}")]
    UnclosedBrace(usize),

    #[error("single '}}' encountered at byte {0}")]
    StrayBrace(usize),

    #[error("unsupported placeholder '{{{0}}}'")]
    UnsupportedField(String),
}

/// Interpolated text plus the placeholders left unfilled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub text: String,
    pub unresolved: Vec<String>,
}

/// Substitute placeholders, reporting the ones without a value.
pub fn interpolate(template: &str, values: &TagValues) -> Result<Formatted, TemplateError> {
    let mut text = String::with_capacity(template.len());
    let mut unresolved = Vec::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    text.push('{');
                    continue;
                }
                let name = read_field(&mut chars).ok_or(TemplateError::UnclosedBrace(pos))?;
                if !is_plain_field(&name) {
                    return Err(TemplateError::UnsupportedField(name));
                }
                match values.get(&name) {
                    Some(value) => text.push_str(value),
                    None => {
                        text.push('{');
                        text.push_str(&name);
                        text.push('}');
                        unresolved.push(name);
                    }
                }
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_none() {
                    return Err(TemplateError::StrayBrace(pos));
                }
                text.push('}');
            }
            _ => text.push(c),
        }
    }

    Ok(Formatted { text, unresolved })
}

/// Placeholder names in a template, in order of appearance.
pub fn placeholder_names(template: &str) -> Result<Vec<String>, TemplateError> {
    interpolate(template, &TagValues::new()).map(|f| f.unresolved)
}

/// Interpolate for execution. A malformed template is returned unchanged.
pub fn format_command(template: &str, values: &TagValues) -> String {
    match interpolate(template, values) {
        Ok(formatted) => {
            if !formatted.unresolved.is_empty() {
                debug!(unresolved = ?formatted.unresolved, "placeholders left unfilled");
            }
            formatted.text
        }
        Err(err) => {
            debug!(%err, template, "malformed command template; using it verbatim");
            template.to_string()
        }
    }
}

fn read_field(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> Option<String> {
    let mut name = String::new();
    for (_, c) in chars.by_ref() {
        match c {
            '}' => return Some(name),
            '{' => return None,
            _ => name.push(c),
        }
    }
    None
}

fn is_plain_field(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().all(|c| c.is_ascii_digit())
        && !name.contains(['.', '[', ']', ':', '!'])
}
