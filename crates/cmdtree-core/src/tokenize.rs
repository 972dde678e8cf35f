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

//! Tokenizing of operator input.

use std::borrow::Cow;

/// Split a line into tokens, honoring shell quoting.
///
/// `#` is an ordinary character: `ping 10.0.0.1 #x` has three tokens.
/// Malformed quoting (an unterminated quote, a trailing backslash) falls back
/// to plain whitespace splitting so a half-typed line still completes.
pub fn split_tokens(text: &str) -> Vec<String> {
    shlex::split(&escape_comment_marks(text))
        .unwrap_or_else(|| text.split_whitespace().map(str::to_string).collect())
}

/// Backslash-escape every unquoted `#` so the splitter does not start a
/// comment there. An escaped `#` outside quotes splits to a plain `#`.
fn escape_comment_marks(text: &str) -> Cow<'_, str> {
    if !text.contains('#') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 4);
    let mut quote: Option<char> = None;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (None, '\\') | (Some('"'), '\\') => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
                continue;
            }
            (None, '\'' | '"') => quote = Some(c),
            (None, '#') => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Tokens of a line that is still being typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputTokens {
    /// Completed tokens.
    pub path: Vec<String>,
    /// True when the text ends in a space, so nothing is in progress.
    pub at_boundary: bool,
    /// The token under the cursor, empty at a boundary.
    pub prefix: String,
}

/// Split text-before-cursor into completed tokens and the in-progress prefix.
pub fn parse_input(text: &str) -> InputTokens {
    let mut path = split_tokens(text);
    let at_boundary = text.ends_with(' ');
    let prefix = if at_boundary {
        String::new()
    } else {
        path.pop().unwrap_or_default()
    };
    InputTokens {
        path,
        at_boundary,
        prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(split_tokens("show ip  route"), vec!["show", "ip", "route"]);
    }

    #[test]
    fn test_split_quoted() {
        assert_eq!(
            split_tokens("set system login banner \"hello world\""),
            vec!["set", "system", "login", "banner", "hello world"]
        );
    }

    #[test]
    fn test_split_malformed_falls_back() {
        assert_eq!(
            split_tokens("set banner \"hello wor"),
            vec!["set", "banner", "\"hello", "wor"]
        );
    }

    #[test]
    fn test_split_keeps_hash_words() {
        assert_eq!(split_tokens("a #b"), vec!["a", "#b"]);
        assert_eq!(split_tokens("ping 10.0.0.1 #x"), vec!["ping", "10.0.0.1", "#x"]);
        assert_eq!(
            split_tokens("set system login banner #1"),
            vec!["set", "system", "login", "banner", "#1"]
        );
        assert_eq!(split_tokens("# note"), vec!["#", "note"]);
        assert_eq!(split_tokens("a#b \\#c"), vec!["a#b", "#c"]);
    }

    #[test]
    fn test_split_hash_inside_quotes_is_untouched() {
        assert_eq!(split_tokens("banner \"#1 up\""), vec!["banner", "#1 up"]);
        assert_eq!(split_tokens("banner '#1 \\n'"), vec!["banner", "#1 \\n"]);
        assert_eq!(split_tokens("banner \"a \\\" #b\""), vec!["banner", "a \" #b"]);
    }

    #[test]
    fn test_parse_input_hash_prefix() {
        let input = parse_input("show #");
        assert_eq!(input.path, vec!["show"]);
        assert!(!input.at_boundary);
        assert_eq!(input.prefix, "#");
    }

    #[test]
    fn test_parse_input_mid_token() {
        let input = parse_input("show ip ro");
        assert_eq!(input.path, vec!["show", "ip"]);
        assert!(!input.at_boundary);
        assert_eq!(input.prefix, "ro");
    }

    #[test]
    fn test_parse_input_at_boundary() {
        let input = parse_input("show ip ");
        assert_eq!(input.path, vec!["show", "ip"]);
        assert!(input.at_boundary);
        assert_eq!(input.prefix, "");
    }

    #[test]
    fn test_parse_input_empty() {
        assert_eq!(parse_input(""), InputTokens::default());
    }
}
