//! Reader for the variable assignments a script feed response executes.
//!
//! The feed answers with statements such as
//! `v_sh600519="1~贵州茅台~600519~...";` and expects the page to read the
//! resulting globals. Here the statements are parsed into an owned table
//! instead; the table is dropped with the scope that loaded it, so nothing
//! outlives a single fetch on either the success or the failure path.

use std::collections::HashMap;

/// Variables assigned by one script feed response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptGlobals {
    values: HashMap<String, String>,
}

impl ScriptGlobals {
    /// Parse every `name="value";` statement in `body`.
    ///
    /// Statements may be prefixed with `var ` or `window.`. Values may be
    /// single- or double-quoted; an unquoted value runs to the next `;`.
    /// Anything that does not look like an assignment is skipped.
    pub fn parse(body: &str) -> Self {
        let mut values = HashMap::new();
        let mut rest = body;

        loop {
            rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ';');
            if rest.is_empty() {
                break;
            }

            let Some(eq) = rest.find('=') else {
                break;
            };
            let name = normalize_name(&rest[..eq]);
            let after_eq = rest[eq + 1..].trim_start();

            let (value, remaining) = match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    match body.find(quote) {
                        Some(end) => (&body[..end], &body[end + 1..]),
                        // Unterminated literal: keep what we have.
                        None => (body, ""),
                    }
                }
                _ => match after_eq.find(';') {
                    Some(end) => (after_eq[..end].trim(), &after_eq[end..]),
                    None => (after_eq.trim(), ""),
                },
            };

            if !name.is_empty() && is_identifier(&name) {
                values.insert(name, value.to_string());
            }
            rest = remaining;
        }

        Self { values }
    }

    /// Value of the variable `name`, if the response assigned it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("var ").unwrap_or(trimmed).trim();
    trimmed
        .strip_prefix("window.")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

fn is_identifier(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
