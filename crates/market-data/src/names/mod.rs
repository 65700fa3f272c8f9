//! Symbol to display-name lookup.
//!
//! One directory is shared by every provider adapter and by the fallback
//! generator. It is handed around as `Arc<dyn NameDirectory>` so tests and
//! callers can swap in their own table.

mod builtin;

use std::collections::HashMap;

use crate::models::Market;

/// Resolves a ticker to a human-readable name.
pub trait NameDirectory: Send + Sync {
    /// Known name for `symbol`, if any.
    fn lookup(&self, symbol: &str) -> Option<&str>;

    /// Known name, or the market's placeholder.
    fn display_name(&self, symbol: &str) -> String {
        self.lookup(symbol)
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_name(symbol))
    }
}

/// Placeholder used when a symbol is not in any directory.
///
/// A-share codes become `股票<code>`; anything else keeps the ticker.
pub fn placeholder_name(symbol: &str) -> String {
    match Market::of_symbol(symbol) {
        Market::AShare => format!("股票{}", symbol.trim()),
        Market::UsShare => symbol.trim().to_string(),
    }
}

/// Normalize a ticker for lookup: `BRK.B`, `brk-b` and `BRK_B` all become `BRK B`.
fn lookup_key(symbol: &str) -> String {
    symbol
        .trim()
        .chars()
        .map(|c| match c {
            '.' | '-' | '_' => ' ',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// In-memory name table.
#[derive(Clone, Debug, Default)]
pub struct StaticNameDirectory {
    names: HashMap<String, String>,
}

impl StaticNameDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names for the built-in A-share and US watch sets.
    pub fn builtin() -> Self {
        builtin::A_SHARE_NAMES
            .iter()
            .chain(builtin::US_NAMES.iter())
            .fold(Self::new(), |dir, (symbol, name)| dir.with(*symbol, *name))
    }

    pub fn with(mut self, symbol: impl AsRef<str>, name: impl Into<String>) -> Self {
        self.insert(symbol, name);
        self
    }

    pub fn insert(&mut self, symbol: impl AsRef<str>, name: impl Into<String>) {
        self.names.insert(lookup_key(symbol.as_ref()), name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NameDirectory for StaticNameDirectory {
    fn lookup(&self, symbol: &str) -> Option<&str> {
        self.names.get(&lookup_key(symbol)).map(String::as_str)
    }
}
