//! Catalog of known SwiftUI view modifiers.
//!
//! The built-in names live in `swiftui_modifiers.txt`, embedded at compile
//! time and loaded into a process-wide set on first use. Names configured by
//! the user are kept in a per-scan set so the global never changes.

use std::collections::HashSet;

use once_cell::sync::Lazy;

const MODIFIER_LIST: &str = include_str!("swiftui_modifiers.txt");

static SWIFTUI_MODIFIERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    MODIFIER_LIST
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
});

/// Built-in modifier names, in no particular order.
#[cfg(test)]
pub(crate) fn builtin_names() -> impl Iterator<Item = &'static str> {
    SWIFTUI_MODIFIERS.iter().copied()
}

/// Built-in modifiers plus the names a scan was configured with.
///
/// Membership is case-sensitive and exact.
#[derive(Debug, Clone)]
pub struct ModifierCatalog<'a> {
    builtin: &'static HashSet<&'static str>,
    additional: HashSet<&'a str>,
}

impl<'a> ModifierCatalog<'a> {
    /// Build a catalog extended with `additional` names.
    ///
    /// Empty names are dropped; they could never match an identifier.
    pub fn new<S: AsRef<str>>(additional: &'a [S]) -> Self {
        Self {
            builtin: &*SWIFTUI_MODIFIERS,
            additional: additional
                .iter()
                .map(|s| s.as_ref())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builtin.contains(name) || self.additional.contains(name)
    }
}
