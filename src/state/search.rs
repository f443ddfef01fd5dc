use std::cmp::Ordering;

use crate::state::types::PanelMode;
use crate::types::Package;

pub(crate) const PLACEHOLDER_SEARCHING: &str = "<big>Searching</big>";
pub(crate) const PLACEHOLDER_NO_RESULTS: &str = "<big>Sorry, no results</big>";

/// Trimmed query, or `None` when nothing meaningful was typed.
pub(crate) fn normalize_query(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

pub(crate) fn mode_for_query(text: &str) -> PanelMode {
    match normalize_query(text) {
        Some(_) => PanelMode::Packages,
        None => PanelMode::Groups,
    }
}

/// Name is compared as-is, summary in lowercase. The query itself is never
/// lowercased, so an uppercase query can only ever match a name.
pub(crate) fn matches_search(package: &Package, text: &str) -> bool {
    package.name.contains(text) || package.summary_lower.contains(text)
}

pub(crate) fn compare_by_name(a: &Package, b: &Package) -> Ordering {
    a.name.cmp(&b.name)
}

pub(crate) fn placeholder_markup(has_match: bool) -> &'static str {
    if has_match {
        PLACEHOLDER_SEARCHING
    } else {
        PLACEHOLDER_NO_RESULTS
    }
}
