use std::cmp::Ordering;
use std::collections::HashMap;

use crate::state::search::{compare_by_name, matches_search, mode_for_query, normalize_query};
use crate::types::PackagePair;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub(crate) enum PanelMode {
    #[default]
    Groups,
    Packages,
}

impl PanelMode {
    pub(crate) fn page_name(self) -> &'static str {
        match self {
            PanelMode::Groups => "groups",
            PanelMode::Packages => "packages",
        }
    }
}

#[derive(Default)]
pub(crate) struct PanelState {
    pub(crate) mode: PanelMode,
    pub(crate) query: String,
    pub(crate) rows: HashMap<String, PackagePair>,
    pub(crate) generation: u64,
}

impl PanelState {
    /// Records the new search text and returns the mode to display.
    pub(crate) fn apply_search(&mut self, text: &str) -> PanelMode {
        self.mode = mode_for_query(text);
        if let Some(query) = normalize_query(text) {
            self.query = query.to_string();
        }
        self.mode
    }

    pub(crate) fn row_visible(&self, name: &str) -> bool {
        self.rows
            .get(name)
            .map(|pair| matches_search(&pair.package, &self.query))
            .unwrap_or(false)
    }

    pub(crate) fn any_row_visible(&self) -> bool {
        self.rows
            .values()
            .any(|pair| matches_search(&pair.package, &self.query))
    }

    /// Pair to announce when the row named `name` is activated. Rows the
    /// panel never recorded select nothing.
    pub(crate) fn selection(&self, name: &str) -> Option<PackagePair> {
        self.rows.get(name).cloned()
    }

    /// Row order for the list. Rows without a recorded pair fall back to
    /// their widget names.
    pub(crate) fn compare_rows(&self, a: &str, b: &str) -> Ordering {
        match (self.rows.get(a), self.rows.get(b)) {
            (Some(pair_a), Some(pair_b)) => compare_by_name(&pair_a.package, &pair_b.package),
            _ => a.cmp(b),
        }
    }

    /// Starts a new rebuild generation, dropping every row record.
    pub(crate) fn begin_rebuild(&mut self) -> u64 {
        self.generation += 1;
        self.rows.clear();
        self.generation
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}
