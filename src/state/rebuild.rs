use std::cell::RefCell;
use std::collections::VecDeque;

use gtk4::glib::ControlFlow;

use crate::backend::{Basket, InstallDatabase, PackageDatabase, PendingOperation};
use crate::state::types::PanelState;
use crate::types::PackagePair;

/// One pass over the available package names, consumed a batch per idle tick.
pub(crate) struct RebuildJob {
    generation: u64,
    pending: VecDeque<String>,
    inserted: usize,
}

impl RebuildJob {
    pub(crate) fn new(generation: u64, names: Vec<String>) -> Self {
        Self {
            generation,
            pending: names.into(),
            inserted: 0,
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn next_batch(&mut self, size: usize) -> Vec<String> {
        let take = size.max(1).min(self.pending.len());
        self.pending.drain(..take).collect()
    }

    /// Runs one idle slot of the rebuild. A job whose generation is no longer
    /// current stops without inserting; otherwise up to `batch_size` names go
    /// through `insert`, which reports whether a row was added.
    pub(crate) fn tick<F>(
        &mut self,
        state: &RefCell<PanelState>,
        batch_size: usize,
        mut insert: F,
    ) -> ControlFlow
    where
        F: FnMut(&str) -> bool,
    {
        if !state.borrow().is_current(self.generation) {
            log::debug!("Abandoning stale rebuild {}", self.generation);
            return ControlFlow::Break;
        }
        for name in self.next_batch(batch_size) {
            if insert(&name) {
                self.inserted += 1;
            }
        }
        if self.is_finished() {
            log::info!("Package list rebuilt with {} rows", self.inserted);
            ControlFlow::Break
        } else {
            ControlFlow::Continue
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RowEntry {
    pub(crate) pair: PackagePair,
    pub(crate) status: Option<PendingOperation>,
}

/// Looks up everything a list row needs for `name`. `None` when the package
/// database does not know the name.
pub(crate) fn resolve_row_entry(
    packages: &dyn PackageDatabase,
    installed: &dyn InstallDatabase,
    basket: &dyn Basket,
    name: &str,
) -> Option<RowEntry> {
    let Some(package) = packages.package(name) else {
        log::warn!("Skipping {}: missing from package database", name);
        return None;
    };
    let old_package = if installed.has_package(name) {
        installed.package(name)
    } else {
        None
    };
    let status = basket.operation_for_package(&package);
    Some(RowEntry {
        pair: PackagePair {
            package,
            installed: old_package,
        },
        status,
    })
}
