use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::backend::{Basket, PendingOperation};
use crate::state::notify::Notifier;
use crate::types::Package;

#[derive(Clone, Debug)]
pub(crate) struct BasketEntry {
    pub(crate) package_name: String,
    pub(crate) operation: PendingOperation,
    pub(crate) queued_at: DateTime<Utc>,
    sequence: u64,
}

#[derive(Default)]
pub(crate) struct MemoryBasket {
    entries: RefCell<HashMap<String, BasketEntry>>,
    next_sequence: Cell<u64>,
    changed: Notifier<usize>,
}

impl MemoryBasket {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn connect_changed<F: Fn(usize) + 'static>(&self, handler: F) {
        self.changed.connect(move |count| handler(*count));
    }

    /// Pending entries, oldest first.
    pub(crate) fn pending(&self) -> Vec<BasketEntry> {
        let mut entries: Vec<BasketEntry> = self.entries.borrow().values().cloned().collect();
        entries.sort_by_key(|entry| entry.sequence);
        entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn queue(&self, package: &Package, operation: PendingOperation) {
        log::debug!("basket: {:?} {}", operation, package.name);
        let sequence = self.next_sequence.get();
        self.next_sequence.set(sequence + 1);
        self.entries.borrow_mut().insert(
            package.name.clone(),
            BasketEntry {
                package_name: package.name.clone(),
                operation,
                queued_at: Utc::now(),
                sequence,
            },
        );
        self.notify_changed();
    }

    fn notify_changed(&self) {
        self.changed.emit(&self.len());
    }
}

impl Basket for MemoryBasket {
    fn operation_for_package(&self, package: &Package) -> Option<PendingOperation> {
        self.entries
            .borrow()
            .get(&package.name)
            .map(|entry| entry.operation)
    }

    fn install_package(&self, package: &Package) {
        self.queue(package, PendingOperation::Install);
    }

    fn remove_package(&self, package: &Package) {
        self.queue(package, PendingOperation::Uninstall);
    }

    fn update_package(&self, _old: &Package, new: &Package) {
        self.queue(new, PendingOperation::Update);
    }

    fn forget_package(&self, package: &Package) {
        let removed = self.entries.borrow_mut().remove(&package.name).is_some();
        if removed {
            log::debug!("basket: forgot {}", package.name);
            self.notify_changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    fn pkg(name: &str) -> Package {
        Package::new(name, "", "1.0")
    }

    #[test]
    fn queued_operation_is_reported_per_package() {
        let basket = MemoryBasket::new();
        basket.install_package(&pkg("firefox"));
        basket.remove_package(&pkg("nano"));

        assert_eq!(
            basket.operation_for_package(&pkg("firefox")),
            Some(PendingOperation::Install)
        );
        assert_eq!(
            basket.operation_for_package(&pkg("nano")),
            Some(PendingOperation::Uninstall)
        );
        assert_eq!(basket.operation_for_package(&pkg("vim")), None);
    }

    #[test]
    fn later_operation_replaces_earlier_one() {
        let basket = MemoryBasket::new();
        basket.install_package(&pkg("gimp"));
        basket.update_package(&pkg("gimp"), &pkg("gimp"));
        assert_eq!(basket.len(), 1);
        assert_eq!(
            basket.operation_for_package(&pkg("gimp")),
            Some(PendingOperation::Update)
        );
    }

    #[test]
    fn forget_notifies_only_when_entry_existed() {
        let basket = MemoryBasket::new();
        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        basket.connect_changed(move |_| counter.set(counter.get() + 1));

        basket.install_package(&pkg("mpv"));
        basket.forget_package(&pkg("mpv"));
        basket.forget_package(&pkg("mpv"));

        assert_eq!(basket.len(), 0);
        assert_eq!(notified.get(), 2);
    }

    #[test]
    fn pending_lists_oldest_first() {
        let basket = MemoryBasket::new();
        basket.install_package(&pkg("b"));
        basket.install_package(&pkg("a"));
        let names: Vec<String> = basket
            .pending()
            .into_iter()
            .map(|entry| entry.package_name)
            .collect();
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
    }
}
