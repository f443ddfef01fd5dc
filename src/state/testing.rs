use std::cell::RefCell;
use std::collections::HashMap;

use crate::backend::{
    AvailablePackages, Basket, GroupDatabase, InstallDatabase, PackageDatabase, PendingOperation,
};
use crate::types::{Group, Package};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum BasketCall {
    /// Package name and version.
    Install(String, String),
    Remove(String, String),
    /// Old version and new version.
    Update(String, String),
    Forget(String, String),
}

#[derive(Default)]
pub(crate) struct RecordingBasket {
    calls: RefCell<Vec<BasketCall>>,
    pending: HashMap<String, PendingOperation>,
}

impl RecordingBasket {
    pub(crate) fn with_pending(name: &str, operation: PendingOperation) -> Self {
        let mut basket = Self::default();
        basket.pending.insert(name.to_string(), operation);
        basket
    }

    pub(crate) fn calls(&self) -> Vec<BasketCall> {
        self.calls.borrow().clone()
    }
}

impl Basket for RecordingBasket {
    fn operation_for_package(&self, package: &Package) -> Option<PendingOperation> {
        self.pending.get(&package.name).copied()
    }

    fn install_package(&self, package: &Package) {
        self.calls.borrow_mut().push(BasketCall::Install(
            package.name.clone(),
            package.version.clone(),
        ));
    }

    fn remove_package(&self, package: &Package) {
        self.calls.borrow_mut().push(BasketCall::Remove(
            package.name.clone(),
            package.version.clone(),
        ));
    }

    fn update_package(&self, old: &Package, new: &Package) {
        self.calls
            .borrow_mut()
            .push(BasketCall::Update(old.version.clone(), new.version.clone()));
    }

    fn forget_package(&self, package: &Package) {
        self.calls.borrow_mut().push(BasketCall::Forget(
            package.name.clone(),
            package.version.clone(),
        ));
    }
}

/// Group database returning groups in insertion order.
#[derive(Default)]
pub(crate) struct FakeGroups {
    groups: Vec<Group>,
}

impl FakeGroups {
    pub(crate) fn with(mut self, name: &str, local_name: &str, components: usize) -> Self {
        self.groups.push(Group {
            name: name.to_string(),
            local_name: local_name.to_string(),
            icon: None,
            components: (0..components).map(|idx| format!("{}.{}", name, idx)).collect(),
        });
        self
    }
}

impl GroupDatabase for FakeGroups {
    fn list_groups(&self) -> Vec<String> {
        self.groups.iter().map(|group| group.name.clone()).collect()
    }

    fn group(&self, name: &str) -> Option<Group> {
        self.groups.iter().find(|group| group.name == name).cloned()
    }

    fn group_components(&self, name: &str) -> Vec<String> {
        self.group(name)
            .map(|group| group.components)
            .unwrap_or_default()
    }
}

#[derive(Default)]
pub(crate) struct FakePackages {
    available: HashMap<String, Package>,
    installed: HashMap<String, Package>,
    order: Vec<String>,
}

impl FakePackages {
    pub(crate) fn available(mut self, name: &str, version: &str) -> Self {
        self.order.push(name.to_string());
        self.available
            .insert(name.to_string(), Package::new(name, "", version));
        self
    }

    pub(crate) fn installed(mut self, name: &str, version: &str) -> Self {
        self.installed
            .insert(name.to_string(), Package::new(name, "", version));
        self
    }

    /// Lists a name without backing it with a package record.
    pub(crate) fn dangling(mut self, name: &str) -> Self {
        self.order.push(name.to_string());
        self
    }
}

impl PackageDatabase for FakePackages {
    fn package(&self, name: &str) -> Option<Package> {
        self.available.get(name).cloned()
    }
}

impl InstallDatabase for FakePackages {
    fn has_package(&self, name: &str) -> bool {
        self.installed.contains_key(name)
    }

    fn package(&self, name: &str) -> Option<Package> {
        self.installed.get(name).cloned()
    }
}

impl AvailablePackages for FakePackages {
    fn list_available(&self) -> Vec<String> {
        self.order.clone()
    }
}
