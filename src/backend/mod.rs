mod basket;
mod catalog;

pub(crate) use basket::MemoryBasket;
pub(crate) use catalog::Catalog;

use crate::types::{Group, Package};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PendingOperation {
    Install,
    Uninstall,
    Update,
}

impl PendingOperation {
    pub(crate) fn label(self) -> &'static str {
        match self {
            PendingOperation::Install => "Queued for install",
            PendingOperation::Uninstall => "Queued for removal",
            PendingOperation::Update => "Queued for update",
        }
    }
}

pub trait GroupDatabase {
    fn list_groups(&self) -> Vec<String>;
    fn group(&self, name: &str) -> Option<Group>;
    fn group_components(&self, name: &str) -> Vec<String>;
}

pub trait PackageDatabase {
    fn package(&self, name: &str) -> Option<Package>;
}

pub trait InstallDatabase {
    fn has_package(&self, name: &str) -> bool;
    fn package(&self, name: &str) -> Option<Package>;
}

pub trait AvailablePackages {
    fn list_available(&self) -> Vec<String>;
}

/// Pending transaction manager. Methods take `&self`; implementations live on
/// the UI thread and use interior mutability.
///
/// Removals and updates always name the installed package, so callers never
/// issue them for a package that is not installed; the panel drops such
/// requests before they reach the basket.
pub trait Basket {
    fn operation_for_package(&self, package: &Package) -> Option<PendingOperation>;
    fn install_package(&self, package: &Package);
    /// `package` is the installed copy.
    fn remove_package(&self, package: &Package);
    /// `old` is the installed copy, `new` the available one.
    fn update_package(&self, old: &Package, new: &Package);
    fn forget_package(&self, package: &Package);
}
