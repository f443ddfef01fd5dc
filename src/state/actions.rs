use crate::backend::Basket;
use crate::types::PackagePair;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RowAction {
    Install,
    Uninstall,
    Update,
    Forget,
}

impl RowAction {
    pub(crate) fn key(self) -> &'static str {
        match self {
            RowAction::Install => "INSTALL",
            RowAction::Uninstall => "UNINSTALL",
            RowAction::Update => "UPDATE",
            RowAction::Forget => "FORGET",
        }
    }

    pub(crate) fn from_key(value: &str) -> Option<Self> {
        match value {
            "INSTALL" => Some(RowAction::Install),
            "UNINSTALL" => Some(RowAction::Uninstall),
            "UPDATE" => Some(RowAction::Update),
            "FORGET" => Some(RowAction::Forget),
            _ => None,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            RowAction::Install => "Install",
            RowAction::Uninstall => "Remove",
            RowAction::Update => "Update",
            RowAction::Forget => "Forget",
        }
    }
}

/// Forwards a row action to the basket. Returns false when nothing was sent,
/// which happens for removals and updates of packages that are not installed.
pub(crate) fn dispatch_row_action(basket: &dyn Basket, action: RowAction, pair: &PackagePair) -> bool {
    match action {
        RowAction::Install => basket.install_package(&pair.package),
        RowAction::Uninstall => match &pair.installed {
            Some(old) => basket.remove_package(old),
            None => {
                log::warn!("Ignoring removal of {}: not installed", pair.name());
                return false;
            }
        },
        RowAction::Update => match &pair.installed {
            Some(old) => basket.update_package(old, &pair.package),
            None => {
                log::warn!("Ignoring update of {}: not installed", pair.name());
                return false;
            }
        },
        RowAction::Forget => basket.forget_package(&pair.package),
    }
    true
}

/// Same as [`dispatch_row_action`] for a raw action key; unknown keys are ignored.
pub(crate) fn dispatch_action_key(basket: &dyn Basket, key: &str, pair: &PackagePair) -> bool {
    match RowAction::from_key(key) {
        Some(action) => dispatch_row_action(basket, action, pair),
        None => {
            log::debug!("Ignoring unknown row action {:?}", key);
            false
        }
    }
}
