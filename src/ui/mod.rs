pub(crate) mod app;
pub(crate) mod groups;
pub(crate) mod package_row;

pub(crate) use app::build_ui;
pub(crate) use groups::{GroupsPanel, PanelSources};
pub(crate) use package_row::PackageRow;
