mod backend;
mod categories;
mod helpers;
mod settings;
mod state;
mod types;
mod ui;

use adw::prelude::*;
use gtk4::gio;
use gtk4::glib;
use libadwaita as adw;

use crate::ui::build_ui;

const APP_ID: &str = "tech.geektoshi.NebulaGroups";

fn main() -> glib::ExitCode {
    pretty_env_logger::init();
    adw::init().expect("Failed to initialize libadwaita");

    let app = adw::Application::builder()
        .application_id(APP_ID)
        .flags(gio::ApplicationFlags::FLAGS_NONE)
        .build();

    app.connect_activate(build_ui);

    app.run()
}
