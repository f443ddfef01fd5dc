use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::Utc;
use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::glib;

use crate::backend::{Catalog, MemoryBasket};
use crate::helpers::format_relative_time;
use crate::settings::{AppSettings, load_app_settings, save_app_settings};
use crate::types::{Group, PackagePair};
use crate::ui::{GroupsPanel, PanelSources};

pub(crate) fn build_ui(app: &adw::Application) {
    let settings = Rc::new(RefCell::new(load_app_settings()));
    let (initial_width, initial_height) = {
        let settings = settings.borrow();
        (
            settings.window_width.unwrap_or(960),
            settings.window_height.unwrap_or(640),
        )
    };

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Software Groups")
        .default_width(initial_width)
        .default_height(initial_height)
        .build();

    let toast_overlay = adw::ToastOverlay::new();
    window.set_content(Some(&toast_overlay));

    let root_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
    toast_overlay.set_child(Some(&root_box));

    let header_bar = adw::HeaderBar::new();
    header_bar.set_hexpand(true);

    let search_entry = gtk::SearchEntry::builder()
        .placeholder_text("Search packages")
        .hexpand(true)
        .width_chars(32)
        .build();
    header_bar.set_title_widget(Some(&search_entry));

    let refresh_button = gtk::Button::builder()
        .icon_name("view-refresh-symbolic")
        .tooltip_text("Reload packages")
        .build();
    header_bar.pack_start(&refresh_button);

    let basket_label = gtk::Label::new(None);
    basket_label.add_css_class("dim-label");
    header_bar.pack_end(&basket_label);
    root_box.append(&header_bar);

    let (catalog, load_error) = match load_catalog(&settings.borrow()) {
        Ok(catalog) => (catalog, None),
        Err(err) => {
            log::error!("{:#}", err);
            (Catalog::default(), Some(format!("{:#}", err)))
        }
    };
    let catalog = Rc::new(catalog);
    let basket = Rc::new(MemoryBasket::new());

    update_basket_label(&basket_label, &basket);
    {
        let weak_basket = Rc::downgrade(&basket);
        let label = basket_label.clone();
        basket.connect_changed(move |_| {
            if let Some(basket) = weak_basket.upgrade() {
                update_basket_label(&label, &basket);
            }
        });
    }

    let (batch_size, icon_size) = {
        let settings = settings.borrow();
        (settings.batch_size(), settings.tile_icon_size)
    };
    let panel = GroupsPanel::new(
        PanelSources {
            groups: catalog.clone(),
            packages: catalog.clone(),
            installed: catalog.clone(),
            available: catalog,
            basket: basket.clone(),
        },
        batch_size,
        icon_size,
    );
    root_box.append(panel.widget());

    {
        let weak_panel = Rc::downgrade(&panel);
        search_entry.connect_search_changed(move |entry| {
            if let Some(panel) = weak_panel.upgrade() {
                panel.search(entry.text().as_str());
            }
        });
    }

    {
        let weak_panel = Rc::downgrade(&panel);
        refresh_button.connect_clicked(move |_| {
            if let Some(panel) = weak_panel.upgrade() {
                panel.reset();
            }
        });
    }

    panel.connect_group_selected(glib::clone!(
        #[weak]
        toast_overlay,
        move |group: &Group| {
            toast_overlay.add_toast(adw::Toast::new(&group_toast_title(group)));
        },
    ));

    panel.connect_package_selected(glib::clone!(
        #[weak]
        toast_overlay,
        move |pair: &PackagePair| {
            toast_overlay.add_toast(adw::Toast::new(&package_toast_title(pair)));
        },
    ));

    if let Some(message) = load_error {
        let toast = adw::Toast::builder()
            .title(glib::markup_escape_text(&message).as_str())
            .timeout(0)
            .build();
        toast_overlay.add_toast(toast);
    }

    let settings_for_close = Rc::clone(&settings);
    // The panel and basket live as long as the window.
    let keep_alive = RefCell::new(Some((panel, basket)));
    window.connect_close_request(move |win| {
        keep_alive.borrow_mut().take();
        let width = win.width();
        let height = win.height();
        if width > 0 && height > 0 {
            {
                let mut data = settings_for_close.borrow_mut();
                data.window_width = Some(width);
                data.window_height = Some(height);
            }
            if let Err(err) = save_app_settings(&settings_for_close.borrow()) {
                log::warn!("Failed to save settings: {}", err);
            }
        }
        glib::Propagation::Proceed
    });

    window.present();
}

fn load_catalog(settings: &AppSettings) -> Result<Catalog> {
    let catalog = match settings.resolved_catalog_path() {
        Some(path) => Catalog::load(&path)
            .with_context(|| format!("Unable to load package catalog {}", path.display()))?,
        None => Catalog::builtin().context("Built-in package catalog is invalid")?,
    };
    log::info!("Loaded catalog with {} packages", catalog.package_count());
    Ok(catalog)
}

fn update_basket_label(label: &gtk::Label, basket: &MemoryBasket) {
    let pending = basket.pending();
    if pending.is_empty() {
        label.set_text("Basket empty");
        label.set_tooltip_text(None);
        return;
    }

    label.set_text(&format!("{} pending", pending.len()));
    let now = Utc::now();
    let lines: Vec<String> = pending
        .iter()
        .map(|entry| {
            format!(
                "{}: {} ({})",
                entry.package_name,
                entry.operation.label(),
                format_relative_time(entry.queued_at, now)
            )
        })
        .collect();
    label.set_tooltip_text(Some(lines.join("\n").as_str()));
}

fn group_toast_title(group: &Group) -> String {
    format!(
        "{}: {}",
        glib::markup_escape_text(group.display_name()),
        glib::markup_escape_text(&group.components.join(", "))
    )
}

fn package_toast_title(pair: &PackagePair) -> String {
    let name = glib::markup_escape_text(pair.name());
    let version = glib::markup_escape_text(&pair.package.display_version());
    match &pair.installed {
        Some(old) if pair.has_update() => format!(
            "{} {} (installed {})",
            name,
            version,
            glib::markup_escape_text(&old.display_version())
        ),
        Some(_) => format!("{} {} (installed)", name, version),
        None => format!("{} {}", name, version),
    }
}
