use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gtk4 as gtk;

use gtk::glib;
use gtk::prelude::*;

use crate::backend::{AvailablePackages, Basket, GroupDatabase, InstallDatabase, PackageDatabase};
use crate::categories::icon_name_for_group;
use crate::helpers::{clear_flowbox, clear_listbox};
use crate::state::actions::dispatch_action_key;
use crate::state::notify::Notifier;
use crate::state::rebuild::{RebuildJob, resolve_row_entry};
use crate::state::search::{PLACEHOLDER_SEARCHING, placeholder_markup};
use crate::state::tiles::{GroupTile, collect_group_tiles};
use crate::state::types::{PanelMode, PanelState};
use crate::types::{Group, PackagePair};
use crate::ui::PackageRow;

/// Collaborators the panel reads from and forwards actions to.
pub(crate) struct PanelSources {
    pub(crate) groups: Rc<dyn GroupDatabase>,
    pub(crate) packages: Rc<dyn PackageDatabase>,
    pub(crate) installed: Rc<dyn InstallDatabase>,
    pub(crate) available: Rc<dyn AvailablePackages>,
    pub(crate) basket: Rc<dyn Basket>,
}

pub(crate) struct GroupsPanel {
    container: gtk::Box,
    stack: gtk::Stack,
    grid: gtk::FlowBox,
    list: gtk::ListBox,
    placeholder: gtk::Label,
    sources: PanelSources,
    batch_size: usize,
    icon_size: i32,
    state: RefCell<PanelState>,
    rows: RefCell<HashMap<String, PackageRow>>,
    group_selected: Notifier<Group>,
    package_selected: Notifier<PackagePair>,
}

impl GroupsPanel {
    pub(crate) fn new(sources: PanelSources, batch_size: usize, icon_size: i32) -> Rc<Self> {
        let container = gtk::Box::builder()
            .orientation(gtk::Orientation::Vertical)
            .build();
        container.set_vexpand(true);
        container.set_hexpand(true);

        let grid = gtk::FlowBox::builder()
            .selection_mode(gtk::SelectionMode::None)
            .row_spacing(0)
            .valign(gtk::Align::Start)
            .margin_top(40)
            .margin_bottom(40)
            .margin_start(40)
            .margin_end(40)
            .build();
        let grid_scroller = gtk::ScrolledWindow::builder()
            .hscrollbar_policy(gtk::PolicyType::Never)
            .child(&grid)
            .build();

        let stack = gtk::Stack::builder()
            .transition_type(gtk::StackTransitionType::SlideUpDown)
            .vexpand(true)
            .build();
        stack.add_named(&grid_scroller, Some(PanelMode::Groups.page_name()));

        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::Single);
        // One click emits package-selected.
        list.set_activate_on_single_click(true);

        let placeholder = gtk::Label::builder()
            .use_markup(true)
            .label(PLACEHOLDER_SEARCHING)
            .margin_top(24)
            .margin_bottom(24)
            .build();
        placeholder.add_css_class("dim-label");
        list.set_placeholder(Some(&placeholder));

        let scroller = gtk::ScrolledWindow::builder()
            .has_frame(true)
            .child(&list)
            .build();
        scroller.set_policy(gtk::PolicyType::Never, gtk::PolicyType::Automatic);
        scroller.set_vexpand(true);
        stack.add_named(&scroller, Some(PanelMode::Packages.page_name()));
        stack.set_visible_child_name(PanelMode::Groups.page_name());

        container.append(&stack);

        let panel = Rc::new(Self {
            container,
            stack,
            grid,
            list,
            placeholder,
            sources,
            batch_size: batch_size.max(1),
            icon_size,
            state: RefCell::new(PanelState::default()),
            rows: RefCell::new(HashMap::new()),
            group_selected: Notifier::default(),
            package_selected: Notifier::default(),
        });
        panel.setup_list();
        panel.reset();
        panel
    }

    fn setup_list(self: &Rc<Self>) {
        let weak_self = Rc::downgrade(self);
        self.list.connect_row_activated(move |_, row| {
            if let Some(panel) = weak_self.upgrade() {
                panel.on_row_activated(Some(row));
            }
        });

        let weak_self = Rc::downgrade(self);
        self.list.set_filter_func(move |row| {
            weak_self
                .upgrade()
                .map(|panel| panel.filter_row(row))
                .unwrap_or(true)
        });

        let weak_self = Rc::downgrade(self);
        self.list.set_sort_func(move |a, b| {
            weak_self
                .upgrade()
                .map(|panel| panel.sort_rows(a, b))
                .unwrap_or(gtk::Ordering::Equal)
        });
    }

    pub(crate) fn widget(&self) -> &gtk::Box {
        &self.container
    }

    pub(crate) fn connect_group_selected<F: Fn(&Group) + 'static>(&self, handler: F) {
        self.group_selected.connect(handler);
    }

    pub(crate) fn connect_package_selected<F: Fn(&PackagePair) + 'static>(&self, handler: F) {
        self.package_selected.connect(handler);
    }

    pub(crate) fn build_group_tiles(self: &Rc<Self>) {
        clear_flowbox(&self.grid);
        for tile in collect_group_tiles(&*self.sources.groups) {
            let button = self.build_group_tile(&tile);
            self.grid.append(&button);
        }
    }

    fn build_group_tile(self: &Rc<Self>, tile: &GroupTile) -> gtk::Button {
        let button = gtk::Button::builder()
            .has_frame(false)
            .hexpand(false)
            .vexpand(false)
            .valign(gtk::Align::Start)
            .build();

        let layout = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .build();

        let image = gtk::Image::from_icon_name(icon_name_for_group(&tile.group));
        image.set_pixel_size(self.icon_size);
        image.set_halign(gtk::Align::Start);

        let label = gtk::Label::builder()
            .use_markup(true)
            .label(tile.markup().as_str())
            .justify(gtk::Justification::Left)
            .halign(gtk::Align::Start)
            .hexpand(true)
            .margin_start(10)
            .build();

        layout.append(&image);
        layout.append(&label);
        button.set_child(Some(&layout));

        let group = tile.group.clone();
        let weak_self = Rc::downgrade(self);
        button.connect_clicked(move |_| {
            if let Some(panel) = weak_self.upgrade() {
                panel.group_selected.emit(&group);
            }
        });

        button
    }

    /// Called by the owner's search entry on every text change.
    pub(crate) fn search(&self, text: &str) {
        let mode = self.state.borrow_mut().apply_search(text);
        self.stack.set_visible_child_name(mode.page_name());
        if mode == PanelMode::Groups {
            return;
        }

        self.list.invalidate_filter();
        let has_match = self.state.borrow().any_row_visible();
        self.placeholder.set_markup(placeholder_markup(has_match));
    }

    fn filter_row(&self, row: &gtk::ListBoxRow) -> bool {
        self.state.borrow().row_visible(row.widget_name().as_str())
    }

    fn sort_rows(&self, a: &gtk::ListBoxRow, b: &gtk::ListBoxRow) -> gtk::Ordering {
        self.state
            .borrow()
            .compare_rows(a.widget_name().as_str(), b.widget_name().as_str())
            .into()
    }

    fn on_row_activated(&self, row: Option<&gtk::ListBoxRow>) {
        let Some(row) = row else {
            return;
        };
        let pair = self.state.borrow().selection(row.widget_name().as_str());
        if let Some(pair) = pair {
            self.package_selected.emit(&pair);
        }
    }

    /// Schedules a full rebuild on the next idle slot. A rebuild already in
    /// flight is abandoned once the new one starts.
    pub(crate) fn reset(self: &Rc<Self>) {
        let weak_self = Rc::downgrade(self);
        glib::idle_add_local_once(move || {
            if let Some(panel) = weak_self.upgrade() {
                panel.rebuild_all_packages();
            }
        });
    }

    fn rebuild_all_packages(self: &Rc<Self>) {
        let generation = self.state.borrow_mut().begin_rebuild();
        self.rows.borrow_mut().clear();
        clear_listbox(&self.list);
        self.build_group_tiles();

        let names = self.sources.available.list_available();
        log::info!(
            "Rebuilding package list ({} packages, generation {})",
            names.len(),
            generation
        );
        let mut job = RebuildJob::new(generation, names);

        let weak_self = Rc::downgrade(self);
        glib::idle_add_local(move || {
            let Some(panel) = weak_self.upgrade() else {
                return glib::ControlFlow::Break;
            };
            job.tick(&panel.state, panel.batch_size, |name| panel.insert_row(name))
        });
    }

    /// Builds and appends the row for `name`. False when the package could
    /// not be resolved.
    fn insert_row(self: &Rc<Self>, name: &str) -> bool {
        let Some(entry) = resolve_row_entry(
            &*self.sources.packages,
            &*self.sources.installed,
            &*self.sources.basket,
            name,
        ) else {
            return false;
        };

        let row = PackageRow::new(entry.pair.clone());
        let weak_self = Rc::downgrade(self);
        let row_name = name.to_string();
        row.connect_operation_selected(move |key| {
            if let Some(panel) = weak_self.upgrade() {
                panel.on_row_action_selected(&row_name, key);
            }
        });
        row.mark_status(entry.status);

        // Record the pair before appending so sort and filter can see it.
        self.state
            .borrow_mut()
            .rows
            .insert(name.to_string(), entry.pair);
        self.list.append(row.widget());
        self.rows.borrow_mut().insert(name.to_string(), row);
        true
    }

    fn on_row_action_selected(&self, name: &str, key: &str) {
        let Some(pair) = self.state.borrow().selection(name) else {
            return;
        };
        let basket = &*self.sources.basket;
        if !dispatch_action_key(basket, key, &pair) {
            return;
        }
        if let Some(row) = self.rows.borrow().get(name) {
            row.mark_status(basket.operation_for_package(&pair.package));
        }
    }
}
