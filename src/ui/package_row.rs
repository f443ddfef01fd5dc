use std::rc::Rc;

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::{gio, glib};

use crate::backend::PendingOperation;
use crate::state::actions::RowAction;
use crate::state::notify::Notifier;
use crate::types::PackagePair;

const ROW_ACTION_GROUP: &str = "row";
const OPERATE_ACTION: &str = "operate";

/// List row for one package pair. Inline buttons activate `row.operate` with
/// the action key as target.
pub(crate) struct PackageRow {
    row: adw::ActionRow,
    pair: PackagePair,
    status_label: gtk::Label,
    buttons: Vec<(RowAction, gtk::Button)>,
    operation_selected: Rc<Notifier<String>>,
}

impl PackageRow {
    pub(crate) fn new(pair: PackagePair) -> Self {
        let title = glib::markup_escape_text(&pair.package.name);
        let version_line = match (&pair.installed, pair.has_update()) {
            (Some(old), true) => format!(
                "{} → {}",
                glib::markup_escape_text(&old.display_version()),
                glib::markup_escape_text(&pair.package.display_version())
            ),
            _ => glib::markup_escape_text(&pair.package.display_version()).to_string(),
        };
        let summary = if pair.package.summary.is_empty() {
            "No summary provided".to_string()
        } else {
            glib::markup_escape_text(&pair.package.summary).to_string()
        };

        let row = adw::ActionRow::builder()
            .title(title.as_str())
            .subtitle(format!("{}\n{}", summary, version_line).as_str())
            .build();
        row.set_widget_name(&pair.package.name);
        row.set_activatable(true);
        row.set_title_lines(1);
        row.set_subtitle_lines(2);

        let status_label = gtk::Label::builder()
            .halign(gtk::Align::End)
            .valign(gtk::Align::Center)
            .build();
        status_label.add_css_class("dim-label");
        status_label.add_css_class("caption");
        row.add_suffix(&status_label);

        let operation_selected = Rc::new(Notifier::<String>::default());
        let group = gio::SimpleActionGroup::new();
        let operate = gio::SimpleAction::new(OPERATE_ACTION, Some(glib::VariantTy::STRING));
        {
            let notifier = Rc::clone(&operation_selected);
            operate.connect_activate(move |_, parameter| {
                if let Some(key) = parameter.and_then(|value| value.get::<String>()) {
                    notifier.emit(&key);
                }
            });
        }
        group.add_action(&operate);
        row.insert_action_group(ROW_ACTION_GROUP, Some(&group));

        let mut buttons = Vec::new();
        for action in [
            RowAction::Install,
            RowAction::Update,
            RowAction::Uninstall,
            RowAction::Forget,
        ] {
            let button = gtk::Button::builder()
                .label(action.label())
                .valign(gtk::Align::Center)
                .visible(false)
                .build();
            match action {
                RowAction::Install | RowAction::Update => button.add_css_class("suggested-action"),
                RowAction::Uninstall => button.add_css_class("destructive-action"),
                RowAction::Forget => button.add_css_class("flat"),
            }
            button.set_action_name(Some(format!("{}.{}", ROW_ACTION_GROUP, OPERATE_ACTION).as_str()));
            button.set_action_target_value(Some(&action.key().to_variant()));
            row.add_suffix(&button);
            buttons.push((action, button));
        }

        Self {
            row,
            pair,
            status_label,
            buttons,
            operation_selected,
        }
    }

    pub(crate) fn widget(&self) -> &adw::ActionRow {
        &self.row
    }

    pub(crate) fn connect_operation_selected<F: Fn(&str) + 'static>(&self, handler: F) {
        self.operation_selected.connect(move |key: &String| handler(key.as_str()));
    }

    pub(crate) fn mark_status(&self, status: Option<PendingOperation>) {
        let text = match status {
            Some(operation) => operation.label().to_string(),
            None if self.pair.has_update() => "Update available".to_string(),
            None if self.pair.installed.is_some() => "Installed".to_string(),
            None => String::new(),
        };
        self.status_label.set_text(&text);
        self.status_label.set_visible(!text.is_empty());

        for (action, button) in &self.buttons {
            button.set_visible(action_available(*action, &self.pair, status));
        }
    }
}

fn action_available(action: RowAction, pair: &PackagePair, status: Option<PendingOperation>) -> bool {
    if status.is_some() {
        return action == RowAction::Forget;
    }
    match action {
        RowAction::Install => pair.installed.is_none(),
        RowAction::Uninstall => pair.installed.is_some(),
        RowAction::Update => pair.has_update(),
        RowAction::Forget => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Package;

    fn pair(installed: Option<&str>) -> PackagePair {
        PackagePair {
            package: Package::new("nano", "editor", "8.0"),
            installed: installed.map(|version| Package::new("nano", "editor", version)),
        }
    }

    #[test]
    fn pending_rows_only_offer_forget() {
        let pending = Some(PendingOperation::Install);
        assert!(action_available(RowAction::Forget, &pair(None), pending));
        assert!(!action_available(RowAction::Install, &pair(None), pending));
    }

    #[test]
    fn available_actions_follow_install_state() {
        assert!(action_available(RowAction::Install, &pair(None), None));
        assert!(!action_available(RowAction::Uninstall, &pair(None), None));

        let outdated = pair(Some("7.2"));
        assert!(!action_available(RowAction::Install, &outdated, None));
        assert!(action_available(RowAction::Uninstall, &outdated, None));
        assert!(action_available(RowAction::Update, &outdated, None));

        assert!(!action_available(RowAction::Update, &pair(Some("8.0")), None));
    }
}
