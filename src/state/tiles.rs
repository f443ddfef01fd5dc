use gtk4::glib;

use crate::backend::GroupDatabase;
use crate::types::Group;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GroupTile {
    pub(crate) group: Group,
    pub(crate) component_count: usize,
}

impl GroupTile {
    pub(crate) fn markup(&self) -> String {
        format!(
            "<big>{}</big>\n{} categories",
            glib::markup_escape_text(self.group.display_name()),
            self.component_count
        )
    }
}

/// Tiles for every group that has at least one component, in database order.
pub(crate) fn collect_group_tiles(groups: &dyn GroupDatabase) -> Vec<GroupTile> {
    let mut tiles = Vec::new();
    for name in groups.list_groups() {
        let Some(group) = groups.group(&name) else {
            log::warn!("Group database listed unknown group {:?}", name);
            continue;
        };
        let component_count = groups.group_components(&name).len();
        if component_count == 0 {
            continue;
        }
        tiles.push(GroupTile {
            group,
            component_count,
        });
    }
    tiles
}
