use phf::phf_map;

use crate::types::Group;

const FALLBACK_ICON: &str = "package-x-generic";

static GROUP_ICONS: phf::Map<&'static str, &'static str> = phf_map! {
    "desktop" => "user-desktop",
    "games" => "applications-games",
    "kernel" => "application-x-firmware",
    "multimedia" => "applications-multimedia",
    "network" => "applications-internet",
    "office" => "applications-office",
    "programming" => "applications-development",
    "science" => "applications-science",
    "security" => "security-high",
    "system" => "applications-system",
    "util" => "applications-utilities",
};

pub(crate) fn icon_name_for_group(group: &Group) -> &str {
    match group.icon.as_deref() {
        Some(icon) if !icon.trim().is_empty() => icon,
        _ => icon_name_for_group_name(&group.name),
    }
}

pub(crate) fn icon_name_for_group_name(name: &str) -> &'static str {
    let lowercase = name.to_ascii_lowercase();
    GROUP_ICONS
        .get(lowercase.as_str())
        .copied()
        .unwrap_or(FALLBACK_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, icon: Option<&str>) -> Group {
        Group {
            name: name.to_string(),
            local_name: String::new(),
            icon: icon.map(str::to_string),
            components: vec![],
        }
    }

    #[test]
    fn explicit_icon_wins() {
        assert_eq!(
            icon_name_for_group(&group("system", Some("utilities-terminal"))),
            "utilities-terminal"
        );
    }

    #[test]
    fn known_group_uses_mapped_icon() {
        assert_eq!(icon_name_for_group(&group("System", None)), "applications-system");
        assert_eq!(icon_name_for_group(&group("network", Some("  "))), "applications-internet");
    }

    #[test]
    fn unknown_group_uses_generic_icon() {
        assert_eq!(icon_name_for_group(&group("obscure", None)), FALLBACK_ICON);
    }
}
