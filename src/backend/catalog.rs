use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::backend::{AvailablePackages, GroupDatabase, InstallDatabase, PackageDatabase};
use crate::types::{Group, Package};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate group \"{0}\" in catalog")]
    DuplicateGroup(String),
}

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    packages: Vec<Package>,
    #[serde(default)]
    installed: Vec<Package>,
}

/// File-backed package catalog serving groups, repository packages and the
/// installed set.
#[derive(Debug, Default)]
pub(crate) struct Catalog {
    group_order: Vec<String>,
    groups: HashMap<String, Group>,
    packages: BTreeMap<String, Package>,
    installed: HashMap<String, Package>,
}

impl Catalog {
    pub(crate) fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub(crate) fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub(crate) fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(raw)?;

        let mut catalog = Catalog::default();
        for group in document.groups {
            if catalog.groups.contains_key(&group.name) {
                return Err(CatalogError::DuplicateGroup(group.name));
            }
            catalog.group_order.push(group.name.clone());
            catalog.groups.insert(group.name.clone(), group);
        }
        for package in document.packages {
            catalog.packages.insert(package.name.clone(), package);
        }
        for package in document.installed {
            catalog.installed.insert(package.name.clone(), package);
        }
        Ok(catalog)
    }

    pub(crate) fn package_count(&self) -> usize {
        self.packages.len()
    }
}

impl GroupDatabase for Catalog {
    fn list_groups(&self) -> Vec<String> {
        self.group_order.clone()
    }

    fn group(&self, name: &str) -> Option<Group> {
        self.groups.get(name).cloned()
    }

    fn group_components(&self, name: &str) -> Vec<String> {
        self.groups
            .get(name)
            .map(|group| group.components.clone())
            .unwrap_or_default()
    }
}

impl PackageDatabase for Catalog {
    fn package(&self, name: &str) -> Option<Package> {
        self.packages.get(name).cloned()
    }
}

impl InstallDatabase for Catalog {
    fn has_package(&self, name: &str) -> bool {
        self.installed.contains_key(name)
    }

    fn package(&self, name: &str) -> Option<Package> {
        self.installed.get(name).cloned()
    }
}

impl AvailablePackages for Catalog {
    fn list_available(&self) -> Vec<String> {
        self.packages.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "groups": [
            {"name": "system", "local_name": "System Tools", "icon": "applications-system",
             "components": ["system.base", "system.devel"]},
            {"name": "empty", "local_name": "Empty Group"}
        ],
        "packages": [
            {"name": "zsh", "summary": "Z shell", "version": "5.9"},
            {"name": "bash", "summary": "Bourne again shell", "version": "5.2"}
        ],
        "installed": [
            {"name": "bash", "summary": "Bourne again shell", "version": "5.1"}
        ]
    }"#;

    #[test]
    fn groups_keep_document_order() {
        let catalog = Catalog::from_json(SAMPLE).expect("parse sample");
        assert_eq!(catalog.list_groups(), vec!["system", "empty"]);
        assert_eq!(catalog.group_components("system").len(), 2);
        assert!(catalog.group_components("empty").is_empty());
        assert!(catalog.group_components("missing").is_empty());
    }

    #[test]
    fn available_packages_are_sorted_by_name() {
        let catalog = Catalog::from_json(SAMPLE).expect("parse sample");
        assert_eq!(catalog.list_available(), vec!["bash", "zsh"]);
    }

    #[test]
    fn installed_lookup_is_separate_from_repository() {
        let catalog = Catalog::from_json(SAMPLE).expect("parse sample");
        assert!(InstallDatabase::has_package(&catalog, "bash"));
        assert!(!InstallDatabase::has_package(&catalog, "zsh"));
        let installed = InstallDatabase::package(&catalog, "bash").expect("installed bash");
        let available = PackageDatabase::package(&catalog, "bash").expect("available bash");
        assert_eq!(installed.version, "5.1");
        assert_eq!(available.version, "5.2");
    }

    #[test]
    fn duplicate_groups_are_rejected() {
        let raw = r#"{"groups": [{"name": "a"}, {"name": "a"}]}"#;
        match Catalog::from_json(raw) {
            Err(CatalogError::DuplicateGroup(name)) => assert_eq!(name, "a"),
            other => panic!("expected duplicate group error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let path = std::env::temp_dir().join("nebula-groups-missing-catalog.json");
        let _ = fs::remove_file(&path);
        let err = Catalog::load(&path).expect_err("missing catalog");
        assert!(err.to_string().contains("nebula-groups-missing-catalog.json"));
    }

    #[test]
    fn catalog_loads_from_disk() {
        let path = std::env::temp_dir().join("nebula-groups-catalog-test.json");
        fs::write(&path, SAMPLE).expect("write fixture");
        let catalog = Catalog::load(&path).expect("load fixture");
        let _ = fs::remove_file(&path);
        assert_eq!(catalog.package_count(), 2);
    }

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert!(catalog.package_count() > 0);
        assert!(!catalog.list_groups().is_empty());
    }
}
