use std::sync::Arc;

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "PackageRecord")]
pub struct Package {
    pub name: String,
    pub summary: String,
    pub version: String,
    pub release: Option<u32>,
    pub summary_lower: Arc<str>,
}

#[derive(Deserialize)]
struct PackageRecord {
    name: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    release: Option<u32>,
}

impl From<PackageRecord> for Package {
    fn from(record: PackageRecord) -> Self {
        let mut package = Package::new(record.name, record.summary, record.version);
        package.release = record.release;
        package
    }
}

pub(crate) fn lowercase_cache(value: &str) -> Arc<str> {
    if value.is_empty() {
        Arc::<str>::from("")
    } else {
        Arc::<str>::from(value.to_lowercase())
    }
}

impl Package {
    pub fn new(name: impl Into<String>, summary: impl Into<String>, version: impl Into<String>) -> Self {
        let summary = summary.into();
        let summary_lower = lowercase_cache(&summary);
        Self {
            name: name.into(),
            summary,
            version: version.into(),
            release: None,
            summary_lower,
        }
    }

    pub(crate) fn display_version(&self) -> String {
        match self.release {
            Some(release) if !self.version.is_empty() => format!("{}-{}", self.version, release),
            _ => self.version.clone(),
        }
    }

    /// True when `other` ships a different build of the same package.
    pub(crate) fn differs_from(&self, other: &Package) -> bool {
        self.version != other.version || self.release != other.release
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub local_name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
}

impl Group {
    pub(crate) fn display_name(&self) -> &str {
        if self.local_name.is_empty() {
            &self.name
        } else {
            &self.local_name
        }
    }
}

/// An available package together with its installed counterpart, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct PackagePair {
    pub package: Package,
    pub installed: Option<Package>,
}

impl PackagePair {
    pub(crate) fn name(&self) -> &str {
        &self.package.name
    }

    pub(crate) fn has_update(&self) -> bool {
        self.installed
            .as_ref()
            .map(|old| old.differs_from(&self.package))
            .unwrap_or(false)
    }
}
