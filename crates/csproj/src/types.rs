use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One project description file and everything extracted from it
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Identity key, taken from the directory lineage of the file
    pub key: String,

    /// Path the project was loaded from
    pub full_path: String,

    /// File name including extension
    pub filename: String,

    /// Target framework version without the leading `v` (e.g. "4.7.2")
    pub framework_version: String,

    pub root_namespace: String,

    pub assembly_name: String,

    pub references: Vec<Reference>,

    pub project_refs: Vec<ProjectReference>,

    pub files: Vec<File>,

    pub packages: Vec<Package>,

    /// Output archive set by an external packaging step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl Project {
    /// Append a member file
    pub fn add_file(
        &mut self,
        path: impl Into<String>,
        file_type: impl Into<String>,
        sub_type: impl Into<String>,
    ) {
        self.files.push(File {
            path: path.into(),
            file_type: file_type.into(),
            sub_type: sub_type.into(),
        });
    }

    /// Set of member file paths, for membership checks
    #[must_use]
    pub fn file_map(&self) -> HashSet<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    /// Record the archive produced for this project
    pub fn set_zip(&mut self, zip: impl Into<String>) {
        self.zip = Some(zip.into());
    }

    /// Highest-ranked package record with the given id (case-insensitive)
    #[must_use]
    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages
            .iter()
            .filter(|p| p.id.eq_ignore_ascii_case(id))
            .max_by_key(|p| p.version_val)
    }
}

/// A dependency edge to an assembly or externally managed package
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reference {
    /// Bare assembly name (`full_ref` truncated at the first comma)
    pub name: String,

    /// Hint path to the referenced binary, empty when not declared
    pub hint: String,

    /// Declaration string as written (may be a strong name)
    pub full_ref: String,

    /// Copy-local flag
    pub private: bool,

    /// Whether `private` was declared explicitly
    pub has_private: bool,

    /// Package folder name with version segments removed
    pub package_name: String,

    pub is_package: bool,

    pub is_package_reference: bool,

    pub version: String,
}

impl Reference {
    /// Plain assembly reference with no metadata
    pub fn assembly(full_ref: impl Into<String>) -> Self {
        let full_ref = full_ref.into();
        Self {
            name: strip_strong_name(&full_ref).to_string(),
            full_ref,
            ..Default::default()
        }
    }

    /// Declared package reference with an explicit version
    pub fn package_reference(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            full_ref: name.clone(),
            name,
            version: version.into(),
            is_package: true,
            is_package_reference: true,
            ..Default::default()
        }
    }

    /// Package-sourced reference resolved through a hint path
    #[must_use]
    pub fn is_hint_package(&self) -> bool {
        self.is_package && !self.hint.is_empty()
    }
}

/// Unqualified part of a strong name: `"log4net, Version=1.2"` → `"log4net"`
#[must_use]
pub fn strip_strong_name(full_ref: &str) -> &str {
    full_ref.split(',').next().unwrap_or("").trim()
}

/// An edge to a sibling project
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectReference {
    /// Key of the target project, filled in by the linker
    pub key: String,

    /// Root namespace the sibling declares
    pub name: String,

    /// Relative path to the sibling's project file
    pub path: String,
}

/// A member source/content file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct File {
    pub path: String,

    /// Build action keyword as found in source (Compile, Content, None)
    #[serde(rename = "type")]
    pub file_type: String,

    #[serde(default)]
    pub sub_type: String,
}

/// A locked or declared package dependency
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Package {
    pub id: String,

    /// Raw version string
    pub version: String,

    pub target_framework: String,

    pub development_dependency: bool,

    /// Comparable rank of `version`, see [`crate::rank`]
    pub version_val: i64,

    /// Record came from a lock file
    #[serde(default)]
    pub locked: bool,
}
