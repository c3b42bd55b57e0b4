use crate::fields::{assembly_name, root_namespace, target_framework_version};
use crate::merge::merge_package_versions;
use crate::packages::{parse_packages_config, parse_packages_lock};
use crate::references::{extract_files, extract_references, project_references};
use crate::types::Project;
use std::path::Path;

/// Default number of directory levels between the identifying directory and
/// the project file: `<key>/<folder>/<name>.csproj`.
pub const DEFAULT_KEY_DEPTH: usize = 2;

/// Raw inputs for one project
#[derive(Debug, Clone, Copy)]
pub struct ProjectSource<'a> {
    /// Location of the project file; only used for identity
    pub path: &'a Path,

    /// Project file contents
    pub text: &'a str,

    /// Contents of a sibling `packages.config`, if any
    pub packages_config: Option<&'a str>,

    /// Contents of a sibling `packages.lock.json`, if any
    pub lock_file: Option<&'a str>,
}

impl<'a> ProjectSource<'a> {
    pub fn new(path: &'a Path, text: &'a str) -> Self {
        Self {
            path,
            text,
            packages_config: None,
            lock_file: None,
        }
    }

    #[must_use]
    pub fn packages_config(mut self, text: Option<&'a str>) -> Self {
        self.packages_config = text;
        self
    }

    #[must_use]
    pub fn lock_file(mut self, text: Option<&'a str>) -> Self {
        self.lock_file = text;
        self
    }
}

/// Turns one project's raw inputs into a [`Project`].
///
/// The caller guarantees every project file sits `key_depth` directory levels
/// below the directory that identifies it. Files in other layouts still load
/// but get the wrong key.
#[derive(Debug, Clone, Copy)]
pub struct ProjectAssembler {
    key_depth: usize,
}

impl Default for ProjectAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_DEPTH)
    }
}

impl ProjectAssembler {
    pub const fn new(key_depth: usize) -> Self {
        Self { key_depth }
    }

    /// Extract, merge and assemble one project
    pub fn assemble(&self, source: &ProjectSource<'_>) -> Project {
        let mut packages = source
            .packages_config
            .map(parse_packages_config)
            .unwrap_or_default();
        packages.extend(source.lock_file.map(parse_packages_lock).unwrap_or_default());

        let mut references = extract_references(source.text);
        let merged = merge_package_versions(&mut references, &packages);

        let project = Project {
            key: derive_key(source.path, self.key_depth),
            full_path: source.path.to_string_lossy().into_owned(),
            filename: source
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            framework_version: target_framework_version(source.text),
            root_namespace: root_namespace(source.text),
            assembly_name: assembly_name(source.text),
            references,
            project_refs: project_references(source.text),
            files: extract_files(source.text),
            packages,
            zip: None,
        };

        log::debug!(
            "Assembled {} ({}): {} refs ({} versions merged), {} project refs, {} files, {} packages",
            project.key,
            project.full_path,
            project.references.len(),
            merged,
            project.project_refs.len(),
            project.files.len(),
            project.packages.len()
        );

        project
    }
}

/// Base name of the ancestor `depth` levels above `path`.
///
/// `derive_key("repos/Acme/src/Acme.csproj", 2)` is `"Acme"`. Paths too shallow
/// for the requested depth give an empty key.
pub fn derive_key(path: &Path, depth: usize) -> String {
    path.ancestors()
        .nth(depth)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
