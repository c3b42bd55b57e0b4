use crate::patterns::PATTERNS;
use crate::types::Package;
use crate::version::rank;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Records of a legacy `packages.config`.
///
/// Each `<package>` element contributes its `id`, `version`,
/// `targetFramework` and `developmentDependency` attributes, in any order.
/// Elements without an id are skipped.
pub fn parse_packages_config(text: &str) -> Vec<Package> {
    PATTERNS
        .package_entry
        .captures_iter(text)
        .filter_map(|caps| {
            let attrs = PATTERNS.attributes(&caps[1]);
            let id = attrs.get("id")?.clone();
            let version = attrs.get("version").cloned().unwrap_or_default();
            Some(Package {
                version_val: rank(&version),
                id,
                version,
                target_framework: attrs.get("targetframework").cloned().unwrap_or_default(),
                development_dependency: attrs
                    .get("developmentdependency")
                    .is_some_and(|v| v.eq_ignore_ascii_case("true")),
                locked: false,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct LockFile {
    #[serde(default)]
    dependencies: BTreeMap<String, BTreeMap<String, LockEntry>>,
}

#[derive(Debug, Deserialize)]
struct LockEntry {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    resolved: Option<String>,
}

/// Records of a `packages.lock.json`, one per framework and package id.
///
/// Sibling-project entries carry no resolved version and are skipped. A lock
/// file that does not parse yields no records.
pub fn parse_packages_lock(text: &str) -> Vec<Package> {
    let lock: LockFile = match serde_json::from_str(text) {
        Ok(lock) => lock,
        Err(err) => {
            log::warn!("Ignoring malformed lock file: {err}");
            return Vec::new();
        }
    };

    lock.dependencies
        .into_iter()
        .flat_map(|(framework, entries)| {
            entries.into_iter().filter_map(move |(id, entry)| {
                if entry.kind.eq_ignore_ascii_case("project") {
                    return None;
                }
                let version = entry.resolved?;
                Some(Package {
                    version_val: rank(&version),
                    id,
                    version,
                    target_framework: framework.clone(),
                    development_dependency: false,
                    locked: true,
                })
            })
        })
        .collect()
}
