use crate::types::{Package, Reference};
use std::collections::HashMap;

/// Fill in missing versions of hint-path package references.
///
/// Only references that came from a package cache hint and have no version yet
/// are touched; they take the raw version of the package whose id equals their
/// `name`. When an id occurs more than once the highest-ranked record wins.
/// Returns the number of references updated.
pub fn merge_package_versions(references: &mut [Reference], packages: &[Package]) -> usize {
    let mut by_id: HashMap<&str, &Package> = HashMap::new();
    for pkg in packages {
        by_id
            .entry(pkg.id.as_str())
            .and_modify(|current| {
                if pkg.version_val >= current.version_val {
                    *current = pkg;
                }
            })
            .or_insert(pkg);
    }

    let mut updated = 0;
    for reference in references.iter_mut() {
        if !reference.version.is_empty() || !reference.is_hint_package() {
            continue;
        }

        if let Some(pkg) = by_id.get(reference.name.as_str()) {
            reference.version = pkg.version.clone();
            updated += 1;
        }
    }

    updated
}
