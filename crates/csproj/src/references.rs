use crate::patterns::{first_body, PATTERNS};
use crate::types::{strip_strong_name, File, ProjectReference, Reference};

/// Path segments that mark a package cache folder inside a hint path
const PACKAGE_CACHE_MARKERS: [&str; 2] = ["\\packages\\", "/packages/"];

/// All assembly and package references declared in a project file.
///
/// Rich references, bare references and declared package references are
/// scanned independently; an assembly declared in two forms yields two entries.
pub fn extract_references(text: &str) -> Vec<Reference> {
    let mut refs = Vec::new();
    refs.extend(rich_references(text));
    refs.extend(bare_references(text));
    refs.extend(package_references(text));
    refs
}

/// `<Reference Include="...">` elements with a body
pub fn rich_references(text: &str) -> Vec<Reference> {
    PATTERNS
        .reference_block
        .captures_iter(text)
        .filter_map(|caps| {
            let attrs = PATTERNS.attributes(&caps[1]);
            let full_ref = attrs.get("include")?.trim().to_string();
            let body = &caps[2];

            let hint = first_body(&PATTERNS.hint_path, body).unwrap_or_default();
            let declared_private = first_body(&PATTERNS.private, body);
            let has_private = declared_private.is_some();
            let private = declared_private.is_some_and(|v| v.eq_ignore_ascii_case("true"));

            let package_name = package_name_from_hint(&hint);
            let is_package = package_name.is_some();

            Some(Reference {
                name: strip_strong_name(&full_ref).to_string(),
                hint,
                full_ref,
                private,
                has_private,
                package_name: package_name.unwrap_or_default(),
                is_package,
                ..Default::default()
            })
        })
        .collect()
}

/// Self-closing `<Reference Include="..." />` elements
pub fn bare_references(text: &str) -> Vec<Reference> {
    PATTERNS
        .reference_empty
        .captures_iter(text)
        .filter_map(|caps| {
            let attrs = PATTERNS.attributes(&caps[1]);
            attrs.get("include").map(|include| Reference::assembly(include.trim()))
        })
        .collect()
}

/// `<PackageReference>` elements carrying a version, either as a `<Version>`
/// child or as a `Version` attribute
pub fn package_references(text: &str) -> Vec<Reference> {
    let blocks = PATTERNS
        .package_reference_block
        .captures_iter(text)
        .filter_map(|caps| {
            let attrs = PATTERNS.attributes(&caps[1]);
            let name = attrs.get("include")?.trim();
            let version = first_body(&PATTERNS.version, &caps[2])
                .or_else(|| attrs.get("version").cloned())?;
            Some(Reference::package_reference(name, version))
        });

    let inline = PATTERNS
        .package_reference_empty
        .captures_iter(text)
        .filter_map(|caps| {
            let attrs = PATTERNS.attributes(&caps[1]);
            let name = attrs.get("include")?.trim();
            let version = attrs.get("version")?;
            Some(Reference::package_reference(name, version.as_str()))
        });

    blocks.chain(inline).collect()
}

/// `<ProjectReference Include="path">` elements with a `<Name>` child
pub fn project_references(text: &str) -> Vec<ProjectReference> {
    PATTERNS
        .project_reference_block
        .captures_iter(text)
        .filter_map(|caps| {
            let attrs = PATTERNS.attributes(&caps[1]);
            let path = attrs.get("include")?.clone();
            let name = first_body(&PATTERNS.name, &caps[2])?;
            Some(ProjectReference {
                key: String::new(),
                name,
                path,
            })
        })
        .collect()
}

/// Member files declared as Compile, Content or None items
pub fn extract_files(text: &str) -> Vec<File> {
    let mut files: Vec<File> = PATTERNS
        .file_empty
        .captures_iter(text)
        .filter_map(|caps| {
            let attrs = PATTERNS.attributes(&caps[2]);
            Some(File {
                path: attrs.get("include")?.clone(),
                file_type: caps[1].to_string(),
                sub_type: String::new(),
            })
        })
        .collect();

    files.extend(PATTERNS.file_block.captures_iter(text).filter_map(|caps| {
        let attrs = PATTERNS.attributes(&caps[2]);
        Some(File {
            path: attrs.get("include")?.clone(),
            file_type: caps[1].to_string(),
            sub_type: first_body(&PATTERNS.sub_type, &caps[3]).unwrap_or_default(),
        })
    }));

    files
}

/// Package name for a hint path that points into a package cache.
///
/// Takes the folder right after the `packages` segment and drops its trailing
/// version segments: `..\packages\Newtonsoft.Json.12.0.3\lib\net45\x.dll`
/// gives `Newtonsoft.Json`. Returns `None` when the hint is not package-sourced.
pub fn package_name_from_hint(hint: &str) -> Option<String> {
    let (pos, marker) = PACKAGE_CACHE_MARKERS
        .iter()
        .filter_map(|marker| hint.find(marker).map(|pos| (pos, *marker)))
        .min_by_key(|(pos, _)| *pos)?;

    let rest = &hint[pos + marker.len()..];
    let folder = rest.split(['\\', '/']).next().unwrap_or_default();
    Some(strip_version_suffix(folder).to_string())
}

/// `Foo.Bar.1.2.3` → `Foo.Bar`, `Foo.2.0.0-beta1` → `Foo`
fn strip_version_suffix(folder: &str) -> &str {
    let segments: Vec<&str> = folder.split('.').collect();
    let keep = segments
        .iter()
        .rposition(|segment| !is_version_segment(segment))
        .map_or(0, |idx| idx + 1);

    if keep == 0 {
        return "";
    }
    let len = segments[..keep].iter().map(|s| s.len()).sum::<usize>() + keep - 1;
    &folder[..len]
}

/// All digits, optionally followed by a `-prerelease` tail
fn is_version_segment(segment: &str) -> bool {
    let digits = segment.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && (digits == segment.len() || segment.as_bytes()[digits] == b'-')
}
