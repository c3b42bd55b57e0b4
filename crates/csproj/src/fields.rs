use crate::patterns::{build, first_body, scalar_pattern, ScalarField, PATTERNS};

/// First `<tag>body</tag>` in `text`, matched case-insensitively.
///
/// Attributes on the opening tag are allowed and the body is trimmed. Returns
/// an empty string when the element is absent or malformed. Known project
/// properties use the shared pattern table; anything else is compiled on demand.
pub fn extract_scalar(text: &str, tag: &str) -> String {
    if let Some(field) = ScalarField::from_tag(tag) {
        return extract_field(text, field);
    }

    match build(&scalar_pattern(tag)) {
        Ok(regex) => first_body(&regex, text).unwrap_or_default(),
        Err(err) => {
            log::debug!("Cannot build pattern for <{tag}>: {err}");
            String::new()
        }
    }
}

/// Raw first-match body of a known scalar field
pub fn extract_field(text: &str, field: ScalarField) -> String {
    first_body(PATTERNS.scalar(field), text).unwrap_or_default()
}

pub fn root_namespace(text: &str) -> String {
    extract_field(text, ScalarField::RootNamespace)
}

/// Target framework version without its `v` prefix (`v4.7.2` → `4.7.2`)
pub fn target_framework_version(text: &str) -> String {
    let raw = extract_field(text, ScalarField::TargetFrameworkVersion);
    raw.strip_prefix(['v', 'V']).unwrap_or(&raw).to_string()
}

pub fn assembly_name(text: &str) -> String {
    extract_field(text, ScalarField::AssemblyName)
}
