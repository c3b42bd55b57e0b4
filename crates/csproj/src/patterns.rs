use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Zero or more `name="value"` pairs on an opening tag
const ATTRS: &str = r#"((?:\s+[\w:.\-]+\s*=\s*"[^"]*")*)"#;

/// Process-wide pattern table, compiled on first use and never mutated.
pub static PATTERNS: Lazy<PatternTable> = Lazy::new(PatternTable::new);

/// Scalar project properties with precompiled patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    RootNamespace,
    TargetFrameworkVersion,
    AssemblyName,
    OutputType,
}

impl ScalarField {
    pub const ALL: [ScalarField; 4] = [
        ScalarField::RootNamespace,
        ScalarField::TargetFrameworkVersion,
        ScalarField::AssemblyName,
        ScalarField::OutputType,
    ];

    /// Element name as written in project files
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            ScalarField::RootNamespace => "RootNamespace",
            ScalarField::TargetFrameworkVersion => "TargetFrameworkVersion",
            ScalarField::AssemblyName => "AssemblyName",
            ScalarField::OutputType => "OutputType",
        }
    }

    /// Case-insensitive lookup by element name
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.tag().eq_ignore_ascii_case(tag))
    }
}

/// Compiled patterns for every element the extractors recognise.
///
/// All patterns are case-insensitive and let `.` cross newlines, so element
/// bodies may span lines and tag names may use any casing.
#[derive(Debug)]
pub struct PatternTable {
    scalars: HashMap<ScalarField, Regex>,

    /// `name="value"` on an opening tag
    pub attribute: Regex,

    /// `<Reference ...>body</Reference>`
    pub reference_block: Regex,

    /// `<Reference ... />`
    pub reference_empty: Regex,

    /// `<PackageReference ...>body</PackageReference>`
    pub package_reference_block: Regex,

    /// `<PackageReference ... />`
    pub package_reference_empty: Regex,

    /// `<ProjectReference ...>body</ProjectReference>`
    pub project_reference_block: Regex,

    /// `<Compile|Content|None ... />`
    pub file_empty: Regex,

    /// `<Compile|Content|None ...>body</...>`
    pub file_block: Regex,

    /// `<package ... />` entries of a packages.config
    pub package_entry: Regex,

    pub hint_path: Regex,
    pub private: Regex,
    pub version: Regex,
    pub name: Regex,
    pub sub_type: Regex,
}

impl PatternTable {
    fn new() -> Self {
        let scalars = ScalarField::ALL
            .into_iter()
            .map(|field| (field, compile(&scalar_pattern(field.tag()))))
            .collect();

        Self {
            scalars,
            attribute: compile(r#"([\w:.\-]+)\s*=\s*"([^"]*)""#),
            reference_block: compile(&block_pattern("reference")),
            reference_empty: compile(&empty_pattern("reference")),
            package_reference_block: compile(&block_pattern("packagereference")),
            package_reference_empty: compile(&empty_pattern("packagereference")),
            project_reference_block: compile(&block_pattern("projectreference")),
            file_empty: compile(&format!(r"<(none|compile|content){ATTRS}\s*/>")),
            file_block: compile(&format!(
                r"<(none|compile|content){ATTRS}\s*>(.*?)</(?:none|compile|content)\s*>"
            )),
            package_entry: compile(&format!(r"<package{ATTRS}\s*/?>")),
            hint_path: compile(&scalar_pattern("HintPath")),
            private: compile(&scalar_pattern("Private")),
            version: compile(&scalar_pattern("Version")),
            name: compile(&scalar_pattern("Name")),
            sub_type: compile(&scalar_pattern("SubType")),
        }
    }

    /// Precompiled pattern for a known scalar field
    #[must_use]
    pub fn scalar(&self, field: ScalarField) -> &Regex {
        &self.scalars[&field]
    }

    /// Attributes of an opening tag keyed by lowercased name
    #[must_use]
    pub fn attributes(&self, attrs: &str) -> HashMap<String, String> {
        self.attribute
            .captures_iter(attrs)
            .map(|c| (c[1].to_ascii_lowercase(), c[2].to_string()))
            .collect()
    }
}

/// First-match body of `<tag ...>body</tag>`, trimmed
pub(crate) fn first_body(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Pattern for `<tag attr="...">body</tag>` capturing the body
pub(crate) fn scalar_pattern(tag: &str) -> String {
    let tag = regex::escape(tag);
    format!(r"<{tag}(?:\s[^>]*)?>(.*?)</{tag}\s*>")
}

fn block_pattern(tag: &str) -> String {
    format!(r"<{tag}{ATTRS}\s*>(.*?)</{tag}\s*>")
}

fn empty_pattern(tag: &str) -> String {
    format!(r"<{tag}{ATTRS}\s*/>")
}

pub(crate) fn build(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}

fn compile(pattern: &str) -> Regex {
    build(pattern).unwrap_or_else(|err| panic!("built-in pattern {pattern:?} is invalid: {err}"))
}
