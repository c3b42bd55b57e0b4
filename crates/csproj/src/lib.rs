//! # Projgraph Csproj
//!
//! Tolerant extraction of project metadata from legacy `*.csproj` files.
//!
//! ## Pipeline
//!
//! ```text
//! project text ──┬──> Field extraction (namespace, framework, assembly name)
//!                ├──> Reference extraction
//!                │      ├─ <Reference> with HintPath / Private
//!                │      ├─ bare <Reference />
//!                │      ├─ <PackageReference> with version
//!                │      └─ <ProjectReference> with <Name>
//!                └──> Member files (Compile / Content / None)
//!
//! packages.config / packages.lock.json ──> Package records (ranked)
//!
//! references + packages ──> version merge ──> Project
//! ```
//!
//! Absence is never an error: a missing element yields an empty value and an
//! element that does not match its pattern is skipped.
//!
//! ## Example
//!
//! ```rust
//! use projgraph_csproj::{ProjectAssembler, ProjectSource};
//! use std::path::Path;
//!
//! let text = r#"<Project>
//!   <PropertyGroup><RootNamespace>Acme.Core</RootNamespace></PropertyGroup>
//!   <ItemGroup><Reference Include="System.Xml" /></ItemGroup>
//! </Project>"#;
//!
//! let path = Path::new("repos/Acme.Core/src/Acme.Core.csproj");
//! let project = ProjectAssembler::default().assemble(&ProjectSource::new(path, text));
//!
//! assert_eq!(project.key, "Acme.Core");
//! assert_eq!(project.root_namespace, "Acme.Core");
//! assert_eq!(project.references[0].name, "System.Xml");
//! ```

mod assemble;
mod fields;
mod merge;
mod packages;
mod patterns;
mod references;
mod types;
mod version;

pub use assemble::{derive_key, ProjectAssembler, ProjectSource, DEFAULT_KEY_DEPTH};
pub use fields::{
    assembly_name, extract_field, extract_scalar, root_namespace, target_framework_version,
};
pub use merge::merge_package_versions;
pub use packages::{parse_packages_config, parse_packages_lock};
pub use patterns::{PatternTable, ScalarField, PATTERNS};
pub use references::{
    bare_references, extract_files, extract_references, package_name_from_hint,
    package_references, project_references, rich_references,
};
pub use types::{File, Package, Project, ProjectReference, Reference};
pub use version::rank;
