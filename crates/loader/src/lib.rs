//! # Projgraph Loader
//!
//! Discovery and loading of legacy project trees.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> Project Scanner (.gitignore aware)
//!     │      └─> *.csproj paths
//!     │
//!     ├──> Per file: read project + packages.config + packages.lock.json
//!     │      └─> Project (extracted, versions merged, keyed)
//!     │
//!     └──> Linker (whole batch)
//!            └─> Linked projects or a batch-fatal error
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use projgraph_loader::{LoaderConfig, ProjectLoader};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = ProjectLoader::new(LoaderConfig::default())?;
//!     let projects = loader.load_all(Path::new("/path/to/repos"))?;
//!
//!     for project in &projects {
//!         println!("{} -> {} sibling refs", project.key, project.project_refs.len());
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod loader;
mod scanner;

pub use config::LoaderConfig;
pub use error::{LoaderError, Result};
pub use loader::{root_namespace, Project, ProjectLoader};
pub use scanner::ProjectScanner;
