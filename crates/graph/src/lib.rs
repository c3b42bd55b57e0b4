//! # Projgraph Graph
//!
//! Cross-project linking and dependency queries over assembled projects.
//!
//! ## Architecture
//!
//! ```text
//! Project[] (assembled, unlinked)
//!     │
//!     ├──> Linker
//!     │      ├─ Index root namespace -> key (last wins)
//!     │      └─ Resolve every ProjectReference (fail the batch on a miss)
//!     │
//!     └──> Project Graph (petgraph)
//!            ├─ Nodes: projects
//!            ├─ Edges: sibling-project references
//!            └─ Queries: dependencies, dependents, package versions
//! ```

mod error;
mod graph;
mod linker;
mod types;

pub use error::{GraphError, Result};
pub use linker::{link_projects, namespace_index};
pub use types::{DependencyEdge, ProjectGraph};
