use crate::error::Result;
use crate::linker::link_projects;
use petgraph::graph::{DiGraph, NodeIndex};
use projgraph_csproj::Project;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Edge in the project graph: `from` references the sibling project `to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Root namespace the reference was declared with
    pub namespace: String,

    /// Relative path written in the referencing project
    pub path: String,
}

/// Linked projects with their sibling-project dependencies as edges
#[derive(Debug)]
pub struct ProjectGraph {
    /// Directed graph (project -> referenced project)
    pub graph: DiGraph<Project, DependencyEdge>,

    /// Project key -> NodeIndex mapping; one key may cover several projects
    pub key_index: HashMap<String, Vec<NodeIndex>>,

    /// Root namespace -> NodeIndex mapping, last declaration wins
    pub namespace_index: HashMap<String, NodeIndex>,
}

impl ProjectGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            key_index: HashMap::new(),
            namespace_index: HashMap::new(),
        }
    }

    /// Link a batch of assembled projects and build the graph.
    ///
    /// Fails without building anything when any sibling reference cannot be
    /// resolved.
    pub fn build(projects: Vec<Project>) -> Result<Self> {
        let projects = link_projects(projects)?;
        let mut graph = Self::new();

        for project in projects {
            graph.add_project(project);
        }

        let nodes = &graph.graph;
        let index = &graph.namespace_index;
        let edges: Vec<(NodeIndex, NodeIndex, DependencyEdge)> = nodes
            .node_indices()
            .flat_map(move |from| {
                nodes[from].project_refs.iter().filter_map(move |reference| {
                    index.get(&reference.name).map(|&to| {
                        (
                            from,
                            to,
                            DependencyEdge {
                                namespace: reference.name.clone(),
                                path: reference.path.clone(),
                            },
                        )
                    })
                })
            })
            .collect();

        for (from, to, edge) in edges {
            graph.add_edge(from, to, edge);
        }

        log::info!(
            "Built project graph: {} projects, {} dependencies",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }

    /// Add project node and update indices
    pub fn add_project(&mut self, project: Project) -> NodeIndex {
        let key = project.key.clone();
        let namespace = project.root_namespace.clone();

        let idx = self.graph.add_node(project);

        self.key_index.entry(key).or_default().push(idx);
        self.namespace_index.insert(namespace, idx);

        idx
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: DependencyEdge) {
        self.graph.add_edge(from, to, edge);
    }

    /// Nodes of all projects sharing a key
    pub fn find_nodes(&self, key: &str) -> Vec<NodeIndex> {
        self.key_index.get(key).cloned().unwrap_or_default()
    }

    pub fn get_project(&self, idx: NodeIndex) -> Option<&Project> {
        self.graph.node_weight(idx)
    }

    /// Projects in load order
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.graph.raw_nodes().iter().map(|node| &node.weight)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Consume the graph, returning the linked projects in load order
    pub fn into_projects(self) -> Vec<Project> {
        let (nodes, _) = self.graph.into_nodes_edges();
        nodes.into_iter().map(|node| node.weight).collect()
    }
}

impl Default for ProjectGraph {
    fn default() -> Self {
        Self::new()
    }
}
