use crate::error::{GraphError, Result};
use crate::types::ProjectGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use projgraph_csproj::{Package, Project};
use std::collections::{HashSet, VecDeque};

impl ProjectGraph {
    /// Project with the given root namespace
    pub fn find_by_namespace(&self, namespace: &str) -> Option<&Project> {
        self.namespace_index
            .get(namespace)
            .and_then(|&idx| self.get_project(idx))
    }

    /// All projects sharing `key`
    pub fn projects_for_key(&self, key: &str) -> Vec<&Project> {
        self.find_nodes(key)
            .into_iter()
            .filter_map(|idx| self.get_project(idx))
            .collect()
    }

    /// Projects directly referenced by any project under `key`
    pub fn dependencies(&self, key: &str) -> Result<Vec<&Project>> {
        self.neighbours(key, Direction::Outgoing)
    }

    /// Projects that directly reference any project under `key`
    pub fn dependents(&self, key: &str) -> Result<Vec<&Project>> {
        self.neighbours(key, Direction::Incoming)
    }

    /// Projects reachable from `key` within `max_depth` hops, with their
    /// distance. Cycles are visited once.
    pub fn transitive_dependencies(
        &self,
        key: &str,
        max_depth: usize,
    ) -> Result<Vec<(&Project, usize)>> {
        let start = self.require(key)?;

        let mut visited: HashSet<NodeIndex> = start.iter().copied().collect();
        let mut queue: VecDeque<(NodeIndex, usize)> = start.into_iter().map(|idx| (idx, 0)).collect();
        let mut result = Vec::new();

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }

            for edge in self.graph.edges(current) {
                let target = edge.target();
                if visited.insert(target) {
                    if let Some(project) = self.get_project(target) {
                        result.push((project, depth + 1));
                    }
                    queue.push_back((target, depth + 1));
                }
            }
        }

        Ok(result)
    }

    /// Version of `package` the projects under `key` actually reference.
    ///
    /// A declared or merged reference version takes precedence; otherwise the
    /// highest-ranked package record of those projects is used.
    pub fn referenced_version(&self, key: &str, package: &str) -> Result<Option<String>> {
        let projects = self.require(key)?;
        let projects: Vec<&Project> = projects
            .into_iter()
            .filter_map(|idx| self.get_project(idx))
            .collect();

        let from_reference = projects.iter().flat_map(|p| &p.references).find(|r| {
            !r.version.is_empty()
                && (r.name.eq_ignore_ascii_case(package)
                    || r.package_name.eq_ignore_ascii_case(package))
        });
        if let Some(reference) = from_reference {
            return Ok(Some(reference.version.clone()));
        }

        Ok(projects
            .iter()
            .filter_map(|p| p.package(package))
            .max_by_key(|p| p.version_val)
            .map(|p| p.version.clone()))
    }

    /// Highest-ranked record of package `id` across every project
    pub fn newest_package(&self, id: &str) -> Option<&Package> {
        self.projects()
            .filter_map(|p| p.package(id))
            .max_by_key(|p| p.version_val)
    }

    fn require(&self, key: &str) -> Result<Vec<NodeIndex>> {
        let nodes = self.find_nodes(key);
        if nodes.is_empty() {
            return Err(GraphError::ProjectNotFound(key.to_string()));
        }
        Ok(nodes)
    }

    fn neighbours(&self, key: &str, direction: Direction) -> Result<Vec<&Project>> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for idx in self.require(key)? {
            for neighbour in self.graph.neighbors_directed(idx, direction) {
                if seen.insert(neighbour) {
                    if let Some(project) = self.get_project(neighbour) {
                        result.push(project);
                    }
                }
            }
        }

        Ok(result)
    }
}
