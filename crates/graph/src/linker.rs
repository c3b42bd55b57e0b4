use crate::error::{GraphError, Result};
use projgraph_csproj::Project;
use std::collections::HashMap;

/// Namespace → project key for a whole batch.
///
/// When two projects declare the same root namespace the one seen last wins.
pub fn namespace_index(projects: &[Project]) -> HashMap<String, String> {
    let mut index = HashMap::with_capacity(projects.len());
    for project in projects {
        if let Some(previous) = index.insert(project.root_namespace.clone(), project.key.clone()) {
            if previous != project.key {
                log::warn!(
                    "Namespace '{}' declared by both '{}' and '{}'; using '{}'",
                    project.root_namespace,
                    previous,
                    project.key,
                    project.key
                );
            }
        }
    }
    index
}

/// Resolve every sibling-project reference in the batch to a project key.
///
/// Runs only once the whole batch is assembled. The first reference whose
/// namespace has no matching project fails the entire batch; no partially
/// linked list is returned.
pub fn link_projects(mut projects: Vec<Project>) -> Result<Vec<Project>> {
    let index = namespace_index(&projects);

    let mut resolved = 0usize;
    for project in &mut projects {
        for reference in &mut project.project_refs {
            let key = index.get(&reference.name).ok_or_else(|| {
                GraphError::UnresolvedNamespace {
                    namespace: reference.name.clone(),
                    project: project.key.clone(),
                }
            })?;
            reference.key = key.clone();
            resolved += 1;
        }
    }

    log::info!(
        "Linked {} projects: {} project references resolved",
        projects.len(),
        resolved
    );

    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use projgraph_csproj::ProjectReference;

    fn project(key: &str, namespace: &str, refs: &[&str]) -> Project {
        Project {
            key: key.to_string(),
            root_namespace: namespace.to_string(),
            project_refs: refs
                .iter()
                .map(|name| ProjectReference {
                    name: name.to_string(),
                    path: format!(r"..\{name}\{name}.csproj"),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_sibling_namespace_to_key() {
        let projects = vec![
            project("core-repo", "Foo.Core", &[]),
            project("app-repo", "Foo.App", &["Foo.Core"]),
        ];

        let linked = link_projects(projects).unwrap();
        assert_eq!(linked[1].project_refs[0].key, "core-repo");
    }

    #[test]
    fn reference_order_does_not_matter() {
        let projects = vec![
            project("app-repo", "Foo.App", &["Foo.Core"]),
            project("core-repo", "Foo.Core", &[]),
        ];

        let linked = link_projects(projects).unwrap();
        assert_eq!(linked[0].project_refs[0].key, "core-repo");
    }

    #[test]
    fn unresolved_namespace_fails_batch() {
        let projects = vec![
            project("core-repo", "Foo.Core", &[]),
            project("app-repo", "Foo.App", &["Foo.Core", "Missing.Lib"]),
        ];

        let err = link_projects(projects).unwrap_err();
        match &err {
            GraphError::UnresolvedNamespace { namespace, project } => {
                assert_eq!(namespace, "Missing.Lib");
                assert_eq!(project, "app-repo");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("Missing.Lib"));
    }

    #[test]
    fn last_project_wins_namespace_collision() {
        let projects = vec![
            project("first", "Shared", &[]),
            project("second", "Shared", &[]),
            project("app", "App", &["Shared"]),
        ];

        let index = namespace_index(&projects);
        assert_eq!(index.get("Shared").map(String::as_str), Some("second"));

        let linked = link_projects(projects).unwrap();
        assert_eq!(linked[2].project_refs[0].key, "second");
    }

    #[test]
    fn empty_batch_links() {
        assert!(link_projects(Vec::new()).unwrap().is_empty());
    }
}
