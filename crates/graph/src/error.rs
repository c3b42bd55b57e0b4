use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Namespace '{namespace}' referenced by '{project}' is not declared by any loaded project")]
    UnresolvedNamespace { namespace: String, project: String },

    #[error("Project not found: {0}")]
    ProjectNotFound(String),
}
