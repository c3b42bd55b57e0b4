use crate::config::LoaderConfig;
use crate::error::{LoaderError, Result};
use crate::scanner::ProjectScanner;
use projgraph_csproj::{ProjectAssembler, ProjectSource};
use projgraph_graph::{link_projects, ProjectGraph};
use std::fs;
use std::path::Path;

pub use projgraph_csproj::Project;

/// Loads project files from disk and links them into a batch
pub struct ProjectLoader {
    config: LoaderConfig,
    assembler: ProjectAssembler,
}

impl ProjectLoader {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        let assembler = ProjectAssembler::new(config.key_depth);
        Ok(Self { config, assembler })
    }

    /// Load one project file and its sibling package files.
    ///
    /// A project file that cannot be read fails the load. Package files that
    /// are missing or unreadable count as absent.
    pub fn load(&self, path: &Path) -> Result<Project> {
        let text = read_text(path)?;

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let packages_config = read_optional(&dir.join(&self.config.packages_config));
        let lock_file = read_optional(&dir.join(&self.config.lock_file));

        let source = ProjectSource::new(path, &text)
            .packages_config(packages_config.as_deref())
            .lock_file(lock_file.as_deref());

        Ok(self.assembler.assemble(&source))
    }

    /// Discover, load and link every project under `root`.
    ///
    /// Either every project loads and every sibling reference resolves, or
    /// the call fails and nothing is returned.
    pub fn load_all(&self, root: &Path) -> Result<Vec<Project>> {
        let paths = ProjectScanner::new(root, self.config.clone()).scan();
        self.load_files(&paths)
    }

    /// Load and link an explicit list of project files.
    ///
    /// The first file that cannot be read fails the whole batch.
    pub fn load_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Project>> {
        let projects = paths
            .iter()
            .map(|path| self.load(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(link_projects(projects)?)
    }

    /// Like [`ProjectLoader::load_all`], returning the navigable graph
    pub fn load_graph(&self, root: &Path) -> Result<ProjectGraph> {
        let projects = self.load_unlinked(root)?;
        Ok(ProjectGraph::build(projects)?)
    }

    fn load_unlinked(&self, root: &Path) -> Result<Vec<Project>> {
        let paths = ProjectScanner::new(root, self.config.clone()).scan();
        paths.iter().map(|path| self.load(path)).collect()
    }
}

/// Root namespace of a single project file
pub fn root_namespace(path: &Path) -> Result<String> {
    let text = read_text(path)?;
    Ok(projgraph_csproj::root_namespace(&text))
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| LoaderError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_optional(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            log::warn!("Ignoring unreadable {}: {e}", path.display());
            None
        }
    }
}
