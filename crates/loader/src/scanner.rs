use crate::config::LoaderConfig;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Scanner for finding project description files under a root directory
pub struct ProjectScanner {
    root: PathBuf,
    config: LoaderConfig,
}

impl ProjectScanner {
    pub fn new(root: impl AsRef<Path>, config: LoaderConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
        }
    }

    /// Project files under the root, sorted by path
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let exclude = self.config.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(self.config.respect_gitignore)
            .git_global(self.config.respect_gitignore)
            .git_exclude(self.config.respect_gitignore);
        builder.filter_entry(move |entry| {
            entry.depth() == 0
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| exclude.is_excluded(name))
        });

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !self.is_project_file(path) {
                        continue;
                    }

                    log::debug!("Found project file {}", path.display());
                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        log::info!("Found {} project files under {}", files.len(), self.root.display());
        files
    }

    fn is_project_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.config.project_extension))
    }
}
