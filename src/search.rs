//! File discovery.
//!
//! Each [`SearchPath`] stands for one or more directories (priority
//! ascending) and each directory is tried for `{dir}/{file_name}`. Files are
//! read once, here; a file that is not there is skipped and any other I/O
//! error is returned.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::{Boundary, SearchMode, SearchPath};

/// Which files a [`Config::discover`](crate::Config::discover) call loads.
///
/// Defaults: file name `.env`, search path `[Cwd]`, [`SearchMode::Merge`].
/// A file name ending in `.toml` is read as TOML, anything else as key=value
/// lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    app_name: String,
    file_name: String,
    search_paths: Vec<SearchPath>,
    search_mode: SearchMode,
}

impl Discovery {
    /// `app_name` names the platform config directory for [`SearchPath::Platform`].
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            file_name: ".env".to_string(),
            search_paths: vec![SearchPath::Cwd],
            search_mode: SearchMode::default(),
        }
    }

    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    /// Replace the search paths. Listed in priority-ascending order.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = paths;
        self
    }

    /// Append a search path with the highest priority so far.
    pub fn add_search_path(mut self, path: SearchPath) -> Self {
        self.search_paths.push(path);
        self
    }

    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub(crate) fn is_toml(&self) -> bool {
        self.file_name.ends_with(".toml")
    }

    /// Contents of the files found, in the order they should be applied.
    pub(crate) fn read_files(&self) -> Result<Vec<(PathBuf, String)>, ConfigError> {
        let cwd = std::env::current_dir().ok();
        let dirs = expand_search_paths(&self.search_paths, &self.app_name, cwd.as_deref());
        let mut candidates = dirs.iter().map(|dir| dir.join(&self.file_name));
        match self.search_mode {
            SearchMode::Merge => {
                let mut found = Vec::new();
                for path in candidates {
                    if let Some(content) = read_if_present(&path)? {
                        found.push((path, content));
                    }
                }
                Ok(found)
            }
            SearchMode::FirstMatch => {
                while let Some(path) = candidates.next_back() {
                    if let Some(content) = read_if_present(&path)? {
                        return Ok(vec![(path, content)]);
                    }
                }
                Ok(Vec::new())
            }
        }
    }
}

/// Directories behind `search_paths`, in order. `cwd` anchors `Cwd` and
/// `Ancestors`; paths that cannot be resolved on this machine are left out.
fn expand_search_paths(
    search_paths: &[SearchPath],
    app_name: &str,
    cwd: Option<&Path>,
) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for sp in search_paths {
        let resolved = match sp {
            SearchPath::Ancestors(boundary) => {
                if let Some(start) = cwd {
                    dirs.extend(ancestors_from(start, boundary));
                }
                continue;
            }
            SearchPath::Platform => directories::ProjectDirs::from("", "", app_name)
                .map(|proj| proj.config_dir().to_path_buf()),
            SearchPath::Home(subdir) => {
                directories::UserDirs::new().map(|user| user.home_dir().join(subdir))
            }
            SearchPath::Cwd => cwd.map(Path::to_path_buf),
            SearchPath::Path(dir) => Some(dir.clone()),
        };
        match resolved {
            Some(dir) => dirs.push(dir),
            None => tracing::trace!(search_path = ?sp, "search path did not resolve"),
        }
    }
    dirs
}

/// Directories from `start` up to the boundary, shallowest first.
fn ancestors_from(start: &Path, boundary: &Boundary) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for dir in start.ancestors() {
        dirs.push(dir.to_path_buf());
        if let Boundary::Marker(name) = boundary
            && dir.join(name).exists()
        {
            break;
        }
    }
    dirs.reverse();
    dirs
}

/// `Ok(None)` when `path` does not exist.
fn read_if_present(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
