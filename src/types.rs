//! Types that control where configuration files are looked for.
//!
//! A [`Discovery`](crate::Discovery) lists [`SearchPath`]s in
//! **priority-ascending** order: the last entry has the highest priority.
//! [`SearchMode`] decides whether every file found is loaded or only the
//! highest-priority one.
//!
//! ```ignore
//! // Global defaults, then the project's own file on top.
//! let discovery = Discovery::new("myapp")
//!     .file_name(".env")
//!     .search_paths(vec![
//!         SearchPath::Platform,
//!         SearchPath::Ancestors(Boundary::Marker(".git")),
//!     ]);
//! config.discover(&discovery)?;
//! ```

use std::path::PathBuf;

/// Where to search for config files.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
    /// The current working directory and its parents, shallowest first.
    Ancestors(Boundary),
}

/// How far an [`Ancestors`](SearchPath::Ancestors) walk goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Up to the filesystem root.
    Root,
    /// Up to and including the first directory containing this entry.
    Marker(&'static str),
}

/// What to do when several files are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Load every file in priority order; later files overwrite earlier ones.
    #[default]
    Merge,
    /// Load only the highest-priority file found.
    FirstMatch,
}
