use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on remembered notebooks.
pub const MAX_RECENT_NOTEBOOKS: usize = 10;

/// Most-recently-used notebook paths, newest first, without duplicates.
///
/// Deserialization goes through `From<Vec<PathBuf>>`, so a hand-edited
/// settings file with duplicates or too many entries is normalized on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PathBuf>", into = "Vec<PathBuf>")]
pub struct RecentList {
    paths: Vec<PathBuf>,
}

impl RecentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a use of `path`: move it to the front (or insert it there),
    /// then drop anything past the cap.
    pub fn touch(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
        self.paths.insert(0, path.to_path_buf());
        self.paths.truncate(MAX_RECENT_NOTEBOOKS);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// First remembered notebook that contains `file`.
    pub fn notebook_for(&self, file: &Path) -> Option<&Path> {
        self.paths
            .iter()
            .find(|nb| file.starts_with(nb))
            .map(PathBuf::as_path)
    }
}

impl From<Vec<PathBuf>> for RecentList {
    fn from(paths: Vec<PathBuf>) -> Self {
        let mut list = Self::new();
        for path in paths {
            if list.paths.len() == MAX_RECENT_NOTEBOOKS {
                break;
            }
            if !list.contains(&path) {
                list.paths.push(path);
            }
        }
        list
    }
}

impl From<RecentList> for Vec<PathBuf> {
    fn from(list: RecentList) -> Self {
        list.paths
    }
}
