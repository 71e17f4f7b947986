use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Canonical absolute path of a picture; the identity key of its metadata.
///
/// A rename or move produces a different key and orphans the old record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePath(PathBuf);

impl ImagePath {
    /// Resolve symlinks and relative components.
    ///
    /// Paths that do not exist (yet) are made absolute against the
    /// current directory instead of failing.
    pub fn resolve(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let resolved = std::fs::canonicalize(path)
            .or_else(|_| std::path::absolute(path))
            .unwrap_or_else(|_| path.to_path_buf());
        Self(resolved)
    }

    /// Rebuild from a key previously produced by [`ImagePath::as_key`]
    pub fn from_key(key: &str) -> Self {
        Self(PathBuf::from(key))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Key used in the persisted documents
    pub fn as_key(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }

    /// Bare file name, used for display and name lookups
    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ImagePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for ImagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
