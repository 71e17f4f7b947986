use std::path::{Path, PathBuf};

/// Utility for generating storage paths
pub struct PathBuilder;

impl PathBuilder {
    /// Hidden temp file next to `target`: `{dir}/.{name}.{uuid}.tmp`.
    ///
    /// Same directory as the target so the final rename never crosses a
    /// filesystem boundary.
    pub fn temp_sibling(target: &Path, id: uuid::Uuid) -> PathBuf {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let temp_name = format!(".{}.{}.tmp", name, id);

        match target.parent() {
            Some(parent) => parent.join(temp_name),
            None => PathBuf::from(temp_name),
        }
    }

    /// Upload destination candidate: attempt 0 is `{name}`, attempt n is `{stem}_{n}{.ext}`
    pub fn upload_candidate(root: &Path, file_name: &str, attempt: u32) -> PathBuf {
        if attempt == 0 {
            return root.join(file_name);
        }

        let as_path = Path::new(file_name);
        let stem = as_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match as_path.extension() {
            Some(ext) => root.join(format!("{}_{}.{}", stem, attempt, ext.to_string_lossy())),
            None => root.join(format!("{}_{}", stem, attempt)),
        }
    }
}
