use std::fs;
use std::path::Path;

/// Read-only probe over generated artifacts.
///
/// The check phases only ever ask two questions of generated code: does a
/// path exist, and does a file contain a substring.
pub trait ArtifactInspector {
    fn exists(&self, path: &Path) -> bool;
    fn contains(&self, path: &Path, needle: &str) -> bool;
}

/// Inspector backed by the real filesystem.
pub struct FsInspector;

impl ArtifactInspector for FsInspector {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn contains(&self, path: &Path, needle: &str) -> bool {
        fs::read_to_string(path)
            .map(|content| content.contains(needle))
            .unwrap_or(false)
    }
}

/// In-memory inspector for tests. A directory exists when any inserted
/// file sits under it.
#[cfg(test)]
pub(crate) struct MemoryInspector {
    files: std::collections::HashMap<std::path::PathBuf, String>,
}

#[cfg(test)]
impl MemoryInspector {
    pub(crate) fn new() -> Self {
        MemoryInspector {
            files: std::collections::HashMap::new(),
        }
    }

    pub(crate) fn insert(
        &mut self,
        path: impl Into<std::path::PathBuf>,
        content: impl Into<String>,
    ) {
        self.files.insert(path.into(), content.into());
    }
}

#[cfg(test)]
impl ArtifactInspector for MemoryInspector {
    fn exists(&self, path: &Path) -> bool {
        self.files.keys().any(|k| k.starts_with(path))
    }

    fn contains(&self, path: &Path, needle: &str) -> bool {
        self.files
            .get(path)
            .map(|content| content.contains(needle))
            .unwrap_or(false)
    }
}
