use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use super::document::Document;

/// Load a specification document from disk.
///
/// The on-disk format is chosen by file extension: `.yaml` and `.yml` go
/// through the YAML parser, everything else is treated as JSON. Both routes
/// land in the same raw tree so later passes never care about the source
/// format.
pub fn load_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read spec file: {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let root: serde_json::Value = match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML spec file: {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON spec file: {}", path.display()))?,
    };
    Ok(Document::from_value(root))
}

/// Collect every YAML spec file under `dir`, sorted by path.
///
/// Only `.yaml`/`.yml` files count; JSON files in a spec directory are
/// ignored by the compliance checker.
pub fn find_spec_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml" | "yml")
            )
        })
        .collect();
    files.sort();
    files
}
