//! # Generator Module
//!
//! Turns a parsed specification into per-platform source artifacts. Three
//! generators share one extraction pass and one template mechanism:
//!
//! - **backend** - go-zero service: route file, handlers, logic stubs
//! - **frontend** - Next.js: typed API client, SWR hooks, server actions
//! - **mobile** - Expo: API service, hooks, offline sync, websocket client
//!
//! ## Pipeline
//!
//! ```text
//! Spec Document → Extraction → Platform Views → Template Rendering → Artifacts
//! ```
//!
//! Extraction happens once per run and the normalized schemas and endpoints
//! feed every selected platform. Each platform maps them into the view
//! structs its templates consume, renders, and returns [`Artifact`] values;
//! nothing touches the filesystem until [`write_artifacts`]. That split keeps
//! generation deterministic and testable without an output directory.
//!
//! ## Output Layout
//!
//! ```text
//! generated/
//! ├── backend/
//! │   ├── api.api
//! │   └── internal/
//! │       ├── handler/*.go
//! │       └── logic/*.go
//! ├── frontend/
//! │   ├── api-client.ts
//! │   ├── hooks.ts
//! │   ├── server-actions.ts
//! │   └── types.ts
//! └── mobile/
//!     ├── api-service.ts
//!     ├── hooks.ts
//!     ├── offline-sync.ts
//!     ├── types.ts
//!     └── websocket-client.ts
//! ```
//!
//! The compliance checker probes these exact paths, so artifact naming lives
//! in [`crate::naming`] and both sides use it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::spec::{extract_endpoints, extract_schemas, Document, EndpointDef, SchemaDef};
use crate::validator::SpecIssue;

mod backend;
mod frontend;
mod mobile;
mod templates;
mod typedefs;
mod views;

pub use crate::naming::Platform;
pub use templates::TemplateSet;
pub use typedefs::render_types;

/// One generated file: path relative to the platform output root, plus its
/// rendered content.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub rel_path: PathBuf,
    pub content: String,
}

/// Normalized generation input shared by every platform.
pub struct GeneratorInput<'a> {
    pub doc: &'a Document,
    /// Spec file path as given on the command line, echoed into generated
    /// file headers.
    pub spec_file: String,
    pub schemas: Vec<SchemaDef>,
    pub endpoints: Vec<EndpointDef>,
}

impl<'a> GeneratorInput<'a> {
    /// Extract schemas and endpoints once. Extraction issues come back
    /// alongside the input so the caller can report them; they never stop
    /// generation.
    pub fn from_document(doc: &'a Document, spec_file: impl Into<String>) -> (Self, Vec<SpecIssue>) {
        let schemas = extract_schemas(doc);
        let (endpoints, issues) = extract_endpoints(doc);
        let input = GeneratorInput {
            doc,
            spec_file: spec_file.into(),
            schemas,
            endpoints,
        };
        (input, issues)
    }
}

/// Generate the artifacts for one platform.
pub fn generate(
    input: &GeneratorInput<'_>,
    platform: Platform,
    template_root: &Path,
) -> Result<Vec<Artifact>> {
    let templates = TemplateSet::load(template_root, platform)?;
    debug!(platform = platform.as_str(), "rendering artifacts");
    match platform {
        Platform::Backend => backend::generate(input, &templates),
        Platform::Frontend => frontend::generate(input, &templates),
        Platform::Mobile => mobile::generate(input, &templates),
    }
}

/// Write artifacts under `output_dir`, creating directories as needed, and
/// echo each written path.
pub fn write_artifacts(output_dir: &Path, artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        let path = output_dir.join(&artifact.rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &artifact.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Generated: {}", path.display());
    }
    Ok(())
}

/// Run generation for every requested platform.
///
/// A failing platform is reported and skipped so the remaining platforms
/// still generate; the error comes back at the end naming every platform
/// that failed. With a single platform requested, artifacts land directly
/// under `output_root`; with several, each platform gets its own
/// subdirectory there.
pub fn generate_all(
    input: &GeneratorInput<'_>,
    platforms: &[Platform],
    template_root: &Path,
    output_root: &Path,
) -> Result<()> {
    let mut failed = Vec::new();
    for &platform in platforms {
        let output_dir = if platforms.len() == 1 {
            output_root.to_path_buf()
        } else {
            output_root.join(platform.as_str())
        };
        let outcome = generate(input, platform, template_root)
            .and_then(|artifacts| write_artifacts(&output_dir, &artifacts));
        match outcome {
            Ok(()) => println!("{} code generation completed!", platform.title()),
            Err(err) => {
                eprintln!("❌ {} generation failed: {err:#}", platform.as_str());
                failed.push(platform.as_str());
            }
        }
    }
    if !failed.is_empty() {
        bail!("Generation failed for: {}", failed.join(", "));
    }
    Ok(())
}
