//! Artifact naming shared by the generators and the compliance checker.
//!
//! Generation writes files under these names and the checker looks them up
//! under the same names, so both sides go through this module instead of
//! composing paths locally.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A code generation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Backend,
    Frontend,
    Mobile,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Backend, Platform::Frontend, Platform::Mobile];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Backend => "backend",
            Platform::Frontend => "frontend",
            Platform::Mobile => "mobile",
        }
    }

    /// Template directory under the template root.
    pub fn template_dir(self) -> &'static str {
        match self {
            Platform::Backend => "go-zero",
            Platform::Frontend => "nextjs",
            Platform::Mobile => "expo",
        }
    }

    /// Human readable stack name used in console output.
    pub fn title(self) -> &'static str {
        match self {
            Platform::Backend => "Go-Zero",
            Platform::Frontend => "Next.js",
            Platform::Mobile => "Expo",
        }
    }

    /// The API client artifact the checker probes for operation methods,
    /// when the platform has one.
    pub fn client_file(self) -> Option<&'static str> {
        match self {
            Platform::Backend => None,
            Platform::Frontend => Some("api-client.ts"),
            Platform::Mobile => Some("api-service.ts"),
        }
    }

    /// The generated type definitions artifact, when the platform has one.
    pub fn types_file(self) -> Option<&'static str> {
        match self {
            Platform::Backend => None,
            Platform::Frontend | Platform::Mobile => Some("types.ts"),
        }
    }

    pub fn from_name(name: &str) -> Option<Platform> {
        match name {
            "backend" => Some(Platform::Backend),
            "frontend" => Some(Platform::Frontend),
            "mobile" => Some(Platform::Mobile),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deterministic operation id for operations that did not declare one:
/// method and path, slugged the same way service names are.
pub fn placeholder_operation_id(method: &str, path: &str) -> String {
    format!("{method}_{path}")
        .to_lowercase()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "_")
        .trim_matches('_')
        .to_string()
}

/// Backend handler artifact path, relative to the backend output root.
/// The file name is the lower-cased operation id.
pub fn handler_file(operation_id: &str) -> PathBuf {
    PathBuf::from("internal/handler").join(format!("{}handler.go", operation_id.to_lowercase()))
}

/// Backend logic artifact path, relative to the backend output root.
pub fn logic_file(operation_id: &str) -> PathBuf {
    PathBuf::from("internal/logic").join(format!("{}logic.go", operation_id.to_lowercase()))
}

/// The backend route definition artifact.
pub const API_FILE: &str = "api.api";
