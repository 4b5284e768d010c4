//! # SpecForge
//!
//! **SpecForge** is a specification-first code generation toolkit for multi-platform API
//! projects, driven entirely by [OpenAPI 3.x](https://spec.openapis.org/oas/v3.0.3)
//! specifications.
//!
//! ## Overview
//!
//! SpecForge treats the OpenAPI document as the single source of truth for an API that is
//! served by a Go-Zero backend and consumed by Next.js web and Expo mobile clients. From one
//! spec it generates the backend routing file, handlers and logic stubs, typed frontend and
//! mobile API clients with hooks, and TypeScript type definitions. Vendor extensions
//! (`x-go-zero`, `x-frontend`, `x-mobile`, `x-websocket`) carry the per-platform knobs:
//! caching, SWR revalidation, offline sync, server actions and WebSocket channels.
//!
//! Beyond generation, SpecForge validates specifications for structural and platform
//! coverage issues and audits previously generated code for drift from the spec, producing
//! a machine-readable compliance report.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`spec`]** - OpenAPI document loading, schema/endpoint extraction, vendor extensions
//! - **[`typemap`]** - OpenAPI schema types mapped to Go, TypeScript and Zod
//! - **[`generator`]** - Template-driven artifact generation for every platform
//! - **[`validator`]** - Specification validation passes and the validation report
//! - **[`compliance`]** - Generated-code compliance checking and report persistence
//! - **[`config`]** - `specforge.toml` project configuration
//! - **[`naming`]** - Platform identities and generated-file naming rules
//! - **[`cli`]** - clap-based command-line interface (`generate`, `validate`, `check`)
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(specforge)
//!     participant Load as spec::load_document
//!     participant Extract as GeneratorInput::from_document
//!     participant Templates as generator::TemplateSet
//!     participant Platform as generator::{backend,frontend,mobile}
//!     participant FS as File System
//!
//!     User->>CLI: specforge generate specs/api.yaml generated
//!     CLI->>Load: load_document("specs/api.yaml")
//!     Load->>Load: Parse YAML/JSON
//!     Load-->>CLI: Document
//!     CLI->>Extract: from_document(&doc)
//!     Extract->>Extract: Extract schemas, endpoints,<br/>vendor extensions
//!     Extract-->>CLI: GeneratorInput + issues
//!     CLI->>Templates: TemplateSet::load(templates/, platform)
//!     Templates-->>CLI: Compiled template set
//!     CLI->>Platform: generate(&input, &templates)
//!     Platform->>Platform: Build view models<br/>(PascalCase template contract)
//!     Platform-->>CLI: Vec<Artifact>
//!     CLI->>FS: write_artifacts(output_dir)
//!     FS-->>User: Generated: generated/backend/api.api ...
//! ```
//!
//! ### Compliance Flow
//!
//! `specforge check` walks `specs/` for YAML documents, replays every endpoint and schema
//! against the files under `generated/`, and folds the findings into a
//! [`compliance::ComplianceReport`] that is printed to stdout and saved as
//! `compliance-report.json`. The process exits zero only when the report status is
//! `compliant`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use specforge::generator::{self, GeneratorInput, Platform};
//! use specforge::spec::load_document;
//!
//! let doc = load_document("specs/api.yaml".as_ref())?;
//! let (input, issues) = GeneratorInput::from_document(&doc, "specs/api.yaml");
//! generator::generate_all(
//!     &input,
//!     &Platform::ALL,
//!     "templates".as_ref(),
//!     "generated".as_ref(),
//! )?;
//! ```
//!
//! Templates live under `templates/<platform>/` (`go-zero`, `nextjs`, `expo`) as
//! MiniJinja `.tpl` files and are compiled at generation time, so they can be adjusted
//! without rebuilding the binary.

pub mod cli;
pub mod compliance;
pub mod config;
pub mod generator;
pub mod naming;
pub mod spec;
pub mod typemap;
pub mod validator;

pub use compliance::ComplianceReport;
pub use config::{load_config, ForgeConfig};
pub use naming::Platform;
pub use spec::{find_spec_files, load_document, Document, EndpointDef, SchemaDef, SchemaRef};
pub use typemap::TypeDesc;
