//! # CLI Module
//!
//! The CLI module provides command-line interface functionality for the
//! SpecForge generator and compliance tooling.
//!
//! ## Overview
//!
//! The CLI supports:
//! - **Code Generation** - Generate Go-Zero, Next.js and Expo code from OpenAPI specifications
//! - **Validation** - Validate OpenAPI specs for correctness and platform coverage
//! - **Compliance** - Check previously generated code against the specs
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate platform code from an OpenAPI specification:
//!
//! ```bash
//! specforge generate specs/api.yaml generated
//! ```
//!
//! Options:
//! - `<SPEC>` - Path to OpenAPI specification (required)
//! - `<OUTPUT>` - Output directory for generated code (required)
//! - `--platform <PLATFORM>` - backend, frontend, mobile or all (default: all)
//! - `--templates <DIR>` - Template directory root (default: templates)
//!
//! ### `validate`
//!
//! Validate an OpenAPI specification:
//!
//! ```bash
//! specforge validate specs/api.yaml
//! ```
//!
//! Options:
//! - `--errors-only` - Hide warnings from the report
//!
//! ### `check`
//!
//! Check generated code compliance against every spec under `specs/`:
//!
//! ```bash
//! specforge check --root .
//! ```
//!
//! Writes `compliance-report.json` under the project root and exits
//! non-zero unless the report is fully compliant.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use specforge::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let exit_code = run_cli(cli)?;
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands, PlatformArg};
