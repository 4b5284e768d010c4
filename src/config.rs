//! Tool configuration loaded from a TOML file at the project root.
//!
//! Everything has a default, so projects without a config file get the
//! stock behavior. A config file that exists but fails to parse is an
//! error; silently ignoring a typo would mask policy the project meant to
//! set.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// File name looked up under the project root.
pub const CONFIG_FILE: &str = "specforge.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForgeConfig {
    #[serde(default)]
    pub validate: ValidateConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateConfig {
    /// Warn when operation ids do not start with the verb prefix derived
    /// from the HTTP method (GET => get, POST => create, PUT => update,
    /// DELETE => delete). House style, so it can be switched off.
    #[serde(default = "default_true")]
    pub naming_convention: bool,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        ValidateConfig {
            naming_convention: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Schema names exempt from the unused-schema warning.
    #[serde(default = "default_exempt_schemas")]
    pub exempt_schemas: Vec<String>,

    /// Platforms whose generated output directory the checker expects.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,

    /// External tools probed by the toolchain phase.
    #[serde(default = "default_tools")]
    pub tools: Vec<ToolProbe>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            exempt_schemas: default_exempt_schemas(),
            platforms: default_platforms(),
            tools: default_tools(),
        }
    }
}

/// One external tool probe: the command is run and only its exit status is
/// read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolProbe {
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolProbe {
    fn new(name: &str, command: &str, args: &[&str]) -> Self {
        ToolProbe {
            name: name.to_string(),
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_exempt_schemas() -> Vec<String> {
    vec!["BaseResponse".to_string(), "BaseErrorResponse".to_string()]
}

fn default_platforms() -> Vec<String> {
    vec![
        "backend".to_string(),
        "frontend".to_string(),
        "mobile".to_string(),
    ]
}

fn default_tools() -> Vec<ToolProbe> {
    vec![
        ToolProbe::new("node", "node", &["--version"]),
        ToolProbe::new("go", "go", &["version"]),
        ToolProbe::new("make", "make", &["--version"]),
    ]
}

/// Load the configuration under `root`.
///
/// Returns the defaults when no config file exists; fails when the file
/// exists but cannot be read or parsed.
pub fn load_config(root: &Path) -> anyhow::Result<ForgeConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ForgeConfig::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ForgeConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
