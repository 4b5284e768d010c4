use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use minijinja::Environment;
use serde::Serialize;

use crate::naming::Platform;

/// Template set for one platform, loaded from disk at generation time.
///
/// Every `.tpl` file under the platform's template directory registers
/// under its file stem, so `go-zero/handler.tpl` renders as `handler`.
/// Loading templates at runtime instead of compiling them in keeps the
/// emitted code editable without rebuilding the tool.
#[derive(Debug)]
pub struct TemplateSet {
    env: Environment<'static>,
    platform: Platform,
}

impl TemplateSet {
    /// Load the template directory for `platform` under `template_root`.
    ///
    /// A missing or empty directory is an error; the caller decides whether
    /// that sinks the whole run or just this platform.
    pub fn load(template_root: &Path, platform: Platform) -> Result<Self> {
        let dir = template_root.join(platform.template_dir());
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read template directory: {}", dir.display()))?;

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        // Unlike the builtin `title`/`capitalize`, this keeps the tail of the
        // word intact, so `getUsers` becomes `GetUsers` rather than `Getusers`.
        env.add_filter("title", |value: String| {
            let mut chars = value.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        });
        let mut loaded = 0usize;
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to list template directory: {}", dir.display()))?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("tpl") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template: {}", path.display()))?;
            env.add_template_owned(name.to_string(), source)
                .with_context(|| format!("Failed to compile template: {}", path.display()))?;
            loaded += 1;
        }

        if loaded == 0 {
            bail!("No templates found in {}", dir.display());
        }
        Ok(TemplateSet { env, platform })
    }

    /// Render the named template with `ctx`.
    pub fn render<S: Serialize>(&self, name: &str, ctx: &S) -> Result<String> {
        let template = self.env.get_template(name).with_context(|| {
            format!("Missing template '{}' for {}", name, self.platform.as_str())
        })?;
        template
            .render(ctx)
            .with_context(|| format!("Failed to render template '{name}'"))
    }
}
