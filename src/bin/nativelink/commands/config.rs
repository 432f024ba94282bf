//! `nativelink config` command
//!
//! Prints what the adapters resolved for the app and its dependencies, the
//! same data linking works from.

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

use super::diagnostic_error;
use crate::cli::ConfigArgs;
use crate::GlobalOptions;
use nativelink::ops::{discover, load_dependency, resolve_project};
use nativelink::platforms::PlatformRegistry;

pub fn execute(args: ConfigArgs, global_opts: &GlobalOptions) -> Result<()> {
    let ctx = global_opts.context()?;
    let registry = PlatformRegistry::builtin();

    let project = resolve_project(ctx.root(), ctx.config(), &registry)
        .map_err(|e| diagnostic_error(e.to_diagnostic()))?;

    let mut output = json!({
        "root": ctx.root(),
        "project": project,
    });

    if !args.project_only {
        let mut dependencies = Map::new();
        for name in discover(ctx.root()) {
            let value = match load_dependency(ctx.root(), &name, &registry) {
                Ok(dependency) => serde_json::to_value(&dependency)?,
                Err(e) => json!({ "error": e.to_string() }),
            };
            dependencies.insert(name, value);
        }
        output["dependencies"] = Value::Object(dependencies);
    }

    let text = serde_json::to_string_pretty(&output).context("failed to serialize configuration")?;
    println!("{}", text);
    Ok(())
}
