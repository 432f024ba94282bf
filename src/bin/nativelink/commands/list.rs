//! `nativelink list` command

use std::collections::BTreeMap;

use anyhow::Result;

use super::diagnostic_error;
use crate::cli::ListArgs;
use crate::GlobalOptions;
use nativelink::ops::{link_all, DependencyReport, LinkOptions, LinkState, ParamSession};
use nativelink::platforms::PlatformRegistry;

pub fn execute(args: ListArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = global_opts.context()?;

    // A dry run checks every platform without prompting or writing.
    let opts = LinkOptions {
        platforms: args.platforms,
        dry_run: true,
    };
    let mut session = ParamSession::non_interactive(BTreeMap::new());
    let report = link_all(&ctx, &PlatformRegistry::builtin(), &[], &mut session, &opts)
        .map_err(|e| diagnostic_error(e.to_diagnostic()))?;

    if shell.is_json() {
        let dependencies: Vec<_> = report
            .dependencies
            .iter()
            .map(|d| serde_json::json!({ "name": d.name, "platforms": status_map(d) }))
            .collect();
        shell.json_event(&serde_json::json!({
            "reason": "dependency-list",
            "dependencies": dependencies,
        }));
        return Ok(());
    }

    for dependency in &report.dependencies {
        let statuses: Vec<String> = status_map(dependency)
            .into_iter()
            .map(|(platform, status)| format!("{}: {}", platform, status))
            .collect();
        if statuses.is_empty() {
            println!("{}", dependency.name);
        } else {
            println!("{} ({})", dependency.name, statuses.join(", "));
        }
    }
    Ok(())
}

fn status_label(state: &LinkState) -> Option<&'static str> {
    match state {
        LinkState::AlreadyLinked | LinkState::Linked => Some("linked"),
        LinkState::Pending | LinkState::NotLinked | LinkState::Unlinked => Some("not linked"),
        LinkState::Failed { .. } | LinkState::NeedsManualLinking { .. } => Some("unknown"),
        LinkState::NotApplicable => None,
    }
}

fn status_map(dependency: &DependencyReport) -> BTreeMap<&'static str, &'static str> {
    let mut map: BTreeMap<&'static str, &'static str> = dependency
        .outcomes
        .iter()
        .filter_map(|o| status_label(&o.state).map(|label| (o.platform.as_str(), label)))
        .collect();
    if dependency.error.is_some() && map.is_empty() {
        map.insert("error", "unresolved");
    }
    map
}
