//! `nativelink link` command

use std::io::IsTerminal;

use anyhow::Result;

use super::{diagnostic_error, print_report, Action};
use crate::cli::LinkArgs;
use crate::GlobalOptions;
use nativelink::ops::{link_all, InteractivePrompter, LinkOptions, ParamSession};
use nativelink::platforms::PlatformRegistry;
use nativelink::util::Status;

pub fn execute(args: LinkArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = global_opts.context()?;
    let registry = PlatformRegistry::builtin();

    let mut presets = ctx.config().params.clone();
    presets.extend(args.params.iter().cloned());
    let interactive = !args.yes && !shell.is_json() && std::io::stdin().is_terminal();
    let mut session = if interactive {
        ParamSession::new(presets, Box::new(InteractivePrompter))
    } else {
        ParamSession::non_interactive(presets)
    };

    let opts = link_options(&args);
    shell.status(Status::Resolving, ctx.root().display());
    let report = link_all(&ctx, &registry, &args.names, &mut session, &opts)
        .map_err(|e| diagnostic_error(e.to_diagnostic()))?;

    if report.dependencies.is_empty() {
        shell.status(Status::Info, "no native dependencies found");
        return Ok(());
    }
    print_report(shell, &report, Action::Link);
    Ok(())
}

fn link_options(args: &LinkArgs) -> LinkOptions {
    LinkOptions {
        platforms: args.platforms.clone(),
        dry_run: args.dry_run,
    }
}
