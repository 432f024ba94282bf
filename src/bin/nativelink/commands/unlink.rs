//! `nativelink unlink` command

use anyhow::Result;

use super::{diagnostic_error, print_report, Action};
use crate::cli::UnlinkArgs;
use crate::GlobalOptions;
use nativelink::ops::{unlink_all, LinkOptions};
use nativelink::platforms::PlatformRegistry;

pub fn execute(args: UnlinkArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = global_opts.context()?;

    let opts = LinkOptions {
        platforms: args.platforms,
        dry_run: args.dry_run,
    };
    let report = unlink_all(&ctx, &PlatformRegistry::builtin(), &args.names, &opts)
        .map_err(|e| diagnostic_error(e.to_diagnostic()))?;

    print_report(shell, &report, Action::Unlink);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use nativelink::core::PlatformId;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        unlink: UnlinkArgs,
    }

    #[test]
    fn test_unlink_requires_names() {
        assert!(TestCli::try_parse_from(["test"]).is_err());
    }

    #[test]
    fn test_unlink_args() {
        let args = TestCli::parse_from([
            "test",
            "react-native-camera",
            "--dry-run",
            "--platforms",
            "android",
        ])
        .unlink;
        assert_eq!(args.names, vec!["react-native-camera"]);
        assert_eq!(args.platforms, vec![PlatformId::Android]);
        assert!(args.dry_run);
    }
}
