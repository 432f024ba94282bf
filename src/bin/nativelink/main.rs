//! nativelink CLI - links native modules into mobile app projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, MessageFormat};
use nativelink::util::{GlobalContext, Shell};

/// Options every command receives.
pub struct GlobalOptions {
    pub shell: Shell,
    pub root: Option<std::path::PathBuf>,
}

impl GlobalOptions {
    /// Context for the app root given on the command line, or the nearest
    /// one above the current directory.
    pub fn context(&self) -> Result<GlobalContext> {
        match &self.root {
            Some(root) => GlobalContext::discover(root),
            None => GlobalContext::new(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let shell = Shell::from_flags(
        cli.quiet,
        cli.verbose,
        cli.color,
        cli.message_format == MessageFormat::Json,
    );

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("nativelink=debug")
    } else if cli.quiet || shell.is_json() {
        EnvFilter::new("nativelink=error")
    } else {
        EnvFilter::new("nativelink=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let global_opts = GlobalOptions {
        shell,
        root: cli.root,
    };

    if let Err(e) = run(cli.command, &global_opts) {
        global_opts.shell.error(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(command: Commands, global_opts: &GlobalOptions) -> Result<()> {
    match command {
        Commands::Link(args) => commands::link::execute(args, global_opts),
        Commands::Unlink(args) => commands::unlink::execute(args, global_opts),
        Commands::List(args) => commands::list::execute(args, global_opts),
        Commands::Config(args) => commands::config::execute(args, global_opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
