//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use nativelink::core::PlatformId;
use nativelink::ops::parse_preset;
use nativelink::util::ColorChoice;

/// nativelink - Link native modules into mobile app projects
#[derive(Parser)]
#[command(name = "nativelink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto", value_parser = parse_color)]
    pub color: ColorChoice,

    /// Output format for messages
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// App root (defaults to the nearest directory holding package.json)
    #[arg(long, global = true, env = "NATIVELINK_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

fn parse_color(s: &str) -> Result<ColorChoice, String> {
    s.parse()
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    parse_preset(s)
}

fn parse_platform(s: &str) -> Result<PlatformId, String> {
    s.parse()
}

#[derive(Subcommand)]
pub enum Commands {
    /// Link native dependencies into the app
    Link(LinkArgs),

    /// Remove native dependencies from the app
    Unlink(UnlinkArgs),

    /// List native dependencies and their link status
    List(ListArgs),

    /// Print the resolved project and dependency configuration as JSON
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct LinkArgs {
    /// Dependencies to link (defaults to every discovered one)
    pub names: Vec<String>,

    /// Only link these platforms
    #[arg(long, value_delimiter = ',', value_parser = parse_platform)]
    pub platforms: Vec<PlatformId>,

    /// Show what would be linked without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Answer a dependency parameter (repeatable)
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Never prompt; use defaults for unanswered parameters
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct UnlinkArgs {
    /// Dependencies to unlink
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Only unlink these platforms
    #[arg(long, value_delimiter = ',', value_parser = parse_platform)]
    pub platforms: Vec<PlatformId>,

    /// Show what would be unlinked without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show these platforms
    #[arg(long, value_delimiter = ',', value_parser = parse_platform)]
    pub platforms: Vec<PlatformId>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Only print the host project configuration
    #[arg(long)]
    pub project_only: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
