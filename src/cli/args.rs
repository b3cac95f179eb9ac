//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

/// Keep old page urls alive across static site builds
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: redirect.toml)
    #[arg(short = 'C', long, global = true, default_value = "redirect.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Update redirects from the pages rendered by a build
    #[command(visible_alias = "b")]
    Build {
        /// Page manifest (JSON array of `{path, context}`), `-` for stdin
        #[arg(value_name = "MANIFEST", value_hint = clap::ValueHint::FilePath)]
        manifest: PathBuf,

        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the persisted redirects as JSON
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        args: ListArgs,
    },

    /// Check the persisted redirects for chains, cycles and dead targets
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Where final redirects are registered
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Page context property holding the page id
    #[arg(short = 'i', long = "page-id")]
    pub page_id: Option<String>,

    /// Compute redirects without registering or saving anything
    #[arg(short = 'n', long)]
    pub dry: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// List command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ListArgs {
    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Report problems without failing
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}

impl Cli {
    /// The build manifest is piped through stdin.
    pub fn reads_stdin(&self) -> bool {
        matches!(&self.command, Commands::Build { manifest, .. } if manifest.as_os_str() == "-")
    }
}
