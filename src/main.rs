//! autoredirect - keeps old page urls alive across static site builds.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod redirect;
mod session;
mod sink;
mod snapshot;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::RedirectConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = RedirectConfig::load(&cli)?;

    match &cli.command {
        Commands::Build {
            manifest,
            build_args,
        } => cli::build::run_build(&config, manifest, build_args.dry).map(|_| ()),
        Commands::List { args } => cli::list::run_list(&config, args),
        Commands::Check { args } => cli::check::run_check(&config, args),
    }
}
