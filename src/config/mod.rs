//! Project configuration for `redirect.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── snapshot   # [snapshot]
//! │   ├── edge       # [edge]
//! │   └── output     # [output]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # RedirectConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                           |
//! |---------------|---------------------------------------------------|
//! | `[snapshot]`  | Page id property, pages/redirects snapshot files  |
//! | `[edge]`      | Permanence, status code, path normalization       |
//! | `[output]`    | Output directory and redirect format              |
//!
//! The file is optional: without one, defaults apply and the project root
//! is the current directory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{EdgeConfig, OutputConfig, OutputFormat, SnapshotConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing redirect.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedirectConfig {
    /// Absolute path to the config file, empty when none was found
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub edge: EdgeConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl RedirectConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when there is none.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path, Self::can_prompt(cli))?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_command_options(cli);
        config.validate()?;
        config.normalize_paths();

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    ///
    /// Unknown fields ask for confirmation when `interactive`, otherwise
    /// they are reported and ignored.
    fn from_path(path: &Path, interactive: bool) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !interactive {
                log!("warning"; "no terminal to confirm, continuing");
            } else if !Self::prompt_continue()? {
                bail!("Aborted due to unknown config fields");
            }
        }

        Ok(config)
    }

    /// Prompting needs a terminal on stdin that the manifest is not using.
    fn can_prompt(cli: &Cli) -> bool {
        use std::io::IsTerminal;
        !cli.reads_stdin() && std::io::stdin().is_terminal()
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args, .. } => self.apply_build_args(build_args),
            Commands::List { .. } | Commands::Check { .. } => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.output.format, args.format.as_ref());
        Self::update_option(&mut self.output.dir, args.output.as_ref());
        Self::update_option(&mut self.snapshot.page_id, args.page_id.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve snapshot files and the output directory against the root.
    ///
    /// `output.file` stays relative; sinks resolve it inside `output.dir`.
    fn normalize_paths(&mut self) {
        use crate::utils::path::normalize_path;

        self.root = normalize_path(&self.root);
        if !self.config_path.as_os_str().is_empty() {
            self.config_path = normalize_path(&self.config_path);
        }
        self.snapshot.pages = normalize_path(&self.root.join(&self.snapshot.pages));
        self.snapshot.redirects = normalize_path(&self.root.join(&self.snapshot.redirects));
        self.output.dir = normalize_path(&self.root.join(&self.output.dir));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.snapshot.validate(&mut diag);
        self.edge.validate(&mut diag);
        self.output.validate(&mut diag);

        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> RedirectConfig {
    let (parsed, ignored) = RedirectConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
