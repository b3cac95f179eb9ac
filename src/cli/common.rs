//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::PageEvent;
use crate::log;

/// Read the page manifest, from stdin when `path` is `-`.
pub fn read_manifest(path: &Path) -> Result<Vec<PageEvent>> {
    let (content, source) = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut buf)
            .context("Failed to read manifest from stdin")?;
        (buf, "stdin".to_string())
    } else {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest `{}`", path.display()))?;
        (content, path.display().to_string())
    };

    parse_manifest(&content).with_context(|| format!("Invalid page manifest in {source}"))
}

/// Parse a JSON array of `{ "path": ..., "context": {...} }`.
pub fn parse_manifest(content: &str) -> Result<Vec<PageEvent>> {
    Ok(serde_json::from_str(content)?)
}

/// Write command output to a file, or stdout when none is given.
pub fn write_output(content: &str, output: Option<&Path>, module: &str) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create `{}`", path.display()))?;
            writeln!(file, "{content}")?;
            log!(module; "wrote output to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
