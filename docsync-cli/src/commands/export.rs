//! Export command
//!
//! Reads a Swagger document, checks that it parses, and writes it to
//! `<out>/openapi.json`.

use colored::Colorize;
use docsync_schema::{SchemaError, SwaggerDocument};
use std::fs;
use std::path::Path;

use crate::error::CliResult;

pub fn execute(file: &Path, out: &Path, quiet: bool) -> CliResult<()> {
    let content = fs::read_to_string(file)?;
    let document: SwaggerDocument = serde_json::from_str(&content).map_err(SchemaError::from)?;

    let written = document.export(out)?;

    if !quiet {
        println!(
            "{} Wrote {} ({} paths)",
            "✓".green().bold(),
            written.display().to_string().bold(),
            document.paths.len()
        );
    }

    Ok(())
}
