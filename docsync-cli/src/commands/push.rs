//! Push command
//!
//! Imports a Swagger document into an Apifox project.

use colored::Colorize;
use docsync_apifox::ApifoxClient;
use std::path::Path;

use crate::SyncArgs;
use crate::error::CliResult;
use crate::settings::Settings;

pub async fn execute(file: &Path, args: &SyncArgs, quiet: bool) -> CliResult<()> {
    let (config, request) = Settings::load(args.config.as_deref())?.resolve(args);
    request.validate()?;

    if !quiet {
        println!(
            "{} Pushing {} to project {}",
            "→".bright_cyan(),
            file.display().to_string().bold(),
            request.project_id.bold()
        );
    }

    let client = ApifoxClient::from_config(config)?;
    let outcome = client.sync_file(&request, file).await?;

    if quiet {
        return Ok(());
    }

    for folder in &outcome.created_folders {
        println!(
            "  {} Created folder {} (#{}, parent #{})",
            "+".green(),
            folder.name.bold(),
            folder.id,
            folder.parent_id
        );
    }

    let target = match outcome.folder_id {
        Some(id) => format!("folder #{}", id),
        None => "project root".to_string(),
    };
    println!("{} Imported into {}", "✓".green().bold(), target);

    Ok(())
}
