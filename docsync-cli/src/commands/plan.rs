//! Plan command
//!
//! Shows which folders a push would create. Nothing is created.

use colored::Colorize;
use docsync_apifox::{ApifoxClient, ParentRef};

use crate::SyncArgs;
use crate::error::CliResult;
use crate::settings::Settings;

pub async fn execute(args: &SyncArgs) -> CliResult<()> {
    let (config, request) = Settings::load(args.config.as_deref())?.resolve(args);
    request.validate()?;

    let Some(path) = request.folder_path() else {
        println!("{} No folder requested, documents go to the project root", "✓".green());
        return Ok(());
    };

    let client = ApifoxClient::from_config(config)?;
    let plan = client.plan_folders(&request).await?;

    if let Some(id) = plan.resolved() {
        println!("{} {} already exists (#{})", "✓".green(), path.to_string().bold(), id);
        return Ok(());
    }

    println!(
        "{} {} needs {} new folder(s):",
        "→".bright_cyan(),
        path.to_string().bold(),
        plan.steps().len()
    );
    for step in plan.steps() {
        let parent = match step.parent {
            ParentRef::Existing(id) => format!("#{}", id),
            ParentRef::Planned(index) => format!("new `{}`", plan.steps()[index].name),
        };
        println!("  {} {} under {}", "+".green(), step.name.bold(), parent.dimmed());
    }

    Ok(())
}
