//! GitHub organization import screen

use anyhow::Context;
use cf_github::{GithubClient, ImportService, ImportSummary, ServiceSink};

use crate::prompt;
use crate::App;

/// Interactive entry point from the main menu.
pub async fn interactive_import(app: &App) {
    let default_org = app.config.github.organization.clone();
    let organization =
        prompt::optional(&format!("Organization [{default_org}]: ")).unwrap_or(default_org);

    if let Err(error) = run_import(app, Some(organization), None, false).await {
        prompt::show_error(&format!("{error:#}"));
    }
    prompt::pause();
}

/// Runs the import, falling back to configured defaults for the
/// organization and token. `yes` skips the confirmation prompt.
pub async fn run_import(
    app: &App,
    org: Option<String>,
    token: Option<String>,
    yes: bool,
) -> anyhow::Result<()> {
    let organization = org.unwrap_or_else(|| app.config.github.organization.clone());
    let token = token.or_else(|| app.config.github.token.clone());

    println!("\n=== GitHub Repository Import ===");
    println!("Organization: {organization}");
    match &token {
        Some(_) => println!("Token: [CONFIGURED]"),
        None => println!("Token: [NOT SET - Using unauthenticated requests (60 req/hour limit)]"),
    }

    if !yes {
        let proceed = prompt::confirm("Do you want to proceed with importing repositories? (y/n): ");
        if !proceed {
            println!("Import cancelled.");
            return Ok(());
        }
    }

    println!("Starting import...");
    let client = GithubClient::new(app.config.github.api_url.clone(), token)
        .context("failed to build the GitHub client")?;
    let service = ImportService::new(client, ServiceSink::new(app.sql.clone()));

    let summary = service
        .import_organization(&organization)
        .await
        .context("import failed")?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ImportSummary) {
    println!("\n=== Import Results ===");
    println!("Total repositories found: {}", summary.total_repositories);
    println!("Successfully imported: {}", summary.imported);
    println!("Failed: {}", summary.failed);
    println!("Skipped (existing): {}", summary.skipped_existing);
    println!("Skipped (archived): {}", summary.skipped_archived);
    if !summary.errors.is_empty() {
        println!("Errors:");
        for error in &summary.errors {
            println!("  - {error}");
        }
    }
    println!("Import completed!");
}
