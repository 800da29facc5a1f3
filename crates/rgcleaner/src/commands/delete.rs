use colored::Colorize;
use rgcleaner_core::{CleanerTools, DeletionOutcome, DeletionStatus};

pub async fn handle(
    tools: &dyn CleanerTools,
    names: Vec<String>,
    audit: bool,
    yes: bool,
    json: bool,
) -> anyhow::Result<()> {
    // Without --yes only the plan is shown
    let dry_run = audit || !yes;

    if !json {
        if dry_run {
            println!("{}", "Audit: nothing will be deleted".blue());
        } else {
            println!("{}", "Deleting resource groups...".blue().bold());
        }
    }

    let report = tools.delete_resource_groups(names, dry_run).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        for outcome in &report.results {
            print_outcome(outcome);
        }
        println!();
        println!("{}", report.summary().to_string().bold());
    }

    if !audit && !yes && !json {
        println!();
        println!(
            "{}",
            "Warning: deleting a resource group deletes every resource in it.".yellow()
        );
        println!("Run again with --yes to delete the groups marked audit");
    }

    if report.has_errors() {
        anyhow::bail!("{} deletion request(s) failed", report.summary().error);
    }

    Ok(())
}

fn print_outcome(outcome: &DeletionOutcome) {
    let status = match outcome.status {
        DeletionStatus::Skipped => "skipped".yellow(),
        DeletionStatus::Audit => "audit".cyan(),
        DeletionStatus::Deleting => "deleting".green(),
        DeletionStatus::Error => "error".red().bold(),
    };
    let detail = outcome
        .reason
        .as_deref()
        .or(outcome.message.as_deref())
        .unwrap_or_default();

    println!("  {:<10} {:<50} {}", status, outcome.name, detail.dimmed());
}
