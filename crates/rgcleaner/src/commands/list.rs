use colored::Colorize;
use rgcleaner_core::CleanerTools;

pub async fn handle(
    tools: &dyn CleanerTools,
    include_excluded: bool,
    json: bool,
) -> anyhow::Result<()> {
    let listing = tools.list_resource_groups(include_excluded).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.groups.is_empty() {
        println!("{}", "No resource groups found".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!("{:<50} {:<20} {:<10}", "NAME", "LOCATION", "STATUS").bold()
    );
    println!("{}", "─".repeat(80).dimmed());

    for group in &listing.groups {
        let status = if group.is_excluded {
            "excluded".yellow()
        } else if group.is_demo {
            "demo".green()
        } else {
            "-".dimmed()
        };
        let name = if group.is_excluded {
            group.name.dimmed()
        } else {
            group.name.cyan()
        };
        println!("{:<50} {:<20} {:<10}", name, group.location, status);
    }

    println!();
    println!(
        "Total: {}  Excluded: {}  Demo: {}",
        listing.total.to_string().bold(),
        listing.excluded.to_string().yellow(),
        listing.demos.to_string().green()
    );

    Ok(())
}
