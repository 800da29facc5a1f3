use colored::Colorize;
use rgcleaner_core::CleanerTools;

pub async fn handle(tools: &dyn CleanerTools, json: bool) -> anyhow::Result<()> {
    let report = tools.detect_demo_rgs().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{} of {} resource groups look temporary",
            report.demo_count, report.total_groups
        )
        .bold()
    );
    if report.demo_groups.is_empty() {
        return Ok(());
    }

    println!();
    for group in &report.demo_groups {
        println!(
            "  • {} ({}) {}",
            group.name.cyan(),
            group.location,
            format!("[{}]", group.matched_patterns.join(", ")).dimmed()
        );
    }

    println!();
    println!("Preview with: rgcleaner delete <NAMES>... --audit");

    Ok(())
}
