use colored::Colorize;
use rgcleaner_core::{CleanerTools, PatternKind, PatternRule};

pub async fn handle(tools: &dyn CleanerTools, json: bool) -> anyhow::Result<()> {
    let report = tools.get_exclude_patterns().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Built-in exclusion patterns:".bold());
    for pattern in &report.built_in {
        println!("  • {}", pattern.cyan());
    }

    println!();
    println!("{} {}", "Exclusion list:".bold(), report.file_path.cyan());
    if report.from_file.is_empty() {
        println!("  {}", "(no user patterns)".dimmed());
    }
    for line in &report.from_file {
        if PatternRule::compile(line, PatternKind::Exclude).is_ok() {
            println!("  • {}", line.cyan());
        } else {
            println!("  • {} {}", line.red(), "(invalid regex, ignored)".dimmed());
        }
    }

    Ok(())
}
