use colored::Colorize;
use rgcleaner_azure::AzureProvider;
use rgcleaner_core::{Cleaner, CleanerConfig};

pub async fn handle(
    cleaner: &Cleaner<AzureProvider>,
    config: &CleanerConfig,
) -> anyhow::Result<()> {
    println!("{}", "Checking environment...".blue());
    println!();

    let mut healthy = true;

    match cleaner.provider().check_auth().await {
        Ok(account) => {
            println!("{} az CLI logged in", "✓".green());
            println!("  Subscription: {} ({})", account.name.cyan(), account.id);
            if let Some(user) = account.user {
                println!("  User: {}", user.name);
            }
        }
        Err(e) => {
            healthy = false;
            println!("{} az CLI not ready: {}", "✗".red(), e);
            println!("  Run {} and try again", "az login".cyan());
        }
    }
    if let Some(subscription) = cleaner.provider().cli().subscription() {
        println!("  Target subscription override: {}", subscription.cyan());
    }

    let list = cleaner.exclusion_list();
    if list.path().exists() {
        let patterns = list.load().await;
        println!(
            "{} Exclusion list: {} ({} user pattern(s))",
            "✓".green(),
            list.path().display().to_string().cyan(),
            patterns.user_rule_count()
        );
    } else {
        println!(
            "{} Exclusion list not found: {} (built-in patterns only)",
            "•".yellow(),
            list.path().display().to_string().dimmed()
        );
    }

    println!(
        "{} Pacing between deletions: {} ms",
        "•".blue(),
        config.pacing.as_millis()
    );

    if !healthy {
        anyhow::bail!("environment check failed");
    }
    Ok(())
}
