mod commands;

use clap::{Parser, Subcommand};
use rgcleaner_azure::AzureProvider;
use rgcleaner_core::{Cleaner, CleanerConfig, find_exclusion_list};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rgcleaner")]
#[command(about = "Find and safely delete temporary Azure resource groups", long_about = None)]
struct Cli {
    /// Exclusion list file (one regex per line, `#` for comments)
    #[arg(long, global = true, env = "EXCLUDE_LIST_PATH")]
    exclude_list: Option<PathBuf>,

    /// Azure subscription ID (defaults to the az CLI's current subscription)
    #[arg(long, global = true, env = "AZURE_SUBSCRIPTION_ID")]
    subscription: Option<String>,

    /// Delay between deletion requests in milliseconds
    #[arg(
        long,
        global = true,
        env = "RGCLEANER_PACING_MS",
        default_value_t = 500
    )]
    pacing_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resource groups with demo and exclusion status
    List {
        /// Hide resource groups protected by an exclusion pattern
        #[arg(long)]
        exclude_excluded: bool,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Delete resource groups (excluded groups are always skipped)
    Delete {
        /// Resource group names
        #[arg(required = true)]
        names: Vec<String>,
        /// Simulate the deletion without deleting anything
        #[arg(short, long)]
        audit: bool,
        /// Actually delete (without it only the plan is shown)
        #[arg(short, long)]
        yes: bool,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Show the built-in and user exclusion patterns
    Patterns {
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Show resource groups that look temporary
    Detect {
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Start the MCP server (stdio)
    Mcp,
    /// Start the HTTP server (MCP endpoint and Azure Functions routes)
    Serve {
        /// Listen address (FUNCTIONS_CUSTOMHANDLER_PORT takes precedence)
        #[arg(long, default_value = "127.0.0.1:7071")]
        bind: SocketAddr,
    },
    /// Check the az CLI login and the resolved configuration
    Doctor,
    /// Show version
    Version,
}

impl Cli {
    fn config(&self) -> CleanerConfig {
        CleanerConfig::default()
            .with_exclude_list(find_exclusion_list(self.exclude_list.clone()))
            .with_pacing(Duration::from_millis(self.pacing_ms))
    }

    fn provider(&self) -> AzureProvider {
        AzureProvider::new(self.subscription.clone())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    // stdout carries JSON-RPC, so MCP mode logs to a file
    match &cli.command {
        Commands::Mcp => init_file_logging(),
        Commands::Serve { .. } => init_stderr_logging("info"),
        _ => init_stderr_logging("warn"),
    }

    let cleaner = Cleaner::new(cli.provider(), &config);

    match cli.command {
        Commands::List {
            exclude_excluded,
            json,
        } => {
            commands::list::handle(&cleaner, !exclude_excluded, json).await?;
        }
        Commands::Delete {
            names,
            audit,
            yes,
            json,
        } => {
            commands::delete::handle(&cleaner, names, audit, yes, json).await?;
        }
        Commands::Patterns { json } => {
            commands::patterns::handle(&cleaner, json).await?;
        }
        Commands::Detect { json } => {
            commands::detect::handle(&cleaner, json).await?;
        }
        Commands::Serve { bind } => {
            let addr = rgcleaner_http::listen_addr(bind);
            rgcleaner_http::serve(addr, Arc::new(cleaner)).await?;
        }
        Commands::Doctor => {
            commands::doctor::handle(&cleaner, &config).await?;
        }
        Commands::Version => {
            println!("rgcleaner {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Mcp => {
            tracing::info!(
                "Starting MCP server (exclusion list: {})",
                config.exclude_list.display()
            );
            rgcleaner_mcp::run_server(Arc::new(cleaner)).await?;
        }
    }

    Ok(())
}

fn init_stderr_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn init_file_logging() {
    use std::fs::OpenOptions;

    let log_path = std::env::temp_dir().join("rgcleaner-mcp.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .ok();

    if let Some(file) = log_file {
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_ansi(false)
            .init();
    }
}
