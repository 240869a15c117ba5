//! piazza command-line entry point
//!
//! Logs in with the given credentials and runs one command against the
//! account: resolving `piazza://` addresses, listing class resources, or
//! opting out of emails.

use anyhow::Context;
use clap::{Parser, Subcommand};
use piazza_api::config::{load_config, Config};
use piazza_api::resources::fetch_resources;
use piazza_api::{HtmlResolver, RpcClient};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// piazza: a command-line client for Piazza
///
/// Logs in through the web login form and talks to the same API the
/// Piazza web UI uses.
#[derive(Parser, Debug)]
#[command(name = "piazza")]
#[command(version)]
#[command(about = "A command-line client for Piazza", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Piazza username (email address)
    #[arg(long)]
    username: String,

    /// Piazza password
    #[arg(long)]
    password: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve piazza:// addresses to HTML, in order, with one resolver
    Get {
        /// Addresses such as piazza://, piazza://<class> or piazza://<class>/<post>
        #[arg(value_name = "ADDRESS", required = true)]
        addresses: Vec<String>,
    },

    /// Stop new-post emails in every class
    OptOutEmails,

    /// List the resources embedded in a class resource page
    Resources {
        /// URL of the class resource page
        #[arg(value_name = "URL")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let client = RpcClient::connect(config, &cli.username, &cli.password)
        .await
        .context("login failed")?;

    match cli.command {
        Command::Get { addresses } => handle_get(client, &addresses).await,
        Command::OptOutEmails => handle_opt_out(client).await,
        Command::Resources { url } => handle_resources(&client, &url).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("piazza_api=info,warn"),
            1 => EnvFilter::new("piazza_api=debug,info"),
            2 => EnvFilter::new("piazza_api=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves each address and prints its HTML
async fn handle_get(client: RpcClient, addresses: &[String]) -> anyhow::Result<()> {
    let mut resolver = HtmlResolver::new(client);
    for address in addresses {
        let html = resolver
            .get(address)
            .await
            .with_context(|| format!("failed to resolve {}", address))?;
        print!("{}", html);
    }
    Ok(())
}

/// Rewrites the email preferences of every class
async fn handle_opt_out(mut client: RpcClient) -> anyhow::Result<()> {
    let updated = client
        .opt_out_of_emails()
        .await
        .context("failed to update email preferences")?;
    println!("Opted out of emails in {} classes", updated);
    Ok(())
}

/// Prints one line per resource
async fn handle_resources(client: &RpcClient, url: &str) -> anyhow::Result<()> {
    let resources = fetch_resources(client.session(), url)
        .await
        .with_context(|| format!("failed to read resources from {}", url))?;

    for resource in resources {
        println!(
            "{}\t{}\t{}\t{}",
            resource.config.section, resource.created, resource.subject, resource.content
        );
    }
    Ok(())
}
