//! MedShare CLI
//!
//! Command-line interface for storing and inspecting shared medical records.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medshare_api::{ApiConfig, ApiServer};
use medshare_core::constants::*;
use medshare_core::types::{Cid, CidStats, Content, Credentials};
use medshare_pinning::{read_file_upload, ContentStore, PinataClient, PinataConfig};

/// MedShare - content-addressed storage for shared medical records
#[derive(Parser)]
#[command(name = "medshare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(flatten)]
    pinata: PinataArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Pinning service settings, each falling back to its environment variable.
#[derive(Args)]
struct PinataArgs {
    /// Pinata API key
    #[arg(long, global = true, env = "PINATA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Pinata API secret
    #[arg(long, global = true, env = "PINATA_SECRET_API_KEY", hide_env_values = true)]
    api_secret: Option<String>,

    /// Pinata JWT, preferred over the key pair
    #[arg(long, global = true, env = "PINATA_JWT", hide_env_values = true)]
    jwt: Option<String>,

    /// Gateway base URL
    #[arg(long, global = true, env = "PINATA_GATEWAY_URL")]
    gateway_url: Option<String>,

    /// REST API base URL
    #[arg(long, global = true, env = "PINATA_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "PINATA_TIMEOUT_SECONDS")]
    timeout: Option<u64>,
}

impl PinataArgs {
    /// Layers the flags over the environment and `.env` configuration.
    fn into_config(self) -> Result<PinataConfig> {
        let mut config = PinataConfig::from_env().context("Failed to load Pinata configuration")?;

        if let Some(credentials) = Credentials::from_parts(self.api_key, self.api_secret, self.jwt) {
            config = config.with_credentials(Some(credentials));
        }
        if let Some(url) = self.gateway_url {
            config = config.with_gateway_url(url);
        }
        if let Some(url) = self.api_url {
            config = config.with_api_url(url);
        }
        if let Some(seconds) = self.timeout {
            config = config.with_timeout(seconds);
        }

        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Store a JSON document (use "-" for stdin)
    UploadJson {
        /// JSON file to store
        input: String,
        /// Pin name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Store a file
    UploadFile {
        /// File to store
        path: PathBuf,
        /// Pin name (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Retrieve content by CID
    Get {
        /// Content identifier
        cid: Cid,
        /// Write the content to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether a CID is pinned
    Pinned {
        /// Content identifier
        cid: Cid,
    },

    /// Unpin a CID
    Unpin {
        /// Content identifier
        cid: Cid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List pins
    Pins {
        /// Only pins whose CID contains this value
        #[arg(long)]
        cid: Option<Cid>,
    },

    /// Show access statistics
    Stats {
        /// Content identifiers, reported in the order given
        #[arg(required = true)]
        cids: Vec<String>,
    },

    /// Print the public gateway URL for a CID
    Gateway {
        /// Content identifier
        cid: String,
    },

    /// Run the API server
    Serve {
        /// Bind address
        #[arg(short, long, env = "MEDSHARE_BIND")]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let config = cli.pinata.into_config()?;
    let client = PinataClient::with_config(config).context("Failed to build Pinata client")?;

    match cli.command {
        Commands::UploadJson { input, name } => cmd_upload_json(&client, &input, name).await,
        Commands::UploadFile { path, name } => cmd_upload_file(&client, &path, name).await,
        Commands::Get { cid, output } => cmd_get(&client, &cid, output).await,
        Commands::Pinned { cid } => cmd_pinned(&client, &cid).await,
        Commands::Unpin { cid, yes } => cmd_unpin(&client, &cid, yes).await,
        Commands::Pins { cid } => cmd_pins(&client, cid).await,
        Commands::Stats { cids } => cmd_stats(&client, cids).await,
        Commands::Gateway { cid } => {
            println!("{}", client.gateway_url(&Cid::new(cid)));
            Ok(())
        }
        Commands::Serve { bind } => cmd_serve(client.config().clone(), bind).await,
    }
}

fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        "medshare=debug,info"
    } else {
        "medshare=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn print_stored(client: &PinataClient, cid: &Cid) {
    println!("\n{}", "✅ Stored:".green().bold());
    println!("   {} {}", "CID:".yellow(), cid);
    println!("   {} {}", "Gateway:".dimmed(), client.gateway_url(cid));
}

/// Store a JSON document
async fn cmd_upload_json(client: &PinataClient, input: &str, name: Option<String>) -> Result<()> {
    let raw = if input == "-" {
        tokio::task::spawn_blocking(|| std::io::read_to_string(std::io::stdin()))
            .await?
            .context("Failed to read stdin")?
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read {}", input))?
    };
    let data: serde_json::Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;

    let pb = spinner("Uploading JSON...")?;
    let result = client.upload_json(&data, name.as_deref()).await;
    pb.finish_and_clear();

    let cid = result.context("Upload failed")?;
    print_stored(client, &cid);
    Ok(())
}

/// Store a file
async fn cmd_upload_file(client: &PinataClient, path: &Path, name: Option<String>) -> Result<()> {
    let file = read_file_upload(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    println!(
        "{} {} ({}, {} bytes)",
        "📤 Uploading".cyan().bold(),
        file.file_name,
        file.content_type,
        file.size()
    );

    let pb = spinner("Uploading file...")?;
    let result = client.upload_file(file, name.as_deref()).await;
    pb.finish_and_clear();

    let cid = result.context("Upload failed")?;
    print_stored(client, &cid);
    Ok(())
}

/// Retrieve content
async fn cmd_get(client: &PinataClient, cid: &Cid, output: Option<PathBuf>) -> Result<()> {
    let content = client
        .get_content(cid)
        .await
        .context("Failed to retrieve content")?;

    match (output, &content) {
        (Some(path), _) => {
            tokio::fs::write(&path, content.to_bytes()).await?;
            println!("{} {}", "✅ Content saved to:".green(), path.display());
        }
        (None, Content::Json { value, .. }) => println!("{}", serde_json::to_string_pretty(value)?),
        (None, Content::Raw { content_type, data }) => {
            let content_type = content_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE);
            println!("{} {} bytes of {}", "ℹ️ ".cyan(), data.len(), content_type);
            println!("   Use --output to save binary content.");
        }
    }

    Ok(())
}

/// Check pin status
async fn cmd_pinned(client: &PinataClient, cid: &Cid) -> Result<()> {
    let pinned = client
        .check_pinned(cid)
        .await
        .context("Failed to query pin status")?;

    if pinned {
        println!("{} {} is pinned", "📌".green(), cid);
    } else {
        println!("{} {} is not pinned", "⚪".yellow(), cid);
    }
    Ok(())
}

/// Unpin a CID
async fn cmd_unpin(client: &PinataClient, cid: &Cid, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Unpin {}? The content may stop being served.", cid))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    client.try_unpin(cid).await.context("Unpin failed")?;
    println!("{} {}", "✅ Unpinned:".green(), cid);
    Ok(())
}

/// List pins
async fn cmd_pins(client: &PinataClient, cid: Option<Cid>) -> Result<()> {
    let list = client
        .pin_list(cid.as_ref())
        .await
        .context("Failed to list pins")?;

    println!("{} {} pin(s)", "📋".cyan(), list.count);
    for row in &list.rows {
        let pinned = row
            .date_pinned
            .map(|d| d.to_rfc3339())
            .unwrap_or_else(|| "-".into());
        println!(
            "   {} {} {} {}",
            row.ipfs_pin_hash.to_string().yellow(),
            row.display_name(),
            format!("{} bytes", row.size).dimmed(),
            pinned.dimmed()
        );
    }
    Ok(())
}

/// Show access statistics
async fn cmd_stats(client: &PinataClient, cids: Vec<String>) -> Result<()> {
    let cids: Vec<Cid> = cids.into_iter().map(Cid::new).collect();

    let pb = spinner("Fetching pin metadata...")?;
    let logs = client.access_logs(&cids).await;
    pb.finish_and_clear();

    for stats in &logs {
        print_stats(stats);
    }
    Ok(())
}

fn print_stats(stats: &CidStats) {
    println!("\n{} {}", "📊".cyan(), stats.cid.to_string().bold());
    if let Some(error) = &stats.error {
        println!("   {} {}", "Unavailable:".red(), error);
        return;
    }
    println!("   {} {}", "Name:".dimmed(), stats.name);
    if let Some(status) = &stats.status {
        println!("   {} {}", "Status:".dimmed(), status);
    }
    println!("   {} {} bytes", "Size:".dimmed(), stats.pin_size);
    println!("   {} {}", "Pinned:".dimmed(), stats.pin_date.to_rfc3339());
    println!(
        "   {} {} (estimate)",
        "Accesses:".dimmed(),
        stats.estimated_access_count
    );
    for region in &stats.regions {
        println!(
            "   {} {} {}/{}",
            "Region:".dimmed(),
            region.region_id,
            region.current_replication_count,
            region.desired_replication_count
        );
    }
}

/// Run API server
async fn cmd_serve(pinata: PinataConfig, bind: Option<SocketAddr>) -> Result<()> {
    let mut config = ApiConfig::from_env().context("Failed to load API configuration")?;
    config.pinata = pinata;
    if let Some(addr) = bind {
        config.bind_addr = addr;
    }

    println!("{}", "🚀 Starting MedShare API server...".cyan().bold());
    println!("   {} http://{}", "Listening on:".green(), config.bind_addr);
    println!("   {} http://{}/health", "Health check:".dimmed(), config.bind_addr);
    if !config.pinata.is_configured() {
        println!(
            "   {} set {} or {} and {}",
            "⚠️  No credentials:".yellow(),
            ENV_JWT,
            ENV_API_KEY,
            ENV_API_SECRET
        );
    }
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::from_config(&config).context("Failed to build API server")?;
    server.run(config.bind_addr).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_stats_keeps_argument_order() {
        let cli = Cli::try_parse_from(["medshare", "stats", "QmB", "QmA", "QmC"]).unwrap();
        match cli.command {
            Commands::Stats { cids } => assert_eq!(cids, vec!["QmB", "QmA", "QmC"]),
            _ => panic!("expected stats"),
        }
    }

    #[test]
    fn test_invalid_cid_rejected_at_parse() {
        assert!(Cli::try_parse_from(["medshare", "pinned", "not/a/cid"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "medshare",
            "pins",
            "--jwt",
            "token",
            "--gateway-url",
            "https://gw.example/ipfs",
        ])
        .unwrap();
        assert_eq!(cli.pinata.jwt.as_deref(), Some("token"));
        assert_eq!(cli.pinata.gateway_url.as_deref(), Some("https://gw.example/ipfs"));
    }
}
