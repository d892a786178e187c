//! CLI administration tool for kv-shortener.
//!
//! Talks to the store directly, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link
//! cargo run --bin admin -- create https://example.com/page --alias promo --expires-in 3600
//!
//! # Show a link and its click count
//! cargo run --bin admin -- inspect promo
//!
//! # Check store connection
//! cargo run --bin admin -- ping
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `kv_shortener::config`. `STORE_BACKEND=memory` is
//! rejected because an in-process store is not shared with the server.

use kv_shortener::application::services::LinkService;
use kv_shortener::config::{self, StoreBackend, mask_connection_string};
use kv_shortener::domain::entities::LinkRecord;
use kv_shortener::domain::repositories::KeyValueStore;
use kv_shortener::infrastructure::store::RedisStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing kv-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Create {
        /// Destination URL
        long_url: String,

        /// Custom short code (3-20 characters: letters, digits, '_' or '-')
        #[arg(short, long)]
        alias: Option<String>,

        /// Lifetime in seconds
        #[arg(short, long)]
        expires_in: Option<u64>,
    },

    /// Show a link and its click count
    Inspect {
        /// Short code or alias
        code: String,
    },

    /// Check store connection
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    if config.store_backend == StoreBackend::Memory {
        anyhow::bail!("The admin tool needs STORE_BACKEND=redis");
    }

    let store = RedisStore::connect(&config.redis_url, config.store_timeout())
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&config.redis_url)
            )
        })?;
    let store: Arc<dyn KeyValueStore> = Arc::new(store);

    // The admin tool never redirects, so nobody consumes click events.
    let (click_tx, _click_rx) = mpsc::channel(1);
    let service = LinkService::new(store.clone(), click_tx, config.base_url.clone());

    let result = match cli.command {
        Commands::Create {
            long_url,
            alias,
            expires_in,
        } => create_link(&service, &long_url, alias.as_deref(), expires_in).await,
        Commands::Inspect { code } => inspect_link(&service, &code).await,
        Commands::Ping => ping(store.as_ref(), &config.redis_url).await,
    };

    store.close().await;
    result
}

async fn create_link(
    service: &LinkService,
    long_url: &str,
    alias: Option<&str>,
    expires_in: Option<u64>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let record = service
        .create(long_url, alias, expires_in)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    print_record(service, &record);

    Ok(())
}

async fn inspect_link(service: &LinkService, code: &str) -> Result<()> {
    println!("{}", "🔍 Inspect Link".bright_blue().bold());
    println!();

    let record = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Lookup failed for '{}': {}", code, e))?;

    print_record(service, &record);

    Ok(())
}

/// Checks that the store answers.
async fn ping(store: &dyn KeyValueStore, redis_url: &str) -> Result<()> {
    println!("{}", "🔌 Checking store connection...".bright_blue());

    if store.health_check().await {
        println!("{}", "✅ Store connection OK".green().bold());
        println!("  URL: {}", mask_connection_string(redis_url).bright_black());
        Ok(())
    } else {
        anyhow::bail!("Store did not answer PING")
    }
}

fn print_record(service: &LinkService, record: &LinkRecord) {
    println!(
        "  Short URL:  {}",
        service.short_url(&record.short_code).bright_yellow().bold()
    );
    println!("  Target:     {}", record.long_url.cyan());
    println!(
        "  Created:    {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!(
        "  Clicks:     {}",
        record.click_count.to_string().bright_white().bold()
    );
    match record.expires_at {
        Some(at) => println!(
            "  Expires:    {}",
            at.format("%Y-%m-%d %H:%M:%S UTC").to_string().yellow()
        ),
        None => println!("  Expires:    {}", "never".bright_black()),
    }
    println!();
}
