//! Command-line entry point for **certdns**
//!
//! * Parses `--config` (or `CERTDNS_CONFIG`) and a subcommand
//! * Sets up tracing with a compact formatter
//! * Hands the actual work to `certdns_core::ops`

use anyhow::Result;
use certdns_core::{build_provider, load_config, ops};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// CLI options
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the config file (optional; environment variables are used if absent)
    #[arg(short, long, env = "CERTDNS_CONFIG", default_value = "certdns.toml")]
    config: String,

    /// Zone passed to the provider; overrides `provider.zone`
    #[arg(long, global = true)]
    zone: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Upload a certificate together with its private key
    Upload {
        /// PEM encoded certificate (chain)
        #[arg(long)]
        cert: PathBuf,
        /// PEM encoded private key
        #[arg(long)]
        key: PathBuf,
    },
    /// Remove certificates by id
    Remove {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List the records of the zone
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().compact())
        .init();

    let cfg = load_config(&cli.config)?;
    let zone = cli.zone.unwrap_or_else(|| cfg.provider.zone.clone());
    let provider = build_provider(&cfg.provider)?;

    match cli.cmd {
        Cmd::Upload { cert, key } => {
            ops::upload_certificate(provider.as_ref(), &zone, &cert, &key).await?;
        }
        Cmd::Remove { ids } => {
            for rec in ops::remove_certificates(provider.as_ref(), &zone, &ids).await? {
                info!("removed certificate {}", rec.value);
            }
        }
        Cmd::List => {
            for rec in ops::list_records(provider.as_ref(), &zone).await? {
                info!("{} {} {} {:?}", rec.rtype, rec.name, rec.value, rec.ttl);
            }
        }
    }
    Ok(())
}
