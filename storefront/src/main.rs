//! Storefront CLI entry-point: wires configuration, the catalogue client,
//! and the durable state store into a session and runs one command.

use std::ffi::OsString;
use std::io::{self, Write};

use clap::Parser;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use storefront::cli::{self, Cli};
use storefront::config::StorefrontSettings;

/// Application bootstrap.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Cli::parse();
    let settings = StorefrontSettings::load_from_iter([OsString::from("storefront")])?;

    let output = cli::run(args, &settings).await?;
    writeln!(io::stdout().lock(), "{output}")?;
    Ok(())
}
