// Copyright 2026 Escheat Contributors
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use escheat::driver::chromium::ChromiumDriver;
use escheat::{load_contacts, render, RegistryProfile, Result};

#[derive(Parser)]
#[command(
    name = "escheat",
    about = "Escheat — find unclaimed property for everyone you know",
    version
)]
struct Cli {
    /// Path to a Google Contacts CSV export.
    #[arg(long, value_name = "PATH")]
    contacts_file: PathBuf,
}

async fn run(cli: &Cli) -> Result<()> {
    let contacts = load_contacts(&cli.contacts_file)?;
    info!(
        "loaded {} contacts from {}",
        contacts.len(),
        cli.contacts_file.display()
    );

    let profile = RegistryProfile::default();
    let driver = ChromiumDriver::launch().await?;

    // Keep the browser teardown path even when aggregation fails.
    let result = escheat::aggregate(&driver, &profile, &contacts).await;
    if let Err(e) = driver.shutdown().await {
        warn!("browser shutdown failed: {e:#}");
    }
    let report = result?;

    print!("{}", render(&report));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("escheat=info"));

    // The report prints to stdout; everything else belongs on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = run(&cli).await;
    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }
    result
}
