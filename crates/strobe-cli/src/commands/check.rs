//! Check command implementation: config validation plus one remote probe.

use anyhow::Result;
use colored::Colorize;
use strobe_core::{Config, PhotoFeed};

/// Validate the loaded configuration and probe page 1 of the remote.
pub async fn execute(config: &Config) -> Result<()> {
    println!("{} {}", "config:".bold(), "ok".green());
    println!("  api_base_url = {}", config.api_base_url);
    println!("  timeout_secs = {}", config.timeout_secs);
    println!("  page_size    = {}", config.page_size);

    let feed = PhotoFeed::from_config(config)?;
    let mut session = feed.session();

    match session.refresh().await {
        Ok(batch) => {
            println!(
                "{} {} (page 1 returned {} photo{})",
                "remote:".bold(),
                "ok".green(),
                batch.len(),
                if batch.len() == 1 { "" } else { "s" },
            );
            Ok(())
        },
        Err(e) => {
            let hint = if e.is_recoverable() {
                " - transient, safe to retry"
            } else {
                " - check your access key and base URL"
            };
            Err(anyhow::anyhow!(e).context(format!("remote probe failed{hint}")))
        },
    }
}
