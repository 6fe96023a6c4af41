//! Browse command implementation.

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use strobe_core::{Config, PhotoFeed, PhotoSummary};

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb
}

/// Load up to `pages` pages from the feed and render them.
///
/// An error on the first page aborts with a retry hint; an error on a later
/// page keeps what was already printed and notes the failure below it.
pub async fn execute(config: &Config, pages: u32, json: bool) -> Result<()> {
    let feed = PhotoFeed::from_config(config)?;
    let mut session = feed.session();

    let mut shown = 0usize;
    for page in 1..=pages {
        let spinner = if json {
            ProgressBar::hidden()
        } else {
            create_spinner(&format!("Loading page {page}..."))
        };

        let result = if page == 1 {
            session.refresh().await
        } else {
            session.load_more().await
        };
        spinner.finish_and_clear();

        match result {
            Ok(batch) => {
                if batch.is_empty() && session.is_exhausted() {
                    if !json {
                        println!("{}", "End of feed.".dimmed());
                    }
                    break;
                }
                for summary in &batch {
                    render(summary, shown + 1, json)?;
                    shown += 1;
                }
            },
            Err(e) if session.state().has_content => {
                eprintln!(
                    "{} page {page} failed: {e}{}",
                    "⚠".yellow(),
                    retry_hint(&e)
                );
                break;
            },
            Err(e) => {
                return Err(anyhow::anyhow!("{e}{}", retry_hint(&e)).context("initial load failed"));
            },
        }
    }

    if !json {
        println!(
            "\n{} {} photo{}",
            "✓ Loaded".green(),
            shown,
            if shown == 1 { "" } else { "s" },
        );
    }

    Ok(())
}

fn retry_hint(error: &strobe_core::Error) -> &'static str {
    if error.is_recoverable() {
        " (transient - try again)"
    } else {
        ""
    }
}

fn render(summary: &PhotoSummary, position: usize, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(summary)?);
        return Ok(());
    }

    let accent = summary
        .accent_color
        .as_deref()
        .unwrap_or("-");
    println!(
        "{:>4}. {}  {} {}  {}x{}  {}",
        position,
        summary.title.bold(),
        "♥".red(),
        summary.likes,
        summary.width,
        summary.height,
        accent.dimmed(),
    );
    println!("      {}", summary.thumbnail_url.blue().underline());
    Ok(())
}
