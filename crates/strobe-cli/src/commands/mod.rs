//! Command implementations for the strobe CLI.

use std::path::Path;

use anyhow::Result;
use strobe_core::Config;

mod browse;
mod check;

pub use browse::execute as browse;
pub use check::execute as check;

/// Resolves configuration from an explicit path or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}
