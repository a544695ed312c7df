//! linkled: status LED demo service.
//!
//! Reads connection state from stdin, one value per line, and shows it
//! on the configured GPIO line. End of input stops the service, which
//! switches the LED off and releases the line.
//!
//! ```text
//! linkled [config.json]
//!   1 | true  | up   | connected     → LED on
//!   0 | false | down | disconnected  → LED blinking
//! ```

use std::io::BufRead;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use linkled::{ConnectionChannel, LedConfig, LedService};

fn parse_state(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "up" | "connected" => Some(true),
        "0" | "false" | "down" | "disconnected" => Some(false),
        _ => None,
    }
}

/// Log filter from `RUST_LOG`, falling back to `info` when unset or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn load_config() -> Result<LedConfig> {
    let Some(path) = std::env::args().nth(1) else {
        info!("No config file given, using defaults");
        return Ok(LedConfig::default());
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    LedConfig::from_json(&json).with_context(|| format!("loading {path}"))
}

fn main() -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    info!("linkled v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let events = Arc::new(ConnectionChannel::new());

    #[cfg(feature = "sysfs")]
    let mut provider = linkled::adapters::sysfs::SysfsLineProvider::new();
    #[cfg(not(feature = "sysfs"))]
    let mut provider = linkled::adapters::sim_line::SimLineProvider::new();

    let mut service = LedService::new(&config, &mut provider, Arc::clone(&events))
        .context("acquiring status LED")?;
    service.start()?;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_state(&line) {
            Some(connected) => futures_lite::future::block_on(events.send(connected)),
            None => warn!("Ignoring unrecognised input {:?}", line.trim()),
        }
    }

    info!("Input closed, stopping");
    service.stop();
    Ok(())
}
