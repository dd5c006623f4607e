// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Tracing setup for the `dealerdesk` binary.
//!
//! The terminal belongs to the UI while it runs, so interactive sessions log
//! to a file. `--check` runs log to stderr.

use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_ENV: &str = "DEALERDESK_LOG";

const CRATES: [&str; 4] = [
    "dealerdesk",
    "dealerdesk_api",
    "dealerdesk_app",
    "dealerdesk_tui",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

pub fn init_logging(level: &str, target: &LogTarget) -> Result<()> {
    let filter = build_env_filter(level)?;
    match target {
        LogTarget::Stderr => install(filter, io::stderr, true),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| {
                    format!(
                        "open log file {} -- set [log].file to a writable path",
                        path.display()
                    )
                })?;
            install(filter, Mutex::new(file), false)
        }
    }
}

fn install<W>(filter: EnvFilter, writer: W, ansi: bool) -> Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .compact()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|error| anyhow!("install tracing subscriber: {error}"))
}

/// `DEALERDESK_LOG` wins over the configured level. Other crates stay at warn.
fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    EnvFilter::try_new(default_directives(level))
        .with_context(|| format!("invalid log level {level:?}"))
}

fn default_directives(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    let mut directives = vec!["warn".to_owned()];
    directives.extend(CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}
