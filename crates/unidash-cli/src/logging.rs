// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! File logging. The dashboard owns the terminal, so nothing is written to
//! stdout or stderr while it runs.

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "UNIDASH_LOG";

pub fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("invalid log directive {directive:?}"))
}

/// `UNIDASH_LOG` wins over `level` when set and non-empty.
pub fn resolve_filter(level: &str) -> Result<EnvFilter> {
    match env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => {
            parse_filter(&directive).with_context(|| format!("read {LOG_ENV}"))
        }
        _ => parse_filter(level),
    }
}

pub fn init(level: &str, path: &Path) -> Result<()> {
    let filter = resolve_filter(level)?;

    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log path {} has no file name", path.display()))?;
    fs::create_dir_all(directory)
        .with_context(|| format!("create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(appender),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_filter;

    #[test]
    fn parse_filter_accepts_levels_and_targets() {
        for directive in ["info", "debug", "unidash_app=trace,warn", "off"] {
            assert!(parse_filter(directive).is_ok(), "directive {directive}");
        }
    }

    #[test]
    fn parse_filter_rejects_garbage() {
        let error = parse_filter("unidash=loud").expect_err("bad level should fail");
        assert!(error.to_string().contains("invalid log directive"));
    }
}
