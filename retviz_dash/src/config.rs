// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Environment-driven configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use retviz_charts::Size;

use crate::host::TrendMetric;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_POLL_SECS: u64 = 10;
const DEFAULT_CONTAINER: Size = Size::new(800.0, 600.0);

#[derive(Clone, Debug)]
pub(crate) struct Config {
    /// Base URL of the returns API, without a trailing slash.
    pub(crate) base_url: String,
    /// How often to poll the API.
    pub(crate) poll_interval: Duration,
    /// Directory the SVG files are written into.
    pub(crate) out_dir: PathBuf,
    /// Container box the charts size themselves against.
    pub(crate) container: Size,
    /// Which percentage the monthly trend chart plots.
    pub(crate) trend_metric: TrendMetric,
}

impl Config {
    /// Reads configuration from `RETVIZ_*` environment variables, with
    /// defaults matching a local development server.
    pub(crate) fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("RETVIZ_API_BASE")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let poll_interval = match std::env::var("RETVIZ_POLL_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .with_context(|| format!("RETVIZ_POLL_SECS is not a number: {raw:?}"))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_POLL_SECS),
        };

        let out_dir = std::env::var("RETVIZ_OUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let container = match std::env::var("RETVIZ_CONTAINER") {
            Ok(raw) => parse_container(&raw)
                .with_context(|| format!("RETVIZ_CONTAINER should be WIDTHxHEIGHT, got {raw:?}"))?,
            Err(_) => DEFAULT_CONTAINER,
        };

        let trend_metric = match std::env::var("RETVIZ_TREND_METRIC") {
            Ok(raw) => TrendMetric::from_name(&raw).with_context(|| {
                format!("RETVIZ_TREND_METRIC should be donate, resell or recycle, got {raw:?}")
            })?,
            Err(_) => TrendMetric::default(),
        };

        Ok(Self {
            base_url,
            poll_interval,
            out_dir,
            container,
            trend_metric,
        })
    }
}

fn parse_container(raw: &str) -> anyhow::Result<Size> {
    let (width, height) = raw
        .split_once('x')
        .context("missing 'x' separator")?;
    let width: f64 = width.trim().parse().context("bad width")?;
    let height: f64 = height.trim().parse().context("bad height")?;
    anyhow::ensure!(
        width > 0.0 && height > 0.0,
        "container sides must be positive"
    );
    Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_parses_width_by_height() {
        let size = parse_container("1024x768").unwrap();
        assert_eq!(size, Size::new(1024.0, 768.0));
    }

    #[test]
    fn container_rejects_malformed_input() {
        assert!(parse_container("1024").is_err());
        assert!(parse_container("ax b").is_err());
        assert!(parse_container("0x600").is_err());
    }

    #[test]
    fn metric_names_parse_case_insensitively() {
        assert_eq!(TrendMetric::from_name("Recycle"), Some(TrendMetric::Recycle));
        assert_eq!(TrendMetric::from_name(" resell "), Some(TrendMetric::Resell));
        assert_eq!(TrendMetric::from_name("compost"), None);
    }
}
