// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Returns-analytics dashboard host.
//!
//! Polls the returns API on a fixed cadence, classifies items into routing
//! categories, and writes one SVG per chart on every refresh: the industry
//! comparison bars, the sustainability score gauge, the category share
//! donut, and the monthly routing trend.

mod aggregate;
mod config;
mod fetch;
mod host;
mod model;
mod sizer;
mod svg;

use std::path::Path;

use anyhow::Context;
use retviz_charts::HeuristicTextMeasurer;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::fetch::{ApiClient, Poller};
use crate::host::DashboardHost;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    info!(
        base_url = %config.base_url,
        poll_secs = config.poll_interval.as_secs(),
        out_dir = %config.out_dir.display(),
        trend_metric = config.trend_metric.name(),
        "starting dashboard host"
    );

    let poller = Poller::spawn(ApiClient::new(config.base_url.clone()), config.poll_interval);
    let mut updates = poller.subscribe();
    let mut host = DashboardHost::new(config.container).with_trend_metric(config.trend_metric);

    loop {
        updates
            .changed()
            .await
            .context("poller stopped publishing")?;
        let today = chrono::Utc::now().date_naive();
        let applied = {
            let outcome = updates.borrow_and_update();
            match outcome.as_ref() {
                Some(outcome) => host.apply(outcome, today),
                None => false,
            }
        };
        if !applied {
            continue;
        }

        write_frames(&host, &config.out_dir)?;
        for point in &host.summary {
            info!(
                category = point.name,
                count = point.count,
                percent = point.percent,
                color = ?point.color,
                "routing summary"
            );
        }
        for item in host.items().iter().take(5) {
            debug!(
                id = %item.id,
                date = %item.date,
                batch = item.batch_no.as_deref().unwrap_or("-"),
                material = item.dominant_material().map_or("unknown", |(name, _)| name),
                "recent item"
            );
        }
    }
}

/// Writes one SVG per rendered chart slot into `out_dir`.
fn write_frames(host: &DashboardHost, out_dir: &Path) -> anyhow::Result<()> {
    for slot in host.slots() {
        if let Some(message) = &slot.error {
            warn!(chart = slot.name, error = %message, "chart data is stale");
        }
        match &slot.frame {
            Some(frame) => {
                let path = out_dir.join(format!("{}.svg", slot.name));
                let svg = svg::frame_to_svg(frame, &HeuristicTextMeasurer);
                std::fs::write(&path, svg)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(chart = slot.name, path = %path.display(), "wrote chart");
            }
            None => {
                info!(chart = slot.name, phase = ?slot.phase, "no frame to write");
            }
        }
    }
    Ok(())
}
