// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! API client and background poller.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::model::{ItemsResponse, ReturnItem, StatsResponse};

/// Why a fetch produced no usable data.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FetchError {
    /// The request never completed or came back non-2xx.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The response body was not the JSON shape this client expects.
    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Thin client over the returns API.
#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub(crate) fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    async fn get_text(&self, path: &str) -> Result<String, FetchError> {
        let url = format!("{}{path}", self.base);
        let text = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }

    /// Fetches the item list.
    ///
    /// The endpoint has served both a bare array and a wrapped object across
    /// server versions; anything else is treated as an empty list rather
    /// than a hard failure, matching how the dashboard always handled it.
    pub(crate) async fn items(&self) -> Result<Vec<ReturnItem>, FetchError> {
        let text = self.get_text("/items").await?;
        match serde_json::from_str::<ItemsResponse>(&text) {
            Ok(response) => Ok(response.into_items()),
            Err(err) => {
                warn!(error = %err, "items response had an unexpected shape, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Fetches the monthly routing statistics.
    ///
    /// A malformed body degrades to an empty record set, which the host
    /// backfills with placeholder months. Only transport failures surface
    /// as errors.
    pub(crate) async fn item_stats(&self) -> Result<StatsResponse, FetchError> {
        let text = self.get_text("/item_stats").await?;
        Ok(decode_stats(&text))
    }
}

fn decode_stats(text: &str) -> StatsResponse {
    match serde_json::from_str(text) {
        Ok(stats) => stats,
        Err(err) => {
            warn!(error = %err, "stats response had an unexpected shape, treating as empty");
            StatsResponse::default()
        }
    }
}

/// One completed poll of both endpoints.
#[derive(Debug)]
pub(crate) struct PollOutcome {
    /// Poll sequence number, strictly increasing per issued request.
    pub(crate) seq: u64,
    pub(crate) items: Result<Vec<ReturnItem>, FetchError>,
    pub(crate) stats: Result<StatsResponse, FetchError>,
}

/// Polls the API on a fixed cadence and publishes each outcome.
///
/// Outcomes carry a sequence number assigned when the request is issued, so
/// consumers can drop anything older than what they have already applied.
/// The background task is aborted when the poller is dropped.
#[derive(Debug)]
pub(crate) struct Poller {
    handle: JoinHandle<()>,
    notify: Arc<Notify>,
    rx: watch::Receiver<Option<PollOutcome>>,
}

impl Poller {
    pub(crate) fn spawn(client: ApiClient, period: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        let notify = Arc::new(Notify::new());
        let wake = Arc::clone(&notify);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut issued: u64 = 0;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = wake.notified() => {
                        // An out-of-band refresh resets the cadence.
                        ticker.reset();
                    }
                }
                issued += 1;
                let seq = issued;
                debug!(seq, "polling returns API");
                let (items, stats) = tokio::join!(client.items(), client.item_stats());
                if tx.send(Some(PollOutcome { seq, items, stats })).is_err() {
                    return;
                }
            }
        });

        Self { handle, notify, rx }
    }

    /// Subscribes to poll outcomes. Each receiver sees the latest outcome.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<PollOutcome>> {
        self.rx.clone()
    }

    /// Requests an immediate refresh ahead of the next scheduled tick.
    pub(crate) fn poke(&self) {
        self.notify.notify_one();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
