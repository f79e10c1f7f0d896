//! Refresh controller: the pull-to-refresh state machine and the async cycle
//! that feeds it.
//!
//! ```text
//!  Idle ──trigger──▶ Refreshing ──Fetched(Ok)──▶ (list swapped) ──Settled──▶ Idle
//!                        │
//!                        └──Fetched(Err)──▶ Failed ──trigger──▶ Refreshing
//! ```
//!
//! The controller is single-flight: a cycle stays open from `trigger` until its
//! own `Settled` arrives, and `trigger` is ignored while one is open.  A failed
//! fetch shows `Failed` straight away but cannot be retried until that
//! cycle's settle delay has elapsed.
//! `run_cycle` runs off the event loop and only reports back through
//! `RefreshEvent`s; the owned episode list is replaced on the event loop, so
//! nobody ever observes a half-built sequence.

use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use feed_proto::episode::{Catalog, Episode};
use feed_proto::shuffle::shuffled;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RefreshState {
    #[default]
    Idle,
    Refreshing,
    Failed(String),
}

#[derive(Debug)]
pub enum RefreshEvent {
    Fetched(anyhow::Result<Vec<Episode>>),
    Settled,
}

#[derive(Debug, Default)]
pub struct RefreshController {
    state: RefreshState,
    /// A cycle has been triggered and its `Settled` has not arrived yet.
    in_flight: bool,
}

impl RefreshController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RefreshState {
        &self.state
    }

    pub fn is_refreshing(&self) -> bool {
        self.state == RefreshState::Refreshing
    }

    /// Start a refresh.  Returns false (and changes nothing) if a cycle is
    /// still open.
    pub fn trigger(&mut self) -> bool {
        if self.in_flight {
            debug!("refresh: trigger ignored, cycle still open ({:?})", self.state);
            return false;
        }
        self.state = RefreshState::Refreshing;
        self.in_flight = true;
        true
    }

    /// A fetch finished.  Returns the new list on success.
    pub fn on_fetched(&mut self, result: anyhow::Result<Vec<Episode>>) -> Option<Vec<Episode>> {
        if !self.is_refreshing() {
            debug!("refresh: fetch result outside a cycle, dropped");
            return None;
        }
        match result {
            Ok(episodes) => Some(episodes),
            Err(e) => {
                warn!("refresh: fetch failed: {:#}", e);
                self.state = RefreshState::Failed(e.to_string());
                None
            }
        }
    }

    /// The settle delay elapsed.
    pub fn on_settled(&mut self) {
        if !self.in_flight {
            debug!("refresh: settle outside a cycle, dropped");
            return;
        }
        self.in_flight = false;
        if self.is_refreshing() {
            self.state = RefreshState::Idle;
        }
    }
}

// ── Feed sources ──────────────────────────────────────────────────────────────

/// Where a refresh gets its next episode list from.
pub trait FeedSource: Send + Sync {
    fn fetch_latest(&self, current: Vec<Episode>) -> BoxFuture<'_, anyhow::Result<Vec<Episode>>>;
}

/// Simulated source: waits out a fake network latency, then reshuffles.
pub struct ShuffleSource {
    pub latency: Duration,
}

impl FeedSource for ShuffleSource {
    fn fetch_latest(&self, current: Vec<Episode>) -> BoxFuture<'_, anyhow::Result<Vec<Episode>>> {
        async move {
            tokio::time::sleep(self.latency).await;
            Ok(shuffled(&current))
        }
        .boxed()
    }
}

/// Fetches a catalog payload over HTTP.
pub struct HttpSource {
    pub url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("n3ws/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl FeedSource for HttpSource {
    fn fetch_latest(&self, _current: Vec<Episode>) -> BoxFuture<'_, anyhow::Result<Vec<Episode>>> {
        async move {
            let body = self
                .client
                .get(&self.url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            let catalog = Catalog::from_json_str(&body)?;
            Ok(catalog.into_episodes())
        }
        .boxed()
    }
}

/// One refresh cycle: fetch, report, wait out the settle delay, report.
pub async fn run_cycle<S: FeedSource + ?Sized>(
    source: &S,
    current: Vec<Episode>,
    settle: Duration,
    tx: mpsc::Sender<RefreshEvent>,
) {
    info!("refresh: fetching latest ({} episodes on screen)", current.len());
    let result = source.fetch_latest(current).await;
    if tx.send(RefreshEvent::Fetched(result)).await.is_err() {
        return;
    }
    tokio::time::sleep(settle).await;
    let _ = tx.send(RefreshEvent::Settled).await;
}
