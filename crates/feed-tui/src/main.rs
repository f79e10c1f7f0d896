mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod motion;
mod play_all;
mod player;
mod refresh;
mod screen;
mod theme;
mod widgets;
mod workspace;

use std::sync::Arc;

use feed_proto::config::{Config, FeedSourceKind};
use feed_proto::episode::Catalog;
use feed_proto::news::NewsFeed;
use feed_proto::platform;

use crate::refresh::{FeedSource, HttpSource, ShuffleSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = platform::log_path();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but keep the
    // HTTP client internals quiet.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("n3ws log: {}", log_path.display());

    tracing::info!("n3ws starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_default();

    // ── Bundled data ─────────────────────────────────────────────────────────
    let catalog = Catalog::bundled()?;
    let news = NewsFeed::bundled()?;
    tracing::info!(
        "loaded {} episodes, {} news items",
        catalog.len(),
        news.len()
    );

    // ── Feed source ──────────────────────────────────────────────────────────
    let source: Arc<dyn FeedSource> = match config.feed.source {
        FeedSourceKind::Bundled => Arc::new(ShuffleSource {
            latency: config.feed.refresh_latency(),
        }),
        FeedSourceKind::Http => {
            tracing::info!("refreshing from {}", config.feed.url);
            Arc::new(HttpSource::new(config.feed.url.clone())?)
        }
    };

    // ── Spawn PlayerCore event loop ──────────────────────────────────────────
    let (player, player_task) = player::PlayerCore::spawn(config.player.buffering());

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        &config,
        catalog,
        news,
        player.clone(),
        source,
        platform::ui_state_path(),
    );
    let result = app.run().await;

    player.shutdown().await;
    if let Err(e) = player_task.await {
        tracing::error!("PlayerCore task failed: {}", e);
    }
    tracing::info!("n3ws exiting");

    result
}
