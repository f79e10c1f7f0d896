//! PlayerCore: single-owner event loop for playback state.
//!
//! Runs embedded in the TUI process.  `PlayerHandle` (the `AudioCommands`
//! implementation the screen talks to) turns each command into a
//! `PlayerCommand` carrying a oneshot reply.  PlayerCore owns the
//! `PlayerSnapshot` exclusively and publishes every change through a
//! `watch` channel, so any number of screens can observe it.
//!
//! There is no audio output here: `play` models buffering with a delay and
//! then advances a playback clock.

use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use feed_proto::episode::Episode;
use feed_proto::player::{AudioCommands, PlayerError, PlayerSnapshot};

type Reply = oneshot::Sender<Result<(), PlayerError>>;

const POSITION_TICK: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum PlayerCommand {
    Play(Episode, Reply),
    TogglePause(Reply),
    Close(Reply),
    /// Buffering for load `generation` finished.
    Buffered(u64),
    Shutdown,
}

// ── PlayerCore ────────────────────────────────────────────────────────────────

pub struct PlayerCore {
    snapshot_tx: watch::Sender<PlayerSnapshot>,
    self_tx: mpsc::Sender<PlayerCommand>,
    buffering: Duration,
    /// Bumped on every load so stale `Buffered` events are ignored.
    generation: u64,
    /// Reply for the `Play` still buffering.
    pending_play: Option<Reply>,
    /// Start of the current playing stretch; None while paused or idle.
    playing_since: Option<Instant>,
    /// Position accumulated before `playing_since`.
    base_position_ms: u64,
}

impl PlayerCore {
    /// Spawn the core loop and return a handle to it.
    pub fn spawn(buffering: Duration) -> (PlayerHandle, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::channel::<PlayerCommand>(64);
        let (snapshot_tx, snapshot_rx) = watch::channel(PlayerSnapshot::default());
        let core = PlayerCore {
            snapshot_tx,
            self_tx: tx.clone(),
            buffering,
            generation: 0,
            pending_play: None,
            playing_since: None,
            base_position_ms: 0,
        };
        let task = tokio::spawn(core.run(rx));
        (PlayerHandle { tx, snapshot_rx }, task)
    }

    async fn run(mut self, mut rx: mpsc::Receiver<PlayerCommand>) {
        info!("PlayerCore: starting event loop");
        let mut position_tick = tokio::time::interval(POSITION_TICK);
        position_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                cmd = rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    if matches!(cmd, PlayerCommand::Shutdown) {
                        break;
                    }
                    self.handle(cmd);
                }
                _ = position_tick.tick() => {
                    if self.playing_since.is_some() {
                        let pos = self.position_ms();
                        self.snapshot_tx.send_modify(|s| s.position_ms = pos);
                    }
                }
            }
        }
        info!("PlayerCore: event loop exited");
    }

    fn handle(&mut self, cmd: PlayerCommand) {
        match cmd {
            PlayerCommand::Play(episode, reply) => self.load(episode, reply),
            PlayerCommand::TogglePause(reply) => {
                let _ = reply.send(self.toggle());
            }
            PlayerCommand::Close(reply) => {
                self.unload();
                let _ = reply.send(Ok(()));
            }
            PlayerCommand::Buffered(generation) => self.on_buffered(generation),
            PlayerCommand::Shutdown => {}
        }
    }

    fn load(&mut self, episode: Episode, reply: Reply) {
        self.supersede_pending();
        self.generation += 1;
        self.playing_since = None;
        self.base_position_ms = 0;
        info!("player: loading {} ({})", episode.id, episode.title);

        self.snapshot_tx.send_replace(PlayerSnapshot {
            is_playing: false,
            is_loading: true,
            current_episode: Some(episode),
            position_ms: 0,
        });
        self.pending_play = Some(reply);

        let tx = self.self_tx.clone();
        let generation = self.generation;
        let buffering = self.buffering;
        tokio::spawn(async move {
            tokio::time::sleep(buffering).await;
            let _ = tx.send(PlayerCommand::Buffered(generation)).await;
        });
    }

    fn on_buffered(&mut self, generation: u64) {
        if generation != self.generation {
            debug!("player: dropping stale buffering event {}", generation);
            return;
        }
        self.playing_since = Some(Instant::now());
        self.snapshot_tx.send_modify(|s| {
            s.is_loading = false;
            s.is_playing = true;
        });
        if let Some(reply) = self.pending_play.take() {
            let _ = reply.send(Ok(()));
        }
    }

    fn toggle(&mut self) -> Result<(), PlayerError> {
        let snapshot = self.snapshot_tx.borrow().clone();
        if !snapshot.has_current() {
            return Err(PlayerError::NothingLoaded);
        }
        if snapshot.is_loading {
            return Err(PlayerError::Rejected("still buffering".to_string()));
        }
        let pos = self.position_ms();
        if snapshot.is_playing {
            self.base_position_ms = pos;
            self.playing_since = None;
        } else {
            self.playing_since = Some(Instant::now());
        }
        self.snapshot_tx.send_modify(|s| {
            s.is_playing = !snapshot.is_playing;
            s.position_ms = pos;
        });
        debug!("player: toggled, playing={}", !snapshot.is_playing);
        Ok(())
    }

    fn unload(&mut self) {
        self.supersede_pending();
        self.generation += 1;
        self.playing_since = None;
        self.base_position_ms = 0;
        self.snapshot_tx.send_replace(PlayerSnapshot::default());
    }

    fn supersede_pending(&mut self) {
        if let Some(reply) = self.pending_play.take() {
            warn!("player: load superseded before buffering finished");
            let _ = reply.send(Err(PlayerError::Rejected("superseded".to_string())));
        }
    }

    fn position_ms(&self) -> u64 {
        let running = self
            .playing_since
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0);
        self.base_position_ms + running
    }
}

// ── PlayerHandle ──────────────────────────────────────────────────────────────

/// Cloneable command/observe handle onto a running `PlayerCore`.
#[derive(Clone)]
pub struct PlayerHandle {
    tx: mpsc::Sender<PlayerCommand>,
    snapshot_rx: watch::Receiver<PlayerSnapshot>,
}

impl PlayerHandle {
    /// Stop the core loop; pending replies resolve as `Unavailable`.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(PlayerCommand::Shutdown).await;
    }

    async fn request(
        &self,
        build: impl FnOnce(Reply) -> PlayerCommand,
    ) -> Result<(), PlayerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .await
            .map_err(|_| PlayerError::Unavailable)?;
        reply_rx.await.map_err(|_| PlayerError::Unavailable)?
    }
}

impl AudioCommands for PlayerHandle {
    fn play_episode(&self, episode: Episode) -> BoxFuture<'_, Result<(), PlayerError>> {
        self.request(move |r| PlayerCommand::Play(episode, r)).boxed()
    }

    fn toggle_play_pause(&self) -> BoxFuture<'_, Result<(), PlayerError>> {
        self.request(PlayerCommand::TogglePause).boxed()
    }

    fn close(&self) -> BoxFuture<'_, Result<(), PlayerError>> {
        self.request(PlayerCommand::Close).boxed()
    }

    fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.snapshot_rx.clone()
    }
}
