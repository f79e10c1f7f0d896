//! Audio collaborator contract.
//!
//! The screen never owns playback.  It reads a [`PlayerSnapshot`] published
//! through a `tokio::sync::watch` channel and issues commands through
//! [`AudioCommands`].  Every command is fallible.

use futures_util::future::BoxFuture;
use tokio::sync::watch;

use crate::episode::Episode;

/// Shared values published by the player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerSnapshot {
    pub is_playing: bool,
    pub is_loading: bool,
    pub current_episode: Option<Episode>,
    /// Playback position of the current episode.
    pub position_ms: u64,
}

impl PlayerSnapshot {
    pub fn has_current(&self) -> bool {
        self.current_episode.is_some()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_episode.as_ref().map(|e| e.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayerError {
    #[error("player is not running")]
    Unavailable,
    #[error("player rejected command: {0}")]
    Rejected(String),
    #[error("nothing is loaded")]
    NothingLoaded,
}

/// Commands accepted by the player.
pub trait AudioCommands: Send + Sync {
    fn play_episode(&self, episode: Episode) -> BoxFuture<'_, Result<(), PlayerError>>;
    fn toggle_play_pause(&self) -> BoxFuture<'_, Result<(), PlayerError>>;
    fn close(&self) -> BoxFuture<'_, Result<(), PlayerError>>;
    /// Subscribe to the shared values.
    fn subscribe(&self) -> watch::Receiver<PlayerSnapshot>;
}
