//! "Play All": close whatever is playing, start the first episode, open its
//! detail view.  Each step completes before the next one starts.

use tracing::{error, info};

use feed_proto::episode::Episode;
use feed_proto::player::{AudioCommands, PlayerError};

/// A screen the app can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Episode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("navigation channel closed")]
    Closed,
    #[error("navigation queue full")]
    Busy,
}

/// Navigation collaborator.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route) -> Result<(), NavError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PlayAllError {
    #[error("closing the player failed: {0}")]
    Close(#[source] PlayerError),
    #[error("starting {id} failed: {source}")]
    Play { id: String, source: PlayerError },
    #[error(transparent)]
    Navigate(#[from] NavError),
}

pub async fn play_all(
    player: &dyn AudioCommands,
    nav: &dyn Navigator,
    episode: Episode,
) -> Result<(), PlayAllError> {
    player.close().await.map_err(PlayAllError::Close)?;

    let id = episode.id.clone();
    player
        .play_episode(episode)
        .await
        .map_err(|source| PlayAllError::Play {
            id: id.clone(),
            source,
        })?;

    nav.navigate(Route::Episode(id))?;
    Ok(())
}

/// Runs `play_all`, logging any failure.  Returns whether it succeeded; the
/// caller clears its loading flag either way.
pub async fn run_play_all(player: &dyn AudioCommands, nav: &dyn Navigator, episode: Episode) -> bool {
    info!("play all: starting with {}", episode.id);
    match play_all(player, nav, episode).await {
        Ok(()) => true,
        Err(e) => {
            error!("Error playing episode: {}", e);
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::screen::tests::episode;
    use futures_util::future::BoxFuture;
    use futures_util::FutureExt;
    use std::sync::{Arc, Mutex};
    use tokio::sync::watch;

    use feed_proto::player::PlayerSnapshot;

    pub(crate) type CallLog = Arc<Mutex<Vec<String>>>;

    /// Records every call in order; can be told to fail `play`.
    pub(crate) struct RecordingPlayer {
        pub log: CallLog,
        pub fail_play: bool,
        snapshot: watch::Sender<PlayerSnapshot>,
    }

    impl RecordingPlayer {
        pub(crate) fn new(log: CallLog, fail_play: bool) -> Self {
            Self {
                log,
                fail_play,
                snapshot: watch::Sender::new(PlayerSnapshot::default()),
            }
        }
    }

    impl AudioCommands for RecordingPlayer {
        fn play_episode(&self, episode: Episode) -> BoxFuture<'_, Result<(), PlayerError>> {
            self.log.lock().unwrap().push(format!("play({})", episode.id));
            let result = if self.fail_play {
                Err(PlayerError::Rejected("no stream".to_string()))
            } else {
                Ok(())
            };
            async move { result }.boxed()
        }

        fn toggle_play_pause(&self) -> BoxFuture<'_, Result<(), PlayerError>> {
            self.log.lock().unwrap().push("toggle".to_string());
            async { Ok(()) }.boxed()
        }

        fn close(&self) -> BoxFuture<'_, Result<(), PlayerError>> {
            self.log.lock().unwrap().push("close".to_string());
            async { Ok(()) }.boxed()
        }

        fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
            self.snapshot.subscribe()
        }
    }

    pub(crate) struct RecordingNav {
        pub log: CallLog,
    }

    impl Navigator for RecordingNav {
        fn navigate(&self, route: Route) -> Result<(), NavError> {
            let Route::Episode(id) = route;
            self.log.lock().unwrap().push(format!("navigate({})", id));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_calls_happen_in_order() {
        let log = CallLog::default();
        let player = RecordingPlayer::new(log.clone(), false);
        let nav = RecordingNav { log: log.clone() };

        assert!(run_play_all(&player, &nav, episode("E1")).await);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["close", "play(E1)", "navigate(E1)"]
        );
    }

    #[tokio::test]
    async fn test_play_failure_skips_navigation() {
        let log = CallLog::default();
        let player = RecordingPlayer::new(log.clone(), true);
        let nav = RecordingNav { log: log.clone() };

        let err = play_all(&player, &nav, episode("E1")).await.unwrap_err();
        assert!(matches!(err, PlayAllError::Play { ref id, .. } if id == "E1"));
        assert_eq!(*log.lock().unwrap(), vec!["close", "play(E1)"]);

        assert!(!run_play_all(&player, &nav, episode("E1")).await);
    }

    #[tokio::test]
    async fn test_navigation_failure_is_reported() {
        struct ClosedNav;
        impl Navigator for ClosedNav {
            fn navigate(&self, _route: Route) -> Result<(), NavError> {
                Err(NavError::Closed)
            }
        }
        let player = RecordingPlayer::new(CallLog::default(), false);
        let err = play_all(&player, &ClosedNav, episode("E1")).await.unwrap_err();
        assert!(matches!(err, PlayAllError::Navigate(NavError::Closed)));
    }
}
