//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it.  The App event loop is the only
//! writer.

use feed_proto::config::ColorScheme;
use feed_proto::news::NewsFeed;
use feed_proto::player::PlayerSnapshot;

use crate::action::Workspace;
use crate::screen::AudioScreen;

pub struct AppState {
    pub audio: AudioScreen,
    pub news: NewsFeed,
    /// Latest shared values from the player.
    pub player: PlayerSnapshot,
    pub workspace: Workspace,
    pub color_scheme: ColorScheme,
    /// Monotonic UI tick counter; drives spinners and the visualizer.
    pub frame: u64,
}

impl AppState {
    pub fn new(audio: AudioScreen, news: NewsFeed, color_scheme: ColorScheme) -> Self {
        Self {
            audio,
            news,
            player: PlayerSnapshot::default(),
            workspace: Workspace::default(),
            color_scheme,
            frame: 0,
        }
    }
}
