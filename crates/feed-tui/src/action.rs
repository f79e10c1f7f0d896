//! Action enum: all user-initiated intents and internal events.

use feed_proto::episode::Episode;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Header,
    EditorsPick,
    Banner,
    EpisodeList,
    NewsList,
    EpisodeDetail,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Playback ─────────────────────────────────────────────────────────────
    PressPlayButton,
    TogglePlayPause,
    PlayEpisode(Episode),

    // ── Feed ─────────────────────────────────────────────────────────────────
    Refresh,
    /// Tab re-selected: jump to the top (and refresh the audio feed).
    ScrollToTop,
    PressBanner,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),
    OpenDetail(String),
    CloseDetail,
    SwitchWorkspace(Workspace),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}

/// Which workspace (tab) is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Workspace {
    #[default]
    Audio,
    News,
}

impl Workspace {
    pub const ALL: [Workspace; 2] = [Workspace::Audio, Workspace::News];

    pub fn label(self) -> &'static str {
        match self {
            Workspace::Audio => "Audio",
            Workspace::News => "News",
        }
    }
}
