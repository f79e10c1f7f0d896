//! AudioScreen: the refreshable, sectioned episode feed.
//!
//! Owns the episode collection, the refresh controller, the "play all"
//! loading flag and a mirror of the player's shared values.  Rendering reads
//! this state; every event handler is a plain state transition.
//!
//! The first `editors_pick_count` episodes go to the editor's pick strip and
//! are left out of the scrolling body.

use feed_proto::episode::{Catalog, Episode};
use feed_proto::player::PlayerSnapshot;

use crate::refresh::{RefreshController, RefreshEvent, RefreshState};

pub const REFRESH_STATUS: &str = "Checking new podcasts...";
pub const SECTION_TITLE: &str = "For You";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonIcon {
    Headset,
    Spinner,
    Visualizer,
}

/// Everything the header button needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayButtonView {
    pub label: &'static str,
    pub icon: ButtonIcon,
    pub disabled: bool,
    /// Tinted while audio is playing, grey otherwise.
    pub active_tint: bool,
    pub dimmed: bool,
}

pub fn play_button_view(has_current: bool, is_playing: bool, loading: bool) -> PlayButtonView {
    let (label, icon) = if loading {
        ("Loading...", ButtonIcon::Spinner)
    } else if !has_current {
        ("Play All", ButtonIcon::Headset)
    } else if is_playing {
        ("Playing", ButtonIcon::Visualizer)
    } else {
        ("Paused", ButtonIcon::Headset)
    };
    PlayButtonView {
        label,
        icon,
        disabled: loading,
        active_tint: is_playing,
        dimmed: loading,
    }
}

/// What pressing the header button should do.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonIntent {
    Disabled,
    TogglePlayPause,
    PlayAll(Episode),
}

pub struct AudioScreen {
    catalog: Catalog,
    episodes: Vec<Episode>,
    editors_pick_count: usize,
    refresh: RefreshController,
    /// Bumped whenever `episodes` is replaced.
    revision: u64,
    /// Bumped on every scroll-to-top request; the body list follows it.
    scroll_epoch: u64,
    play_all_loading: bool,
    is_playing: bool,
    player_loading: bool,
    current_episode_id: Option<String>,
}

impl AudioScreen {
    pub fn new(catalog: Catalog, editors_pick_count: usize) -> Self {
        let episodes = catalog.episodes().to_vec();
        Self {
            catalog,
            episodes,
            editors_pick_count,
            refresh: RefreshController::new(),
            revision: 0,
            scroll_epoch: 0,
            play_all_loading: false,
            is_playing: false,
            player_loading: false,
            current_episode_id: None,
        }
    }

    /// The whole collection in display order.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn editors_pick(&self) -> &[Episode] {
        &self.episodes[..self.split_at()]
    }

    /// The scrolling list: everything after the editor's pick.
    pub fn body(&self) -> &[Episode] {
        &self.episodes[self.split_at()..]
    }

    fn split_at(&self) -> usize {
        self.editors_pick_count.min(self.episodes.len())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn find(&self, id: &str) -> Option<&Episode> {
        self.episodes
            .iter()
            .find(|e| e.id == id)
            .or_else(|| self.catalog.get(id))
    }

    // ── Refresh ───────────────────────────────────────────────────────────────

    pub fn refresh_state(&self) -> &RefreshState {
        self.refresh.state()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_refreshing()
    }

    /// User pulled to refresh.  True when a new cycle should be started.
    pub fn pull_to_refresh(&mut self) -> bool {
        self.refresh.trigger()
    }

    pub fn scroll_epoch(&self) -> u64 {
        self.scroll_epoch
    }

    /// Jump the body list back to its first row, then pull to refresh.
    pub fn scroll_to_top_and_refresh(&mut self) -> bool {
        self.scroll_epoch += 1;
        self.pull_to_refresh()
    }

    pub fn apply_refresh(&mut self, event: RefreshEvent) {
        match event {
            RefreshEvent::Fetched(result) => {
                if let Some(fresh) = self.refresh.on_fetched(result) {
                    self.episodes = fresh;
                    self.revision += 1;
                }
            }
            RefreshEvent::Settled => self.refresh.on_settled(),
        }
    }

    // ── Playback ──────────────────────────────────────────────────────────────

    pub fn on_player_snapshot(&mut self, snapshot: &PlayerSnapshot) {
        self.is_playing = snapshot.is_playing;
        self.player_loading = snapshot.is_loading;
        self.current_episode_id = snapshot.current_id().map(str::to_string);
    }

    pub fn is_loading(&self) -> bool {
        self.play_all_loading || self.player_loading
    }

    pub fn current_episode_id(&self) -> Option<&str> {
        self.current_episode_id.as_deref()
    }

    pub fn play_button(&self) -> PlayButtonView {
        play_button_view(
            self.current_episode_id.is_some(),
            self.is_playing,
            self.is_loading(),
        )
    }

    pub fn press_play_button(&mut self) -> ButtonIntent {
        if self.play_button().disabled {
            return ButtonIntent::Disabled;
        }
        if self.current_episode_id.is_some() {
            return ButtonIntent::TogglePlayPause;
        }
        match self.catalog.first() {
            Some(first) => {
                self.play_all_loading = true;
                ButtonIntent::PlayAll(first.clone())
            }
            None => ButtonIntent::Disabled,
        }
    }

    pub fn finish_play_all(&mut self) {
        self.play_all_loading = false;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;

    pub(crate) fn episode(id: &str) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {}", id),
            stream_url: format!("https://cdn.example.com/{}.mp3", id),
            artwork_template: None,
            show_title: "Morning Dispatch".to_string(),
            duration_ms: 1_200_000,
            released_at: "2024-10-19T08:00:00Z".parse().unwrap(),
            summary: "A summary.".to_string(),
        }
    }

    pub(crate) fn episodes(n: usize) -> Vec<Episode> {
        (1..=n).map(|i| episode(&format!("E{}", i))).collect()
    }

    fn screen(n: usize) -> AudioScreen {
        AudioScreen::new(Catalog::from_episodes(episodes(n)).unwrap(), 5)
    }

    fn ids(v: &[Episode]) -> Vec<&str> {
        v.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_body_skips_editors_pick() {
        let s = screen(8);
        assert_eq!(ids(s.editors_pick()), vec!["E1", "E2", "E3", "E4", "E5"]);
        assert_eq!(ids(s.body()), vec!["E6", "E7", "E8"]);
    }

    #[test]
    fn test_short_collection_has_empty_body() {
        let s = screen(3);
        assert_eq!(s.editors_pick().len(), 3);
        assert!(s.body().is_empty());
    }

    #[test]
    fn test_refresh_swaps_collection_and_keeps_ids_unique() {
        let mut s = screen(10);
        assert!(s.pull_to_refresh());
        assert!(s.is_refreshing());
        assert!(!s.pull_to_refresh(), "second pull while refreshing is ignored");

        let mut reordered = episodes(10);
        reordered.reverse();
        s.apply_refresh(RefreshEvent::Fetched(Ok(reordered)));
        assert_eq!(s.revision(), 1);
        assert_eq!(ids(s.body()), vec!["E5", "E4", "E3", "E2", "E1"]);
        assert!(s.is_refreshing());

        s.apply_refresh(RefreshEvent::Settled);
        assert!(!s.is_refreshing());

        let keys: HashSet<&str> = s.body().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(keys.len(), s.body().len());
    }

    #[test]
    fn test_scroll_to_top_requests_scroll_even_while_refreshing() {
        let mut s = screen(8);
        assert!(s.scroll_to_top_and_refresh());
        assert_eq!(s.scroll_epoch(), 1);
        assert!(!s.scroll_to_top_and_refresh());
        assert_eq!(s.scroll_epoch(), 2);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_list() {
        let mut s = screen(7);
        s.pull_to_refresh();
        s.apply_refresh(RefreshEvent::Fetched(Err(anyhow::anyhow!("offline"))));
        assert!(!s.pull_to_refresh(), "failed cycle is still settling");
        s.apply_refresh(RefreshEvent::Settled);
        assert_eq!(s.revision(), 0);
        assert_eq!(ids(s.body()), vec!["E6", "E7"]);
        assert!(matches!(s.refresh_state(), RefreshState::Failed(_)));
        assert!(s.pull_to_refresh());
    }

    #[test]
    fn test_play_button_states() {
        let idle = play_button_view(false, false, false);
        assert_eq!(idle.label, "Play All");
        assert_eq!(idle.icon, ButtonIcon::Headset);
        assert!(!idle.disabled);

        for (has_current, playing) in [(false, false), (true, true), (true, false)] {
            let v = play_button_view(has_current, playing, true);
            assert_eq!(v.label, "Loading...");
            assert_eq!(v.icon, ButtonIcon::Spinner);
            assert!(v.disabled);
        }

        let playing = play_button_view(true, true, false);
        assert_eq!(playing.label, "Playing");
        assert_eq!(playing.icon, ButtonIcon::Visualizer);
        assert!(playing.active_tint);

        let paused = play_button_view(true, false, false);
        assert_eq!(paused.label, "Paused");
        assert!(!paused.active_tint);
    }

    #[test]
    fn test_press_starts_play_all_from_bundled_first_episode() {
        let mut s = screen(8);
        // A refresh reorders the display, but play-all still starts at the catalog head
        s.pull_to_refresh();
        let mut reordered = episodes(8);
        reordered.rotate_left(3);
        s.apply_refresh(RefreshEvent::Fetched(Ok(reordered)));

        match s.press_play_button() {
            ButtonIntent::PlayAll(ep) => assert_eq!(ep.id, "E1"),
            other => panic!("expected PlayAll, got {:?}", other),
        }
        assert!(s.play_button().disabled);
        assert_eq!(s.press_play_button(), ButtonIntent::Disabled);

        s.finish_play_all();
        assert_eq!(s.play_button().label, "Play All");
    }

    #[test]
    fn test_press_toggles_when_something_is_loaded() {
        let mut s = screen(6);
        s.on_player_snapshot(&PlayerSnapshot {
            is_playing: true,
            is_loading: false,
            current_episode: Some(episode("E3")),
            position_ms: 0,
        });
        assert_eq!(s.play_button().label, "Playing");
        assert_eq!(s.press_play_button(), ButtonIntent::TogglePlayPause);

        s.on_player_snapshot(&PlayerSnapshot {
            is_loading: true,
            ..Default::default()
        });
        assert_eq!(s.press_play_button(), ButtonIntent::Disabled);
    }

    #[test]
    fn test_empty_catalog_cannot_play_all() {
        let mut s = AudioScreen::new(Catalog::default(), 5);
        assert_eq!(s.press_play_button(), ButtonIntent::Disabled);
        assert!(!s.is_loading());
    }
}
