//! WorkspaceManager: Audio/News tab switching, overlays and the focus ring.

use crate::action::{ComponentId, Workspace};
use crate::focus::FocusRing;

/// Result of pressing a tab key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabPress {
    Switched,
    Reselected,
}

pub struct WorkspaceManager {
    pub workspace: Workspace,
    pub show_help: bool,
    pub show_keys_bar: bool,
    /// Episode id of the open detail view.
    pub detail: Option<String>,
    pub focus: FocusRing,
}

impl WorkspaceManager {
    pub fn new(workspace: Workspace, show_keys_bar: bool) -> Self {
        let mut wm = Self {
            workspace,
            show_help: false,
            show_keys_bar,
            detail: None,
            focus: FocusRing::new(Vec::new()),
        };
        wm.rebuild_focus_ring();
        wm
    }

    pub fn rebuild_focus_ring(&mut self) {
        let items = match self.workspace {
            Workspace::Audio => vec![ComponentId::EpisodeList, ComponentId::EditorsPick],
            Workspace::News => vec![ComponentId::NewsList],
        };
        self.focus.set_items(items);
    }

    pub fn press_tab(&mut self, ws: Workspace) -> TabPress {
        if self.workspace == ws && self.detail.is_none() {
            return TabPress::Reselected;
        }
        self.workspace = ws;
        self.detail = None;
        self.rebuild_focus_ring();
        TabPress::Switched
    }

    /// The component receiving keys: overlays first, then the focus ring.
    pub fn key_target(&self) -> Option<ComponentId> {
        if self.show_help {
            Some(ComponentId::HelpOverlay)
        } else if self.detail.is_some() {
            Some(ComponentId::EpisodeDetail)
        } else {
            self.focus.current()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_press_reselect_and_switch() {
        let mut wm = WorkspaceManager::new(Workspace::Audio, true);
        assert_eq!(wm.key_target(), Some(ComponentId::EpisodeList));
        assert_eq!(wm.press_tab(Workspace::Audio), TabPress::Reselected);
        assert_eq!(wm.press_tab(Workspace::News), TabPress::Switched);
        assert_eq!(wm.key_target(), Some(ComponentId::NewsList));
    }

    #[test]
    fn test_overlays_take_keys_first() {
        let mut wm = WorkspaceManager::new(Workspace::Audio, true);
        wm.detail = Some("E1".to_string());
        assert_eq!(wm.key_target(), Some(ComponentId::EpisodeDetail));
        // Tab key from the detail view returns to the list instead of reselecting
        assert_eq!(wm.press_tab(Workspace::Audio), TabPress::Switched);
        assert!(wm.detail.is_none());

        wm.show_help = true;
        assert_eq!(wm.key_target(), Some(ComponentId::HelpOverlay));
    }
}
