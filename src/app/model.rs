//! Application model: the UI-side view of the library and playback.

use crate::library::PlayableItem;
use crate::player::PlaybackState;

/// Coarse playback status for the status line and MPRIS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The main application model.
pub struct App {
    pub items: Vec<PlayableItem>,
    pub selected: usize,
    /// Latest coordinator snapshot, fed by the state subscription.
    pub playback: PlaybackState,
    pub follow_playback: bool,
    pub current_dir: Option<String>,
}

impl App {
    /// Create a new `App` over the scanned library.
    pub fn new(items: Vec<PlayableItem>) -> Self {
        Self {
            items,
            selected: 0,
            playback: PlaybackState::default(),
            follow_playback: true,
            current_dir: None,
        }
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Merge a fresh coordinator snapshot, moving the cursor to the playing
    /// item when follow mode is on.
    pub fn apply_snapshot(&mut self, state: PlaybackState) {
        if self.follow_playback {
            if let Some(current) = &state.current {
                if let Some(pos) = self.items.iter().position(|t| t.id == current.id) {
                    self.selected = pos;
                }
            }
        }
        self.playback = state;
    }

    pub fn status(&self) -> PlaybackStatus {
        if self.playback.current.is_none() {
            PlaybackStatus::Stopped
        } else if self.playback.playing {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        }
    }

    /// The item under the cursor.
    pub fn selected_item(&self) -> Option<&PlayableItem> {
        self.items.get(self.selected)
    }

    /// Enable following playback (cursor follows the playing track).
    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Move selection to the next row, wrapping at the bottom.
    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    /// Move selection to the previous row, wrapping at the top.
    pub fn prev(&mut self) {
        if !self.items.is_empty() {
            self.selected = if self.selected == 0 {
                self.items.len() - 1
            } else {
                self.selected - 1
            };
        }
    }
}
