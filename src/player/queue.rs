//! Queue state: the base item list, its optional shuffled view and the
//! playback cursor.
//!
//! The active view (base or shuffled) is always a permutation of the base
//! list, and the cursor is valid whenever the queue is non-empty. Cursor
//! placement across shuffle toggles is the player thread's job; this type
//! only keeps the orders consistent.

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::library::PlayableItem;

#[derive(Default)]
pub struct Queue {
    base: Vec<PlayableItem>,
    shuffled: Option<Vec<PlayableItem>>,
    cursor: usize,
}

impl Queue {
    /// Replace the base list. Resets the cursor to the front and re-derives
    /// the shuffle order when one is active.
    pub fn set_items(&mut self, items: Vec<PlayableItem>) {
        self.base = items;
        self.cursor = 0;
        if self.shuffled.is_some() {
            self.reshuffle();
        }
    }

    /// Derive a fresh random order, or drop back to base order.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if enabled {
            self.reshuffle();
        } else {
            self.shuffled = None;
        }
        self.clamp_cursor();
    }

    fn reshuffle(&mut self) {
        let mut view = self.base.clone();
        view.shuffle(&mut thread_rng());
        self.shuffled = Some(view);
    }

    /// The order next/previous currently walk.
    pub fn view(&self) -> &[PlayableItem] {
        self.shuffled.as_deref().unwrap_or(&self.base)
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Position of an item in the active view, by identity.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.view().iter().position(|t| t.id == id)
    }

    /// Move the cursor; out-of-range indices are ignored.
    pub fn set_cursor(&mut self, index: usize) {
        if index < self.view().len() {
            self.cursor = index;
        }
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.view().len() {
            self.cursor = 0;
        }
    }

    pub fn current(&self) -> Option<&PlayableItem> {
        self.view().get(self.cursor)
    }

    /// Peek the item after the cursor, wrapping to the front when `repeat`
    /// is on. `None` signals the queue end.
    pub fn next(&self, repeat: bool) -> Option<&PlayableItem> {
        let view = self.view();
        if view.is_empty() {
            return None;
        }
        if self.cursor + 1 < view.len() {
            view.get(self.cursor + 1)
        } else if repeat {
            view.first()
        } else {
            None
        }
    }

    /// Peek the item before the cursor, wrapping to the back when `repeat`
    /// is on.
    pub fn previous(&self, repeat: bool) -> Option<&PlayableItem> {
        let view = self.view();
        if view.is_empty() {
            return None;
        }
        if self.cursor > 0 {
            view.get(self.cursor - 1)
        } else if repeat {
            view.last()
        } else {
            None
        }
    }
}
