//! Player-facing small types and handles.
//!
//! This module defines the command set, the published playback state, the
//! status frames emitted by decoder resources, and the runtime settings of
//! the player thread.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::PlayableItem;

use super::error::LoadError;

/// What happens when the last queued item finishes with repeat disabled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndOfQueue {
    /// Keep the finished item as the current one, paused at its end.
    StopOnLast,
    /// Clear playback state entirely, as an explicit stop would.
    ResetToIdle,
}

impl Default for EndOfQueue {
    fn default() -> Self {
        Self::StopOnLast
    }
}

/// Runtime knobs for the player thread.
#[derive(Debug, Clone)]
pub struct PlayerSettings {
    /// Abandon a load that has not produced a resource within this window.
    pub load_timeout: Duration,
    /// Cadence of decoder status reports.
    pub status_tick: Duration,
    pub end_of_queue: EndOfQueue,
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether next/previous and auto-advance wrap at the queue edges.
    pub repeat: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            load_timeout: Duration::from_secs(10),
            status_tick: Duration::from_millis(200),
            end_of_queue: EndOfQueue::default(),
            shuffle: false,
            repeat: false,
        }
    }
}

#[derive(Debug)]
pub enum PlayerCmd {
    /// Start playing `item`, optionally replacing the queue first.
    Play {
        item: PlayableItem,
        queue: Option<Vec<PlayableItem>>,
    },
    /// Replace the queue without touching current playback.
    SetQueue(Vec<PlayableItem>),
    Pause,
    Resume,
    TogglePause,
    /// Reposition playback within the current item.
    SeekTo(Duration),
    /// Stop playback and release the decoder resource.
    Stop,
    /// Skip to the next queued item, wrapping when repeat is on.
    Next,
    /// Go back to the previous queued item, wrapping when repeat is on.
    Prev,
    ToggleShuffle,
    ToggleRepeat,
    /// Attach a state subscriber.
    Subscribe(Sender<PlaybackState>),
    /// Shut the player thread down.
    Quit,
}

/// A status report from the decoder resource of one particular load.
#[derive(Debug, Clone)]
pub struct StatusFrame {
    /// Which load produced this frame. Frames from superseded loads are
    /// discarded by the player thread.
    pub generation: u64,
    pub playing: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    /// True exactly once, when the resource reached its natural end.
    pub just_finished: bool,
}

/// Everything the player thread receives: UI intents and decoder status.
/// Funneling both through one channel is what serializes playback
/// operations.
#[derive(Debug)]
pub(super) enum PlayerMsg {
    Cmd(PlayerCmd),
    Status(StatusFrame),
}

/// Published playback state, shared with every observer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    /// Currently loaded item, `None` when idle.
    pub current: Option<PlayableItem>,
    pub playing: bool,
    /// True while a load is in flight.
    pub loading: bool,
    pub position: Duration,
    /// Duration as reported by the decoder; `None` until the first status
    /// frame arrives.
    pub duration: Option<Duration>,
    pub shuffle: bool,
    pub repeat: bool,
    /// The most recent load failure, cleared by the next load or stop.
    pub last_error: Option<LoadError>,
}

pub type StateHandle = Arc<Mutex<PlaybackState>>;
