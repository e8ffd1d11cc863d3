//! The public handle to the player thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::library::PlayableItem;

use super::backend::{rodio_backend, BackendFactory};
use super::thread::spawn_player_thread;
use super::types::{PlaybackState, PlayerCmd, PlayerMsg, PlayerSettings, StateHandle};

/// Handle to the playback coordinator.
///
/// Construct one at the application root and share it by reference. Intent
/// methods are fire-and-forget sends into the player thread, which applies
/// them in order; observers follow the results through `subscribe` or
/// `state`.
pub struct Player {
    tx: Sender<PlayerMsg>,
    state: StateHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    /// Player over the default audio output device.
    pub fn new(settings: PlayerSettings) -> Self {
        Self::with_backend(settings, Box::new(rodio_backend))
    }

    /// Player over an injected backend; the seam the tests use.
    pub fn with_backend(settings: PlayerSettings, make_backend: BackendFactory) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerMsg>();
        let state: StateHandle = Arc::new(Mutex::new(PlaybackState::default()));
        let join = spawn_player_thread(rx, tx.clone(), state.clone(), settings, make_backend);
        Self {
            tx,
            state,
            join: Mutex::new(Some(join)),
        }
    }

    fn send(&self, cmd: PlayerCmd) {
        if self.tx.send(PlayerMsg::Cmd(cmd)).is_err() {
            warn!("player thread is gone; command dropped");
        }
    }

    /// Play `item`, optionally replacing the queue first.
    pub fn play_item(&self, item: PlayableItem, queue: Option<Vec<PlayableItem>>) {
        self.send(PlayerCmd::Play { item, queue });
    }

    /// Replace the queue without touching current playback.
    pub fn set_queue(&self, items: Vec<PlayableItem>) {
        self.send(PlayerCmd::SetQueue(items));
    }

    pub fn pause(&self) {
        self.send(PlayerCmd::Pause);
    }

    pub fn resume(&self) {
        self.send(PlayerCmd::Resume);
    }

    pub fn toggle_pause(&self) {
        self.send(PlayerCmd::TogglePause);
    }

    pub fn seek_to(&self, position: Duration) {
        self.send(PlayerCmd::SeekTo(position));
    }

    pub fn stop(&self) {
        self.send(PlayerCmd::Stop);
    }

    pub fn next(&self) {
        self.send(PlayerCmd::Next);
    }

    pub fn previous(&self) {
        self.send(PlayerCmd::Prev);
    }

    pub fn toggle_shuffle(&self) {
        self.send(PlayerCmd::ToggleShuffle);
    }

    pub fn toggle_repeat(&self) {
        self.send(PlayerCmd::ToggleRepeat);
    }

    /// Current snapshot of the published state.
    pub fn state(&self) -> PlaybackState {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Stream of state snapshots, one per change, seeded with the current
    /// state. Dropping the receiver detaches the subscription on the next
    /// publish.
    pub fn subscribe(&self) -> Receiver<PlaybackState> {
        let (tx, rx) = mpsc::channel();
        self.send(PlayerCmd::Subscribe(tx));
        rx
    }

    /// Stop playback and join the player thread.
    pub fn quit(&self) {
        self.send(PlayerCmd::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}
