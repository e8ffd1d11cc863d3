//! The player thread: sole owner of the queue, the deck and the published
//! playback state.
//!
//! Every UI intent and every decoder status frame arrives on one channel,
//! so operations are strictly serialized: two `Play` intents can never
//! interleave their stop/load sequences, and a frame from a superseded load
//! is recognized by its generation and dropped.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, trace};

use crate::library::PlayableItem;

use super::backend::BackendFactory;
use super::deck::Deck;
use super::queue::Queue;
use super::types::{
    EndOfQueue, PlaybackState, PlayerCmd, PlayerMsg, PlayerSettings, StateHandle, StatusFrame,
};

/// Everything the loop hands around when mutating playback.
struct PlayerCtx {
    deck: Deck,
    queue: Queue,
    state: PlaybackState,
    shared: StateHandle,
    subscribers: Vec<Sender<PlaybackState>>,
    end_of_queue: EndOfQueue,
}

pub(super) fn spawn_player_thread(
    rx: Receiver<PlayerMsg>,
    events: Sender<PlayerMsg>,
    shared: StateHandle,
    settings: PlayerSettings,
    make_backend: BackendFactory,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // The guard keeps non-Send device handles (the rodio output stream)
        // alive on this thread until the loop exits.
        let (backend, _device_guard) = make_backend();

        let mut queue = Queue::default();
        queue.set_shuffle(settings.shuffle);

        let mut ctx = PlayerCtx {
            deck: Deck::new(backend, events, settings.load_timeout, settings.status_tick),
            queue,
            state: PlaybackState {
                shuffle: settings.shuffle,
                repeat: settings.repeat,
                ..PlaybackState::default()
            },
            shared,
            subscribers: Vec::new(),
            end_of_queue: settings.end_of_queue,
        };

        ctx.publish();

        while let Ok(msg) = rx.recv() {
            match msg {
                PlayerMsg::Cmd(cmd) => {
                    if !ctx.handle_cmd(cmd) {
                        break;
                    }
                }
                PlayerMsg::Status(frame) => {
                    if frame.generation != ctx.deck.generation() {
                        trace!(
                            frame = frame.generation,
                            current = ctx.deck.generation(),
                            "discarding stale status frame"
                        );
                        continue;
                    }
                    ctx.apply_status(frame);
                    ctx.publish();
                }
            }
        }
    })
}

impl PlayerCtx {
    /// Apply one intent. Returns false when the loop should shut down.
    fn handle_cmd(&mut self, cmd: PlayerCmd) -> bool {
        match cmd {
            PlayerCmd::Play { item, queue } => {
                self.play(item, queue);
            }

            PlayerCmd::SetQueue(items) => {
                self.queue.set_items(items);
                // Keep the cursor on whatever is playing when it is still
                // part of the new queue.
                if let Some(current) = &self.state.current {
                    if let Some(pos) = self.queue.position_of(&current.id) {
                        self.queue.set_cursor(pos);
                    }
                }
            }

            PlayerCmd::Pause => {
                if self.deck.is_loaded() {
                    self.deck.pause();
                    self.state.playing = false;
                    self.publish();
                }
            }

            PlayerCmd::Resume => {
                if self.deck.is_loaded() {
                    self.deck.play();
                    self.state.playing = true;
                    self.publish();
                }
            }

            PlayerCmd::TogglePause => {
                if self.deck.is_loaded() {
                    if self.state.playing {
                        self.deck.pause();
                    } else {
                        self.deck.play();
                    }
                    self.state.playing = !self.state.playing;
                    self.publish();
                }
            }

            PlayerCmd::SeekTo(position) => {
                if self.deck.is_loaded() {
                    self.deck.seek(position);
                    // Optimistic; the next status frame brings the decoder's
                    // actual position.
                    self.state.position = position;
                    self.publish();
                }
            }

            PlayerCmd::Stop => {
                self.deck.release();
                reset_playback(&mut self.state);
                self.publish();
            }

            PlayerCmd::Next => {
                // Queue end with repeat off: stay on the current item.
                if let Some(item) = self.queue.next(self.state.repeat).cloned() {
                    self.play(item, None);
                }
            }

            PlayerCmd::Prev => {
                if let Some(item) = self.queue.previous(self.state.repeat).cloned() {
                    self.play(item, None);
                }
            }

            PlayerCmd::ToggleShuffle => {
                self.state.shuffle = !self.state.shuffle;
                self.queue.set_shuffle(self.state.shuffle);
                // Playback continues; only the navigation order moved
                // underneath the current item.
                if let Some(current) = &self.state.current {
                    if let Some(pos) = self.queue.position_of(&current.id) {
                        self.queue.set_cursor(pos);
                    }
                }
                self.publish();
            }

            PlayerCmd::ToggleRepeat => {
                self.state.repeat = !self.state.repeat;
                self.publish();
            }

            PlayerCmd::Subscribe(tx) => {
                // Seed the new observer with the current snapshot.
                let _ = tx.send(self.state.clone());
                self.subscribers.push(tx);
            }

            PlayerCmd::Quit => {
                self.deck.release();
                return false;
            }
        }
        true
    }

    /// Resolve the cursor for `item`, load it and start playback.
    ///
    /// When `new_queue` is given it replaces the queue first, so the cursor
    /// lands on `item`'s position in the freshly derived view (or the front
    /// when the item is not part of it). Without a replacement queue the
    /// cursor only moves when the item is found; playing something outside
    /// the queue leaves navigation where it was.
    fn play(&mut self, item: PlayableItem, new_queue: Option<Vec<PlayableItem>>) {
        if let Some(items) = new_queue {
            self.queue.set_items(items);
        }
        if let Some(pos) = self.queue.position_of(&item.id) {
            self.queue.set_cursor(pos);
        }

        self.state.loading = true;
        self.state.current = Some(item.clone());
        self.state.playing = false;
        self.state.position = Duration::ZERO;
        self.state.duration = item.duration;
        self.state.last_error = None;
        self.publish();

        match self.deck.load(&item) {
            Ok(()) => {
                self.deck.play();
                self.state.playing = true;
                self.state.loading = false;
                debug!(id = %item.id, title = %item.title, "playing");
            }
            Err(e) => {
                error!(id = %item.id, error = %e, "failed to load item");
                reset_playback(&mut self.state);
                self.state.last_error = Some(e);
            }
        }
        self.publish();
    }

    /// Fold a fresh status frame into the published state, advancing
    /// through the queue when the current item just played out.
    fn apply_status(&mut self, frame: StatusFrame) {
        self.state.position = frame.position;
        if frame.duration.is_some() {
            self.state.duration = frame.duration;
        }
        self.state.playing = frame.playing;

        if frame.just_finished {
            if let Some(item) = self.queue.next(self.state.repeat).cloned() {
                debug!(id = %item.id, "advancing to next queued item");
                self.play(item, None);
            } else {
                match self.end_of_queue {
                    EndOfQueue::StopOnLast => {
                        // Keep the finished item visible; only the spent
                        // decoder resource goes away.
                        self.deck.release();
                        self.state.playing = false;
                    }
                    EndOfQueue::ResetToIdle => {
                        self.deck.release();
                        reset_playback(&mut self.state);
                    }
                }
            }
        }
    }

    fn publish(&mut self) {
        if let Ok(mut s) = self.shared.lock() {
            *s = self.state.clone();
        }
        // Drop observers that went away.
        let state = &self.state;
        self.subscribers.retain(|tx| tx.send(state.clone()).is_ok());
    }
}

/// Return the playback fields to their initial empty values. Shuffle and
/// repeat are queue preferences and survive.
fn reset_playback(state: &mut PlaybackState) {
    state.current = None;
    state.playing = false;
    state.loading = false;
    state.position = Duration::ZERO;
    state.duration = None;
    state.last_error = None;
}
