//! The playback deck: owns at most one live decoder resource and the status
//! poller attached to it.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::library::PlayableItem;

use super::backend::{Backend, Resource};
use super::error::LoadError;
use super::types::{PlayerMsg, StatusFrame};

pub(super) struct Deck {
    backend: Arc<dyn Backend>,
    current: Option<Arc<dyn Resource>>,
    generation: u64,
    events: Sender<PlayerMsg>,
    load_timeout: Duration,
    status_tick: Duration,
}

impl Deck {
    pub fn new(
        backend: Arc<dyn Backend>,
        events: Sender<PlayerMsg>,
        load_timeout: Duration,
        status_tick: Duration,
    ) -> Self {
        Self {
            backend,
            current: None,
            generation: 0,
            events,
            load_timeout,
            status_tick,
        }
    }

    /// The generation of the most recent load. Status frames carrying any
    /// other value are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Release whatever is loaded, then open `item` paused.
    ///
    /// The open runs on a helper thread and is raced against the configured
    /// timeout. Losing the race abandons the wait, not the open itself; a
    /// late-arriving resource is dropped when the helper fails to hand it
    /// over.
    pub fn load(&mut self, item: &PlayableItem) -> Result<(), LoadError> {
        self.release();
        self.generation += 1;

        let (tx, rx) = mpsc::channel();
        let backend = self.backend.clone();
        let item = item.clone();
        thread::spawn(move || {
            let _ = tx.send(backend.open(&item));
        });

        let resource = match rx.recv_timeout(self.load_timeout) {
            Ok(Ok(resource)) => resource,
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(LoadError::Timeout(self.load_timeout)),
        };

        spawn_status_poller(
            Arc::downgrade(&resource),
            self.generation,
            self.status_tick,
            self.events.clone(),
        );
        self.current = Some(resource);
        Ok(())
    }

    pub fn play(&self) {
        if let Some(r) = &self.current {
            r.play();
        }
    }

    pub fn pause(&self) {
        if let Some(r) = &self.current {
            r.pause();
        }
    }

    pub fn seek(&self, position: Duration) {
        if let Some(r) = &self.current {
            r.seek(position);
        }
    }

    /// Stop and drop the current resource; its poller notices the drop and
    /// exits. A no-op when nothing is loaded.
    pub fn release(&mut self) {
        if let Some(resource) = self.current.take() {
            resource.stop();
            // Any frame still in flight from this resource is stale now.
            self.generation += 1;
            debug!(generation = self.generation, "released decoder resource");
        }
    }
}

/// Poll one resource on a fixed cadence, reporting progress into the player
/// channel. `just_finished` is reported exactly once per resource; idle
/// frames keep flowing afterwards until the resource is dropped or the
/// player goes away.
fn spawn_status_poller(
    resource: Weak<dyn Resource>,
    generation: u64,
    tick: Duration,
    events: Sender<PlayerMsg>,
) {
    thread::spawn(move || {
        let mut finish_reported = false;
        loop {
            thread::sleep(tick);
            let Some(resource) = resource.upgrade() else {
                break;
            };
            let status = resource.status();
            let just_finished = status.finished && !finish_reported;
            if status.finished {
                finish_reported = true;
            }
            let frame = StatusFrame {
                generation,
                playing: status.playing,
                position: status.position,
                duration: status.duration,
                just_finished,
            };
            if events.send(PlayerMsg::Status(frame)).is_err() {
                break;
            }
        }
    });
}
