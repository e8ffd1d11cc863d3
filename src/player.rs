//! Playback coordination: queue state, the decoder deck and the player
//! thread that ties UI intents to published state.

mod backend;
mod coordinator;
mod deck;
mod error;
mod queue;
mod thread;
mod types;

pub use backend::{Backend, BackendFactory, DeviceGuard, Resource, ResourceStatus};
pub use coordinator::Player;
pub use error::LoadError;
pub use types::{EndOfQueue, PlaybackState, PlayerSettings};
