//! The decoder seam: traits for opening and controlling playback resources,
//! plus the rodio-backed implementation used in production.

use std::any::Any;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};
use tracing::warn;

use crate::library::PlayableItem;

use super::error::LoadError;

/// A snapshot of one resource's playback progress.
#[derive(Debug, Clone, Copy)]
pub struct ResourceStatus {
    pub playing: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    /// The resource reached its natural end (not an explicit stop).
    pub finished: bool,
}

/// One live decoder/output handle.
///
/// Operations are best-effort and never error; their effects are observed
/// through `status`.
pub trait Resource: Send + Sync {
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    fn seek(&self, position: Duration);
    fn status(&self) -> ResourceStatus;
}

/// Opens decoder resources for playable items.
///
/// `open` may block for as long as the media takes to probe; the deck runs
/// it off the player thread so loads can be raced against a timeout.
pub trait Backend: Send + Sync {
    fn open(&self, item: &PlayableItem) -> Result<Arc<dyn Resource>, LoadError>;
}

/// Keeps backend-owned device handles alive for the lifetime of the player
/// thread. The rodio output stream is not `Send`, so it cannot live inside
/// the shared backend itself.
pub type DeviceGuard = Box<dyn Any>;

pub type BackendFactory = Box<dyn FnOnce() -> (Arc<dyn Backend>, DeviceGuard) + Send>;

/// Open the default audio device and return a backend feeding its mixer.
///
/// Panics when no output device is available; the player treats audio
/// output as a hard startup requirement.
pub fn rodio_backend() -> (Arc<dyn Backend>, DeviceGuard) {
    let mut stream =
        OutputStreamBuilder::open_default_stream().expect("no audio output device");
    // rodio logs to stderr when the stream is dropped; noisy under a TUI.
    stream.log_on_drop(false);
    let mixer = stream.mixer().clone();
    (Arc::new(RodioBackend { mixer }), Box::new(stream))
}

struct RodioBackend {
    mixer: Mixer,
}

impl Backend for RodioBackend {
    fn open(&self, item: &PlayableItem) -> Result<Arc<dyn Resource>, LoadError> {
        let path = local_path(&item.media_url)?;
        let file = File::open(Path::new(&path))
            .map_err(|e| LoadError::Unreachable(format!("{path}: {e}")))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| LoadError::Rejected(e.to_string()))?;
        // Prefer the decoder's idea of the duration over the tagged one.
        let duration = source.total_duration().or(item.duration);

        let sink = Sink::connect_new(&self.mixer);
        sink.append(source);
        sink.pause();
        Ok(Arc::new(RodioResource { sink, duration }))
    }
}

/// Accepts plain paths and `file://` URLs; anything else is out of scope
/// for the local backend.
fn local_path(media_url: &str) -> Result<String, LoadError> {
    let url = media_url.trim();
    if url.is_empty() {
        return Err(LoadError::MissingUrl);
    }
    if let Some(path) = url.strip_prefix("file://") {
        return Ok(path.to_string());
    }
    if let Some((scheme, _)) = url.split_once("://") {
        return Err(LoadError::UnsupportedScheme(scheme.to_string()));
    }
    Ok(url.to_string())
}

struct RodioResource {
    sink: Sink,
    duration: Option<Duration>,
}

impl Resource for RodioResource {
    fn play(&self) {
        self.sink.play();
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn stop(&self) {
        self.sink.stop();
    }

    fn seek(&self, position: Duration) {
        if let Err(e) = self.sink.try_seek(position) {
            warn!(?position, error = %e, "seek rejected by decoder");
        }
    }

    fn status(&self) -> ResourceStatus {
        // The sink reports empty once every appended source has played out.
        let finished = self.sink.empty();
        let position = if finished {
            self.duration.unwrap_or_else(|| self.sink.get_pos())
        } else {
            self.sink.get_pos()
        };
        ResourceStatus {
            playing: !self.sink.is_paused() && !finished,
            position,
            duration: self.duration,
            finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_path_accepts_plain_paths_and_file_urls() {
        assert_eq!(local_path("/tmp/a.mp3").unwrap(), "/tmp/a.mp3");
        assert_eq!(local_path("file:///tmp/a.mp3").unwrap(), "/tmp/a.mp3");
        assert_eq!(local_path("  /tmp/b.flac ").unwrap(), "/tmp/b.flac");
    }

    #[test]
    fn local_path_rejects_missing_and_remote_urls() {
        assert_eq!(local_path("").unwrap_err(), LoadError::MissingUrl);
        assert_eq!(local_path("   ").unwrap_err(), LoadError::MissingUrl);
        assert_eq!(
            local_path("https://cdn.example.com/a.mp3").unwrap_err(),
            LoadError::UnsupportedScheme("https".to_string())
        );
    }
}
