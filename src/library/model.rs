use std::time::Duration;

/// A single playable track reference with display metadata.
///
/// Items are immutable once queued; the player identifies them by `id` and
/// otherwise treats them as opaque values, so any source producing this
/// shape can feed the queue.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayableItem {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    /// Where the media lives. The rodio backend accepts plain paths and
    /// `file://` URLs.
    pub media_url: String,
    pub artwork_url: Option<String>,
    /// Duration as reported by the source metadata. The decoder's own value
    /// supersedes this once the item is loaded.
    pub duration: Option<Duration>,
    pub display: String,
}

/// Compose the one-line display string for a track.
pub fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}
