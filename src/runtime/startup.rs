use std::time::Duration;

use crate::app::App;
use crate::config::{self, EndOfQueueSetting};
use crate::player::{EndOfQueue, Player, PlayerSettings};

/// Map the configuration schema onto the player thread's runtime knobs.
pub fn player_settings(settings: &config::Settings) -> PlayerSettings {
    PlayerSettings {
        load_timeout: Duration::from_millis(settings.audio.load_timeout_ms),
        status_tick: Duration::from_millis(settings.audio.status_tick_ms),
        end_of_queue: match settings.playback.end_of_queue {
            EndOfQueueSetting::StopOnLast => EndOfQueue::StopOnLast,
            EndOfQueueSetting::ResetToIdle => EndOfQueue::ResetToIdle,
        },
        shuffle: settings.playback.shuffle,
        repeat: settings.playback.repeat,
    }
}

/// Push the scanned library to the player as the initial queue.
pub fn apply_playback_defaults(app: &App, player: &Player) {
    player.set_queue(app.items.clone());
}
