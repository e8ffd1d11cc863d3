use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackStatus};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlaybackState, Player};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// Main terminal event loop: drains coordinator snapshots, draws the UI and
/// translates key presses and MPRIS commands into player intents. Returns
/// `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    updates: &Receiver<PlaybackState>,
    mpris: &MprisHandle,
    control_tx: &Sender<ControlCmd>,
    control_rx: &Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Fold in every snapshot published since the last pass; the MPRIS
        // surface follows the same state the TUI shows.
        let mut changed = false;
        while let Ok(state) = updates.try_recv() {
            app.apply_snapshot(state);
            changed = true;
        }
        if changed {
            update_mpris(mpris, app);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, control_tx) {
                    return Ok(());
                }
            }
        }
    }
}

fn handle_control_cmd(cmd: ControlCmd, app: &mut App, player: &Player) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => match app.status() {
            PlaybackStatus::Paused => player.resume(),
            PlaybackStatus::Stopped | PlaybackStatus::Playing => {
                play_selected(app, player);
            }
        },
        ControlCmd::Pause => {
            if app.status() == PlaybackStatus::Playing {
                player.pause();
            }
        }
        ControlCmd::PlayPause => match app.status() {
            PlaybackStatus::Stopped => play_selected(app, player),
            _ => player.toggle_pause(),
        },
        ControlCmd::Stop => player.stop(),
        ControlCmd::Next => {
            if app.has_items() {
                player.next();
            }
        }
        ControlCmd::Prev => {
            if app.has_items() {
                player.previous();
            }
        }
    }
    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    control_tx: &Sender<ControlCmd>,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_playback_off();
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_playback_off();
            app.prev();
        }
        KeyCode::Enter => play_selected(app, player),
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('H') => {
            scrub(app, player, -(settings.controls.scrub_seconds as i64));
        }
        KeyCode::Char('L') => {
            scrub(app, player, settings.controls.scrub_seconds as i64);
        }
        KeyCode::Char('s') => player.toggle_shuffle(),
        KeyCode::Char('r') => player.toggle_repeat(),
        KeyCode::Char('x') => player.stop(),
        _ => {}
    }
    false
}

/// Play the track under the cursor, handing the whole visible library over
/// as the queue.
fn play_selected(app: &mut App, player: &Player) {
    if let Some(item) = app.selected_item().cloned() {
        app.follow_playback_on();
        player.play_item(item, Some(app.items.clone()));
    }
}

/// Convert relative scrubbing into the absolute position the player takes.
fn scrub(app: &App, player: &Player, delta_seconds: i64) {
    if app.playback.current.is_none() {
        return;
    }
    let position = app.playback.position;
    let target = if delta_seconds >= 0 {
        position.saturating_add(Duration::from_secs(delta_seconds as u64))
    } else {
        position.saturating_sub(Duration::from_secs(delta_seconds.unsigned_abs()))
    };
    // Scrubbing forward never runs past the end of the item.
    let target = match app.playback.duration {
        Some(total) => target.min(total),
        None => target,
    };
    player.seek_to(target);
}
