//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, PlaybackStatus};
use crate::config::{ControlsSettings, UiSettings};

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    format!(
        "[j/k] up/down | [h/l] prev/next | [H/L] scrub -/+{scrub_seconds}s | [enter] play selected | \
         [space/p] play/pause | [s] shuffle | [r] repeat | [x] stop | [q] quit"
    )
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the now-playing time text, `elapsed / total` when the duration is
/// known.
fn now_playing_time_text(position: Duration, duration: Option<Duration>) -> String {
    match duration {
        Some(total) => format!("{} / {}", format_mmss(position), format_mmss(total)),
        None => format_mmss(position),
    }
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" attacca ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        if app.follow_playback {
            parts.push("CURSOR: Follow".to_string());
        } else {
            parts.push("CURSOR: Free-roam".to_string());
        }

        match app.status() {
            PlaybackStatus::Stopped => parts.push("Stopped".to_string()),
            status => {
                if let Some(track) = &app.playback.current {
                    let time =
                        now_playing_time_text(app.playback.position, app.playback.duration);
                    parts.push(format!("Song: {} [{}]", track.display, time));
                }
                parts.push(
                    match status {
                        PlaybackStatus::Playing => "Playing",
                        _ => "Paused",
                    }
                    .to_string(),
                );
            }
        }

        if app.playback.loading {
            parts.push("Loading...".to_string());
        }

        parts.push(format!(
            "Shuffle: {}",
            if app.playback.shuffle { "ON" } else { "OFF" }
        ));
        parts.push(format!(
            "Repeat: {}",
            if app.playback.repeat { "ON" } else { "OFF" }
        ));

        if let Some(err) = &app.playback.last_error {
            parts.push(format!("Can't play: {err}"));
        }

        if let Some(dir) = &app.current_dir {
            parts.push(format!("Dir: {dir}"));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Track list. Center the selection when possible by rendering only a
    // visible window of the library.
    {
        let playing_id = app.playback.current.as_ref().map(|t| t.id.as_str());
        let total = app.items.len();
        let list_height = chunks[2].height as usize;
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = app.items[start..end]
            .iter()
            .map(|track| {
                if playing_id == Some(track.id.as_str()) {
                    ListItem::new(format!("♪ {}", track.display))
                } else {
                    ListItem::new(format!("  {}", track.display))
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
