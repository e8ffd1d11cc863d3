use super::*;
use crate::library::PlayableItem;
use crate::player::PlaybackState;
use std::time::Duration;

fn t(id: &str) -> PlayableItem {
    PlayableItem {
        id: id.into(),
        title: id.into(),
        artist: None,
        media_url: format!("/music/{id}.mp3"),
        artwork_url: None,
        duration: Some(Duration::from_secs(60)),
        display: id.into(),
    }
}

#[test]
fn selection_wraps_both_ways() {
    let mut app = App::new(vec![t("a"), t("b"), t("c")]);

    app.next();
    assert_eq!(app.selected, 1);
    app.next();
    app.next();
    assert_eq!(app.selected, 0);

    app.prev();
    assert_eq!(app.selected, 2);
}

#[test]
fn selection_is_a_noop_on_an_empty_library() {
    let mut app = App::new(Vec::new());
    app.next();
    app.prev();
    assert_eq!(app.selected, 0);
    assert!(app.selected_item().is_none());
}

#[test]
fn apply_snapshot_follows_the_playing_item_when_enabled() {
    let mut app = App::new(vec![t("a"), t("b"), t("c")]);

    let state = PlaybackState {
        current: Some(t("c")),
        playing: true,
        ..PlaybackState::default()
    };
    app.apply_snapshot(state.clone());
    assert_eq!(app.selected, 2);

    app.follow_playback_off();
    app.selected = 0;
    app.apply_snapshot(state);
    assert_eq!(app.selected, 0);
}

#[test]
fn status_maps_snapshot_to_tri_state() {
    let mut app = App::new(vec![t("a")]);
    assert_eq!(app.status(), PlaybackStatus::Stopped);

    app.playback = PlaybackState {
        current: Some(t("a")),
        playing: true,
        ..PlaybackState::default()
    };
    assert_eq!(app.status(), PlaybackStatus::Playing);

    app.playback.playing = false;
    assert_eq!(app.status(), PlaybackStatus::Paused);
}
