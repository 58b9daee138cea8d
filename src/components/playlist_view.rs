use crate::components::{Icon, IconKind, PlayerActions};
use crate::playlist::Track;
use dioxus::prelude::*;

/// Every track in the fixed playlist; the current one is highlighted.
#[component]
pub fn PlaylistView() -> Element {
    let actions = use_context::<PlayerActions>();
    let snapshot = actions.snapshot();
    let playlist = actions.playlist();

    rsx! {
        div { class: "playlist",
            for track in playlist.tracks().iter().cloned() {
                TrackRow {
                    key: "{track.id}",
                    is_current: track.id == snapshot.current_track_id,
                    is_playing: track.id == snapshot.current_track_id && snapshot.is_playing,
                    is_pending: snapshot.pending_track_id == Some(track.id),
                    track,
                }
            }
        }
    }
}

#[component]
fn TrackRow(track: Track, is_current: bool, is_playing: bool, is_pending: bool) -> Element {
    let actions = use_context::<PlayerActions>();
    let id = track.id;

    let row_class = if is_current {
        "playlist-row is-current"
    } else if is_pending {
        "playlist-row is-pending"
    } else {
        "playlist-row"
    };

    rsx! {
        div { class: "{row_class}",
            div { class: "playlist-row-info",
                div { class: "playlist-row-art",
                    Icon { kind: IconKind::Music, class: "playlist-row-art-icon".to_string() }
                }
                div { class: "playlist-row-text",
                    h3 { class: "playlist-row-title", "{track.title}" }
                    p { class: "playlist-row-artist", "{track.artist}" }
                }
            }
            button {
                r#type: "button",
                title: if is_playing { "Pause" } else { "Play" },
                class: "playlist-row-button",
                onclick: move |_| actions.select(id),
                if is_playing {
                    Icon { kind: IconKind::Pause, class: "playlist-row-button-icon".to_string() }
                } else {
                    Icon { kind: IconKind::Play, class: "playlist-row-button-icon".to_string() }
                }
            }
        }
    }
}
