use crate::components::{Icon, IconKind, PlayerActions};
use dioxus::prelude::*;

mod controls;

use controls::{NextButton, PlayPauseButton, PrevButton};

/// Album art, now-playing info, scrubber and transport controls.
#[component]
pub fn Player() -> Element {
    let actions = use_context::<PlayerActions>();
    let snapshot = actions.snapshot();
    let track = actions.current_track();

    let can_seek = snapshot.can_seek();
    let progress = snapshot.progress_percent().round() as i32;
    let fade_class = if snapshot.is_transitioning {
        "track-fade is-transitioning"
    } else {
        "track-fade"
    };

    let on_seek_input = move |e: Event<FormData>| {
        if let Ok(percent) = e.value().parse::<f64>() {
            actions.seek(percent);
        }
    };

    rsx! {
        div { class: "now-playing",
            // Album art placeholder
            div { class: "album-art {fade_class}",
                Icon { kind: IconKind::Music, class: "album-art-icon".to_string() }
            }

            div { class: "now-playing-body",
                div { class: "track-meta {fade_class}",
                    h2 { class: "track-title", "{track.title}" }
                    p { class: "track-artist", "{track.artist}" }
                }

                if let Some(error) = snapshot.error.as_ref() {
                    div { class: "error-banner",
                        Icon { kind: IconKind::Alert, class: "error-banner-icon".to_string() }
                        "{error}"
                    }
                }

                // Progress bar
                div { class: "progress",
                    input {
                        r#type: "range",
                        min: "0",
                        max: "100",
                        step: "1",
                        disabled: !can_seek,
                        value: "{progress}",
                        class: "scrubber",
                        oninput: on_seek_input,
                    }
                    div { class: "time-labels",
                        span { {snapshot.elapsed_label()} }
                        span { {snapshot.total_label()} }
                    }
                }

                div { class: "transport",
                    PrevButton {}
                    PlayPauseButton {}
                    NextButton {}
                }
            }
        }
    }
}
