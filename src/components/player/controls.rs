use crate::components::{Icon, IconKind, PlayerActions};
use dioxus::prelude::*;

/// Main play/pause button, driven by the shared player context.
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let actions = use_context::<PlayerActions>();
    let playing = actions.snapshot().is_playing;

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            title: if playing { "Pause" } else { "Play" },
            class: "transport-play",
            onclick: move |_| actions.toggle(),
            if playing {
                Icon { kind: IconKind::Pause, class: "transport-icon".to_string() }
            } else {
                Icon { kind: IconKind::Play, class: "transport-icon".to_string() }
            }
        }
    }
}

/// Previous button - wraps to the last track from the first
#[component]
pub(super) fn PrevButton() -> Element {
    let actions = use_context::<PlayerActions>();

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            title: "Previous track",
            class: "transport-skip",
            onclick: move |_| actions.previous(),
            Icon { kind: IconKind::Prev, class: "transport-icon".to_string() }
        }
    }
}

/// Next button - wraps to the first track from the last
#[component]
pub(super) fn NextButton() -> Element {
    let actions = use_context::<PlayerActions>();

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            title: "Next track",
            class: "transport-skip",
            onclick: move |_| actions.next(),
            Icon { kind: IconKind::Next, class: "transport-icon".to_string() }
        }
    }
}
