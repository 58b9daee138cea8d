//! The components module contains the player UI and its platform glue.

mod audio_manager;
mod icons;
mod player;
mod playlist_view;
mod shortcuts;

pub use audio_manager::*;
pub use icons::*;
pub use player::*;
pub use playlist_view::*;
pub use shortcuts::*;

use crate::config::PlayerSetup;
use dioxus::prelude::*;

/// Mounts one player instance: controller, shortcuts and both panels.
#[component]
pub fn MusicPlayer(setup: PlayerSetup) -> Element {
    let keyboard_shortcuts = setup.config.keyboard_shortcuts;
    let actions = use_player(setup);
    use_shortcuts(actions, keyboard_shortcuts);

    rsx! {
        div { class: "player-page",
            div { class: "player-card",
                Player {}
                PlaylistView {}
            }
        }
    }
}

#[cfg(test)]
mod tests;
