use dioxus::prelude::*;

mod components;
mod config;
mod playback;
mod playlist;

use components::MusicPlayer;

const PLAYER_CSS: Asset = asset!("/assets/styling/player.css");

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("failed to initialise logging: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let setup = use_hook(|| {
        config::load_embedded().map_err(|err| {
            tracing::error!("player manifest rejected: {err}");
            err.to_string()
        })
    });

    rsx! {
        document::Stylesheet { href: PLAYER_CSS }

        {
            match setup {
                Ok(setup) => rsx! {
                    MusicPlayer { setup }
                },
                Err(err) => rsx! {
                    div { class: "player-page load-error",
                        "Unable to load the playlist: {err}"
                    }
                },
            }
        }
    }
}
