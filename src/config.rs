//! Player settings and the compiled-in track manifest.

use crate::playlist::{Playlist, PlaylistError, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const EMBEDDED_MANIFEST: &str = include_str!("../assets/playlist.json");
const MAX_TRANSITION_DELAY_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse player manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid playlist: {0}")]
    Playlist(#[from] PlaylistError),
}

/// Player settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,
    #[serde(default = "default_keyboard_shortcuts")]
    pub keyboard_shortcuts: bool,
}

fn default_transition_delay_ms() -> u64 {
    300
}

fn default_keyboard_shortcuts() -> bool {
    true
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            transition_delay_ms: default_transition_delay_ms(),
            keyboard_shortcuts: default_keyboard_shortcuts(),
        }
    }
}

impl PlayerConfig {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms.min(MAX_TRANSITION_DELAY_MS))
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    player: PlayerConfig,
    #[serde(default)]
    tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSetup {
    pub config: PlayerConfig,
    pub playlist: Playlist,
}

pub fn parse_manifest(json: &str) -> Result<PlayerSetup, ConfigError> {
    let manifest: Manifest = serde_json::from_str(json)?;
    let playlist = Playlist::new(manifest.tracks)?;
    Ok(PlayerSetup {
        config: manifest.player,
        playlist,
    })
}

pub fn load_embedded() -> Result<PlayerSetup, ConfigError> {
    parse_manifest(EMBEDDED_MANIFEST)
}

#[cfg(test)]
mod tests;
