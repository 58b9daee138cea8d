use crate::playlist::TrackId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("track {0} is not in the playlist")]
    UnknownTrack(TrackId),
    #[error("Playback was aborted before the stream loaded.")]
    Aborted,
    #[error("Network error while loading this track.")]
    Network,
    #[error("Audio playback failed due to a decode error.")]
    Decode,
    #[error("Failed to load audio because no supported source was found.")]
    SourceNotSupported,
    #[error("The browser refused to start playback: {0}")]
    PlayRejected(String),
    #[error("Audio output is unavailable: {0}")]
    BackendUnavailable(String),
    #[error("Unable to load this audio source (media error {0}).")]
    Unknown(u16),
}

impl PlaybackError {
    /// Maps a `MediaError.code` reported by an HTML media element.
    pub fn from_media_error_code(code: u16) -> Self {
        match code {
            1 => Self::Aborted,
            2 => Self::Network,
            3 => Self::Decode,
            4 => Self::SourceNotSupported,
            other => Self::Unknown(other),
        }
    }
}
