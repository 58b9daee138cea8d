use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(alias = "url", alias = "sourceUrl")]
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("playlist has no tracks")]
    Empty,
    #[error("track id {0} appears more than once")]
    DuplicateId(TrackId),
}

/// Fixed, ordered track list. Navigation wraps in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    tracks: Rc<[Track]>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlaylistError> {
        if tracks.is_empty() {
            return Err(PlaylistError::Empty);
        }
        for (idx, track) in tracks.iter().enumerate() {
            if tracks[..idx].iter().any(|earlier| earlier.id == track.id) {
                return Err(PlaylistError::DuplicateId(track.id));
            }
        }
        Ok(Self {
            tracks: tracks.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn first(&self) -> &Track {
        &self.tracks[0]
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn index_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.len() - 1) % self.len()
    }
}

#[cfg(test)]
mod tests;
