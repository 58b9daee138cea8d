use super::PlaybackError;
use crate::playlist::TrackId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    /// Handle bound, nothing requested yet.
    Idle(TrackId),
    /// Handle freshly bound without a play request, duration still unknown.
    Loading(TrackId),
    Playing(TrackId),
    Paused(TrackId),
    Transitioning { from: TrackId, to: TrackId },
}

/// What the presentation layer renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub phase: PlayerPhase,
    pub current_track_id: TrackId,
    pub pending_track_id: Option<TrackId>,
    pub is_playing: bool,
    pub is_transitioning: bool,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub error: Option<PlaybackError>,
}

impl PlaybackSnapshot {
    /// Scrubber position in `[0, 100]`; zero while the duration is unknown.
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.current_time, self.duration)
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.current_time)
    }

    pub fn total_label(&self) -> String {
        format_time(self.duration.unwrap_or(0.0))
    }

    pub fn can_seek(&self) -> bool {
        !self.is_transitioning && self.duration.is_some_and(|d| d > 0.0)
    }
}

pub fn progress_percent(current_time: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(duration) if duration > 0.0 && current_time.is_finite() => {
            (current_time / duration * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

/// `M:SS`, minutes unbounded. Anything not a finite non-negative number renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
