use super::audio::{AudioBackend, AudioHandle, HandleEvent, HandleId, MediaEvent, PlayRequest};
use super::state::{PlaybackSnapshot, PlayerPhase};
use super::PlaybackError;
use crate::config::PlayerConfig;
use crate::playlist::{Playlist, Track, TrackId};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Identifies the single deferred track swap that is allowed to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionTicket(u64);

#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    ticket: TransitionTicket,
    target: usize,
    resume: bool,
    /// Phase the current track was in when the first of the pending requests arrived.
    before: PlayerPhase,
}

/// Owns the current track, its audio handle and everything the UI observes.
///
/// Track changes are two-step: a request puts the controller into
/// [`PlayerPhase::Transitioning`] and hands out a [`TransitionTicket`]; the
/// host fires [`complete_transition`](Self::complete_transition) with that
/// ticket once [`transition_delay`](Self::transition_delay) has passed. Any
/// newer request replaces the ticket, so older timers become no-ops.
pub struct PlaybackController<B: AudioBackend> {
    playlist: Playlist,
    transition_delay: Duration,
    backend: B,
    handle: Option<B::Handle>,
    handle_id: Option<HandleId>,
    handle_serial: u64,
    /// Whether the live handle has an outstanding play request.
    audible: bool,
    play_serial: u64,
    current: usize,
    phase: PlayerPhase,
    current_time: f64,
    duration: Option<f64>,
    pending: Option<PendingTransition>,
    ticket_serial: u64,
    error: Option<PlaybackError>,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(playlist: Playlist, config: &PlayerConfig, backend: B) -> Self {
        let first = playlist.first().id;
        let mut controller = Self {
            playlist,
            transition_delay: config.transition_delay(),
            backend,
            handle: None,
            handle_id: None,
            handle_serial: 0,
            audible: false,
            play_serial: 0,
            current: 0,
            phase: PlayerPhase::Idle(first),
            current_time: 0.0,
            duration: None,
            pending: None,
            ticket_serial: 0,
            error: None,
        };
        controller.open_current();
        controller
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_track(&self) -> &Track {
        &self.playlist.tracks()[self.current]
    }

    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    pub fn transition_delay(&self) -> Duration {
        self.transition_delay
    }

    pub fn pending_transition(&self) -> Option<TransitionTicket> {
        self.pending.map(|p| p.ticket)
    }

    /// Whether the live handle is producing audio. During a transition this is
    /// the outgoing track; the intent carried to the incoming one is separate.
    pub fn is_playing(&self) -> bool {
        self.audible
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            phase: self.phase,
            current_track_id: self.current_track().id,
            pending_track_id: self
                .pending
                .and_then(|p| self.playlist.get(p.target))
                .map(|t| t.id),
            is_playing: self.is_playing(),
            is_transitioning: self.pending.is_some(),
            current_time: self.current_time,
            duration: self.duration,
            error: self.error.clone(),
        }
    }

    pub fn select_track(&mut self, id: TrackId) -> Result<(), PlaybackError> {
        let target = self
            .playlist
            .index_of(id)
            .ok_or(PlaybackError::UnknownTrack(id))?;
        if self.pending.is_none() && target == self.current {
            self.toggle_play_pause();
        } else {
            self.begin_transition(target, true);
        }
        Ok(())
    }

    pub fn next(&mut self) {
        let target = self.playlist.next_index(self.effective_index());
        self.begin_transition(target, self.play_intent());
    }

    pub fn previous(&mut self) {
        let target = self.playlist.previous_index(self.effective_index());
        self.begin_transition(target, self.play_intent());
    }

    pub fn toggle_play_pause(&mut self) {
        if self.pending.is_some() {
            // The outgoing handle follows the button; the incoming track inherits it.
            if self.audible {
                self.silence();
            } else {
                self.play_live_handle();
            }
            let resume = self.audible;
            if let Some(pending) = self.pending.as_mut() {
                pending.resume = resume;
            }
            debug!(resume, "play intent changed mid-transition");
            return;
        }

        match self.phase {
            PlayerPhase::Playing(id) => {
                self.silence();
                self.phase = PlayerPhase::Paused(id);
            }
            _ => self.start_playback(),
        }
    }

    /// `percent` is the scrubber position in `[0, 100]`.
    pub fn seek(&mut self, percent: f64) {
        if self.pending.is_some() {
            return;
        }
        let Some(duration) = self.duration.filter(|d| *d > 0.0) else {
            debug!("seek ignored, duration unknown");
            return;
        };
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        let time = percent / 100.0 * duration;
        if let Some(handle) = self.handle.as_mut() {
            handle.set_current_time(time);
        }
        self.current_time = time;
    }

    /// Fires the deferred track swap. Returns `false` for a ticket that has
    /// since been replaced or cancelled.
    pub fn complete_transition(&mut self, ticket: TransitionTicket) -> bool {
        let Some(pending) = self.pending.filter(|p| p.ticket == ticket) else {
            debug!(?ticket, "stale transition ticket ignored");
            return false;
        };
        self.pending = None;

        self.release_handle();
        self.current = pending.target;
        self.current_time = 0.0;
        self.duration = None;
        self.error = None;
        self.open_current();

        let id = self.current_track().id;
        info!(track = %id, resume = pending.resume, "track transition complete");
        if self.handle.is_none() {
            self.phase = PlayerPhase::Paused(id);
        } else if pending.resume {
            self.start_playback();
        } else {
            self.phase = PlayerPhase::Loading(id);
        }
        true
    }

    pub fn handle_media_event(&mut self, event: HandleEvent) {
        if self.handle_id != Some(event.handle) {
            debug!(handle = ?event.handle, "event from released audio handle ignored");
            return;
        }
        match event.event {
            MediaEvent::MetadataLoaded => self.on_metadata_loaded(),
            MediaEvent::TimeUpdate => self.on_time_tick(),
            MediaEvent::Ended => self.on_track_ended(),
            MediaEvent::Failed(err) => self.fail(err),
            MediaEvent::PlayRejected { request, error } => {
                if request == PlayRequest(self.play_serial) {
                    self.fail(error);
                } else {
                    debug!(?request, error = %error, "superseded play request rejected");
                }
            }
        }
    }

    pub fn on_metadata_loaded(&mut self) {
        let Some(handle) = self.handle.as_ref() else {
            return;
        };
        self.duration = handle.duration();
        self.current_time = self.clamp_time(handle.current_time());
        if let PlayerPhase::Loading(id) = self.phase {
            self.phase = PlayerPhase::Paused(id);
        }
    }

    pub fn on_time_tick(&mut self) {
        if let Some(handle) = self.handle.as_ref() {
            self.current_time = self.clamp_time(handle.current_time());
        }
    }

    /// End of track stops playback and rewinds; it never advances.
    pub fn on_track_ended(&mut self) {
        self.audible = false;
        self.current_time = 0.0;
        if let Some(handle) = self.handle.as_mut() {
            handle.set_current_time(0.0);
        }
        let id = self.current_track().id;
        match self.pending.as_mut() {
            Some(pending) => pending.resume = false,
            None => self.phase = PlayerPhase::Paused(id),
        }
    }

    fn play_intent(&self) -> bool {
        self.pending.map_or(self.audible, |p| p.resume)
    }

    fn effective_index(&self) -> usize {
        self.pending.map_or(self.current, |p| p.target)
    }

    fn begin_transition(&mut self, target: usize, resume: bool) {
        if target == self.current {
            self.cancel_transition();
            return;
        }

        let before = self.pending.take().map_or(self.phase, |p| p.before);
        self.ticket_serial += 1;
        let ticket = TransitionTicket(self.ticket_serial);
        self.pending = Some(PendingTransition {
            ticket,
            target,
            resume,
            before,
        });

        let from = self.current_track().id;
        let to = self.playlist.tracks()[target].id;
        self.phase = PlayerPhase::Transitioning { from, to };
        info!(%from, %to, resume, "track transition scheduled");
    }

    /// The latest request points back at the live track: drop the pending swap
    /// and settle the live handle on the carried play intent.
    fn cancel_transition(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let id = self.current_track().id;
        info!(track = %id, "pending track transition cancelled");

        if pending.resume {
            if self.audible {
                self.phase = PlayerPhase::Playing(id);
            } else {
                self.start_playback();
            }
            return;
        }

        self.silence();
        self.phase = match pending.before {
            PlayerPhase::Idle(_) | PlayerPhase::Loading(_) => pending.before,
            _ => PlayerPhase::Paused(id),
        };
    }

    fn start_playback(&mut self) {
        if self.handle.is_none() {
            self.open_current();
        }
        let id = self.current_track().id;
        self.phase = if self.play_live_handle() {
            PlayerPhase::Playing(id)
        } else {
            PlayerPhase::Paused(id)
        };
    }

    /// Issues a play request on the live handle without touching the phase.
    fn play_live_handle(&mut self) -> bool {
        let Some(handle) = self.handle.as_mut() else {
            return false;
        };
        self.play_serial += 1;
        match handle.play(PlayRequest(self.play_serial)) {
            Ok(()) => {
                self.audible = true;
                self.error = None;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    fn silence(&mut self) {
        // A pause supersedes any play request still in flight.
        self.play_serial += 1;
        if self.audible {
            if let Some(handle) = self.handle.as_mut() {
                handle.pause();
            }
            self.audible = false;
        }
    }

    /// Playback failures surface in the snapshot and leave the track paused.
    fn fail(&mut self, err: PlaybackError) {
        warn!(track = %self.current_track().id, error = %err, "playback failed");
        self.silence();
        self.error = Some(err);
        if self.pending.is_none() {
            self.phase = PlayerPhase::Paused(self.current_track().id);
        }
    }

    fn open_current(&mut self) {
        self.handle_serial += 1;
        let id = HandleId(self.handle_serial);
        let track = &self.playlist.tracks()[self.current];
        match self.backend.open(id, track) {
            Ok(handle) => {
                debug!(track = %track.id, handle = id.0, "audio handle opened");
                self.handle = Some(handle);
                self.handle_id = Some(id);
            }
            Err(err) => {
                warn!(track = %track.id, error = %err, "failed to open audio handle");
                self.handle = None;
                self.handle_id = None;
                self.error = Some(err);
            }
        }
    }

    fn release_handle(&mut self) {
        if let Some(handle) = self.handle.take() {
            drop(handle);
            debug!(handle = ?self.handle_id, "audio handle released");
        }
        self.handle_id = None;
        self.audible = false;
    }

    fn clamp_time(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        match self.duration {
            Some(duration) => seconds.min(duration),
            None => seconds,
        }
    }
}
