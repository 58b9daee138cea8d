//! Seam between the controller and whatever actually produces sound.
//!
//! A backend opens one [`AudioHandle`] per current track. Dropping the handle
//! releases it: playback stops, the cursor resets and its event listeners are
//! detached. Handles report lifecycle changes through a [`MediaEventSink`],
//! tagged with the [`HandleId`] they were opened with so the controller can
//! ignore anything a released handle still emits.

use super::PlaybackError;
use crate::playlist::Track;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(pub u64);

/// Serial of one play request. A pause or a newer request supersedes it, so a
/// late rejection carrying an older serial is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayRequest(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    MetadataLoaded,
    TimeUpdate,
    Ended,
    Failed(PlaybackError),
    PlayRejected {
        request: PlayRequest,
        error: PlaybackError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandleEvent {
    pub handle: HandleId,
    pub event: MediaEvent,
}

pub trait AudioHandle {
    /// Requests playback. An `Err` means the request was refused outright;
    /// asynchronous refusals arrive later as [`MediaEvent::PlayRejected`]
    /// carrying the same `request`.
    fn play(&mut self, request: PlayRequest) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn current_time(&self) -> f64;
    /// `None` until the resource's metadata has loaded, or for unbounded streams.
    fn duration(&self) -> Option<f64>;
}

pub trait AudioBackend {
    type Handle: AudioHandle;

    fn open(&mut self, id: HandleId, track: &Track) -> Result<Self::Handle, PlaybackError>;
}

type Listener = Rc<dyn Fn(HandleEvent)>;

/// Late-bound event callback shared between a backend and its handles.
///
/// The receiver usually owns the backend, so it can only be connected after
/// the backend exists. Events emitted while nothing is connected are dropped.
#[derive(Clone, Default)]
pub struct MediaEventSink {
    listener: Rc<RefCell<Option<Listener>>>,
}

impl MediaEventSink {
    pub fn connect(&self, listener: impl Fn(HandleEvent) + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn disconnect(&self) {
        self.listener.borrow_mut().take();
    }

    pub fn emit(&self, handle: HandleId, event: MediaEvent) {
        let listener = self.listener.borrow().clone();
        match listener {
            Some(listener) => listener(HandleEvent { handle, event }),
            None => tracing::debug!(?handle, ?event, "media event dropped, no listener"),
        }
    }
}

impl std::fmt::Debug for MediaEventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaEventSink")
            .field("connected", &self.listener.borrow().is_some())
            .finish()
    }
}
