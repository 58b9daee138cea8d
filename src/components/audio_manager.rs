//! Audio Manager - binds the playback controller to the platform's audio output
//! and owns the deferred track-transition timer.

use crate::config::PlayerSetup;
#[cfg(target_arch = "wasm32")]
use crate::playback::MediaEvent;
use crate::playback::{
    AudioBackend, AudioHandle, HandleId, MediaEventSink, PlayRequest, PlaybackController,
    PlaybackError, PlaybackSnapshot, TransitionTicket,
};
use crate::playlist::{Playlist, Track, TrackId};
use dioxus::core::{current_scope_id, Runtime, RuntimeGuard, ScopeId, Task};
use dioxus::prelude::*;
use std::time::Duration;
use tracing::{debug, warn};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlAudioElement;

#[cfg(target_arch = "wasm32")]
pub type PlatformAudio = WebAudioBackend;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformAudio = SilentAudioBackend;

pub type PlayerController = PlaybackController<PlatformAudio>;

/// One `<audio>` element per handle, created detached from the DOM.
#[cfg(target_arch = "wasm32")]
pub struct WebAudioBackend {
    sink: MediaEventSink,
}

#[cfg(target_arch = "wasm32")]
impl WebAudioBackend {
    pub fn new(sink: MediaEventSink) -> Self {
        Self { sink }
    }
}

#[cfg(target_arch = "wasm32")]
pub struct WebAudioHandle {
    audio: HtmlAudioElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
    sink: MediaEventSink,
    id: HandleId,
}

#[cfg(target_arch = "wasm32")]
impl AudioBackend for WebAudioBackend {
    type Handle = WebAudioHandle;

    fn open(&mut self, id: HandleId, track: &Track) -> Result<WebAudioHandle, PlaybackError> {
        let audio = HtmlAudioElement::new_with_src(&track.source_url)
            .map_err(|err| PlaybackError::BackendUnavailable(js_error_text(&err)))?;
        // Stream instead of buffering the whole file up front.
        audio.set_preload("metadata");

        let mut handle = WebAudioHandle {
            audio,
            listeners: Vec::new(),
            sink: self.sink.clone(),
            id,
        };
        handle.listen("loadedmetadata", MediaEvent::MetadataLoaded)?;
        handle.listen("timeupdate", MediaEvent::TimeUpdate)?;
        handle.listen("ended", MediaEvent::Ended)?;

        let sink = self.sink.clone();
        let audio = handle.audio.clone();
        let error_cb = Closure::wrap(Box::new(move || {
            let code = audio.error().map(|e| e.code()).unwrap_or(0);
            sink.emit(id, MediaEvent::Failed(PlaybackError::from_media_error_code(code)));
        }) as Box<dyn FnMut()>);
        handle.attach("error", error_cb)?;

        Ok(handle)
    }
}

#[cfg(target_arch = "wasm32")]
impl WebAudioHandle {
    fn listen(&mut self, name: &'static str, event: MediaEvent) -> Result<(), PlaybackError> {
        let sink = self.sink.clone();
        let id = self.id;
        let cb = Closure::wrap(Box::new(move || sink.emit(id, event.clone())) as Box<dyn FnMut()>);
        self.attach(name, cb)
    }

    fn attach(
        &mut self,
        name: &'static str,
        cb: Closure<dyn FnMut()>,
    ) -> Result<(), PlaybackError> {
        self.audio
            .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
            .map_err(|err| PlaybackError::BackendUnavailable(js_error_text(&err)))?;
        self.listeners.push((name, cb));
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioHandle for WebAudioHandle {
    fn play(&mut self, request: PlayRequest) -> Result<(), PlaybackError> {
        let promise = self
            .audio
            .play()
            .map_err(|err| PlaybackError::PlayRejected(js_error_text(&err)))?;
        let sink = self.sink.clone();
        let id = self.id;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                let error = PlaybackError::PlayRejected(js_error_text(&err));
                sink.emit(id, MediaEvent::PlayRejected { request, error });
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        let _ = self.audio.pause();
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.audio.duration();
        (duration.is_finite() && duration >= 0.0).then_some(duration)
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for WebAudioHandle {
    fn drop(&mut self) {
        let _ = self.audio.pause();
        self.audio.set_current_time(0.0);
        for (name, cb) in self.listeners.drain(..) {
            let _ = self
                .audio
                .remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
        }
        // Abort any in-flight fetch for the old source.
        let _ = self.audio.remove_attribute("src");
        self.audio.load();
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error_text(err: &wasm_bindgen::JsValue) -> String {
    let name = js_sys::Reflect::get(err, &"name".into())
        .ok()
        .and_then(|v| v.as_string());
    let message = js_sys::Reflect::get(err, &"message".into())
        .ok()
        .and_then(|v| v.as_string());
    match (name, message) {
        (Some(name), Some(message)) if !message.is_empty() => format!("{name}: {message}"),
        (Some(name), _) => name,
        (None, Some(message)) => message,
        (None, None) => "unknown error".to_string(),
    }
}

/// Stand-in for native builds, which have no `<audio>` element. It keeps a
/// cursor so the UI stays coherent but never produces sound or events.
#[cfg(not(target_arch = "wasm32"))]
pub struct SilentAudioBackend {
    _sink: MediaEventSink,
}

#[cfg(not(target_arch = "wasm32"))]
impl SilentAudioBackend {
    pub fn new(sink: MediaEventSink) -> Self {
        Self { _sink: sink }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub struct SilentAudioHandle {
    position: f64,
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioBackend for SilentAudioBackend {
    type Handle = SilentAudioHandle;

    fn open(&mut self, id: HandleId, track: &Track) -> Result<SilentAudioHandle, PlaybackError> {
        warn!(handle = id.0, url = %track.source_url, "no audio output on this platform");
        Ok(SilentAudioHandle { position: 0.0 })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioHandle for SilentAudioHandle {
    fn play(&mut self, _request: PlayRequest) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        None
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(delay: Duration) {
    gloo_timers::future::TimeoutFuture::new(delay.as_millis().min(u32::MAX as u128) as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await;
}

/// Transport commands shared by every control through context.
///
/// After each command the scheduled transition timer is reconciled with the
/// controller: a replaced ticket cancels its task before the new one starts.
/// Commands may arrive from DOM listeners that run with no scope on the
/// stack, so the timer is spawned on the scope that mounted the player.
#[derive(Clone, Copy)]
pub struct PlayerActions {
    controller: Signal<PlayerController>,
    timer: Signal<Option<(TransitionTicket, Task)>>,
    scope: ScopeId,
}

impl PlayerActions {
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.controller.read().snapshot()
    }

    pub fn playlist(&self) -> Playlist {
        self.controller.read().playlist().clone()
    }

    pub fn current_track(&self) -> Track {
        self.controller.read().current_track().clone()
    }

    pub fn select(&self, id: TrackId) {
        let mut controller = self.controller;
        if let Err(err) = controller.write().select_track(id) {
            warn!(error = %err, "track selection rejected");
        }
        self.sync_timer();
    }

    pub fn toggle(&self) {
        let mut controller = self.controller;
        controller.write().toggle_play_pause();
        self.sync_timer();
    }

    pub fn next(&self) {
        let mut controller = self.controller;
        controller.write().next();
        self.sync_timer();
    }

    pub fn previous(&self) {
        let mut controller = self.controller;
        controller.write().previous();
        self.sync_timer();
    }

    pub fn seek(&self, percent: f64) {
        let mut controller = self.controller;
        controller.write().seek(percent);
    }

    fn sync_timer(&self) {
        let (wanted, delay) = {
            let controller = self.controller.peek();
            (controller.pending_transition(), controller.transition_delay())
        };
        let mut timer = self.timer;
        if scheduled_ticket(&timer) == wanted {
            return;
        }

        if let Some((ticket, task)) = timer.write().take() {
            debug!(?ticket, "cancelling superseded transition timer");
            task.cancel();
        }

        let Some(ticket) = wanted else {
            return;
        };
        let mut controller = self.controller;
        let task = Runtime::current().spawn(self.scope, async move {
            sleep(delay).await;
            controller.write().complete_transition(ticket);
            if scheduled_ticket(&timer) == Some(ticket) {
                timer.set(None);
            }
        });
        timer.set(Some((ticket, task)));
    }
}

fn scheduled_ticket(timer: &Signal<Option<(TransitionTicket, Task)>>) -> Option<TransitionTicket> {
    timer.with_peek(|slot| slot.as_ref().map(|(ticket, _)| *ticket))
}

/// Builds the controller for the mounted player and wires browser media
/// events back into it. Dropping the scope drops the controller, which
/// releases the live audio handle.
pub fn use_player(setup: PlayerSetup) -> PlayerActions {
    let sink = use_hook(MediaEventSink::default);
    let controller = use_signal({
        let sink = sink.clone();
        move || {
            PlaybackController::new(
                setup.playlist,
                &setup.config,
                PlatformAudio::new(sink),
            )
        }
    });
    let timer = use_signal(|| None::<(TransitionTicket, Task)>);

    use_hook({
        let sink = sink.clone();
        move || {
            let runtime = Runtime::current();
            sink.connect(move |event| {
                let _guard = RuntimeGuard::new(runtime.clone());
                let mut controller = controller;
                controller.write().handle_media_event(event);
            });
        }
    });
    use_drop(move || sink.disconnect());

    let actions = PlayerActions {
        controller,
        timer,
        scope: current_scope_id(),
    };
    use_context_provider(|| actions)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;
