//! Document-level keyboard and media-key shortcuts for the transport controls.

use crate::components::PlayerActions;

#[cfg(target_arch = "wasm32")]
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::KeyboardEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    TogglePlay,
    Next,
    Previous,
}

/// The parts of a key press the shortcut table looks at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub code: &'a str,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl ShortcutAction {
    pub fn from_key(press: &KeyPress<'_>) -> Option<Self> {
        let KeyPress {
            key,
            code,
            ctrl,
            meta,
            alt,
            shift,
        } = *press;

        match key {
            "MediaTrackNext" | "MediaNextTrack" | "AudioTrackNext" | "F9" => return Some(Self::Next),
            "MediaTrackPrevious" | "MediaPreviousTrack" | "AudioTrackPrevious" | "F7" => {
                return Some(Self::Previous)
            }
            "MediaPlayPause" | "AudioPlay" | "AudioPause" | "F8" => return Some(Self::TogglePlay),
            _ => {}
        }
        match code {
            "MediaTrackNext" => return Some(Self::Next),
            "MediaTrackPrevious" => return Some(Self::Previous),
            "MediaPlayPause" => return Some(Self::TogglePlay),
            _ => {}
        }

        if (meta || ctrl) && !alt && !shift {
            match key {
                "ArrowRight" => return Some(Self::Next),
                "ArrowLeft" => return Some(Self::Previous),
                _ => {}
            }
        }

        if !meta && !ctrl && !alt && (key == " " || key == "Spacebar" || code == "Space") {
            return Some(Self::TogglePlay);
        }

        None
    }

    pub fn apply(self, actions: &PlayerActions) {
        match self {
            Self::TogglePlay => actions.toggle(),
            Self::Next => actions.next(),
            Self::Previous => actions.previous(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn is_editable_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<web_sys::Element>().ok();
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element
            .get_attribute("contenteditable")
            .is_some_and(|v| !v.eq_ignore_ascii_case("false"))
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}

#[cfg(target_arch = "wasm32")]
struct KeydownListener {
    document: web_sys::Document,
    callback: Closure<dyn FnMut(KeyboardEvent)>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for KeydownListener {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback(
            "keydown",
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Installs the keydown listener for as long as the calling component is mounted.
#[cfg(target_arch = "wasm32")]
pub fn use_shortcuts(actions: PlayerActions, enabled: bool) {
    use_hook(move || {
        if !enabled {
            return None;
        }
        let document = web_sys::window()?.document()?;
        let runtime = Runtime::current();
        let callback = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if event.default_prevented() || event.is_composing() || is_editable_target(&event) {
                return;
            }
            let key = event.key();
            let code = event.code();
            let press = KeyPress {
                key: &key,
                code: &code,
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
                alt: event.alt_key(),
                shift: event.shift_key(),
            };
            if let Some(action) = ShortcutAction::from_key(&press) {
                event.prevent_default();
                let _guard = RuntimeGuard::new(runtime.clone());
                action.apply(&actions);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document
            .add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Rc::new(KeydownListener { document, callback }))
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn use_shortcuts(_actions: PlayerActions, _enabled: bool) {}
