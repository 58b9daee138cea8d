//! Playback state machine, independent of any UI or audio API.

mod audio;
mod controller;
mod error;
mod state;

pub use audio::*;
pub use controller::*;
pub use error::*;
pub use state::*;
