//! Playback engine built on `rodio`, running on its own thread.
//!
//! The UI talks to it through `AudioCmd` messages and observes progress via
//! the shared `PlaybackHandle`/`OrderHandle`.

mod player;
mod queue;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{AudioCmd, OrderHandle, PlaybackHandle, PlaybackInfo};

#[cfg(test)]
mod tests;
