//! Application model types: `App`, `PlaybackState` and `PlayAction`.
//!
//! The `App` struct holds the playlist, selection, volume and playback
//! related flags used by the UI and runtime.

use crate::audio::{OrderHandle, PlaybackHandle};
use crate::library::Track;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// What a "play" request should do given the current state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayAction {
    /// Start the track at this playlist index.
    Start(usize),
    /// Resume the paused track.
    Resume,
    /// Already playing (or nothing to play): do nothing.
    Noop,
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub playback: PlaybackState,
    pub volume_percent: u8,
    pub shuffle: bool,
    pub source: Option<String>,
    pub status_message: Option<String>,
    pub playback_handle: Option<PlaybackHandle>,
    pub order_handle: Option<OrderHandle>,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            playback: PlaybackState::Stopped,
            volume_percent: 100,
            shuffle: false,
            source: None,
            status_message: None,
            playback_handle: None,
            order_handle: None,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }
    /// Set the shared `OrderHandle` used for the shuffled display order.
    pub fn set_order_handle(&mut self, h: OrderHandle) {
        self.order_handle = Some(h);
    }
    /// Record the loaded file or folder path for the status line.
    pub fn set_source(&mut self, source: String) {
        self.source = Some(source);
    }

    /// Return true if the playlist contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Decide what a "play" request does: stopped starts the selected track,
    /// paused resumes, playing is a no-op.
    pub fn play_action(&self) -> PlayAction {
        match self.playback {
            PlaybackState::Playing => PlayAction::Noop,
            PlaybackState::Paused => PlayAction::Resume,
            PlaybackState::Stopped => {
                if self.has_tracks() {
                    PlayAction::Start(self.selected)
                } else {
                    PlayAction::Noop
                }
            }
        }
    }

    /// Return the display order of track indices: the shared shuffle order
    /// when shuffle is on, natural order otherwise.
    pub fn display_indices(&self) -> Vec<usize> {
        if self.shuffle {
            if let Some(ref oh) = self.order_handle {
                if let Ok(v) = oh.lock() {
                    return v.clone();
                }
            }
        }
        (0..self.tracks.len()).collect()
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    /// Move selection to the next visible track, wrapping around.
    pub fn select_next(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        let pos = display.iter().position(|&i| i == self.selected);
        self.selected = match pos {
            Some(p) => display[(p + 1) % display.len()],
            None => display[0],
        };
    }

    /// Move selection to the previous visible track, wrapping around.
    pub fn select_prev(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        let pos = display.iter().position(|&i| i == self.selected);
        self.selected = match pos {
            Some(0) | None => display[display.len() - 1],
            Some(p) => display[p - 1],
        };
    }

    /// Set the volume, clamped to `0..=100`.
    pub fn set_volume_percent(&mut self, v: i32) {
        self.volume_percent = v.clamp(0, 100) as u8;
    }

    /// Step the volume by a signed amount of percent.
    pub fn step_volume(&mut self, step: i32) {
        self.set_volume_percent(self.volume_percent as i32 + step);
    }

    /// Volume as the `0.0..=1.0` factor rodio expects.
    pub fn volume_factor(&self) -> f32 {
        f32::from(self.volume_percent) / 100.0
    }

    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some(msg);
    }
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }
}
