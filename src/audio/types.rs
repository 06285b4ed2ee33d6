//! Audio-related small types and handles.
//!
//! This module defines the command enum, playback info shared with the UI
//! and the error type used when a file cannot be played.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug)]
pub enum AudioCmd {
    /// Start playing the track at the given index.
    Play(usize),
    /// Start playing from the front of the current order. The playback
    /// thread resolves which track that is, so callers cannot race a
    /// shuffle toggle still sitting in the channel.
    PlayFirst,
    /// Stop playback and reset the elapsed position to zero.
    Stop,
    /// Toggle pause/resume, preserving the elapsed position.
    TogglePause,
    /// Seek by the given number of seconds (positive or negative).
    SeekBy(i64),
    /// Seek to an absolute position within the current track.
    SeekTo(Duration),
    /// Set the playback volume, `0.0..=1.0`.
    SetVolume(f32),
    /// Skip to the next track in the current order.
    Next,
    /// Toggle shuffle: reshuffles the playback order.
    ToggleShuffle,
    /// Quit the audio thread.
    Quit,
}

/// Why playback could not start.
#[derive(Error, Debug)]
pub enum PlayError {
    #[error("no usable audio output device: {source}")]
    Output { source: rodio::StreamError },

    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        source: rodio::decoder::DecoderError,
    },
}

#[derive(Debug, Clone)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Currently playing track index in the playlist (if any).
    pub index: Option<usize>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Message from the most recent playback failure, cleared by the UI.
    pub last_error: Option<String>,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            index: None,
            elapsed: Duration::ZERO,
            playing: false,
            last_error: None,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
pub type OrderHandle = Arc<Mutex<Vec<usize>>>;
