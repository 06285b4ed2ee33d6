use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use rodio::{OutputStream, OutputStreamBuilder, StreamError};

use crate::library::Track;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, OrderHandle, PlayError, PlaybackHandle, PlaybackInfo};

/// Handle to the playback thread: a command channel plus shared state the
/// UI reads (playback info and the current order).
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    order: OrderHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Spawn the playback thread. Fails when no audio output device can be
    /// opened, so the caller can bail out before taking over the terminal.
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlayError> {
        Self::with_output(tracks, OutputStreamBuilder::open_default_stream)
    }

    pub(super) fn with_output<F>(tracks: Vec<Track>, open_output: F) -> Result<Self, PlayError>
    where
        F: FnOnce() -> Result<OutputStream, StreamError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
        let order_handle: OrderHandle = Arc::new(Mutex::new((0..tracks.len()).collect()));

        let audio_handle = spawn_audio_thread(
            tracks,
            rx,
            playback_info.clone(),
            order_handle.clone(),
            ready_tx,
            open_output,
        );

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = audio_handle.join();
                return Err(e);
            }
            // Channel dropped without a report: the thread died opening the
            // stream. Treat it like a missing device.
            Err(_) => {
                let _ = audio_handle.join();
                return Err(PlayError::Output {
                    source: StreamError::NoDevice,
                });
            }
        }

        Ok(Self {
            tx,
            playback: playback_info,
            order: order_handle,
            join: Mutex::new(Some(audio_handle)),
        })
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn order_handle(&self) -> OrderHandle {
        self.order.clone()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Ask the playback thread to quit and wait for it to finish.
    pub fn quit(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
