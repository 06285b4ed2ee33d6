use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, Sink, StreamError};
use tracing::{error, info};

use crate::library::Track;

use super::queue::{auto_advance_pos, build_order, clamp_seek, next_pos, offset_position, remap_pos};
use super::sink::create_sink_at;
use super::types::{AudioCmd, OrderHandle, PlaybackHandle, PlayError};

/// Everything the playback thread mutates while serving commands.
struct PlayerState<'a> {
    stream: &'a OutputStream,
    tracks: &'a [Track],
    info: &'a PlaybackHandle,

    sink: Option<Sink>,
    index: Option<usize>,
    paused: bool,

    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,

    volume: f32,

    // Playback order (identity or shuffled) and position within it.
    shuffle: bool,
    order: Vec<usize>,
    order_pos: usize,
}

impl<'a> PlayerState<'a> {
    fn new(stream: &'a OutputStream, tracks: &'a [Track], info: &'a PlaybackHandle) -> Self {
        Self {
            stream,
            tracks,
            info,
            sink: None,
            index: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            volume: 1.0,
            shuffle: false,
            order: (0..tracks.len()).collect(),
            order_pos: 0,
        }
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn report_error(&self, e: &PlayError) {
        error!(error = %e, "playback failed");
        if let Ok(mut info) = self.info.lock() {
            info.last_error = Some(e.to_string());
        }
    }

    fn play(&mut self, i: usize) {
        if i >= self.tracks.len() {
            return;
        }

        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }

        let track = &self.tracks[i];
        let new_sink = match create_sink_at(self.stream, track, Duration::ZERO) {
            Ok(s) => s,
            Err(e) => {
                self.report_error(&e);
                self.stop();
                return;
            }
        };

        new_sink.set_volume(self.volume);
        new_sink.play();
        self.sink = Some(new_sink);
        self.index = Some(i);
        self.paused = false;
        self.started_at = Some(Instant::now());
        self.accumulated = Duration::ZERO;

        if let Some(pos) = remap_pos(&self.order, Some(i)) {
            self.order_pos = pos;
        }

        if let Ok(mut info) = self.info.lock() {
            info.index = Some(i);
            info.elapsed = Duration::ZERO;
            info.playing = true;
        }

        info!(path = %track.path.display(), "started playing");
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }
        self.sink = None;
        self.index = None;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        if let Ok(mut info) = self.info.lock() {
            info.index = None;
            info.elapsed = Duration::ZERO;
            info.playing = false;
        }
    }

    fn toggle_pause(&mut self) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };

        if self.paused {
            s.play();
            self.started_at = Some(Instant::now());
            if let Ok(mut info) = self.info.lock() {
                info.playing = true;
            }
        } else {
            s.pause();
            if let Some(st) = self.started_at {
                self.accumulated += Instant::now() - st;
            }
            self.started_at = None;
            if let Ok(mut info) = self.info.lock() {
                info.playing = false;
            }
        }
        self.paused = !self.paused;
    }

    /// Rebuild the sink skipped to `target`, preserving paused state.
    fn seek_to(&mut self, target: Duration) {
        let Some(i) = self.index else {
            return;
        };
        if self.sink.is_none() {
            return;
        }

        let track = &self.tracks[i];
        let new_elapsed = clamp_seek(target, track.duration);

        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }

        let new_sink = match create_sink_at(self.stream, track, new_elapsed) {
            Ok(s) => s,
            Err(e) => {
                self.report_error(&e);
                self.stop();
                return;
            }
        };

        new_sink.set_volume(self.volume);
        if self.paused {
            self.started_at = None;
        } else {
            new_sink.play();
            self.started_at = Some(Instant::now());
        }

        self.sink = Some(new_sink);
        self.accumulated = new_elapsed;
        if let Ok(mut info) = self.info.lock() {
            info.elapsed = new_elapsed;
        }

        info!(path = %track.path.display(), position_secs = new_elapsed.as_secs(), "seeked");
    }

    fn set_volume(&mut self, v: f32) {
        self.volume = v.clamp(0.0, 1.0);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
    }

    fn toggle_shuffle(&mut self, order_handle: &OrderHandle) {
        self.shuffle = !self.shuffle;
        self.order = build_order(self.tracks.len(), self.shuffle, &mut rand::rng());
        // Publish so the UI list can reflect the current playback order.
        if let Ok(mut oh) = order_handle.lock() {
            *oh = self.order.clone();
        }
        if let Some(pos) = remap_pos(&self.order, self.index) {
            self.order_pos = pos;
        }
        info!(shuffle = self.shuffle, "shuffle toggled");
    }
}

pub(super) fn spawn_audio_thread<F>(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    order_handle: OrderHandle,
    ready_tx: Sender<Result<(), PlayError>>,
    open_output: F,
) -> JoinHandle<()>
where
    F: FnOnce() -> Result<OutputStream, StreamError> + Send + 'static,
{
    thread::spawn(move || {
        // The output stream is not `Send`, so it can only be opened here;
        // the handshake channel tells the spawner whether that worked.
        let mut stream = match open_output() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready_tx.send(Err(PlayError::Output { source: e }));
                return;
            }
        };
        let _ = ready_tx.send(Ok(()));

        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        // Ticker thread keeping playback_info.elapsed current between commands.
        let info_for_ticker = playback_info.clone();
        thread::spawn(move || {
            loop {
                thread::sleep(Duration::from_millis(500));
                let Ok(mut info) = info_for_ticker.lock() else {
                    break;
                };
                if info.playing {
                    info.elapsed += Duration::from_millis(500);
                }
            }
        });

        let mut st = PlayerState::new(&stream, &tracks, &playback_info);

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play(i) => st.play(i),
                    AudioCmd::PlayFirst => {
                        if let Some(&i) = st.order.first() {
                            st.order_pos = 0;
                            st.play(i);
                        }
                    }
                    AudioCmd::Stop => st.stop(),
                    AudioCmd::TogglePause => st.toggle_pause(),
                    AudioCmd::SeekBy(secs) => {
                        if st.sink.is_some() {
                            let target = offset_position(st.elapsed(), secs);
                            st.seek_to(target);
                        }
                    }
                    AudioCmd::SeekTo(target) => st.seek_to(target),
                    AudioCmd::SetVolume(v) => st.set_volume(v),
                    AudioCmd::Next => {
                        if let Some(pos) = next_pos(st.order.len(), st.order_pos) {
                            st.order_pos = pos;
                            st.play(st.order[pos]);
                        }
                    }
                    AudioCmd::ToggleShuffle => st.toggle_shuffle(&order_handle),
                    AudioCmd::Quit => {
                        if let Some(s) = st.sink.as_ref() {
                            s.stop();
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic check for auto-advance when the sink drains.
                    let drained = st
                        .sink
                        .as_ref()
                        .map(|s| !st.paused && s.empty())
                        .unwrap_or(false);
                    if drained {
                        match auto_advance_pos(st.order.len(), st.order_pos) {
                            Some(pos) => {
                                st.order_pos = pos;
                                st.play(st.order[pos]);
                            }
                            None => st.stop(),
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
