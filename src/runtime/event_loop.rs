use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlayAction, PlaybackState};
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::ui;

/// Main terminal event loop: syncs state from the audio thread, redraws,
/// and dispatches key and mouse input. Returns `Ok(())` on quit.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        sync_playback(app);

        let display = app.display_indices();
        terminal.draw(|f| ui::draw(f, app, &display, settings.controls.seek_seconds))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, app, audio_player) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let frame = Rect::new(0, 0, size.width, size.height);
                    handle_mouse_event(mouse, frame, app, audio_player);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Pull shared playback info into the app model: the playback state machine
/// is owned by the audio thread, the app mirrors it for rendering.
fn sync_playback(app: &mut App) {
    let Some(handle) = app.playback_handle.as_ref().cloned() else {
        return;
    };
    let Ok(mut info) = handle.lock() else {
        return;
    };

    app.playback = match (info.index, info.playing) {
        (None, _) => PlaybackState::Stopped,
        (Some(_), true) => PlaybackState::Playing,
        (Some(_), false) => PlaybackState::Paused,
    };

    if let Some(err) = info.last_error.take() {
        app.set_status_message(err);
    }
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
) -> bool {
    let seek_secs = settings.controls.seek_seconds.min(i64::MAX as u64) as i64;
    let volume_step = i32::from(settings.controls.volume_step_percent);

    match key.code {
        KeyCode::Char('q') => {
            audio_player.quit();
            return true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
        }
        KeyCode::Enter => {
            // Enter always (re)starts the selected track.
            if app.has_tracks() {
                let _ = audio_player.send(AudioCmd::Play(app.selected));
                app.playback = PlaybackState::Playing;
            }
        }
        KeyCode::Char('p') => match app.play_action() {
            PlayAction::Start(i) => {
                let _ = audio_player.send(AudioCmd::Play(i));
                app.playback = PlaybackState::Playing;
            }
            PlayAction::Resume => {
                let _ = audio_player.send(AudioCmd::TogglePause);
                app.playback = PlaybackState::Playing;
            }
            PlayAction::Noop => {}
        },
        KeyCode::Char(' ') => match app.playback {
            PlaybackState::Playing => {
                let _ = audio_player.send(AudioCmd::TogglePause);
                app.playback = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                let _ = audio_player.send(AudioCmd::TogglePause);
                app.playback = PlaybackState::Playing;
            }
            PlaybackState::Stopped => {
                if let PlayAction::Start(i) = app.play_action() {
                    let _ = audio_player.send(AudioCmd::Play(i));
                    app.playback = PlaybackState::Playing;
                }
            }
        },
        KeyCode::Char('x') => {
            let _ = audio_player.send(AudioCmd::Stop);
            app.playback = PlaybackState::Stopped;
        }
        KeyCode::Char('h') | KeyCode::Left => {
            let _ = audio_player.send(AudioCmd::SeekBy(-seek_secs));
        }
        KeyCode::Char('l') | KeyCode::Right => {
            let _ = audio_player.send(AudioCmd::SeekBy(seek_secs));
        }
        KeyCode::Char('n') => {
            if app.has_tracks() {
                let _ = audio_player.send(AudioCmd::Next);
                app.playback = PlaybackState::Playing;
            }
        }
        KeyCode::Char('s') => {
            let _ = audio_player.send(AudioCmd::ToggleShuffle);
            app.toggle_shuffle();
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.step_volume(volume_step);
            let _ = audio_player.send(AudioCmd::SetVolume(app.volume_factor()));
        }
        KeyCode::Char('-') => {
            app.step_volume(-volume_step);
            let _ = audio_player.send(AudioCmd::SetVolume(app.volume_factor()));
        }
        KeyCode::Esc => {
            app.clear_status_message();
        }
        _ => {}
    }

    false
}

/// Left clicks on the progress gauge seek to the clicked fraction of the
/// track; clicks on the volume gauge set the volume directly.
fn handle_mouse_event(mouse: MouseEvent, frame: Rect, app: &mut App, audio_player: &AudioPlayer) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let areas = ui::Areas::compute(frame);
    let pos = Position::new(mouse.column, mouse.row);

    if areas.progress.contains(pos) {
        if let Some(frac) = ui::gauge_fraction(areas.progress, mouse.column) {
            let duration = app
                .playback_handle
                .as_ref()
                .and_then(|h| h.lock().ok().and_then(|info| info.index))
                .and_then(|i| app.tracks.get(i))
                .and_then(|t| t.duration);
            if let Some(total) = duration {
                let _ = audio_player.send(AudioCmd::SeekTo(total.mul_f64(frac)));
            }
        }
    } else if areas.volume.contains(pos) {
        if let Some(frac) = ui::gauge_fraction(areas.volume, mouse.column) {
            app.set_volume_percent((frac * 100.0).round() as i32);
            let _ = audio_player.send(AudioCmd::SetVolume(app.volume_factor()));
        }
    }
}
