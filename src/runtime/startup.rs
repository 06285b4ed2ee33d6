use tracing::info;

use crate::app::{App, PlaybackState};
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;

/// The command that starts playback after loading, if any.
///
/// Folder loads may autoplay (the original player did); a single loaded file
/// always starts stopped. `PlayFirst` leaves resolving "first" to the audio
/// thread: a shuffle toggle sent just above may still be in flight, so any
/// order read here could be stale.
fn autoplay_cmd(
    settings: &config::Settings,
    is_folder: bool,
    has_tracks: bool,
) -> Option<AudioCmd> {
    (is_folder && settings.playback.autoplay_folder && has_tracks).then_some(AudioCmd::PlayFirst)
}

/// Push configured playback defaults into the app and the audio thread.
pub fn apply_playback_defaults(
    app: &mut App,
    audio_player: &AudioPlayer,
    settings: &config::Settings,
    is_folder: bool,
) {
    app.set_volume_percent(i32::from(settings.playback.volume_percent));
    let _ = audio_player.send(AudioCmd::SetVolume(app.volume_factor()));

    if settings.playback.shuffle && is_folder {
        app.shuffle = true;
        let _ = audio_player.send(AudioCmd::ToggleShuffle);
    }

    if let Some(cmd) = autoplay_cmd(settings, is_folder, app.has_tracks()) {
        let _ = audio_player.send(cmd);
        app.playback = PlaybackState::Playing;
        info!("autoplaying first track of folder");
    }
}
