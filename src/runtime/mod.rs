//! Process startup: argument handling, terminal lifecycle and the event loop.

use std::env;
use std::path::PathBuf;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::autostart;
use crate::config;
use crate::library;

mod event_loop;
mod startup;

pub fn run(settings: config::Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let first = args.next();

    // Autostart management is a one-shot action, no TUI.
    match first.as_deref() {
        Some("--autostart-install") => {
            let target = args.next();
            let path = autostart::install(target.as_deref())?;
            println!("minim: installed autostart entry at {}", path.display());
            return Ok(());
        }
        Some("--autostart-remove") => {
            if autostart::remove()? {
                println!("minim: removed autostart entry");
            } else {
                println!("minim: no autostart entry installed");
            }
            return Ok(());
        }
        _ => {}
    }

    let source = match first {
        Some(p) => PathBuf::from(p),
        None => env::current_dir()?,
    };
    let is_folder = source.is_dir();

    let tracks = library::load_path(&source, &settings.library);
    if tracks.is_empty() {
        return Err(format!(
            "no playable files at {} (extensions: {})",
            source.display(),
            settings.library.extensions.join(", ")
        )
        .into());
    }
    info!(source = %source.display(), count = tracks.len(), "loaded playlist");

    // Fail here, before the alternate screen, so the message is actually seen.
    let audio_player = AudioPlayer::new(tracks.clone())?;
    let mut app = App::new(tracks);
    app.set_source(source.display().to_string());
    app.set_playback_handle(audio_player.playback_handle());
    app.set_order_handle(audio_player.order_handle());

    startup::apply_playback_defaults(&mut app, &audio_player, &settings, is_folder);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &audio_player);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    run_result
}
