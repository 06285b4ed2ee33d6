mod app;
mod audio;
mod autostart;
mod config;
mod library;
mod logging;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::Settings::load_or_default();

    // The TUI owns the terminal; logs go to a file. Losing the log file is
    // not a reason to refuse to play music.
    if let Err(e) = logging::init(&settings.log) {
        eprintln!("minim: logging disabled: {e}");
    }

    runtime::run(settings)
}
