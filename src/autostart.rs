//! Desktop-session autostart integration.
//!
//! Installing writes a single XDG autostart entry
//! (`$XDG_CONFIG_HOME/autostart/minim.desktop`) so the player launches with
//! the desktop session; removing deletes that entry. This is configuration
//! only, there is no runtime coupling to the session.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

const ENTRY_FILE: &str = "minim.desktop";

fn config_home() -> Option<PathBuf> {
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    }
}

fn entry_path_in(config_home: &Path) -> PathBuf {
    config_home.join("autostart").join(ENTRY_FILE)
}

fn desktop_entry(exec: &str) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=minim\n\
         Comment=Terminal MP3 player\n\
         Exec={exec}\n\
         Terminal=true\n\
         X-GNOME-Autostart-enabled=true\n"
    )
}

fn install_in(config_home: &Path, exec: &str) -> io::Result<PathBuf> {
    let path = entry_path_in(config_home);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, desktop_entry(exec))?;
    Ok(path)
}

fn remove_in(config_home: &Path) -> io::Result<bool> {
    let path = entry_path_in(config_home);
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Install the autostart entry, launching this binary with an optional
/// file/folder argument. Returns the written entry path.
pub fn install(target: Option<&str>) -> io::Result<PathBuf> {
    let home = config_home().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "neither XDG_CONFIG_HOME nor HOME is set")
    })?;

    let exe = env::current_exe()?;
    let exec = match target {
        Some(t) => format!("{} {}", exe.display(), t),
        None => exe.display().to_string(),
    };

    let path = install_in(&home, &exec)?;
    info!(path = %path.display(), "installed autostart entry");
    Ok(path)
}

/// Remove the autostart entry. Returns whether an entry existed.
pub fn remove() -> io::Result<bool> {
    let home = config_home().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "neither XDG_CONFIG_HOME nor HOME is set")
    })?;

    let removed = remove_in(&home)?;
    info!(removed, "removed autostart entry");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn desktop_entry_contains_exec_line() {
        let entry = desktop_entry("/usr/bin/minim /home/pi/Music");
        assert!(entry.starts_with("[Desktop Entry]\n"));
        assert!(entry.contains("Exec=/usr/bin/minim /home/pi/Music\n"));
    }

    #[test]
    fn install_then_remove_round_trips() {
        let home = tempdir().unwrap();

        let path = install_in(home.path(), "/usr/bin/minim").unwrap();
        assert_eq!(path, entry_path_in(home.path()));
        assert!(path.exists());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Exec=/usr/bin/minim\n"));

        assert!(remove_in(home.path()).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn remove_without_entry_reports_false() {
        let home = tempdir().unwrap();
        assert!(!remove_in(home.path()).unwrap());
    }
}
