use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_minim_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MINIM_CONFIG_PATH", "/tmp/minim-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/minim-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("minim")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("minim")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_original_player_behavior() {
    let s = Settings::default();
    assert_eq!(s.controls.seek_seconds, 5);
    assert_eq!(s.playback.volume_percent, 100);
    assert!(s.playback.autoplay_folder);
    assert!(!s.playback.shuffle);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.validate().is_ok());
}

#[test]
fn load_or_default_falls_back_when_validation_fails() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("MINIM_CONFIG_PATH");
    let _g2 = EnvGuard::set("XDG_CONFIG_HOME", "/nonexistent/minim-test-xdg");
    let _g3 = EnvGuard::set("MINIM__CONTROLS__SEEK_SECONDS", "0");

    let s = Settings::load_or_default();
    assert_eq!(s.controls.seek_seconds, 5);
}

#[test]
fn validate_rejects_bad_ranges() {
    let mut s = Settings::default();
    s.controls.seek_seconds = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step_percent = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.volume_percent = 150;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions.clear();
    assert!(s.validate().is_err());
}
