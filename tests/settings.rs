use overlay_hud::hotkey::{Hotkey, Key};
use overlay_hud::settings::{app_dir, position_path, Settings, DIR_ENV, POSITION_FILE};
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_or_corrupt_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    assert_eq!(Settings::load(&path), Settings::default());
    fs::write(&path, "{ broken").unwrap();
    assert_eq!(Settings::load(&path), Settings::default());
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut s = Settings::default();
    s.click_through = true;
    s.ping_host = "1.1.1.1".into();
    s.hotkey = Some("Ctrl+F9".into());
    s.save(&path).unwrap();
    let loaded = Settings::load(&path);
    assert_eq!(loaded, s);
    assert_eq!(loaded.hotkey().key, Key::F9);
    assert!(loaded.hotkey().ctrl);
}

#[test]
fn invalid_hotkey_falls_back_to_f2() {
    let mut s = Settings::default();
    s.hotkey = Some("Ctrl+Nope".into());
    assert_eq!(s.hotkey(), Hotkey::default());
    s.hotkey = None;
    assert_eq!(s.hotkey(), Hotkey::default());
}

#[test]
#[serial]
fn env_overrides_app_dir() {
    let dir = tempdir().unwrap();
    std::env::set_var(DIR_ENV, dir.path());
    assert_eq!(app_dir(), dir.path());
    assert_eq!(position_path(), dir.path().join(POSITION_FILE));
    std::env::remove_var(DIR_ENV);
    assert_ne!(app_dir(), dir.path());
}
