use crate::hotkey::{parse_hotkey, Hotkey, Key};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the directory holding the settings and
/// position files.
pub const DIR_ENV: &str = "OVERLAY_HUB_DIR";
pub const SETTINGS_FILE: &str = "OverlayHub_Settings.json";
pub const POSITION_FILE: &str = "OverlayHub_Config.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Global key combination toggling the overlay, e.g. `"F2"` or
    /// `"Ctrl+Shift+H"`.
    #[serde(default = "default_hotkey")]
    pub hotkey: Option<String>,
    /// Show the currently playing audio session as an extra line.
    #[serde(default = "default_true")]
    pub show_now_playing: bool,
    /// Alpha of the panel background and text. Clamped to `0.1..=1.0`.
    #[serde(default = "default_opacity")]
    pub window_opacity: f32,
    /// Let mouse input pass through to the windows underneath.
    #[serde(default)]
    pub click_through: bool,
    #[serde(default = "default_ping_host")]
    pub ping_host: String,
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout_ms: u64,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u64,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file receiving a copy of the log output.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Position used to hide the window off-screen when not visible.
    #[serde(default = "default_offscreen")]
    pub offscreen_pos: (i32, i32),
    #[serde(default = "default_window_size")]
    pub window_size: (i32, i32),
}

fn default_hotkey() -> Option<String> {
    Some("F2".into())
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    0.90
}

fn default_ping_host() -> String {
    "8.8.8.8".into()
}

fn default_ping_timeout() -> u64 {
    1000
}

fn default_refresh_interval() -> u64 {
    1000
}

fn default_offscreen() -> (i32, i32) {
    (-32000, -32000)
}

fn default_window_size() -> (i32, i32) {
    (260, 150)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotkey: default_hotkey(),
            show_now_playing: true,
            window_opacity: default_opacity(),
            click_through: false,
            ping_host: default_ping_host(),
            ping_timeout_ms: default_ping_timeout(),
            refresh_interval_ms: default_refresh_interval(),
            debug_logging: false,
            log_file: None,
            offscreen_pos: default_offscreen(),
            window_size: default_window_size(),
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing or empty file yields the defaults,
    /// as does a file that fails to parse (a warning is logged).
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), "invalid settings file: {e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn hotkey(&self) -> Hotkey {
        if let Some(hotkey) = &self.hotkey {
            match parse_hotkey(hotkey) {
                Some(k) => return k,
                None => {
                    tracing::warn!(
                        "provided hotkey string '{}' is invalid; using default F2",
                        hotkey
                    );
                }
            }
        }
        Hotkey {
            key: Key::F2,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    pub fn opacity(&self) -> f32 {
        if self.window_opacity.is_finite() {
            self.window_opacity.clamp(0.1, 1.0)
        } else {
            default_opacity()
        }
    }
}

/// Per-user application data directory used for the settings and position
/// files. `OVERLAY_HUB_DIR` takes precedence, then the platform data directory
/// (`%APPDATA%` on Windows), then the home directory.
pub fn app_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs_next::data_dir()
        .or_else(dirs_next::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn settings_path() -> PathBuf {
    app_dir().join(SETTINGS_FILE)
}

pub fn position_path() -> PathBuf {
    app_dir().join(POSITION_FILE)
}
