pub mod commands;
pub mod gui;
pub mod hotkey;
pub mod logging;
pub mod metrics;
pub mod overlay;
pub mod position;
pub mod restart;
pub mod settings;
pub mod tray;
pub mod update_loop;
pub mod visibility;
