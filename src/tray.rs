//! System tray icon with Toggle / Reload / Exit entries.

use crate::commands::{CommandSender, HudCommand};

pub const TOOLTIP: &str = "Overlay Hub";
pub const ICON_SIZE: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    Toggle,
    Reload,
    Exit,
}

impl TrayAction {
    /// Menu entries in display order.
    pub const ALL: [TrayAction; 3] = [TrayAction::Toggle, TrayAction::Reload, TrayAction::Exit];

    pub fn label(self) -> &'static str {
        match self {
            TrayAction::Toggle => "Toggle",
            TrayAction::Reload => "Reload",
            TrayAction::Exit => "Exit",
        }
    }

    pub fn command(self) -> HudCommand {
        match self {
            TrayAction::Toggle => HudCommand::Toggle,
            TrayAction::Reload => HudCommand::Reload,
            TrayAction::Exit => HudCommand::Exit,
        }
    }
}

/// RGBA pixels of the tray icon: a lime bar on black.
pub fn icon_rgba() -> Vec<u8> {
    let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let bar = (10..=54).contains(&x) && (25..=40).contains(&y);
            if bar {
                rgba.extend_from_slice(&[0x00, 0xFF, 0x00, 0xFF]);
            } else {
                rgba.extend_from_slice(&[0x00, 0x00, 0x00, 0xFF]);
            }
        }
    }
    rgba
}

/// Keeps the tray icon alive; dropping it removes the icon.
pub struct TrayHandle {
    #[cfg(target_os = "windows")]
    _icon: tray_icon::TrayIcon,
}

/// Create the tray icon on the calling thread and forward menu clicks to
/// `commands` from a background thread.
///
/// The icon must be created on the thread running the window's event loop.
#[cfg(target_os = "windows")]
pub fn spawn(commands: CommandSender) -> anyhow::Result<TrayHandle> {
    use std::time::Duration;
    use tray_icon::menu::{Menu, MenuEvent, MenuItem};
    use tray_icon::{Icon, TrayIconBuilder};

    let menu = Menu::new();
    let mut entries = Vec::new();
    for action in TrayAction::ALL {
        let item = MenuItem::new(action.label(), true, None);
        menu.append(&item)?;
        entries.push((item.id().clone(), action));
    }
    let icon = Icon::from_rgba(icon_rgba(), ICON_SIZE, ICON_SIZE)?;
    let tray = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip(TOOLTIP)
        .with_icon(icon)
        .build()?;

    std::thread::Builder::new()
        .name("tray".into())
        .spawn(move || {
            let rx = MenuEvent::receiver();
            loop {
                if commands.is_stopped() {
                    tracing::debug!("tray listener stopped");
                    return;
                }
                match rx.recv_timeout(Duration::from_millis(200)) {
                    Ok(event) => {
                        if let Some((_, action)) = entries.iter().find(|(id, _)| *id == event.id) {
                            tracing::debug!(action = action.label(), "tray menu clicked");
                            commands.send(action.command());
                        }
                    }
                    Err(e) if e.is_disconnected() => return,
                    Err(_) => {}
                }
            }
        })?;

    tracing::info!("tray icon ready");
    Ok(TrayHandle { _icon: tray })
}

#[cfg(not(target_os = "windows"))]
pub fn spawn(_commands: CommandSender) -> anyhow::Result<TrayHandle> {
    anyhow::bail!("tray icons are not supported on this platform")
}
