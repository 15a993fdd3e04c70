use overlay_hud::commands::command_channel;
use overlay_hud::gui::HudApp;
use overlay_hud::hotkey::HotkeyTrigger;
use overlay_hud::logging;
use overlay_hud::metrics::{MetricsProvider, PingTarget};
use overlay_hud::overlay::OverlayWindow;
use overlay_hud::position::PositionStore;
use overlay_hud::settings::{position_path, settings_path, Settings};
use overlay_hud::tray;
use overlay_hud::update_loop::UpdateLoop;
use overlay_hud::visibility::to_pos2;

use eframe::egui;
use std::path::Path;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(settings_path());
    logging::init(settings.debug_logging, settings.log_file.as_deref().map(Path::new));

    let store = PositionStore::new(position_path());
    let position = store.load();
    tracing::info!(x = position.x, y = position.y, path = %store.path().display(), "starting overlay");

    let hotkey = settings.hotkey();
    let (sender, queue) = command_channel();

    let (w, h) = settings.window_size;
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([w as f32, h as f32])
        .with_position(to_pos2(position))
        .with_decorations(false)
        .with_resizable(false)
        .with_transparent(true)
        .with_taskbar(false)
        .with_always_on_top();
    if settings.click_through {
        tracing::info!("click-through enabled; dragging is disabled");
        viewport = viewport.with_mouse_passthrough(true);
    }
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let target = PingTarget {
        host: settings.ping_host.clone(),
        timeout: Duration::from_millis(settings.ping_timeout_ms),
    };
    let interval = Duration::from_millis(settings.refresh_interval_ms.max(1));

    eframe::run_native(
        "Overlay Hub",
        native_options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let sender = sender.with_waker(move || ctx.request_repaint());

            HotkeyTrigger::new(hotkey, sender.clone()).start_listener();
            let tray = match tray::spawn(sender) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    tracing::warn!("continuing without tray icon: {e:#}");
                    None
                }
            };

            let provider = MetricsProvider::system(target, settings.show_now_playing);
            let updates = UpdateLoop::new(provider, hotkey, interval);
            Box::new(HudApp::new(
                OverlayWindow::new(position),
                store,
                updates,
                queue,
                settings,
                tray,
            ))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to create overlay window: {e}"))
}
