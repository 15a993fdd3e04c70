use crate::commands::{CommandQueue, HudCommand};
use crate::overlay::OverlayWindow;
use crate::position::{PositionStore, WindowPosition};
use crate::settings::Settings;
use crate::tray::TrayHandle;
use crate::update_loop::UpdateLoop;
use crate::visibility::{apply_visibility, move_window, ViewportCtx};
use eframe::egui;

const PANEL_COLOR: (u8, u8, u8) = (0x0a, 0x0a, 0x0a);
const TEXT_COLOR: egui::Color32 = egui::Color32::from_rgb(0x00, 0xFF, 0x00);
const CORNER_RADIUS: f32 = 20.0;
const PADDING: f32 = 15.0;
const FONT_SIZE: f32 = 14.0;

/// Primary-button state of one frame, in window-local coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    /// Pointer position relative to the window's top-left corner.
    pub pos: Option<(i32, i32)>,
    /// Where the window currently sits on screen.
    pub window: Option<WindowPosition>,
}

impl PointerSample {
    fn read(ctx: &egui::Context) -> Self {
        ctx.input(|i| PointerSample {
            pressed: i.pointer.primary_pressed(),
            down: i.pointer.primary_down(),
            released: i.pointer.primary_released(),
            pos: i
                .pointer
                .interact_pos()
                .map(|p| (p.x.round() as i32, p.y.round() as i32)),
            window: i
                .viewport()
                .outer_rect
                .map(|r| WindowPosition::new(r.min.x.round() as i32, r.min.y.round() as i32)),
        })
    }
}

pub struct HudApp {
    window: OverlayWindow,
    store: PositionStore,
    updates: UpdateLoop,
    commands: CommandQueue,
    settings: Settings,
    relauncher: fn() -> anyhow::Result<()>,
    closing: bool,
    _tray: Option<TrayHandle>,
}

impl HudApp {
    pub fn new(
        window: OverlayWindow,
        store: PositionStore,
        updates: UpdateLoop,
        commands: CommandQueue,
        settings: Settings,
        tray: Option<TrayHandle>,
    ) -> Self {
        Self {
            window,
            store,
            updates,
            commands,
            settings,
            relauncher: crate::restart::relaunch,
            closing: false,
            _tray: tray,
        }
    }

    /// Replace the function used to start a fresh process on Reload.
    pub fn with_relauncher(mut self, relauncher: fn() -> anyhow::Result<()>) -> Self {
        self.relauncher = relauncher;
        self
    }

    pub fn window(&self) -> &OverlayWindow {
        &self.window
    }

    pub fn updates(&self) -> &UpdateLoop {
        &self.updates
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Apply one request from a background listener.
    pub fn handle_command<C: ViewportCtx>(&mut self, cmd: HudCommand, ctx: &C) {
        tracing::debug!(?cmd, "handling command");
        match cmd {
            HudCommand::Toggle => {
                let visible = self.window.toggle_visibility();
                apply_visibility(
                    visible,
                    ctx,
                    self.window.position(),
                    self.settings.offscreen_pos,
                );
            }
            HudCommand::Reload => match (self.relauncher)() {
                Ok(()) => self.shutdown(ctx),
                Err(e) => tracing::error!("reload failed, keeping current instance: {e:#}"),
            },
            HudCommand::Exit => {
                tracing::info!("exit requested");
                self.shutdown(ctx);
            }
        }
    }

    fn shutdown<C: ViewportCtx>(&mut self, ctx: &C) {
        self.commands.stop_listeners();
        self.closing = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        ctx.request_repaint();
    }

    /// Drive the drag gesture from one frame of pointer input.
    pub fn handle_pointer<C: ViewportCtx>(&mut self, ctx: &C, input: PointerSample) {
        if input.pressed {
            if let Some((x, y)) = input.pos {
                self.window.pointer_down(x, y);
            }
        }
        if input.down && self.window.is_dragging() {
            if let (Some((x, y)), Some(current)) = (input.pos, input.window) {
                if let Some(next) = self.window.pointer_move(current, x, y) {
                    if next != current {
                        move_window(ctx, next);
                    }
                }
            }
        }
        if input.released {
            if let Some(pos) = self.window.pointer_up() {
                if let Err(e) = self.store.save(pos.x, pos.y) {
                    tracing::warn!("failed to save window position: {e:#}");
                }
            }
        }
    }

    /// Process queued commands, run a due metrics tick and apply pointer
    /// input. Ticks run whether or not the window is shown. Returns `false`
    /// once the window is closing.
    pub fn step<C: ViewportCtx>(&mut self, ctx: &C, pointer: PointerSample) -> bool {
        for cmd in self.commands.drain() {
            self.handle_command(cmd, ctx);
            if self.closing {
                return false;
            }
        }

        self.updates.poll();

        if self.window.is_visible() {
            self.handle_pointer(ctx, pointer);
        }
        true
    }

    fn draw(&self, ctx: &egui::Context) {
        let opacity = self.settings.opacity();
        let (r, g, b) = PANEL_COLOR;
        let fill = egui::Color32::from_rgba_unmultiplied(r, g, b, (opacity * 255.0).round() as u8);
        let text = TEXT_COLOR.gamma_multiply(opacity);
        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(fill)
                    .rounding(CORNER_RADIUS)
                    .inner_margin(PADDING),
            )
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(self.updates.label())
                        .color(text)
                        .font(egui::FontId::monospace(FONT_SIZE)),
                );
            });
    }
}

impl eframe::App for HudApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.step(ctx, PointerSample::read(ctx)) {
            return;
        }
        self.draw(ctx);
        ctx.request_repaint_after(self.updates.time_until_due());
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }
}
