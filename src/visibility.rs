use crate::position::WindowPosition;
use eframe::egui;

/// Minimal interface of [`egui::Context`] needed to drive the viewport.
/// Abstracted so tests can record the commands sent.
pub trait ViewportCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand);
    fn request_repaint(&self);
}

impl ViewportCtx for egui::Context {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        egui::Context::send_viewport_cmd(self, cmd);
    }

    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

/// Show the window at `pos` or park it at `offscreen_pos`.
///
/// The window is never made invisible through the window manager: hidden
/// viewports stop receiving frames, which would stall the update loop.
pub fn apply_visibility<C: ViewportCtx>(
    visible: bool,
    ctx: &C,
    pos: WindowPosition,
    offscreen_pos: (i32, i32),
) {
    let target = if visible {
        pos
    } else {
        WindowPosition::from(offscreen_pos)
    };
    tracing::debug!(visible, x = target.x, y = target.y, "applying visibility");
    ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(to_pos2(target)));
    if visible {
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(
            egui::WindowLevel::AlwaysOnTop,
        ));
    }
    ctx.request_repaint();
}

/// Move the window to `pos`.
pub fn move_window<C: ViewportCtx>(ctx: &C, pos: WindowPosition) {
    ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(to_pos2(pos)));
}

pub fn to_pos2(pos: WindowPosition) -> egui::Pos2 {
    egui::pos2(pos.x as f32, pos.y as f32)
}
