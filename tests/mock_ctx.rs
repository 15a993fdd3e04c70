use eframe::egui;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockCtx {
    pub commands: Arc<Mutex<Vec<egui::ViewportCommand>>>,
    pub repaints: Arc<Mutex<usize>>,
}

// Implement the trait from the main crate so tests can reuse visibility logic.
impl overlay_hud::visibility::ViewportCtx for MockCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        self.commands.lock().unwrap().push(cmd);
    }

    fn request_repaint(&self) {
        *self.repaints.lock().unwrap() += 1;
    }
}

#[allow(dead_code)]
impl MockCtx {
    /// Positions sent through `OuterPosition`, in order.
    pub fn positions(&self) -> Vec<(f32, f32)> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                egui::ViewportCommand::OuterPosition(p) => Some((p.x, p.y)),
                _ => None,
            })
            .collect()
    }

    pub fn closed(&self) -> bool {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .any(|c| matches!(c, egui::ViewportCommand::Close))
    }
}
