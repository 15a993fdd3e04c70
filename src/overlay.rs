//! Framework-independent state of the overlay window: where it is, whether it
//! is shown, and the drag gesture in progress.

use crate::position::WindowPosition;

/// Pointer offset inside the window captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub anchor_x: i32,
    pub anchor_y: i32,
}

#[derive(Debug, Clone)]
pub struct OverlayWindow {
    position: WindowPosition,
    drag: Option<DragState>,
    visibility: VisibilityState,
}

impl OverlayWindow {
    pub fn new(position: WindowPosition) -> Self {
        Self {
            position,
            drag: None,
            visibility: VisibilityState::default(),
        }
    }

    /// Last geometry requested for the window.
    pub fn position(&self) -> WindowPosition {
        self.position
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Pointer pressed at `(x, y)` relative to the window's top-left corner.
    pub fn pointer_down(&mut self, x: i32, y: i32) {
        self.drag = Some(DragState {
            anchor_x: x,
            anchor_y: y,
        });
    }

    /// Pointer moved to `(x, y)` relative to the window while the button is
    /// held. `window` is where the window currently sits on screen. Returns
    /// the new top-left the window must be moved to.
    pub fn pointer_move(&mut self, window: WindowPosition, x: i32, y: i32) -> Option<WindowPosition> {
        let drag = self.drag?;
        let next = window.offset(x - drag.anchor_x, y - drag.anchor_y);
        self.position = next;
        Some(next)
    }

    /// Pointer released. Returns the position to persist when a drag was
    /// in progress.
    pub fn pointer_up(&mut self) -> Option<WindowPosition> {
        self.drag.take().map(|_| self.position)
    }

    /// Flip visibility and return the new state. Any drag in progress is
    /// abandoned when the window hides.
    pub fn toggle_visibility(&mut self) -> bool {
        let visible = self.visibility.toggle();
        if !visible {
            self.drag = None;
        }
        visible
    }
}

/// Process-wide show/hide flag. Always starts visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityState {
    visible: bool,
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl VisibilityState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) -> bool {
        let next = !self.visible;
        tracing::debug!(from = self.visible, to = next, "visibility updated");
        self.visible = next;
        next
    }
}
