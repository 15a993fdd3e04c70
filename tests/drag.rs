use overlay_hud::overlay::OverlayWindow;
use overlay_hud::position::WindowPosition;

/// Replays a pointer path given in screen coordinates against a window that
/// applies every move immediately, the way the OS does between frames.
fn drag_along(start: WindowPosition, press: (i32, i32), path: &[(i32, i32)]) -> (WindowPosition, Option<WindowPosition>) {
    let mut window = OverlayWindow::new(start);
    let mut on_screen = start;
    window.pointer_down(press.0 - on_screen.x, press.1 - on_screen.y);
    for &(sx, sy) in path {
        let local = (sx - on_screen.x, sy - on_screen.y);
        if let Some(next) = window.pointer_move(on_screen, local.0, local.1) {
            on_screen = next;
        }
    }
    (on_screen, window.pointer_up())
}

#[test]
fn window_follows_total_pointer_delta() {
    let start = WindowPosition::new(20, 40);
    let press = (50, 60);
    let path = [(51, 60), (70, 90), (40, 10), (-300, 500), (130, 220)];
    let (end, saved) = drag_along(start, press, &path);
    assert_eq!(end, WindowPosition::new(20 + 80, 40 + 160));
    assert_eq!(saved, Some(end));
}

#[test]
fn intermediate_samples_do_not_matter() {
    let start = WindowPosition::new(-1000, 300);
    let press = (-990, 310);
    let direct = drag_along(start, press, &[(-900, 250)]).0;
    let wobbly = drag_along(start, press, &[(-989, 311), (-1200, 800), (-950, 0), (-900, 250)]).0;
    assert_eq!(direct, WindowPosition::new(-910, 240));
    assert_eq!(direct, wobbly);
}

#[test]
fn stale_window_position_still_lands_on_pointer() {
    // The window manager may not have applied the last move yet; the local
    // pointer coordinates are then relative to the stale position.
    let mut window = OverlayWindow::new(WindowPosition::new(0, 0));
    window.pointer_down(10, 10);
    let stale = WindowPosition::new(0, 0);
    let first = window.pointer_move(stale, 15, 12).unwrap();
    assert_eq!(first, WindowPosition::new(5, 2));
    // Pointer now at screen (30, 30) while the window still reports (0, 0).
    let second = window.pointer_move(stale, 30, 30).unwrap();
    assert_eq!(second, WindowPosition::new(20, 20));
    assert_eq!(window.pointer_up(), Some(second));
}

#[test]
fn two_toggles_restore_visibility() {
    let mut window = OverlayWindow::new(WindowPosition::DEFAULT);
    assert!(window.is_visible());
    window.toggle_visibility();
    assert!(!window.is_visible());
    window.toggle_visibility();
    assert!(window.is_visible());
    assert_eq!(window.position(), WindowPosition::DEFAULT);
}
