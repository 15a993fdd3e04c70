use overlay_hud::overlay::OverlayWindow;
use overlay_hud::position::{PositionStore, WindowPosition};
use overlay_hud::settings::POSITION_FILE;
use std::fs;
use tempfile::tempdir;

#[test]
fn drag_persists_across_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(POSITION_FILE);

    // first run: no config file
    let store = PositionStore::new(&path);
    let start = store.load();
    assert_eq!(start, WindowPosition::new(20, 40));

    let mut window = OverlayWindow::new(start);
    window.pointer_down(5, 5);
    let moved = window.pointer_move(start, 5 + 80, 5 + 160).unwrap();
    assert_eq!(moved, WindowPosition::new(100, 200));
    let released = window.pointer_up().unwrap();
    store.save(released.x, released.y).unwrap();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, serde_json::json!({"x": 100, "y": 200}));

    // restart
    let restarted = OverlayWindow::new(PositionStore::new(&path).load());
    assert_eq!(restarted.position(), WindowPosition::new(100, 200));
}
