use overlay_hud::position::{PositionStore, WindowPosition};
use std::fs;
use tempfile::tempdir;

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let store = PositionStore::new(dir.path().join("pos.json"));
    for (x, y) in [(0, 0), (100, 200), (-1920, 35), (-5, -7), (i32::MIN, i32::MAX)] {
        store.save(x, y).unwrap();
        assert_eq!(store.load(), WindowPosition { x, y });
    }
}

#[test]
fn missing_file_uses_default() {
    let dir = tempdir().unwrap();
    let store = PositionStore::new(dir.path().join("absent.json"));
    assert_eq!(store.load(), WindowPosition { x: 20, y: 40 });
}

#[test]
fn corrupt_file_uses_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pos.json");
    let store = PositionStore::new(&path);
    for content in ["{not json", "", "[1, 2]", r#"{"x": 1.5, "y": 2}"#, r#"{"x": "10", "y": 2}"#, r#"{"y": 2}"#] {
        fs::write(&path, content).unwrap();
        assert_eq!(store.load(), WindowPosition::DEFAULT, "content: {content}");
    }
}

#[test]
fn save_writes_plain_json_and_creates_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("pos.json");
    let store = PositionStore::new(&path);
    store.save(100, 200).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"x":100,"y":200}"#);
}

#[test]
fn only_objects_with_integer_fields_are_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pos.json");
    let store = PositionStore::new(&path);
    for content in ["[1, 2]", "[100, 200]", "42", "null", r#"{"x": 1, "y": 4294967296}"#] {
        fs::write(&path, content).unwrap();
        assert_eq!(store.load(), WindowPosition::DEFAULT, "content: {content}");
    }
    fs::write(&path, r#"{"y": -7, "x": 12, "extra": true}"#).unwrap();
    assert_eq!(store.load(), WindowPosition::new(12, -7));
}
