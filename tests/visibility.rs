use eframe::egui;
use overlay_hud::position::WindowPosition;
use overlay_hud::settings::Settings;
use overlay_hud::visibility::apply_visibility;

#[path = "mock_ctx.rs"]
mod mock_ctx;
use mock_ctx::MockCtx;

#[test]
fn offscreen_position_when_hidden() {
    let ctx = MockCtx::default();
    apply_visibility(false, &ctx, WindowPosition::new(5, 6), (-32000, -32000));
    let cmds = ctx.commands.lock().unwrap();
    assert_eq!(cmds.len(), 1);
    match cmds[0] {
        egui::ViewportCommand::OuterPosition(p) => {
            assert_eq!(p.x, -32000.0);
            assert_eq!(p.y, -32000.0);
        }
        _ => panic!("unexpected command"),
    }
    assert_eq!(*ctx.repaints.lock().unwrap(), 1);
}

#[test]
fn shown_window_returns_to_last_geometry_on_top() {
    let ctx = MockCtx::default();
    apply_visibility(true, &ctx, WindowPosition::new(-42, 84), (-32000, -32000));
    let cmds = ctx.commands.lock().unwrap();
    assert_eq!(cmds.len(), 2);
    match cmds[0] {
        egui::ViewportCommand::OuterPosition(p) => {
            assert_eq!(p.x, -42.0);
            assert_eq!(p.y, 84.0);
        }
        _ => panic!("unexpected command"),
    }
    assert!(matches!(
        cmds[1],
        egui::ViewportCommand::WindowLevel(egui::WindowLevel::AlwaysOnTop)
    ));
}

fn intersects(a: (i32, i32, i32, i32), b: (i32, i32, i32, i32)) -> bool {
    let (ax, ay, aw, ah) = a;
    let (bx, by, bw, bh) = b;
    ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
}

#[test]
fn parked_window_is_clear_of_every_monitor() {
    let settings = Settings::default();
    let ctx = MockCtx::default();
    apply_visibility(false, &ctx, WindowPosition::DEFAULT, settings.offscreen_pos);
    let cmds = ctx.commands.lock().unwrap();
    let egui::ViewportCommand::OuterPosition(p) = cmds[0] else {
        panic!("unexpected command");
    };
    let (w, h) = settings.window_size;
    let parked = (p.x as i32, p.y as i32, w, h);

    let monitors = [
        (0, 0, 1920, 1080),
        (0, 0, 3840, 2160),
        (0, 0, 7680, 4320),
        (3840, 0, 3840, 2160),
        (0, 2160, 3840, 2160),
        (-3840, 0, 3840, 2160),
        (0, -2160, 3840, 2160),
        (-7680, -4320, 7680, 4320),
    ];
    for monitor in monitors {
        assert!(!intersects(parked, monitor), "parked {parked:?} overlaps {monitor:?}");
    }
}
