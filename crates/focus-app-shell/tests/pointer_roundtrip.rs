use std::cell::RefCell;
use std::rc::Rc;

use focus_app_shell::FocusShell;
use focus_foundation::{FocusAdapter, FocusIndex, PointerEventKind, Rect};
use focus_platform_headless::HeadlessWindow;

struct DemoApp {
    window: HeadlessWindow,
    shell: FocusShell,
    adapters: Vec<FocusAdapter>,
    frames: Vec<Rect>,
}

impl DemoApp {
    fn three_circles() -> Self {
        let window = HeadlessWindow::new();
        let mut shell = FocusShell::new(Rc::new(window.clone()));
        let mut adapters = Vec::new();
        let mut frames = Vec::new();
        for index in 1..=3u32 {
            let frame = Rect::new((index - 1) as f32 * 120.0, 40.0, 100.0, 100.0);
            let region = window.mount_region(format!("circle {index}"), frame, true);
            let adapter =
                shell.attach_region(FocusIndex::new(index).expect("positive index"), region);
            window.set_pointer_handler(region, adapter.pointer_handler());
            adapters.push(adapter);
            frames.push(frame);
        }
        // Initial quiescence, as an app reaches before the first event.
        shell.settle().expect("initial settle");
        Self {
            window,
            shell,
            adapters,
            frames,
        }
    }

    fn click_circle(&self, index: usize) {
        let center = self.frames[index - 1].center();
        self.window.pointer_down(center.x, center.y);
        self.window.pointer_up(center.x, center.y);
    }
}

#[test]
fn click_claims_immediately_and_writes_back_deferred() {
    let mut app = DemoApp::three_circles();
    app.click_circle(1);
    // The responder moves during the event; the selection write waits for
    // the next turn.
    assert_eq!(app.window.focused_label().as_deref(), Some("circle 1"));
    assert_eq!(app.shell.selection().get(), 0);

    app.shell.settle().expect("settle");
    assert_eq!(app.shell.selection().get(), 1);
    assert_eq!(app.adapters[0].watermark(), 1);
}

#[test]
fn click_roundtrip_issues_no_further_claims() {
    let mut app = DemoApp::three_circles();
    app.click_circle(2);
    app.shell.settle().expect("settle");
    assert_eq!(app.shell.selection().get(), 2);
    // The pass reacting to the write-back finds the watermark current, so
    // the click's claim stays the only responder mutation.
    assert_eq!(app.window.responder_changes(), 1);
}

#[test]
fn clicking_the_focused_region_changes_nothing() {
    let mut app = DemoApp::three_circles();
    app.click_circle(1);
    app.shell.settle().expect("settle");

    app.click_circle(1);
    app.shell.settle().expect("settle");
    assert_eq!(app.shell.selection().get(), 1);
    assert_eq!(app.window.responder_changes(), 1);
}

#[test]
fn click_displaces_a_programmatic_selection() {
    let mut app = DemoApp::three_circles();
    app.shell.selection().set(2);
    app.shell.settle().expect("settle");

    app.click_circle(1);
    app.shell.settle().expect("settle");
    assert_eq!(app.shell.selection().get(), 1);
    assert_eq!(app.window.focused_label().as_deref(), Some("circle 1"));
    assert_eq!(app.window.responder_changes(), 2);
}

#[test]
fn programmatic_selection_displaces_a_click() {
    let mut app = DemoApp::three_circles();
    app.click_circle(3);
    app.shell.settle().expect("settle");

    app.shell.selection().set(1);
    app.shell.settle().expect("settle");
    assert_eq!(app.shell.selection().get(), 1);
    assert_eq!(app.window.focused_label().as_deref(), Some("circle 1"));
}

#[test]
fn click_outside_any_region_is_ignored() {
    let mut app = DemoApp::three_circles();
    app.window.pointer_down(1000.0, 1000.0);
    assert_eq!(app.shell.settle().expect("settle"), 0);
    assert_eq!(app.window.responder_changes(), 0);
    assert_eq!(app.shell.selection().get(), 0);
}

#[test]
fn moves_and_releases_do_not_claim() {
    let mut app = DemoApp::three_circles();
    let center = app.frames[0].center();
    app.window.pointer_moved(center.x, center.y);
    app.window.pointer_up(center.x, center.y);
    app.shell.settle().expect("settle");
    assert_eq!(app.window.responder_changes(), 0);
    assert_eq!(app.shell.selection().get(), 0);
}

#[test]
fn content_handler_still_receives_the_click() {
    let app = DemoApp::three_circles();
    let events = Rc::new(RefCell::new(Vec::new()));
    {
        let events = events.clone();
        app.adapters[0]
            .bridge()
            .set_content_handler(Rc::new(move |event| {
                events.borrow_mut().push(event.kind);
            }));
    }
    app.click_circle(1);
    // Interception claims first, then the event reaches the content.
    assert_eq!(app.window.focused_label().as_deref(), Some("circle 1"));
    assert_eq!(
        *events.borrow(),
        vec![PointerEventKind::Down, PointerEventKind::Up]
    );
}
