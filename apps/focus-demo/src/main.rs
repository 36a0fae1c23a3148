use std::rc::Rc;

use focus_app_shell::FocusShell;
use focus_core::SelectionState;
use focus_foundation::{FocusIndex, Rect};
use focus_platform_headless::HeadlessWindow;

const WINDOW_WIDTH: f32 = 500.0;
const WINDOW_HEIGHT: f32 = 300.0;

// The control panel under the circles.
const BUTTONS: [(&str, i32); 4] = [("Deselect All", 0), ("1", 1), ("2", 2), ("3", 3)];

fn circle_frame(slot: u32) -> Rect {
    Rect::new(20.0 + slot as f32 * 160.0, 40.0, 140.0, 140.0)
}

fn report(window: &HeadlessWindow, selection: &SelectionState, turns: u32) {
    println!("Idx = {}", selection.get());
    println!(
        "settled in {turns} turn(s); responder changes so far: {}",
        window.responder_changes()
    );
    for line in window.describe() {
        println!("  {line}");
    }
}

fn main() {
    env_logger::init();

    println!("=== Focus-RS Headless Demo ===");
    println!("Three focusable circles in a {WINDOW_WIDTH}x{WINDOW_HEIGHT} window.");
    println!("Watch how programmatic selection and direct clicks move the");
    println!("first responder without fighting each other:");
    println!("  - button presses write an index into the shared selection");
    println!("  - clicks claim native focus and write the index back");
    println!("  - re-pressing the current button touches nothing");
    println!();

    let window = HeadlessWindow::new();
    let mut shell = FocusShell::new(Rc::new(window.clone()));
    shell.set_turn_waker(|| log::trace!("turn requested"));

    let mut frames = Vec::new();
    for index in 1..=3u32 {
        let frame = circle_frame(index - 1);
        let region = window.mount_region(format!("circle {index}"), frame, true);
        let adapter = shell.attach_region(
            FocusIndex::new(index).expect("positive index"),
            region,
        );
        window.set_pointer_handler(region, adapter.pointer_handler());
        frames.push(frame);
    }

    let selection = shell.selection();
    let press = |label: &str| {
        let (_, value) = BUTTONS
            .iter()
            .find(|(name, _)| *name == label)
            .expect("known button");
        println!("\n[press '{label}']");
        selection.set(*value);
    };

    // The window comes up with circle 2 selected.
    selection.set(2);
    let turns = shell.settle().expect("settle");
    report(&window, &selection, turns);

    println!("\n[click circle 1]");
    let center = frames[0].center();
    window.pointer_down(center.x, center.y);
    window.pointer_up(center.x, center.y);
    let turns = shell.settle().expect("settle");
    report(&window, &selection, turns);

    // Idempotence: circle 1 already holds focus.
    press("1");
    let turns = shell.settle().expect("settle");
    report(&window, &selection, turns);

    press("3");
    let turns = shell.settle().expect("settle");
    report(&window, &selection, turns);

    press("Deselect All");
    let turns = shell.settle().expect("settle");
    report(&window, &selection, turns);

    shell.clear_turn_waker();
    println!("\ndone; total responder changes: {}", window.responder_changes());
}
