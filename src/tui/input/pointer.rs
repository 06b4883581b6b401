use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::App;
use crate::tui::document::{PointerEvent, PointerKind};

/// Route a mouse event: document listeners first, then the widget's own hit-testing.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
        _ => return,
    };
    let event = PointerEvent {
        kind,
        column: mouse.column,
        row: mouse.row,
    };

    app.document.dispatch(&event);
    app.combobox.pointer_down(event.column, event.row);
    app.combobox.apply_outside_dismissal();
}
