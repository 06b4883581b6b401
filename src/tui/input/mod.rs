mod pointer;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;

pub use pointer::handle_mouse;

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    app.status = None;

    if app.combobox.is_open() {
        handle_open(app, key);
    } else {
        handle_closed(app, key);
    }
}

/// Keys while the input has focus and the dropdown is showing
fn handle_open(app: &mut App, key: KeyEvent) {
    let cb = &mut app.combobox;
    match key.code {
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => cb.blur(),
        KeyCode::Enter => {
            cb.commit_active();
        }
        KeyCode::Up => cb.move_active(-1),
        KeyCode::Down => cb.move_active(1),
        KeyCode::PageUp => cb.move_active(-(app.max_visible as isize)),
        KeyCode::PageDown => cb.move_active(app.max_visible as isize),
        KeyCode::Backspace => cb.backspace(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => cb.set_query(""),
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            cb.insert_char(c);
        }
        _ => {}
    }
}

/// Keys while blurred: `q`/Esc quit, anything else focuses the input
fn handle_closed(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter | KeyCode::Down | KeyCode::Tab => app.combobox.focus(),
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.combobox.focus();
            app.combobox.insert_char(c);
        }
        _ => {}
    }
}

/// Handle a bracketed paste: the text goes into the query as a single line.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    let clean = text.replace('\n', " ").replace('\r', "");
    app.combobox.focus();
    app.combobox.insert_str(&clean);
}
