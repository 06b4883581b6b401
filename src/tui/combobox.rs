use std::cell::Cell;
use std::rc::Rc;

use ratatui::layout::{Position, Rect};

use crate::model::{SelectOption, Selection};
use crate::ops::filter::FilterView;
use crate::util::unicode;

use super::document::{Document, ListenerHandle, PointerKind};

/// Receives the full selection every time it changes.
pub type ChangeCallback = Box<dyn FnMut(&[SelectOption])>;

/// Dropdown visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenState {
    Closed,
    Open,
}

/// Screen regions recorded by the renderer on each frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    /// The bordered input box (chips + query)
    pub input: Rect,
    /// The dropdown panel, while open
    pub dropdown: Option<Rect>,
    /// Visible dropdown rows and the row index each one shows
    pub rows: Vec<(Rect, usize)>,
    /// Chip remove affordances and the option value each one removes
    pub chip_removes: Vec<(Rect, String)>,
}

/// The part of the hit map the outside-press listener needs.
#[derive(Debug, Clone, Copy, Default)]
struct Bounds {
    input: Rect,
    dropdown: Option<Rect>,
}

impl Bounds {
    fn contains(&self, pos: Position) -> bool {
        self.input.contains(pos) || self.dropdown.is_some_and(|d| d.contains(pos))
    }
}

/// Multi-select combobox state: catalog, chips, query and open/closed state.
pub struct Combobox {
    options: Vec<SelectOption>,
    selection: Selection,
    /// Last externally supplied value; resync happens only when it changes
    external: Vec<SelectOption>,
    query: String,
    state: OpenState,
    /// Highlighted dropdown row
    active: usize,
    placeholder: String,
    on_change: Option<ChangeCallback>,
    document: Rc<Document>,
    /// Present exactly while open
    outside_listener: Option<ListenerHandle>,
    bounds: Rc<Cell<Bounds>>,
    outside_pressed: Rc<Cell<bool>>,
    hit_map: HitMap,
}

impl Combobox {
    pub fn new(
        document: Rc<Document>,
        options: Vec<SelectOption>,
        initial_value: Option<Vec<SelectOption>>,
        placeholder: Option<String>,
    ) -> Self {
        let external = initial_value.unwrap_or_default();
        Combobox {
            options,
            selection: Selection::from_options(&external),
            external,
            query: String::new(),
            state: OpenState::Closed,
            active: 0,
            placeholder: placeholder.unwrap_or_else(|| "typing to search...".to_string()),
            on_change: None,
            document,
            outside_listener: None,
            bounds: Rc::new(Cell::new(Bounds::default())),
            outside_pressed: Rc::new(Cell::new(false)),
            hit_map: HitMap::default(),
        }
    }

    pub fn with_on_change(mut self, callback: impl FnMut(&[SelectOption]) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> OpenState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == OpenState::Open
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Placeholder text, or None when chips are present.
    pub fn placeholder(&self) -> Option<&str> {
        self.selection.is_empty().then_some(self.placeholder.as_str())
    }

    /// Derive the dropdown contents from the current catalog, selection and query.
    pub fn view(&self) -> FilterView {
        FilterView::compute(&self.options, &self.selection, &self.query)
    }

    pub fn hit_map(&self) -> &HitMap {
        &self.hit_map
    }

    pub fn set_hit_map(&mut self, hit_map: HitMap) {
        self.bounds.set(Bounds {
            input: hit_map.input,
            dropdown: hit_map.dropdown,
        });
        self.hit_map = hit_map;
    }

    // -----------------------------------------------------------------------
    // Open / close
    // -----------------------------------------------------------------------

    /// Closed -> Open. Attaches the outside-press listener.
    pub fn focus(&mut self) {
        if self.is_open() {
            return;
        }
        self.state = OpenState::Open;
        self.outside_pressed.set(false);

        let bounds = Rc::clone(&self.bounds);
        let pressed = Rc::clone(&self.outside_pressed);
        self.outside_listener = Some(self.document.add_listener(
            &[PointerKind::Down, PointerKind::TouchEnd],
            move |event| {
                let b = bounds.get();
                // Not laid out yet: nothing to be outside of
                if b.input.area() == 0 {
                    return;
                }
                if !b.contains(Position::new(event.column, event.row)) {
                    pressed.set(true);
                }
            },
        ));
        tracing::debug!("combobox opened");
    }

    /// Open -> Closed. Detaches the outside-press listener.
    pub fn blur(&mut self) {
        if !self.is_open() {
            return;
        }
        self.state = OpenState::Closed;
        self.outside_listener = None;
        self.outside_pressed.set(false);
        self.active = 0;
        tracing::debug!("combobox closed");
    }

    /// Close if the document listener saw a press outside the input and dropdown.
    /// Called by the host after dispatching a pointer event.
    pub fn apply_outside_dismissal(&mut self) {
        if self.outside_pressed.replace(false) && self.is_open() {
            tracing::debug!("outside press");
            self.blur();
        }
    }

    // -----------------------------------------------------------------------
    // Query editing
    // -----------------------------------------------------------------------

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.active = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.query.push(c);
        self.active = 0;
    }

    pub fn insert_str(&mut self, s: &str) {
        self.query.push_str(s);
        self.active = 0;
    }

    /// Delete the last grapheme of the query. With an empty query, remove the last chip.
    pub fn backspace(&mut self) {
        match unicode::prev_grapheme_boundary(&self.query, self.query.len()) {
            Some(start) => {
                self.query.truncate(start);
                self.active = 0;
            }
            None => {
                let last = self.selection.iter().last().map(|o| o.value.clone());
                if let Some(value) = last {
                    self.unselect(&value);
                }
            }
        }
    }

    /// Move the highlighted row, clamped to the rendered rows.
    pub fn move_active(&mut self, delta: isize) {
        let count = self.view().row_count();
        if count == 0 {
            self.active = 0;
            return;
        }
        let next = self.active as isize + delta;
        self.active = next.clamp(0, count as isize - 1) as usize;
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Commit the highlighted row (candidate or create-new entry).
    pub fn commit_active(&mut self) -> bool {
        self.commit_row(self.active)
    }

    /// Commit the row at `index` in the rendered list.
    pub fn commit_row(&mut self, index: usize) -> bool {
        let view = self.view();
        let option = match view.rows().get(index) {
            Some(row) => row.option().clone(),
            None => return false,
        };
        self.select(option)
    }

    /// Add `option` to the selection, clear the query and keep focus on the input.
    /// Returns false if the value was already selected; nothing is emitted then.
    pub fn select(&mut self, option: SelectOption) -> bool {
        let value = option.value.clone();
        let added = self.selection.insert(option);
        self.query.clear();
        self.active = 0;
        if added {
            tracing::info!(value = %value, "selected");
            self.emit_change();
        }
        self.focus();
        added
    }

    /// Remove the option with `value`. Absent values change nothing and emit nothing.
    pub fn unselect(&mut self, value: &str) -> bool {
        if self.selection.remove(value).is_none() {
            return false;
        }
        tracing::info!(value = %value, "unselected");
        self.emit_change();
        let count = self.view().row_count();
        self.active = self.active.min(count.saturating_sub(1));
        true
    }

    // -----------------------------------------------------------------------
    // External inputs
    // -----------------------------------------------------------------------

    /// Replace the selection wholesale when the externally supplied value differs
    /// from the last one seen. Does not emit a change notification.
    pub fn sync_value(&mut self, external: &[SelectOption]) -> bool {
        if self.external.as_slice() == external {
            return false;
        }
        self.external = external.to_vec();
        self.selection = Selection::from_options(&self.external);
        self.active = 0;
        tracing::info!(count = self.selection.len(), "selection reset from external value");
        true
    }

    /// Replace the option catalog. The selection is untouched.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        let count = self.view().row_count();
        self.active = self.active.min(count.saturating_sub(1));
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    // -----------------------------------------------------------------------
    // Pointer
    // -----------------------------------------------------------------------

    /// Hit-test a pointer press against the last rendered frame.
    /// Returns true if the press landed on the widget.
    pub fn pointer_down(&mut self, column: u16, row: u16) -> bool {
        let pos = Position::new(column, row);

        let chip = self
            .hit_map
            .chip_removes
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, value)| value.clone());
        if let Some(value) = chip {
            self.unselect(&value);
            self.focus();
            return true;
        }

        if self.is_open() {
            let hit_row = self
                .hit_map
                .rows
                .iter()
                .find(|(rect, _)| rect.contains(pos))
                .map(|(_, index)| *index);
            if let Some(index) = hit_row {
                // Inside the dropdown, so the outside listener stays quiet and
                // the selection commits before anything can close the panel.
                self.commit_row(index);
                return true;
            }
            if self.hit_map.dropdown.is_some_and(|d| d.contains(pos)) {
                return true;
            }
        }

        if self.hit_map.input.contains(pos) {
            self.focus();
            return true;
        }
        false
    }

    fn emit_change(&mut self) {
        let snapshot = self.selection.to_vec();
        if let Some(callback) = &mut self.on_change {
            callback(&snapshot);
        }
    }
}
