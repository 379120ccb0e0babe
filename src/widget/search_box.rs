use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEvent};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

/// What the owner of a [`SearchBox`] has to act on after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBoxEffect {
    /// The query text changed; blank text means the suggestion list is gone.
    QueryChanged(String),
    /// Submit this text to the active engine.
    Navigate(String),
    /// The user picked the engine at this registry index.
    EngineChosen(usize),
}

/// Interaction state of the search widget.
///
/// `highlight` is `None` or a valid index into `suggestions`. Suggestions are
/// only shown once the user has typed since the last dismissal.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    input: Input,
    focused: bool,
    blur_deadline: Option<Instant>,
    dropdown_open: bool,
    dropdown_cursor: usize,
    suggestions: Vec<String>,
    suggestions_eligible: bool,
    suggestions_visible: bool,
    highlight: Option<usize>,
    /// Popup rows the screen can show; `None` until the first frame.
    row_capacity: Option<usize>,
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            focused: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn dropdown_cursor(&self) -> usize {
        self.dropdown_cursor
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn blur_deadline(&self) -> Option<Instant> {
        self.blur_deadline
    }

    /// Feeds a key to the text field. Returns an effect only if the text
    /// itself changed; cursor movement is silent.
    pub fn handle_text_key(&mut self, key: KeyEvent) -> Option<SearchBoxEffect> {
        self.focus();
        let before = self.input.value().to_string();
        self.input.handle_event(&Event::Key(key));
        if self.input.value() == before {
            return None;
        }
        Some(self.on_text_edited())
    }

    /// Inserts pasted text at the caret. Line breaks become spaces; trailing
    /// ones are dropped.
    pub fn insert_text(&mut self, text: &str) -> Option<SearchBoxEffect> {
        let pasted: String = text
            .trim_end_matches(['\r', '\n'])
            .replace("\r\n", " ")
            .chars()
            .map(|ch| if matches!(ch, '\r' | '\n') { ' ' } else { ch })
            .collect();
        if pasted.is_empty() {
            return None;
        }

        self.focus();
        let mut chars: Vec<char> = self.input.value().chars().collect();
        let cursor = self.input.cursor().min(chars.len());
        let inserted = pasted.chars().count();
        chars.splice(cursor..cursor, pasted.chars());
        self.input = Input::new(chars.into_iter().collect()).with_cursor(cursor + inserted);
        Some(self.on_text_edited())
    }

    fn on_text_edited(&mut self) -> SearchBoxEffect {
        self.dropdown_open = false;
        if self.input.value().trim().is_empty() {
            self.clear_suggestions();
        } else {
            self.suggestions_eligible = true;
        }
        SearchBoxEffect::QueryChanged(self.input.value().to_string())
    }

    /// Badge click. `current_engine` seeds the dropdown cursor.
    pub fn toggle_dropdown(&mut self, current_engine: usize) {
        self.focus();
        self.dropdown_open = !self.dropdown_open;
        self.dropdown_cursor = match self.row_capacity {
            Some(rows) if rows > 0 => current_engine.min(rows - 1),
            _ => current_engine,
        };
        self.hide_suggestions();
    }

    pub fn select_engine(&mut self, index: usize) -> SearchBoxEffect {
        self.dropdown_open = false;
        self.clear_suggestions();
        self.focus();
        SearchBoxEffect::EngineChosen(index)
    }

    /// Pointer-down outside the widget. The text is left alone.
    pub fn outside_press(&mut self) {
        self.dropdown_open = false;
        self.hide_suggestions();
    }

    pub fn escape(&mut self) {
        self.dropdown_open = false;
        self.hide_suggestions();
    }

    /// Down arrow: the dropdown cursor when the dropdown is open, otherwise
    /// the suggestion highlight. Both wrap.
    pub fn move_next(&mut self, engine_count: usize) {
        if self.dropdown_open {
            let count = self.reachable(engine_count);
            if count > 0 {
                self.dropdown_cursor = (self.dropdown_cursor + 1) % count;
            }
            return;
        }
        let len = self.reachable(self.suggestions.len());
        if !self.suggestions_visible || len == 0 {
            return;
        }
        self.highlight = Some(match self.highlight {
            Some(index) => (index + 1) % len,
            None => 0,
        });
    }

    pub fn move_prev(&mut self, engine_count: usize) {
        if self.dropdown_open {
            let count = self.reachable(engine_count);
            if count > 0 {
                self.dropdown_cursor = (self.dropdown_cursor.min(count - 1) + count - 1) % count;
            }
            return;
        }
        let len = self.reachable(self.suggestions.len());
        if !self.suggestions_visible || len == 0 {
            return;
        }
        self.highlight = Some(match self.highlight {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        });
    }

    /// Enter. The highlighted suggestion wins over the typed text; blank text
    /// submits nothing.
    pub fn submit(&mut self) -> Option<SearchBoxEffect> {
        if self.dropdown_open {
            return Some(self.select_engine(self.dropdown_cursor));
        }
        if self.suggestions_visible
            && let Some(text) = self.highlight.and_then(|index| self.suggestions.get(index))
        {
            return Some(SearchBoxEffect::Navigate(text.clone()));
        }
        let query = self.input.value();
        if query.trim().is_empty() {
            return None;
        }
        Some(SearchBoxEffect::Navigate(query.to_string()))
    }

    /// Limits keyboard navigation to the popup rows that are on screen.
    pub fn set_row_capacity(&mut self, rows: usize) {
        self.row_capacity = Some(rows);
        if self.highlight.is_some_and(|index| index >= rows) {
            self.highlight = None;
        }
        if rows > 0 && self.dropdown_cursor >= rows {
            self.dropdown_cursor = rows - 1;
        }
    }

    fn reachable(&self, len: usize) -> usize {
        self.row_capacity.map_or(len, |rows| len.min(rows))
    }

    pub fn hover(&mut self, row: usize) -> bool {
        if !self.has_visible_suggestions() || row >= self.suggestions.len() {
            return false;
        }
        let changed = self.highlight != Some(row);
        self.highlight = Some(row);
        changed
    }

    /// Mouse-down on a suggestion row. Acts before any blur lands.
    pub fn press(&mut self, row: usize) -> Option<SearchBoxEffect> {
        if !self.suggestions_visible {
            return None;
        }
        let text = self.suggestions.get(row)?.clone();
        self.blur_deadline = None;
        self.highlight = Some(row);
        Some(SearchBoxEffect::Navigate(text))
    }

    /// The explicit clear control.
    pub fn clear(&mut self) -> SearchBoxEffect {
        self.input.reset();
        self.dropdown_open = false;
        self.clear_suggestions();
        self.focus();
        SearchBoxEffect::QueryChanged(String::new())
    }

    /// Resets the text after a search was handed off.
    pub fn finish_navigation(&mut self) -> SearchBoxEffect {
        self.input.reset();
        self.dropdown_open = false;
        self.clear_suggestions();
        SearchBoxEffect::QueryChanged(String::new())
    }

    /// Replaces the suggestion list with a fresh response.
    pub fn apply_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
        self.highlight = None;
        self.suggestions_visible =
            self.suggestions_eligible && !self.dropdown_open && !self.suggestions.is_empty();
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.highlight = None;
        self.suggestions_visible = false;
        self.suggestions_eligible = false;
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.blur_deadline = None;
    }

    /// Starts the grace period after which the field counts as unfocused.
    pub fn begin_blur(&mut self, now: Instant, grace: Duration) {
        if self.focused && self.blur_deadline.is_none() {
            self.blur_deadline = Some(now + grace);
        }
    }

    /// Completes a pending blur once its grace period is over.
    pub fn poll_blur(&mut self, now: Instant) -> bool {
        match self.blur_deadline {
            Some(deadline) if deadline <= now => {
                self.blur_deadline = None;
                self.focused = false;
                self.dropdown_open = false;
                self.hide_suggestions();
                true
            }
            _ => false,
        }
    }

    fn hide_suggestions(&mut self) {
        self.suggestions_visible = false;
        self.suggestions_eligible = false;
        self.highlight = None;
    }

    fn has_visible_suggestions(&self) -> bool {
        self.suggestions_visible && !self.suggestions.is_empty()
    }
}
