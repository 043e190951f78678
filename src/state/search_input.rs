//! Search input handling (pure state transitions).
//!
//! Edits the visible text of the search box. The text is kept exactly as typed,
//! including surrounding whitespace; trimming happens only when the debouncer
//! emits. All functions are pure - no side effects, testable without TUI.

/// Visible contents of the search box.
///
/// `cursor` is a char index (not a byte offset), so multi-byte input is safe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputState {
    text: String,
    cursor: usize,
}

impl InputState {
    /// Input pre-filled with `text`, cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Text as typed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Insert a character at the cursor and advance the cursor.
pub fn handle_char_input(mut state: InputState, ch: char) -> InputState {
    let idx = state.byte_index(state.cursor);
    state.text.insert(idx, ch);
    state.cursor += 1;
    state
}

/// Delete the character before the cursor, if any.
pub fn handle_backspace(mut state: InputState) -> InputState {
    if state.cursor == 0 {
        return state;
    }
    let idx = state.byte_index(state.cursor - 1);
    state.text.remove(idx);
    state.cursor -= 1;
    state
}

/// Delete the character under the cursor, if any.
pub fn handle_delete(mut state: InputState) -> InputState {
    if state.cursor >= state.char_len() {
        return state;
    }
    let idx = state.byte_index(state.cursor);
    state.text.remove(idx);
    state
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut state: InputState) -> InputState {
    state.cursor = state.cursor.saturating_sub(1);
    state
}

/// Move cursor right by one position. Saturates at the text length.
pub fn handle_cursor_right(mut state: InputState) -> InputState {
    state.cursor = (state.cursor + 1).min(state.char_len());
    state
}

/// Move cursor to the start of the text.
pub fn handle_home(mut state: InputState) -> InputState {
    state.cursor = 0;
    state
}

/// Move cursor to the end of the text.
pub fn handle_end(mut state: InputState) -> InputState {
    state.cursor = state.char_len();
    state
}

/// Clear the whole input (Ctrl+U).
pub fn handle_clear(_state: InputState) -> InputState {
    InputState::default()
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_input_tests.rs"]
mod tests;
