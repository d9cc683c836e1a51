use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The query text changed.
    Edited,
    Confirm,
    Cancel,
    /// Cursor or scroll moved; redraw only.
    Moved,
    Ignored,
}

/// Query line being edited plus the preview scroll offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    text: String,
    /// Byte offset, always on a char boundary.
    cursor: usize,
    scroll: u16,
}

impl InputState {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.cursor]
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::Ignored;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Esc => KeyAction::Cancel,
            KeyCode::Char('c') | KeyCode::Char('g') if ctrl => KeyAction::Cancel,
            KeyCode::Char('u') if ctrl => {
                if self.text.is_empty() {
                    return KeyAction::Ignored;
                }
                self.text.clear();
                self.cursor = 0;
                self.edited()
            }
            KeyCode::Char('a') if ctrl => self.move_to(0),
            KeyCode::Char('e') if ctrl => self.move_to(self.text.len()),
            KeyCode::Char(_) if ctrl => KeyAction::Ignored,
            KeyCode::Char(ch) => {
                self.text.insert(self.cursor, ch);
                self.cursor += ch.len_utf8();
                self.edited()
            }
            KeyCode::Backspace => match self.text[..self.cursor].chars().next_back() {
                Some(ch) => {
                    self.cursor -= ch.len_utf8();
                    self.text.remove(self.cursor);
                    self.edited()
                }
                None => KeyAction::Ignored,
            },
            KeyCode::Delete => {
                if self.cursor == self.text.len() {
                    return KeyAction::Ignored;
                }
                self.text.remove(self.cursor);
                self.edited()
            }
            KeyCode::Left => match self.text[..self.cursor].chars().next_back() {
                Some(ch) => self.move_to(self.cursor - ch.len_utf8()),
                None => KeyAction::Ignored,
            },
            KeyCode::Right => match self.text[self.cursor..].chars().next() {
                Some(ch) => self.move_to(self.cursor + ch.len_utf8()),
                None => KeyAction::Ignored,
            },
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.text.len()),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-10),
            KeyCode::PageDown => self.scroll_by(10),
            _ => KeyAction::Ignored,
        }
    }

    fn edited(&mut self) -> KeyAction {
        self.scroll = 0;
        KeyAction::Edited
    }

    fn move_to(&mut self, cursor: usize) -> KeyAction {
        self.cursor = cursor;
        KeyAction::Moved
    }

    fn scroll_by(&mut self, delta: i32) -> KeyAction {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(u16::MAX));
        self.scroll = u16::try_from(next).unwrap_or(u16::MAX);
        KeyAction::Moved
    }
}
