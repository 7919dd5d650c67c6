use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line text buffer backing the control's search field.
///
/// The cursor is a char index, so multi-byte input (Arabic names, accented
/// brands) edits cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
	text: String,
	cursor: usize,
}

impl SearchInput {
	pub fn new(text: impl Into<String>) -> Self {
		let text = text.into();
		let cursor = text.chars().count();
		Self { text, cursor }
	}

	#[must_use]
	pub fn text(&self) -> &str {
		&self.text
	}

	#[must_use]
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	/// Replace the contents and move the cursor to the end.
	pub fn set_text(&mut self, text: impl Into<String>) {
		*self = Self::new(text);
	}

	fn byte_index(&self, cursor: usize) -> usize {
		self.text
			.char_indices()
			.nth(cursor)
			.map_or(self.text.len(), |(index, _)| index)
	}

	fn len(&self) -> usize {
		self.text.chars().count()
	}

	/// Apply an editing key. Returns `true` when the text changed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let control = key.modifiers.contains(KeyModifiers::CONTROL);
		let alt = key.modifiers.contains(KeyModifiers::ALT);
		match key.code {
			KeyCode::Char('u') if control => {
				let changed = !self.text.is_empty();
				self.set_text(String::new());
				changed
			}
			KeyCode::Char(ch) if !control && !alt => {
				let at = self.byte_index(self.cursor);
				self.text.insert(at, ch);
				self.cursor += 1;
				true
			}
			KeyCode::Backspace if self.cursor > 0 => {
				let at = self.byte_index(self.cursor - 1);
				self.text.remove(at);
				self.cursor -= 1;
				true
			}
			KeyCode::Delete if self.cursor < self.len() => {
				let at = self.byte_index(self.cursor);
				self.text.remove(at);
				true
			}
			KeyCode::Left => {
				self.cursor = self.cursor.saturating_sub(1);
				false
			}
			KeyCode::Right => {
				self.cursor = (self.cursor + 1).min(self.len());
				false
			}
			KeyCode::Home => {
				self.cursor = 0;
				false
			}
			KeyCode::End => {
				self.cursor = self.len();
				false
			}
			_ => false,
		}
	}
}
