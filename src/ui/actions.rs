use std::time::Instant;

use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use super::state::{App, SelectOutcome};
use crate::select::SelectKey;

impl<T: Clone + Send + 'static> App<T> {
	/// Route a key press. Returns the outcome once the user submits or
	/// cancels.
	pub(crate) fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<SelectOutcome<T>> {
		let control = key.modifiers.contains(KeyModifiers::CONTROL);
		let outcome = match key.code {
			KeyCode::Char('c') if control => return Some(self.outcome(false)),
			KeyCode::Char('x') if control => {
				self.select.clear(now);
				None
			}
			_ if self.select.is_open() => {
				self.handle_open_key(key, now);
				None
			}
			_ => self.handle_closed_key(key, now),
		};
		self.sync_input();
		outcome
	}

	fn handle_open_key(&mut self, key: KeyEvent, now: Instant) {
		match key.code {
			KeyCode::Up => {
				self.select.handle_key(SelectKey::Up, now);
			}
			KeyCode::Down => {
				self.select.handle_key(SelectKey::Down, now);
			}
			KeyCode::Enter => {
				self.select.handle_key(SelectKey::Enter, now);
			}
			KeyCode::Esc => {
				self.select.handle_key(SelectKey::Escape, now);
			}
			KeyCode::PageDown => {
				let rows = self.select.viewport().height as isize;
				self.select.scroll_by(rows, now);
			}
			KeyCode::PageUp => {
				let rows = self.select.viewport().height as isize;
				self.select.scroll_by(-rows, now);
			}
			KeyCode::Tab => {
				self.select.click_outside();
			}
			_ => self.edit(key, now),
		}
	}

	fn handle_closed_key(&mut self, key: KeyEvent, now: Instant) -> Option<SelectOutcome<T>> {
		match key.code {
			KeyCode::Enter => return self.submit(),
			KeyCode::Esc => return Some(self.outcome(false)),
			KeyCode::Up | KeyCode::Down => {
				self.open_dropdown(now);
			}
			KeyCode::Tab => {
				if self.select.is_focused() {
					self.select.click_outside();
				} else {
					self.select.focus();
				}
			}
			_ => self.edit(key, now),
		}
		None
	}

	fn edit(&mut self, key: KeyEvent, now: Instant) {
		if key.code == KeyCode::Backspace && self.input.is_empty() {
			if self.select.options().multiple {
				self.select.remove_last();
			}
			return;
		}
		if self.input.input(key) {
			if !self.select.is_open() {
				self.open_dropdown(now);
			}
			self.select.set_query(self.input.text(), now);
		}
	}

	/// Pointer events only arrive while the dropdown is open.
	pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
		if !self.select.is_open() {
			return;
		}
		let position = Position::new(mouse.column, mouse.row);
		match mouse.kind {
			MouseEventKind::Down(MouseButton::Left) => self.click(position, now),
			MouseEventKind::ScrollDown if self.layout.in_dropdown(position) => {
				self.select.scroll_by(1, now);
			}
			MouseEventKind::ScrollUp if self.layout.in_dropdown(position) => {
				self.select.scroll_by(-1, now);
			}
			MouseEventKind::Moved => {
				if let Some(index) = self.row_at(position) {
					self.select.set_highlight(index);
				}
			}
			_ => {}
		}
		self.sync_input();
	}

	fn click(&mut self, position: Position, now: Instant) {
		if let Some(index) = self.row_at(position) {
			self.select.select_visible(index, now);
		} else if self
			.layout
			.clear_button
			.is_some_and(|rect| rect.contains(position))
		{
			self.select.clear(now);
		} else if let Some(key) = self.layout.chip_at(position).cloned() {
			self.select.remove(&key);
		} else if !self.layout.input.contains(position) && !self.layout.in_dropdown(position) {
			self.select.click_outside();
		}
	}

	fn row_at(&self, position: Position) -> Option<usize> {
		if self.layout.dropdown.is_none() || !self.layout.list.contains(position) {
			return None;
		}
		let index = self.select.viewport().offset + usize::from(position.y - self.layout.list.y);
		(index < self.select.visible_options().len()).then_some(index)
	}
}
