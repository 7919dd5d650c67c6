/// Keyboard highlight over the visible options. `None` is "nothing
/// highlighted".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
	index: Option<usize>,
}

impl Highlight {
	#[must_use]
	pub fn index(&self) -> Option<usize> {
		self.index
	}

	pub fn reset(&mut self) {
		self.index = None;
	}

	pub fn set(&mut self, index: usize, len: usize) {
		self.index = (index < len).then_some(index);
	}

	/// Move forward, wrapping past the end to the first option.
	pub fn next(&mut self, len: usize) -> Option<usize> {
		if len == 0 {
			self.index = None;
			return None;
		}
		let next = match self.index {
			Some(index) => (index + 1) % len,
			None => 0,
		};
		self.index = Some(next);
		self.index
	}

	/// Move backward, wrapping before the first option to the last one.
	pub fn previous(&mut self, len: usize) -> Option<usize> {
		if len == 0 {
			self.index = None;
			return None;
		}
		let previous = match self.index {
			Some(index) => (index + len - 1) % len,
			None => len - 1,
		};
		self.index = Some(previous);
		self.index
	}

	/// Drop the highlight if the list shrank underneath it.
	pub fn clamp(&mut self, len: usize) {
		if self.index.is_some_and(|index| index >= len) {
			self.index = None;
		}
	}
}

/// Scroll window of the dropdown list, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListViewport {
	pub offset: usize,
	pub height: usize,
}

impl Default for ListViewport {
	fn default() -> Self {
		Self {
			offset: 0,
			height: 1,
		}
	}
}

impl ListViewport {
	/// Scroll the minimum amount needed for `index` to be fully visible.
	pub fn ensure_visible(&mut self, index: usize) {
		let height = self.height.max(1);
		if index < self.offset {
			self.offset = index;
		} else if index >= self.offset + height {
			self.offset = index + 1 - height;
		}
	}

	/// Scroll by `delta` rows, clamped to the content.
	pub fn scroll_by(&mut self, delta: isize, content_len: usize) {
		let max_offset = content_len.saturating_sub(self.height.max(1));
		let offset = self.offset.saturating_add_signed(delta);
		self.offset = offset.min(max_offset);
	}

	pub fn clamp(&mut self, content_len: usize) {
		let max_offset = content_len.saturating_sub(self.height.max(1));
		self.offset = self.offset.min(max_offset);
	}

	/// Rows left below the viewport's bottom edge.
	#[must_use]
	pub fn rows_below(&self, content_len: usize) -> usize {
		content_len.saturating_sub(self.offset + self.height)
	}

	#[must_use]
	pub fn is_near_bottom(&self, content_len: usize, threshold: usize) -> bool {
		self.rows_below(content_len) <= threshold
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn arrow_down_wraps_to_first() {
		let mut highlight = Highlight::default();
		assert_eq!(highlight.next(3), Some(0));
		highlight.set(2, 3);
		assert_eq!(highlight.next(3), Some(0));
	}

	#[test]
	fn arrow_up_wraps_to_last() {
		let mut highlight = Highlight::default();
		highlight.set(0, 4);
		assert_eq!(highlight.previous(4), Some(3));
		highlight.reset();
		assert_eq!(highlight.previous(4), Some(3));
	}

	#[test]
	fn empty_list_has_no_highlight() {
		let mut highlight = Highlight::default();
		assert_eq!(highlight.next(0), None);
		assert_eq!(highlight.previous(0), None);
	}

	#[test]
	fn ensure_visible_scrolls_minimally() {
		let mut viewport = ListViewport {
			offset: 0,
			height: 3,
		};
		viewport.ensure_visible(2);
		assert_eq!(viewport.offset, 0);
		viewport.ensure_visible(4);
		assert_eq!(viewport.offset, 2);
		viewport.ensure_visible(1);
		assert_eq!(viewport.offset, 1);
	}

	#[test]
	fn near_bottom_respects_threshold() {
		let mut viewport = ListViewport {
			offset: 0,
			height: 4,
		};
		assert!(!viewport.is_near_bottom(10, 1));
		viewport.scroll_by(5, 10);
		assert_eq!(viewport.offset, 5);
		assert!(viewport.is_near_bottom(10, 1));
		viewport.scroll_by(100, 10);
		assert_eq!(viewport.offset, 6);
		viewport.scroll_by(-100, 10);
		assert_eq!(viewport.offset, 0);
	}
}
