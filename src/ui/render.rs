use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use throbber_widgets_tui::Throbber;
use unicode_width::UnicodeWidthStr;

use super::state::{Anchor, App, LayoutCache};
use crate::select::Placement;

const INPUT_HEIGHT: u16 = 3;
const MESSAGE_HEIGHT: u16 = 1;
const CLEAR_SYMBOL: &str = "×";

/// Place the input and its message line according to `anchor`.
fn control_area(area: Rect, anchor: Anchor) -> Rect {
	let height = (INPUT_HEIGHT + MESSAGE_HEIGHT).min(area.height);
	let y = match anchor {
		Anchor::Top => area.y,
		Anchor::Center => area.y + (area.height - height) / 2,
		Anchor::Bottom => area.bottom() - height,
	};
	Rect { y, height, ..area }
}

fn width_of(text: &str) -> u16 {
	u16::try_from(text.width()).unwrap_or(u16::MAX)
}

impl<T: Clone + Send + 'static> App<T> {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});
		let [input_area, message_area] =
			Layout::vertical([Constraint::Length(INPUT_HEIGHT), Constraint::Length(MESSAGE_HEIGHT)])
				.areas(control_area(area, self.anchor));

		self.layout = LayoutCache {
			area,
			input: input_area,
			..LayoutCache::default()
		};
		self.render_input(frame, input_area);
		self.render_message(frame, message_area);
		if self.select.is_open() {
			self.render_dropdown(frame, input_area);
		}
	}

	fn render_input(&mut self, frame: &mut Frame, area: Rect) {
		let border = if self.select.is_focused() {
			self.theme.focused_border
		} else {
			self.theme.border
		};
		let mut block = Block::bordered().border_style(border);
		if let Some(title) = &self.title {
			block = block.title(Span::styled(format!(" {title} "), self.theme.title));
		}
		let inner = block.inner(area);
		frame.render_widget(block, area);
		if inner.width == 0 || inner.height == 0 {
			return;
		}

		let mut indicators = Vec::new();
		if self.select.is_loading() {
			let spinner = Throbber::default().throbber_style(self.theme.muted);
			indicators.push(spinner.to_symbol_span(&self.throbber_state));
		}
		let clearable = self.select.options().clearable && !self.select.selection().is_empty();
		if clearable {
			indicators.push(Span::styled(CLEAR_SYMBOL, self.theme.muted));
		}
		let indicator_line = Line::from(indicators);
		let indicator_width = u16::try_from(indicator_line.width())
			.unwrap_or(u16::MAX)
			.min(inner.width);
		if indicator_width > 0 {
			let row = Rect {
				x: inner.right() - indicator_width,
				width: indicator_width,
				height: 1,
				..inner
			};
			frame.render_widget(Paragraph::new(indicator_line), row);
			if clearable {
				self.layout.clear_button = Some(Rect {
					x: inner.right() - 1,
					width: 1,
					height: 1,
					..inner
				});
			}
		}

		let text_area = Rect {
			width: inner.width.saturating_sub(indicator_width + u16::from(indicator_width > 0)),
			height: 1,
			..inner
		};
		let mut spans = Vec::new();
		let mut x = text_area.x;
		if self.select.options().multiple {
			for item in self.select.selection().items() {
				let label = format!(" {} {CLEAR_SYMBOL} ", self.select.display_text_of(item));
				let width = width_of(&label);
				if x < text_area.right() {
					let visible = width.min(text_area.right() - x);
					self.layout.chips.push((
						Rect {
							x,
							width: visible,
							height: 1,
							..text_area
						},
						self.select.value_of(item),
					));
				}
				spans.push(Span::styled(label, self.theme.chip));
				spans.push(Span::raw(" "));
				x = x.saturating_add(width + 1);
			}
		}

		let editing = self.select.is_open() || !self.input.is_empty();
		if editing {
			let before: String = self.input.text().chars().take(self.input.cursor()).collect();
			let cursor_x = x.saturating_add(width_of(&before));
			spans.push(Span::raw(self.input.text().to_string()));
			if self.select.is_focused() && cursor_x < text_area.right() {
				frame.set_cursor_position(Position::new(cursor_x, text_area.y));
			}
		} else {
			let shown = self.select.input_text();
			if !shown.is_empty() {
				spans.push(Span::raw(shown));
			} else if self.select.selection().is_empty() {
				spans.push(Span::styled(
					self.select.options().placeholder.clone(),
					self.theme.placeholder,
				));
			}
		}
		frame.render_widget(Paragraph::new(Line::from(spans)), text_area);
	}

	fn render_message(&self, frame: &mut Frame, area: Rect) {
		if let Some(error) = self.select.field_error() {
			frame.render_widget(
				Paragraph::new(Span::styled(error, self.theme.error)),
				area,
			);
		}
	}

	fn render_dropdown(&mut self, frame: &mut Frame, input: Rect) {
		let area = self.layout.area;
		let count = self.select.visible_options().len();
		// A term whose debounce has not fired yet has no answer to show.
		let loading = self.select.is_loading() || self.select.is_search_pending();
		let body = (count + usize::from(loading)).max(1);
		let max_rows = usize::from(self.select.options().max_visible_rows.max(1));
		let wanted = u16::try_from(body.min(max_rows)).unwrap_or(u16::MAX) + 2;

		let rect = match self.select.placement() {
			Placement::Below => {
				let height = wanted.min(area.bottom().saturating_sub(input.bottom()));
				Rect {
					y: input.bottom(),
					height,
					..input
				}
			}
			Placement::Above => {
				let height = wanted.min(input.y.saturating_sub(area.y));
				Rect {
					y: input.y - height,
					height,
					..input
				}
			}
		};
		if rect.height < 3 {
			return;
		}

		let block = Block::bordered().border_style(self.theme.focused_border);
		let list = block.inner(rect);
		frame.render_widget(Clear, rect);
		frame.render_widget(block, rect);
		self.layout.dropdown = Some(rect);
		self.layout.list = list;
		self.select.set_viewport_height(usize::from(list.height));

		let offset = self.select.viewport().offset;
		let highlighted = self.select.highlighted();
		let single = !self.select.options().multiple;
		let visible = self.select.visible_options();
		let mut lines = Vec::with_capacity(usize::from(list.height));
		for index in offset..offset + usize::from(list.height) {
			if let Some(item) = visible.get(index) {
				let marker = if single && self.select.selection().contains(&self.select.value_of(item)) {
					"✓ "
				} else {
					"  "
				};
				let mut line = self.select.label_of(item);
				line.spans.insert(0, Span::raw(marker));
				if highlighted == Some(index) {
					line = line.style(self.theme.row_highlight);
				}
				lines.push(line);
			} else if index == count && loading {
				let spinner = Throbber::default().throbber_style(self.theme.muted);
				lines.push(Line::from(vec![
					Span::raw("  "),
					spinner.to_symbol_span(&self.throbber_state),
					Span::styled("Loading...", self.theme.muted),
				]));
			} else if count == 0 && index == 0 {
				lines.push(Line::styled("  No options found", self.theme.muted));
			}
		}
		frame.render_widget(Paragraph::new(lines), list);
	}
}
