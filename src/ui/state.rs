//! Core state container for the terminal front-end.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use fetch_select_api::{FetchError, FormModel, OptionKey};
use ratatui::layout::{Position, Rect};
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, warn};

use super::input::SearchInput;
use super::listeners::PointerListeners;
use super::theme::Theme;
use crate::fetch::{FetchOutcome, FetchRuntime};
use crate::select::IncrementalSearchSelect;

pub(crate) const REQUIRED_MESSAGE: &str = "This field is required";

/// Vertical position of the control inside the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
	#[default]
	Top,
	Center,
	Bottom,
}

impl Anchor {
	#[must_use]
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"top" => Some(Self::Top),
			"center" | "centre" => Some(Self::Center),
			"bottom" => Some(Self::Bottom),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Top => "top",
			Self::Center => "center",
			Self::Bottom => "bottom",
		}
	}
}

/// Result of an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOutcome<T> {
	pub accepted: bool,
	pub selection: Vec<T>,
	/// Comma-joined keys, exactly as written to the bound form field.
	pub value: String,
	pub query: String,
}

/// Screen regions captured during the last draw, used for pointer hit tests
/// and for measuring the room around the input when the dropdown opens.
#[derive(Debug, Clone, Default)]
pub(crate) struct LayoutCache {
	pub(crate) area: Rect,
	pub(crate) input: Rect,
	pub(crate) dropdown: Option<Rect>,
	pub(crate) list: Rect,
	pub(crate) chips: Vec<(Rect, OptionKey)>,
	pub(crate) clear_button: Option<Rect>,
}

impl LayoutCache {
	/// Rows above and below the input, inside the drawable area.
	pub(crate) fn space_around_input(&self) -> (u16, u16) {
		let above = self.input.y.saturating_sub(self.area.y);
		let below = self.area.bottom().saturating_sub(self.input.bottom());
		(above, below)
	}

	pub(crate) fn in_dropdown(&self, position: Position) -> bool {
		self.dropdown.is_some_and(|rect| rect.contains(position))
	}

	pub(crate) fn chip_at(&self, position: Position) -> Option<&OptionKey> {
		self.chips
			.iter()
			.find(|(rect, _)| rect.contains(position))
			.map(|(_, key)| key)
	}
}

/// Terminal front-end around one [`IncrementalSearchSelect`].
///
/// The app plays the role of the form that owns the control: it binds the
/// control to a field of its [`FormModel`], runs due fetches on the worker,
/// and validates on submit.
pub struct App<T> {
	pub(crate) select: IncrementalSearchSelect<T>,
	pub(crate) input: SearchInput,
	pub(crate) fetch: FetchRuntime<T>,
	pub(crate) form: Rc<RefCell<FormModel>>,
	pub(crate) field: String,
	pub(crate) required: bool,
	pub(crate) title: Option<String>,
	pub theme: Theme,
	pub(crate) anchor: Anchor,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) listeners: PointerListeners,
	pub(crate) layout: LayoutCache,
}

impl<T: Clone + Send + 'static> App<T> {
	#[must_use]
	pub fn select(&self) -> &IncrementalSearchSelect<T> {
		&self.select
	}

	/// Current value of the bound form field.
	#[must_use]
	pub fn field_value(&self) -> Option<String> {
		self.form.borrow().value(&self.field).map(str::to_string)
	}

	pub fn set_theme(&mut self, theme: Theme) {
		self.theme = theme;
	}

	/// Drain worker results and hand the next due request to the worker.
	pub(crate) fn tick(&mut self, now: Instant) {
		self.pump_fetch_results();
		self.issue_due_fetch(now);
	}

	pub(crate) fn pump_fetch_results(&mut self) {
		loop {
			match self.fetch.try_recv() {
				Ok(result) => match result.outcome {
					FetchOutcome::Completed(page) => {
						self.select.resolve(result.ticket, page);
					}
					FetchOutcome::Superseded => {
						debug!(epoch = result.ticket.epoch, "queued fetch superseded");
					}
				},
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					// Nothing sent to a dead worker will ever be answered.
					if self.select.fail_in_flight() > 0 {
						warn!("fetch worker exited with requests outstanding");
					}
					break;
				}
			}
		}
	}

	fn issue_due_fetch(&mut self, now: Instant) {
		let Some(request) = self.select.poll(now) else {
			return;
		};
		if let Err(ticket) = self.fetch.issue(request) {
			self.select.resolve(ticket, Err(FetchError::Disconnected));
		}
	}

	pub(crate) fn open_dropdown(&mut self, now: Instant) -> bool {
		let (above, below) = self.layout.space_around_input();
		self.select.open(now, above, below)
	}

	/// Mirror the control's term into the editor after the control changed
	/// it (selection and clear reset the term).
	pub(crate) fn sync_input(&mut self) {
		if self.input.text() != self.select.query() {
			self.input.set_text(self.select.query());
		}
	}

	/// Validate and finish. A required, empty selection records an error on
	/// the bound field and keeps the session running.
	pub(crate) fn submit(&mut self) -> Option<SelectOutcome<T>> {
		if self.required && self.select.selection().is_empty() {
			self.form
				.borrow_mut()
				.set_error(self.field.clone(), REQUIRED_MESSAGE);
			return None;
		}
		Some(self.outcome(true))
	}

	pub(crate) fn outcome(&self, accepted: bool) -> SelectOutcome<T> {
		SelectOutcome {
			accepted,
			selection: self.select.selected(),
			value: self.select.serialized_value(),
			query: self.select.query().to_string(),
		}
	}
}
