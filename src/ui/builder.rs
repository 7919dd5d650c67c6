use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use fetch_select_api::{FormModel, OptionAdapter, PageSource};
use throbber_widgets_tui::ThrobberState;

use super::input::SearchInput;
use super::listeners::PointerListeners;
use super::state::{Anchor, App, LayoutCache, SelectOutcome};
use super::theme::{self, Theme};
use crate::fetch::FetchRuntime;
use crate::select::{BoundField, IncrementalSearchSelect, SelectOptions};

const DEFAULT_FIELD: &str = "value";

/// Builder for a terminal select session.
pub struct SelectUi<T> {
	adapter: Arc<dyn OptionAdapter<T>>,
	source: Arc<dyn PageSource<T>>,
	options: SelectOptions,
	initial: Vec<T>,
	field: String,
	required: bool,
	title: Option<String>,
	theme: Theme,
	anchor: Anchor,
}

impl<T: Clone + Send + 'static> SelectUi<T> {
	pub fn new(adapter: impl OptionAdapter<T> + 'static, source: impl PageSource<T> + 'static) -> Self {
		Self::from_shared(Arc::new(adapter), Arc::new(source))
	}

	pub fn from_shared(adapter: Arc<dyn OptionAdapter<T>>, source: Arc<dyn PageSource<T>>) -> Self {
		Self {
			adapter,
			source,
			options: SelectOptions::default(),
			initial: Vec::new(),
			field: DEFAULT_FIELD.to_string(),
			required: false,
			title: None,
			theme: Theme::default(),
			anchor: Anchor::default(),
		}
	}

	#[must_use]
	pub fn with_options(mut self, options: SelectOptions) -> Self {
		self.options = options;
		self
	}

	#[must_use]
	pub fn with_initial_selection(mut self, items: Vec<T>) -> Self {
		self.initial = items;
		self
	}

	#[must_use]
	pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
		self.field = name.into();
		self
	}

	#[must_use]
	pub fn with_required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	#[must_use]
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	/// Apply a built-in theme by name; unknown names keep the current theme.
	#[must_use]
	pub fn with_theme_name(mut self, name: &str) -> Self {
		if let Some(theme) = theme::by_name(name) {
			self.theme = theme;
		}
		self
	}

	#[must_use]
	pub fn with_anchor(mut self, anchor: Anchor) -> Self {
		self.anchor = anchor;
		self
	}

	/// Wire the control to a fresh form model and start the fetch worker.
	pub fn build(self) -> App<T> {
		let form = Rc::new(RefCell::new(FormModel::new()));
		let errors = Rc::clone(&form);
		let field = self.field.clone();
		let select = IncrementalSearchSelect::with_shared_adapter(self.adapter, self.options)
			.with_initial_selection(self.initial)
			.with_bound_field(BoundField::new(self.field.clone(), Rc::clone(&form)))
			.with_on_change(move |_| errors.borrow_mut().clear_error(&field));

		App {
			select,
			input: SearchInput::default(),
			fetch: FetchRuntime::spawn(self.source),
			form,
			field: self.field,
			required: self.required,
			title: self.title,
			theme: self.theme,
			anchor: self.anchor,
			throbber_state: ThrobberState::default(),
			listeners: PointerListeners::default(),
			layout: LayoutCache::default(),
		}
	}

	/// Build the app and run it until the user submits or cancels.
	pub fn run(self) -> Result<SelectOutcome<T>> {
		self.build().run()
	}
}
