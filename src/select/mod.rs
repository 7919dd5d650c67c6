//! Headless incremental-search select control.
//!
//! [`IncrementalSearchSelect`] owns every piece of state the control needs
//! (query, per-term result buffer, selection, dropdown, highlight, viewport)
//! but performs no I/O. The embedding loop calls [`IncrementalSearchSelect::poll`]
//! to obtain due fetch requests, runs them wherever it likes, and reports the
//! outcome through [`IncrementalSearchSelect::resolve`].

mod debounce;
mod epoch;
mod highlight;
mod placement;
mod selection;


use std::sync::Arc;
use std::time::{Duration, Instant};

use fetch_select_api::{
	FetchError, FormBinding, OptionAdapter, OptionKey, Page, PageRequest, PageSource,
};
use ratatui::text::Line;
use tracing::{debug, warn};

use self::debounce::Debouncer;
use self::epoch::SearchEpoch;
pub use self::epoch::PageKey;
pub use self::highlight::{Highlight, ListViewport};
pub use self::placement::Placement;
pub use self::selection::SelectionSet;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Behaviour and presentation flags for a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOptions {
	pub multiple: bool,
	pub debounce: Duration,
	pub page_size: usize,
	pub disabled: bool,
	pub clearable: bool,
	pub placeholder: String,
	/// Rows from the bottom of the list that count as "scrolled to the end".
	pub scroll_threshold: usize,
	/// Rows the dropdown needs below the control before it flips upward.
	pub min_dropdown_space: u16,
	pub max_visible_rows: u16,
}

impl Default for SelectOptions {
	fn default() -> Self {
		Self {
			multiple: false,
			debounce: DEFAULT_DEBOUNCE,
			page_size: DEFAULT_PAGE_SIZE,
			disabled: false,
			clearable: false,
			placeholder: String::from("Select..."),
			scroll_threshold: 1,
			min_dropdown_space: 8,
			max_visible_rows: 8,
		}
	}
}

/// A named field in an external form model that mirrors the selection.
pub struct BoundField {
	name: String,
	form: Box<dyn FormBinding>,
}

impl BoundField {
	pub fn new(name: impl Into<String>, form: impl FormBinding + 'static) -> Self {
		Self {
			name: name.into(),
			form: Box::new(form),
		}
	}

	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}
}

/// Identifies the epoch and page a fetch was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket {
	pub epoch: u64,
	pub key: PageKey,
}

/// A due fetch the embedder must execute and then [`resolve`].
///
/// [`resolve`]: IncrementalSearchSelect::resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
	pub ticket: FetchTicket,
	pub request: PageRequest,
}

/// Keys the control reacts to while its dropdown is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKey {
	Up,
	Down,
	Enter,
	Escape,
}

/// What happened to a resolved fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
	Applied,
	/// The term changed while the request was in flight; the result was dropped.
	Stale,
	Failed,
}

type ChangeCallback<T> = Box<dyn FnMut(&[T])>;

/// Searchable, lazily paginated single- or multi-select over items of type `T`.
pub struct IncrementalSearchSelect<T> {
	adapter: Arc<dyn OptionAdapter<T>>,
	options: SelectOptions,
	epoch: SearchEpoch<T>,
	next_epoch: u64,
	selection: SelectionSet<T>,
	open: bool,
	focused: bool,
	placement: Placement,
	highlight: Highlight,
	viewport: ListViewport,
	debounce: Debouncer,
	on_change: Option<ChangeCallback<T>>,
	field: Option<BoundField>,
}

impl<T: Clone + 'static> IncrementalSearchSelect<T> {
	pub fn new(adapter: impl OptionAdapter<T> + 'static, options: SelectOptions) -> Self {
		Self::with_shared_adapter(Arc::new(adapter), options)
	}

	pub fn with_shared_adapter(adapter: Arc<dyn OptionAdapter<T>>, options: SelectOptions) -> Self {
		let options = SelectOptions {
			page_size: options.page_size.max(1),
			..options
		};
		Self {
			adapter,
			options,
			epoch: SearchEpoch::new(1, String::new()),
			next_epoch: 2,
			selection: SelectionSet::default(),
			open: false,
			focused: false,
			placement: Placement::default(),
			highlight: Highlight::default(),
			viewport: ListViewport::default(),
			debounce: Debouncer::default(),
			on_change: None,
			field: None,
		}
	}

	/// Seed the selection. In single-select mode only the first item is kept.
	#[must_use]
	pub fn with_initial_selection(mut self, items: impl IntoIterator<Item = T>) -> Self {
		let adapter = Arc::clone(&self.adapter);
		let keyed = items.into_iter().map(|item| (adapter.value(&item), item));
		self.selection = if self.options.multiple {
			SelectionSet::from_keyed(keyed)
		} else {
			SelectionSet::from_keyed(keyed.take(1))
		};
		self.write_field();
		self
	}

	#[must_use]
	pub fn with_on_change(mut self, callback: impl FnMut(&[T]) + 'static) -> Self {
		self.on_change = Some(Box::new(callback));
		self
	}

	/// Mirror the selection into `field`. The current selection is written
	/// immediately.
	#[must_use]
	pub fn with_bound_field(mut self, field: BoundField) -> Self {
		self.field = Some(field);
		self.write_field();
		self
	}

	#[must_use]
	pub fn options(&self) -> &SelectOptions {
		&self.options
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.epoch.term
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.open
	}

	#[must_use]
	pub fn is_focused(&self) -> bool {
		self.focused
	}

	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.epoch.is_loading()
	}

	/// A fetch is scheduled but its debounce has not fired yet.
	#[must_use]
	pub fn is_search_pending(&self) -> bool {
		self.debounce.is_pending()
	}

	#[must_use]
	pub fn is_disabled(&self) -> bool {
		self.options.disabled
	}

	#[must_use]
	pub fn placement(&self) -> Placement {
		self.placement
	}

	#[must_use]
	pub fn highlighted(&self) -> Option<usize> {
		self.highlight.index()
	}

	#[must_use]
	pub fn viewport(&self) -> ListViewport {
		self.viewport
	}

	#[must_use]
	pub fn page_index(&self) -> usize {
		self.epoch.page_index
	}

	#[must_use]
	pub fn total_pages(&self) -> Option<usize> {
		self.epoch.total_pages
	}

	#[must_use]
	pub fn all_fetched(&self) -> bool {
		self.epoch.all_fetched
	}

	#[must_use]
	pub fn epoch_id(&self) -> u64 {
		self.epoch.id
	}

	#[must_use]
	pub fn is_page_fetched(&self, key: &PageKey) -> bool {
		self.epoch.is_fetched(key)
	}

	/// Items buffered for the current term, in fetch order.
	#[must_use]
	pub fn results(&self) -> &[T] {
		&self.epoch.results
	}

	#[must_use]
	pub fn selection(&self) -> &SelectionSet<T> {
		&self.selection
	}

	#[must_use]
	pub fn selected(&self) -> Vec<T> {
		self.selection.to_vec()
	}

	/// Options the user can pick from right now. Multi-select hides what is
	/// already selected; single-select shows the whole buffer.
	#[must_use]
	pub fn visible_options(&self) -> Vec<&T> {
		self.epoch
			.results
			.iter()
			.filter(|item| !self.options.multiple || !self.selection.contains(&self.adapter.value(item)))
			.collect()
	}

	fn visible_len(&self) -> usize {
		if self.options.multiple {
			self.visible_options().len()
		} else {
			self.epoch.results.len()
		}
	}

	#[must_use]
	pub fn value_of(&self, item: &T) -> OptionKey {
		self.adapter.value(item)
	}

	#[must_use]
	pub fn label_of(&self, item: &T) -> Line<'static> {
		self.adapter.label(item)
	}

	#[must_use]
	pub fn display_text_of(&self, item: &T) -> String {
		self.adapter.display_text(item)
	}

	/// Text the input shows: the live query while open, otherwise the
	/// selected item's display text in single-select mode.
	#[must_use]
	pub fn input_text(&self) -> String {
		if self.open || self.options.multiple || !self.epoch.term.is_empty() {
			return self.epoch.term.clone();
		}
		self.selection
			.first()
			.map(|item| self.adapter.display_text(item))
			.unwrap_or_default()
	}

	/// Serialized selection as written to a bound field.
	#[must_use]
	pub fn serialized_value(&self) -> String {
		self.selection.serialize_keys()
	}

	#[must_use]
	pub fn field_name(&self) -> Option<&str> {
		self.field.as_ref().map(BoundField::name)
	}

	/// Error message the bound form reports for this control's field.
	#[must_use]
	pub fn field_error(&self) -> Option<String> {
		self.field
			.as_ref()
			.and_then(|field| field.form.error(&field.name))
	}

	pub fn set_disabled(&mut self, disabled: bool) {
		self.options.disabled = disabled;
		if disabled {
			self.debounce.cancel();
			self.close();
		}
	}

	pub fn focus(&mut self) {
		if !self.options.disabled {
			self.focused = true;
		}
	}

	/// Open the dropdown, measuring the rows available on either side of the
	/// control. Returns `true` on the closed-to-open transition.
	pub fn open(&mut self, now: Instant, space_above: u16, space_below: u16) -> bool {
		if self.options.disabled || self.open {
			return false;
		}
		self.open = true;
		self.focused = true;
		self.highlight.reset();
		self.viewport.offset = 0;
		self.placement = Placement::choose(space_above, space_below, self.options.min_dropdown_space);
		if !self.debounce.is_pending() {
			self.debounce.schedule(now, Duration::ZERO);
		}
		true
	}

	/// Close the dropdown. Returns `true` on the open-to-closed transition.
	pub fn close(&mut self) -> bool {
		if !self.open {
			return false;
		}
		self.open = false;
		self.highlight.reset();
		true
	}

	/// A pointer press landed outside the control and its dropdown.
	pub fn click_outside(&mut self) -> bool {
		self.focused = false;
		self.close()
	}

	/// Update the search term. Any change starts a new term epoch and
	/// (re)schedules the debounced fetch of its first page.
	pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
		if self.options.disabled {
			return;
		}
		let query = query.into();
		if query == self.epoch.term {
			return;
		}
		let id = self.next_epoch;
		self.next_epoch = self.next_epoch.wrapping_add(1);
		debug!(epoch = id, term = %query, "search term changed");
		self.epoch = SearchEpoch::new(id, query);
		self.highlight.reset();
		self.viewport.offset = 0;
		self.debounce.schedule(now, self.options.debounce);
	}

	/// Pick `item`: replaces the selection and closes in single-select mode,
	/// toggles membership and stays open in multi-select mode. The search
	/// term is cleared either way.
	pub fn select(&mut self, item: T, now: Instant) {
		if self.options.disabled {
			return;
		}
		let key = self.adapter.value(&item);
		if self.options.multiple {
			self.selection.toggle(key, item);
		} else {
			self.selection.replace(key, item);
			self.close();
		}
		self.highlight.reset();
		self.set_query(String::new(), now);
		self.notify();
	}

	/// Select the visible option at `index`, if any.
	pub fn select_visible(&mut self, index: usize, now: Instant) -> bool {
		let Some(item) = self.visible_options().get(index).map(|item| (*item).clone()) else {
			return false;
		};
		self.select(item, now);
		true
	}

	/// Remove one selected item (a chip in multi-select mode).
	pub fn remove(&mut self, key: &OptionKey) -> Option<T> {
		if self.options.disabled {
			return None;
		}
		let removed = self.selection.remove(key)?;
		self.notify();
		Some(removed)
	}

	pub fn remove_last(&mut self) -> Option<T> {
		let key = self.selection.last_key()?.clone();
		self.remove(&key)
	}

	/// Empty the selection and the search term. No-op unless the control is
	/// clearable.
	pub fn clear(&mut self, now: Instant) -> bool {
		if self.options.disabled || !self.options.clearable {
			return false;
		}
		self.selection.clear();
		self.highlight.reset();
		self.set_query(String::new(), now);
		self.notify();
		true
	}

	/// Route a navigation key. Only handled while the dropdown is open.
	pub fn handle_key(&mut self, key: SelectKey, now: Instant) -> bool {
		if !self.open || self.options.disabled {
			return false;
		}
		match key {
			SelectKey::Down => {
				let len = self.visible_len();
				if let Some(index) = self.highlight.next(len) {
					self.reveal(index, now);
				}
			}
			SelectKey::Up => {
				let len = self.visible_len();
				if let Some(index) = self.highlight.previous(len) {
					self.reveal(index, now);
				}
			}
			SelectKey::Enter => {
				if let Some(index) = self.highlight.index() {
					self.select_visible(index, now);
				}
			}
			SelectKey::Escape => {
				self.close();
				self.focused = true;
			}
		}
		true
	}

	/// Highlight the visible option at `index` directly (pointer hover).
	pub fn set_highlight(&mut self, index: usize) {
		let len = self.visible_len();
		self.highlight.set(index, len);
	}

	/// The renderer reports how many list rows fit on screen.
	pub fn set_viewport_height(&mut self, height: usize) {
		self.viewport.height = height.max(1);
		let len = self.visible_len();
		self.viewport.clamp(len);
	}

	/// Scroll the dropdown list by `delta` rows, loading the next page when the
	/// bottom comes into reach.
	pub fn scroll_by(&mut self, delta: isize, now: Instant) {
		if !self.open {
			return;
		}
		let len = self.visible_len();
		self.viewport.scroll_by(delta, len);
		self.check_scroll_end(now);
	}

	fn reveal(&mut self, index: usize, now: Instant) {
		self.viewport.ensure_visible(index);
		self.check_scroll_end(now);
	}

	fn check_scroll_end(&mut self, now: Instant) {
		if !self.open || self.epoch.is_loading() || self.epoch.all_fetched {
			return;
		}
		let len = self.visible_len();
		if !self.viewport.is_near_bottom(len, self.options.scroll_threshold) {
			return;
		}
		if self.debounce.is_pending() {
			return;
		}
		let current = self.epoch.current_key();
		if !self.epoch.is_fetched(&current) {
			// Only a page that was attempted and failed is retried here; a
			// term that has never been fetched waits for its debounce.
			if self.epoch.has_attempted(&current) {
				self.debounce.schedule(now, Duration::ZERO);
			}
		} else if self.epoch.has_next_page() {
			self.epoch.page_index += 1;
			debug!(page = self.epoch.page_index, "advancing to next page");
			self.debounce.schedule(now, Duration::ZERO);
		}
	}

	/// Return the fetch that is due at `now`, if the debounce timer fired and
	/// the page is neither fetched, in flight, nor past the last page.
	pub fn poll(&mut self, now: Instant) -> Option<FetchRequest> {
		if !self.debounce.fire(now) {
			return None;
		}
		let key = self.epoch.current_key();
		if self.epoch.should_skip(&key) {
			debug!(term = %key.term, page = key.page_index, "fetch skipped");
			return None;
		}
		self.epoch.mark_in_flight(key.clone());
		let request = PageRequest::for_page(key.term.clone(), key.page_index, self.options.page_size);
		debug!(epoch = self.epoch.id, term = %key.term, page = key.page_index, "fetch issued");
		Some(FetchRequest {
			ticket: FetchTicket {
				epoch: self.epoch.id,
				key,
			},
			request,
		})
	}

	/// Apply the outcome of a previously polled request.
	pub fn resolve(&mut self, ticket: FetchTicket, result: Result<Page<T>, FetchError>) -> Resolution {
		if ticket.epoch != self.epoch.id {
			debug!(
				epoch = ticket.epoch,
				current = self.epoch.id,
				term = %ticket.key.term,
				"discarding stale page"
			);
			return Resolution::Stale;
		}
		match result {
			Ok(page) => {
				debug!(
					term = %ticket.key.term,
					page = ticket.key.page_index,
					items = page.data.len(),
					total_pages = page.total_pages,
					"page applied"
				);
				self.epoch.apply(ticket.key, page.data, page.total_pages);
				let len = self.visible_len();
				self.highlight.clamp(len);
				self.viewport.clamp(len);
				Resolution::Applied
			}
			Err(err) => {
				warn!(
					term = %ticket.key.term,
					page = ticket.key.page_index,
					error = %err,
					"page fetch failed"
				);
				self.epoch.fail(&ticket.key);
				Resolution::Failed
			}
		}
	}

	/// Fail every request still in flight, e.g. after the worker running them
	/// died. The pages become retryable and loading stops.
	pub fn fail_in_flight(&mut self) -> usize {
		let failed = self.epoch.fail_all();
		if failed > 0 {
			warn!(term = %self.epoch.term, pages = failed, "in-flight fetches abandoned");
		}
		failed
	}

	/// Poll and, if a fetch is due, run it synchronously against `source`.
	pub fn drive(&mut self, source: &dyn PageSource<T>, now: Instant) -> Option<Resolution> {
		let FetchRequest { ticket, request } = self.poll(now)?;
		let result = source.fetch_page(&request);
		Some(self.resolve(ticket, result))
	}

	fn notify(&mut self) {
		self.write_field();
		if let Some(callback) = self.on_change.as_mut() {
			let items = self.selection.to_vec();
			callback(&items);
		}
	}

	fn write_field(&mut self) {
		let value = self.selection.serialize_keys();
		if let Some(field) = self.field.as_mut() {
			field.form.set_field(&field.name, value);
		}
	}
}
