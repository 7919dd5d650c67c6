use std::collections::HashSet;

/// Identifies one page of one search term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
	pub term: String,
	pub page_index: usize,
}

impl PageKey {
	#[must_use]
	pub fn new(term: impl Into<String>, page_index: usize) -> Self {
		Self {
			term: term.into(),
			page_index,
		}
	}
}

/// Search state owned by a single term.
///
/// Everything here is dropped and rebuilt together when the term changes, so
/// results of one term can never be appended to another term's buffer.
#[derive(Debug)]
pub(crate) struct SearchEpoch<T> {
	pub(crate) id: u64,
	pub(crate) term: String,
	pub(crate) results: Vec<T>,
	fetched: HashSet<PageKey>,
	in_flight: HashSet<PageKey>,
	failed: HashSet<PageKey>,
	pub(crate) page_index: usize,
	pub(crate) total_pages: Option<usize>,
	pub(crate) all_fetched: bool,
}

impl<T> SearchEpoch<T> {
	pub(crate) fn new(id: u64, term: String) -> Self {
		Self {
			id,
			term,
			results: Vec::new(),
			fetched: HashSet::new(),
			in_flight: HashSet::new(),
			failed: HashSet::new(),
			page_index: 0,
			total_pages: None,
			all_fetched: false,
		}
	}

	pub(crate) fn current_key(&self) -> PageKey {
		PageKey::new(self.term.clone(), self.page_index)
	}

	pub(crate) fn is_fetched(&self, key: &PageKey) -> bool {
		self.fetched.contains(key)
	}

	pub(crate) fn is_in_flight(&self, key: &PageKey) -> bool {
		self.in_flight.contains(key)
	}

	pub(crate) fn is_loading(&self) -> bool {
		!self.in_flight.is_empty()
	}

	/// Whether a fetch for `key` would be redundant.
	pub(crate) fn should_skip(&self, key: &PageKey) -> bool {
		self.all_fetched || self.is_fetched(key) || self.is_in_flight(key)
	}

	pub(crate) fn mark_in_flight(&mut self, key: PageKey) {
		self.in_flight.insert(key);
	}

	pub(crate) fn fail(&mut self, key: &PageKey) {
		if self.in_flight.remove(key) {
			self.failed.insert(key.clone());
		}
	}

	/// Fail everything in flight. Returns how many pages were dropped.
	pub(crate) fn fail_all(&mut self) -> usize {
		let count = self.in_flight.len();
		self.failed.extend(self.in_flight.drain());
		count
	}

	/// Whether a fetch for `key` ran in this epoch and failed.
	pub(crate) fn has_attempted(&self, key: &PageKey) -> bool {
		self.failed.contains(key)
	}

	/// Merge a resolved page into the buffer. Page zero replaces whatever is
	/// buffered; later pages append.
	pub(crate) fn apply(&mut self, key: PageKey, items: Vec<T>, total_pages: usize) {
		self.in_flight.remove(&key);
		self.failed.remove(&key);
		if key.page_index == 0 {
			self.results = items;
		} else {
			self.results.extend(items);
		}
		self.total_pages = Some(total_pages);
		if key.page_index + 1 >= total_pages {
			self.all_fetched = true;
		}
		self.fetched.insert(key);
	}

	/// Whether the backend reported a page after the current one.
	pub(crate) fn has_next_page(&self) -> bool {
		!self.all_fetched
			&& self
				.total_pages
				.is_some_and(|total| self.page_index + 1 < total)
	}

	#[cfg(test)]
	pub(crate) fn fetched_len(&self) -> usize {
		self.fetched.len()
	}
}
