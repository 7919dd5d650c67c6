use std::sync::Arc;

use fetch_select_api::{FetchError, Page, PageRequest, PageSource, page_count};

type Matcher<T> = Arc<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// Pages through an in-memory list, filtering by the search term.
pub struct StaticSource<T> {
	items: Vec<T>,
	matches: Matcher<T>,
}

impl<T> StaticSource<T> {
	/// `matches` decides whether an item belongs to a (non-empty) search term.
	pub fn new<M>(items: Vec<T>, matches: M) -> Self
	where
		M: Fn(&T, &str) -> bool + Send + Sync + 'static,
	{
		Self {
			items,
			matches: Arc::new(matches),
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl<T: Clone + Send + Sync> PageSource<T> for StaticSource<T> {
	fn fetch_page(&self, request: &PageRequest) -> Result<Page<T>, FetchError> {
		let term = request.search.trim();
		let matching: Vec<&T> = if term.is_empty() {
			self.items.iter().collect()
		} else {
			self.items
				.iter()
				.filter(|item| (self.matches)(item, term))
				.collect()
		};
		let data = matching
			.iter()
			.skip(request.skip)
			.take(request.limit)
			.map(|item| (*item).clone())
			.collect();
		Ok(Page::new(data, page_count(matching.len(), request.limit)))
	}
}
