use serde::{Deserialize, Serialize};

/// Parameters of a single page request, in the dashboard's `skip`/`limit`
/// query-string shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
	pub search: String,
	pub skip: usize,
	pub limit: usize,
}

impl PageRequest {
	/// Request for the zero-based `page_index` of `search`.
	#[must_use]
	pub fn for_page(search: impl Into<String>, page_index: usize, page_size: usize) -> Self {
		Self {
			search: search.into(),
			skip: page_index.saturating_mul(page_size),
			limit: page_size,
		}
	}

	/// Zero-based page index this request addresses.
	#[must_use]
	pub fn page_index(&self) -> usize {
		if self.limit == 0 {
			0
		} else {
			self.skip / self.limit
		}
	}
}

/// One page of results plus the backend's total page count for the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
	pub data: Vec<T>,
	pub total_pages: usize,
}

impl<T> Page<T> {
	#[must_use]
	pub fn new(data: Vec<T>, total_pages: usize) -> Self {
		Self { data, total_pages }
	}

	#[must_use]
	pub fn empty() -> Self {
		Self {
			data: Vec::new(),
			total_pages: 0,
		}
	}
}

/// Number of pages needed for `total` items at `page_size` per page. An empty
/// result set still reports one (empty) page.
#[must_use]
pub fn page_count(total: usize, page_size: usize) -> usize {
	if page_size == 0 {
		return 1;
	}
	total.div_ceil(page_size).max(1)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn skip_is_page_index_times_page_size() {
		let request = PageRequest::for_page("lamp", 3, 10);
		assert_eq!(request.skip, 30);
		assert_eq!(request.limit, 10);
		assert_eq!(request.page_index(), 3);
	}

	#[test]
	fn page_uses_camel_case_total_pages() {
		let page: Page<u32> = serde_json::from_str(r#"{"data":[1,2],"totalPages":4}"#).unwrap();
		assert_eq!(page.data, vec![1, 2]);
		assert_eq!(page.total_pages, 4);
	}

	#[test]
	fn page_count_never_reports_zero() {
		assert_eq!(page_count(0, 10), 1);
		assert_eq!(page_count(10, 10), 1);
		assert_eq!(page_count(11, 10), 2);
	}
}
