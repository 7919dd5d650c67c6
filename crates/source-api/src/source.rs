use crate::error::FetchError;
use crate::types::{Page, PageRequest};

/// A paginated, searchable backend.
///
/// Implementations are called from a background worker, one request at a
/// time. They should be idempotent for a given request; the control never
/// asks for the same `(search, page)` twice within one search term, but it
/// does not verify what comes back.
pub trait PageSource<T>: Send + Sync {
	fn fetch_page(&self, request: &PageRequest) -> Result<Page<T>, FetchError>;
}

impl<T, F> PageSource<T> for F
where
	F: Fn(&PageRequest) -> Result<Page<T>, FetchError> + Send + Sync,
{
	fn fetch_page(&self, request: &PageRequest) -> Result<Page<T>, FetchError> {
		self(request)
	}
}
