use fetch_select_api::{FetchError, Page};

use crate::select::{FetchRequest, FetchTicket};

/// Messages sent from the UI thread to the fetch worker.
#[derive(Debug)]
pub enum FetchCommand {
	Fetch(FetchRequest),
	Shutdown,
}

/// What the worker did with a request.
#[derive(Debug)]
pub enum FetchOutcome<T> {
	Completed(Result<Page<T>, FetchError>),
	/// The request belonged to an older epoch and was dropped before running.
	Superseded,
}

/// Reply for a single [`FetchCommand::Fetch`].
#[derive(Debug)]
pub struct FetchResult<T> {
	pub ticket: FetchTicket,
	pub outcome: FetchOutcome<T>,
}
