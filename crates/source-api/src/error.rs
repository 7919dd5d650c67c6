use thiserror::Error;

/// Reasons a page fetch can fail.
///
/// The select control swallows these after logging them; they exist so
/// sources can report precisely what went wrong.
#[derive(Debug, Error)]
pub enum FetchError {
	/// The request never produced a response (DNS, connect, timeout, ...).
	#[error("transport error: {0}")]
	Transport(String),

	/// The backend answered with a non-success status code.
	#[error("backend responded with status {status}")]
	Status { status: u16 },

	/// The response body could not be decoded into a page.
	#[error("failed to decode page: {0}")]
	Decode(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// The background worker is no longer running.
	#[error("fetch worker disconnected")]
	Disconnected,
}
