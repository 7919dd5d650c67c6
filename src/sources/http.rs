use std::time::Duration;

use fetch_select_api::{FetchError, Page, PageRequest, PageSource};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use serde::de::DeserializeOwned;

/// Connection options for [`HttpSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceOptions {
	pub timeout: Duration,
	pub language: Option<String>,
}

impl Default for HttpSourceOptions {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(10),
			language: None,
		}
	}
}

/// Pages through a dashboard endpoint answering
/// `GET <endpoint>?search=&skip=&limit=` with `{ "data": [..], "totalPages": n }`.
pub struct HttpSource {
	client: Client,
	endpoint: String,
	language: Option<String>,
}

impl HttpSource {
	pub fn new(endpoint: impl Into<String>, options: HttpSourceOptions) -> Result<Self, FetchError> {
		let client = Client::builder()
			.timeout(options.timeout)
			.build()
			.map_err(|err| FetchError::Transport(err.to_string()))?;
		Ok(Self {
			client,
			endpoint: endpoint.into(),
			language: options.language,
		})
	}

	#[must_use]
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

fn classify(err: reqwest::Error) -> FetchError {
	if err.is_decode() {
		FetchError::Decode(err.to_string())
	} else if let Some(status) = err.status() {
		FetchError::Status {
			status: status.as_u16(),
		}
	} else {
		FetchError::Transport(err.to_string())
	}
}

impl<T: DeserializeOwned> PageSource<T> for HttpSource {
	fn fetch_page(&self, request: &PageRequest) -> Result<Page<T>, FetchError> {
		let mut builder = self
			.client
			.get(&self.endpoint)
			.header(ACCEPT, "application/json")
			.query(&[
				("search", request.search.clone()),
				("skip", request.skip.to_string()),
				("limit", request.limit.to_string()),
			]);
		if let Some(language) = &self.language {
			builder = builder.header(ACCEPT_LANGUAGE, language);
		}

		tracing::debug!(endpoint = %self.endpoint, search = %request.search, skip = request.skip, "requesting page");
		let response = builder.send().map_err(classify)?;
		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::Status {
				status: status.as_u16(),
			});
		}
		response.json::<Page<T>>().map_err(classify)
	}
}
