use std::fs;
use std::path::{Path, PathBuf};

use fetch_select_api::{FetchError, Page, PageRequest, PageSource};
use serde_json::Value;

use super::memory::StaticSource;
use super::record::{RecordAdapter, lookup};

/// Serves records from a JSON file as if it were a paginated endpoint.
///
/// The file may hold a top-level array or an object with a `data` array
/// (the shape the HTTP endpoint returns).
pub struct JsonFileSource {
	path: PathBuf,
	inner: StaticSource<Value>,
}

impl JsonFileSource {
	pub fn open(path: impl AsRef<Path>, adapter: RecordAdapter) -> Result<Self, FetchError> {
		let path = path.as_ref().to_path_buf();
		let contents = fs::read_to_string(&path)?;
		let records = Self::parse(&contents)?;
		tracing::debug!(path = %path.display(), records = records.len(), "loaded json records");
		Ok(Self {
			inner: StaticSource::new(records, move |record: &Value, term: &str| {
				adapter.matches(record, term)
			}),
			path,
		})
	}

	fn parse(contents: &str) -> Result<Vec<Value>, FetchError> {
		let document: Value =
			serde_json::from_str(contents).map_err(|err| FetchError::Decode(err.to_string()))?;
		match document {
			Value::Array(records) => Ok(records),
			other => match lookup(&other, "data") {
				Some(Value::Array(records)) => Ok(records.clone()),
				_ => Err(FetchError::Decode(
					"expected an array of records or an object with a `data` array".to_string(),
				)),
			},
		}
	}

	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl PageSource<Value> for JsonFileSource {
	fn fetch_page(&self, request: &PageRequest) -> Result<Page<Value>, FetchError> {
		self.inner.fetch_page(request)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use serde_json::json;
	use tempfile::NamedTempFile;

	use super::*;
	use crate::sources::RecordFields;

	fn write(contents: &str) -> NamedTempFile {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(contents.as_bytes()).unwrap();
		file
	}

	#[test]
	fn reads_bare_arrays_and_paginates() {
		let file = write(r#"[{"id":1,"name":"Acme"},{"id":2,"name":"Beta"},{"id":3,"name":"Acorn"}]"#);
		let source = JsonFileSource::open(file.path(), RecordAdapter::default()).unwrap();
		assert_eq!(source.len(), 3);

		let page = source.fetch_page(&PageRequest::for_page("ac", 0, 1)).unwrap();
		assert_eq!(page.data, vec![json!({"id": 1, "name": "Acme"})]);
		assert_eq!(page.total_pages, 2);
	}

	#[test]
	fn reads_wrapped_data_arrays() {
		let file = write(r#"{"data":[{"id":"x","title":"Only"}],"totalPages":1}"#);
		let adapter = RecordAdapter::new(RecordFields {
			label: "title".into(),
			..RecordFields::default()
		});
		let source = JsonFileSource::open(file.path(), adapter).unwrap();
		let page = source.fetch_page(&PageRequest::for_page("only", 0, 10)).unwrap();
		assert_eq!(page.data.len(), 1);
	}

	#[test]
	fn rejects_other_shapes() {
		let file = write(r#"{"items": []}"#);
		let err = JsonFileSource::open(file.path(), RecordAdapter::default())
			.err()
			.unwrap();
		assert!(matches!(err, FetchError::Decode(_)));
	}

	#[test]
	fn missing_files_are_io_errors() {
		let err = JsonFileSource::open("/definitely/not/here.json", RecordAdapter::default())
			.err()
			.unwrap();
		assert!(matches!(err, FetchError::Io(_)));
	}
}
