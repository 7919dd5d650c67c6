//! Concrete [`PageSource`](fetch_select_api::PageSource) implementations.
//!
//! Dashboard resources arrive as loosely-shaped JSON records, so the file and
//! HTTP sources page through `serde_json::Value`s and [`RecordAdapter`] maps
//! configured field paths onto keys and labels.

mod http;
mod json_file;
mod memory;
mod record;

pub use http::{HttpSource, HttpSourceOptions};
pub use json_file::JsonFileSource;
pub use memory::StaticSource;
pub use record::{RecordAdapter, RecordFields, lookup};
