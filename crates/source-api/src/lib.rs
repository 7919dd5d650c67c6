//! Shared interfaces between `fetch-select` and the backends it pages through.
//!
//! Embedders implement [`PageSource`] for their backend, describe their item
//! type with an [`OptionAdapter`], and optionally hand the control a
//! [`FormBinding`] that receives the serialized selection.

pub mod adapter;
pub mod error;
pub mod form;
pub mod source;
pub mod types;

pub use adapter::{FnAdapter, OptionAdapter, plain_text};
pub use error::FetchError;
pub use form::{FormBinding, FormModel};
pub use source::PageSource;
pub use types::{OptionKey, Page, PageRequest, page_count};
