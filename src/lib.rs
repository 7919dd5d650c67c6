//! Incremental-search select control with a terminal front-end.
//!
//! The headless [`select::IncrementalSearchSelect`] owns all of the control's
//! state and emits fetch requests; [`fetch`] runs them on a background
//! worker, [`sources`] provides file and HTTP backends, and [`ui`] renders
//! the control with ratatui.

pub mod app_dirs;
pub mod fetch;
pub mod logging;
pub mod select;
pub mod sources;
pub mod ui;

pub use fetch_select_api::{
	FetchError, FnAdapter, FormBinding, FormModel, OptionAdapter, OptionKey, Page, PageRequest,
	PageSource,
};
pub use select::{BoundField, IncrementalSearchSelect, SelectOptions};
pub use ui::{Anchor, App, SelectOutcome, SelectUi, Theme};
