use std::path::PathBuf;
use std::time::Duration;

use fetch_select::Anchor;
use fetch_select::select::SelectOptions;
use fetch_select::sources::RecordFields;
use serde_json::Value;

mod errors;
mod origin;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use origin::{ConfigSources, SettingSource};
pub(crate) use validation::{
	validate_anchor, validate_initial, validate_page_size, validate_source, validate_theme,
};

/// Backend the picker pages through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceConfig {
	Endpoint {
		url: String,
		language: Option<String>,
		timeout: Duration,
	},
	File(PathBuf),
}

/// Fully validated settings for one picker session.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
	pub(crate) source: SourceConfig,
	pub(crate) fields: RecordFields,
	pub(crate) select: SelectOptions,
	pub(crate) field_name: String,
	pub(crate) required: bool,
	pub(crate) initial: Vec<Value>,
	pub(crate) title: Option<String>,
	pub(crate) theme: Option<String>,
	pub(crate) anchor: Anchor,
}

impl ResolvedConfig {
	pub(crate) fn print_summary(&self) {
		summary::print_summary(self);
	}
}
