use std::sync::Arc;

use anyhow::{Context, Result};
use fetch_select::sources::{HttpSource, HttpSourceOptions, JsonFileSource, RecordAdapter};
use fetch_select::{PageSource, SelectOutcome, SelectUi};
use serde_json::Value;
use tracing::info;

use crate::settings::{ResolvedConfig, SourceConfig};

/// Coordinates building and running the interactive picker.
pub(crate) struct SelectWorkflow {
	select_ui: SelectUi<Value>,
}

impl SelectWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let select_ui = SelectUiFactory::build(config)?;
		Ok(Self { select_ui })
	}

	pub(crate) fn run(self) -> Result<SelectOutcome<Value>> {
		self.select_ui.run()
	}
}

/// Helper for translating resolved configuration into a configured `SelectUi`.
struct SelectUiFactory;

impl SelectUiFactory {
	fn build(config: ResolvedConfig) -> Result<SelectUi<Value>> {
		let ResolvedConfig {
			source,
			fields,
			select,
			field_name,
			required,
			initial,
			title,
			theme,
			anchor,
		} = config;

		let adapter = RecordAdapter::new(fields);
		let source = Self::source(source, &adapter)?;
		let mut select_ui = SelectUi::from_shared(Arc::new(adapter), source)
			.with_options(select)
			.with_initial_selection(initial)
			.with_field_name(field_name)
			.with_required(required)
			.with_anchor(anchor);
		if let Some(title) = title {
			select_ui = select_ui.with_title(title);
		}
		if let Some(theme) = theme {
			select_ui = select_ui.with_theme_name(&theme);
		}
		Ok(select_ui)
	}

	fn source(config: SourceConfig, adapter: &RecordAdapter) -> Result<Arc<dyn PageSource<Value>>> {
		match config {
			SourceConfig::Endpoint {
				url,
				language,
				timeout,
			} => {
				info!(endpoint = %url, "paging through endpoint");
				let source = HttpSource::new(url, HttpSourceOptions { timeout, language })
					.context("failed to build HTTP client")?;
				Ok(Arc::new(source))
			}
			SourceConfig::File(path) => {
				let source = JsonFileSource::open(&path, adapter.clone())
					.with_context(|| format!("failed to load records from {}", path.display()))?;
				info!(path = %path.display(), records = source.len(), "paging through file");
				Ok(Arc::new(source))
			}
		}
	}
}
