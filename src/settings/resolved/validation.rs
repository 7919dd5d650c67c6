use std::path::PathBuf;
use std::time::Duration;

use fetch_select::Anchor;
use fetch_select::ui::theme;
use serde_json::Value;

use super::{ConfigError, ConfigSources, SettingSource, SourceConfig};

pub(crate) fn validate_page_size(
	value: Option<usize>,
	default: usize,
	sources: &ConfigSources,
) -> Result<usize, ConfigError> {
	match value {
		Some(0) => Err(ConfigError::invalid(
			"select.page_size",
			"0",
			sources.source_for_page_size(),
			"must be greater than zero",
		)),
		Some(size) => Ok(size),
		None => Ok(default),
	}
}

pub(crate) fn validate_theme(
	value: Option<String>,
	sources: &ConfigSources,
) -> Result<Option<String>, ConfigError> {
	let Some(name) = value else {
		return Ok(None);
	};
	if theme::by_name(&name).is_some() {
		return Ok(Some(name));
	}
	Err(ConfigError::invalid(
		"ui.theme",
		name,
		sources.source_for_theme(),
		format!("unknown theme; expected one of {}", theme::names().join(", ")),
	))
}

pub(crate) fn validate_anchor(
	value: Option<String>,
	sources: &ConfigSources,
) -> Result<Anchor, ConfigError> {
	let Some(raw) = value else {
		return Ok(Anchor::default());
	};
	Anchor::parse(&raw).ok_or_else(|| {
		ConfigError::invalid(
			"ui.anchor",
			raw,
			sources.source_for_anchor(),
			"expected top, center or bottom",
		)
	})
}

/// Accept an array of records, a single record, or either of those encoded
/// as a JSON string (the form CLI flags and environment variables take).
pub(crate) fn validate_initial(
	value: Option<Value>,
	sources: &ConfigSources,
) -> Result<Vec<Value>, ConfigError> {
	let value = match value {
		None => return Ok(Vec::new()),
		Some(Value::String(text)) if text.trim().is_empty() => return Ok(Vec::new()),
		Some(Value::String(text)) => serde_json::from_str(&text).map_err(|err| {
			ConfigError::invalid(
				"form.initial",
				text.clone(),
				sources.source_for_initial(),
				format!("not valid JSON: {err}"),
			)
		})?,
		Some(other) => other,
	};
	match value {
		Value::Array(records) => Ok(records),
		Value::Object(_) => Ok(vec![value]),
		other => Err(ConfigError::invalid(
			"form.initial",
			other.to_string(),
			sources.source_for_initial(),
			"expected a record or an array of records",
		)),
	}
}

/// Exactly one of an endpoint and a file must be configured.
pub(crate) fn validate_source(
	endpoint: Option<String>,
	file: Option<PathBuf>,
	language: Option<String>,
	timeout: Duration,
) -> Result<SourceConfig, ConfigError> {
	match (endpoint, file) {
		(Some(url), None) if !url.trim().is_empty() => Ok(SourceConfig::Endpoint {
			url,
			language,
			timeout,
		}),
		(None, Some(path)) => Ok(SourceConfig::File(path)),
		(Some(url), Some(path)) => Err(ConfigError::invalid(
			"source",
			format!("endpoint {url}, file {}", path.display()),
			SettingSource::ConfigKey("source.endpoint"),
			"configure either an endpoint or a file, not both",
		)),
		_ => Err(ConfigError::invalid(
			"source",
			"(none)",
			SettingSource::ConfigKey("source.endpoint"),
			"pass --endpoint or --file, or set source.endpoint or source.file",
		)),
	}
}
