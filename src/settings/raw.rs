use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Error, Result};
use fetch_select::select::{DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE, SelectOptions};
use fetch_select::sources::RecordFields;
use serde::Deserialize;
use serde_json::Value;

use super::resolved::{
	ConfigSources, ResolvedConfig, SettingSource, validate_anchor, validate_initial,
	validate_page_size, validate_source, validate_theme,
};
use crate::cli::CliArgs;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_FIELD_NAME: &str = "value";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	pub(super) source: SourceSection,
	pub(super) select: SelectSection,
	pub(super) form: FormSection,
	pub(super) ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SourceSection {
	pub(super) endpoint: Option<String>,
	pub(super) file: Option<PathBuf>,
	pub(super) language: Option<String>,
	pub(super) timeout_ms: Option<u64>,
	pub(super) value_field: Option<String>,
	pub(super) label_field: Option<String>,
	pub(super) detail_field: Option<String>,
	pub(super) display_field: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SelectSection {
	pub(super) multiple: Option<bool>,
	pub(super) debounce_ms: Option<u64>,
	pub(super) page_size: Option<usize>,
	pub(super) clearable: Option<bool>,
	pub(super) placeholder: Option<String>,
	pub(super) scroll_threshold: Option<usize>,
	pub(super) max_visible_rows: Option<u16>,
	pub(super) min_dropdown_space: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FormSection {
	pub(super) field: Option<String>,
	pub(super) required: Option<bool>,
	pub(super) initial: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
	pub(super) title: Option<String>,
	pub(super) theme: Option<String>,
	pub(super) anchor: Option<String>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		let source = &mut self.source;
		if let Some(endpoint) = cli.endpoint.clone() {
			source.endpoint = Some(endpoint);
			source.file = None;
		}
		if let Some(file) = cli.file.clone() {
			source.file = Some(file);
			source.endpoint = None;
		}
		if let Some(language) = cli.language.clone() {
			source.language = Some(language);
		}
		if let Some(timeout) = cli.timeout_ms {
			source.timeout_ms = Some(timeout);
		}
		if let Some(field) = cli.value_field.clone() {
			source.value_field = Some(field);
		}
		if let Some(field) = cli.label_field.clone() {
			source.label_field = Some(field);
		}
		if let Some(field) = cli.detail_field.clone() {
			source.detail_field = Some(field);
		}
		if let Some(field) = cli.display_field.clone() {
			source.display_field = Some(field);
		}

		let select = &mut self.select;
		if cli.multiple {
			select.multiple = Some(true);
		}
		if let Some(debounce) = cli.debounce_ms {
			select.debounce_ms = Some(debounce);
		}
		if let Some(size) = cli.page_size {
			select.page_size = Some(size);
		}
		if cli.clearable {
			select.clearable = Some(true);
		}
		if let Some(placeholder) = cli.placeholder.clone() {
			select.placeholder = Some(placeholder);
		}

		if let Some(field) = cli.field.clone() {
			self.form.field = Some(field);
		}
		if cli.required {
			self.form.required = Some(true);
		}
		if let Some(initial) = cli.initial.clone() {
			self.form.initial = Some(Value::String(initial));
		}

		if let Some(title) = cli.title.clone() {
			self.ui.title = Some(title);
		}
		if let Some(theme) = cli.theme.clone() {
			self.ui.theme = Some(theme);
		}
		if let Some(anchor) = cli.anchor {
			self.ui.anchor = Some(anchor.as_str().to_string());
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			page_size: detect_source(
				cli.page_size.is_some(),
				self.select.page_size.is_some(),
				"FETCH_SELECT__SELECT__PAGE_SIZE",
				"--page-size",
				"select.page_size",
			),
			theme: detect_source(
				cli.theme.is_some(),
				self.ui.theme.is_some(),
				"FETCH_SELECT__UI__THEME",
				"--theme",
				"ui.theme",
			),
			anchor: detect_source(
				cli.anchor.is_some(),
				self.ui.anchor.is_some(),
				"FETCH_SELECT__UI__ANCHOR",
				"--anchor",
				"ui.anchor",
			),
			initial: detect_source(
				cli.initial.is_some(),
				self.form.initial.is_some(),
				"FETCH_SELECT__FORM__INITIAL",
				"--initial",
				"form.initial",
			),
		};

		let SourceSection {
			endpoint,
			file,
			language,
			timeout_ms,
			value_field,
			label_field,
			detail_field,
			display_field,
		} = self.source;
		let timeout = timeout_ms.map_or(DEFAULT_TIMEOUT, Duration::from_millis);
		let source = validate_source(endpoint, file, language, timeout).map_err(Error::new)?;

		let defaults = RecordFields::default();
		let fields = RecordFields {
			value: value_field.unwrap_or(defaults.value),
			label: label_field.unwrap_or(defaults.label),
			detail: detail_field,
			display: display_field,
		};

		let base = SelectOptions::default();
		let select = SelectOptions {
			multiple: self.select.multiple.unwrap_or(false),
			debounce: self
				.select
				.debounce_ms
				.map_or(DEFAULT_DEBOUNCE, Duration::from_millis),
			page_size: validate_page_size(self.select.page_size, DEFAULT_PAGE_SIZE, &sources)
				.map_err(Error::new)?,
			clearable: self.select.clearable.unwrap_or(false),
			placeholder: self.select.placeholder.unwrap_or(base.placeholder),
			scroll_threshold: self.select.scroll_threshold.unwrap_or(base.scroll_threshold),
			max_visible_rows: self
				.select
				.max_visible_rows
				.unwrap_or(base.max_visible_rows)
				.max(1),
			min_dropdown_space: self
				.select
				.min_dropdown_space
				.unwrap_or(base.min_dropdown_space),
			disabled: false,
		};

		Ok(ResolvedConfig {
			source,
			fields,
			select,
			field_name: self
				.form
				.field
				.unwrap_or_else(|| DEFAULT_FIELD_NAME.to_string()),
			required: self.form.required.unwrap_or(false),
			initial: validate_initial(self.form.initial, &sources).map_err(Error::new)?,
			title: self.ui.title,
			theme: validate_theme(self.ui.theme, &sources).map_err(Error::new)?,
			anchor: validate_anchor(self.ui.anchor, &sources).map_err(Error::new)?,
		})
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}
