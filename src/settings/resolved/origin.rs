use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Where each validated setting came from, for error messages.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) page_size: Option<SettingSource>,
	pub(crate) theme: Option<SettingSource>,
	pub(crate) anchor: Option<SettingSource>,
	pub(crate) initial: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_page_size(&self) -> SettingSource {
		self.page_size
			.clone()
			.unwrap_or(SettingSource::ConfigKey("select.page_size"))
	}

	pub(crate) fn source_for_theme(&self) -> SettingSource {
		self.theme
			.clone()
			.unwrap_or(SettingSource::ConfigKey("ui.theme"))
	}

	pub(crate) fn source_for_anchor(&self) -> SettingSource {
		self.anchor
			.clone()
			.unwrap_or(SettingSource::ConfigKey("ui.anchor"))
	}

	pub(crate) fn source_for_initial(&self) -> SettingSource {
		self.initial
			.clone()
			.unwrap_or(SettingSource::ConfigKey("form.initial"))
	}
}
