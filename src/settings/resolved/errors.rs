use thiserror::Error;

use super::origin::SettingSource;

#[derive(Debug, Error)]
#[error("invalid value for {key} from {origin}: {reason} (value: {value})")]
pub(crate) struct ConfigError {
	pub(crate) key: &'static str,
	pub(crate) value: String,
	pub(crate) origin: SettingSource,
	pub(crate) reason: String,
}

impl ConfigError {
	pub(crate) fn invalid<V, R>(key: &'static str, value: V, origin: SettingSource, reason: R) -> Self
	where
		V: Into<String>,
		R: Into<String>,
	{
		Self {
			key,
			value: value.into(),
			origin,
			reason: reason.into(),
		}
	}
}
