use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique key of an option as reported by the backend.
///
/// Dashboard records are keyed either by numeric ids or by string slugs, so
/// both shapes are accepted and compared without conversion: `1` and `"1"`
/// are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionKey {
	Number(i64),
	Text(String),
}

impl OptionKey {
	/// Build a key from a JSON scalar. Objects, arrays, floats and nulls have
	/// no stable key form and yield `None`.
	#[must_use]
	pub fn from_scalar<S: AsRef<str>>(text: Option<S>, number: Option<i64>) -> Option<Self> {
		match (number, text) {
			(Some(number), _) => Some(Self::Number(number)),
			(None, Some(text)) => Some(Self::Text(text.as_ref().to_string())),
			(None, None) => None,
		}
	}
}

impl fmt::Display for OptionKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(value) => write!(f, "{value}"),
			Self::Text(value) => f.write_str(value),
		}
	}
}

impl From<i64> for OptionKey {
	fn from(value: i64) -> Self {
		Self::Number(value)
	}
}

impl From<&str> for OptionKey {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for OptionKey {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
