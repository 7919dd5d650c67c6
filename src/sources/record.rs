use fetch_select_api::{OptionAdapter, OptionKey};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use serde_json::Value;

/// Field paths used to read a JSON record.
///
/// Paths are dot separated, so `name.en` reaches into `{"name": {"en": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
	pub value: String,
	pub label: String,
	pub detail: Option<String>,
	pub display: Option<String>,
}

impl Default for RecordFields {
	fn default() -> Self {
		Self {
			value: "id".to_string(),
			label: "name".to_string(),
			detail: None,
			display: None,
		}
	}
}

/// Walk a dot separated `path` through nested objects (and array indices).
#[must_use]
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
	path.split('.')
		.filter(|segment| !segment.is_empty())
		.try_fold(record, |current, segment| match current {
			Value::Object(map) => map.get(segment),
			Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
			_ => None,
		})
}

fn scalar_text(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(text) => Some(text.clone()),
		Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
		Value::Array(_) | Value::Object(_) => None,
	}
}

/// [`OptionAdapter`] for `serde_json::Value` records.
#[derive(Debug, Clone, Default)]
pub struct RecordAdapter {
	fields: RecordFields,
}

impl RecordAdapter {
	#[must_use]
	pub fn new(fields: RecordFields) -> Self {
		Self { fields }
	}

	#[must_use]
	pub fn fields(&self) -> &RecordFields {
		&self.fields
	}

	fn text(&self, record: &Value, path: &str) -> Option<String> {
		lookup(record, path).and_then(scalar_text)
	}

	/// Whether `term` appears (case-insensitively) in the label, detail or
	/// display text of `record`.
	#[must_use]
	pub fn matches(&self, record: &Value, term: &str) -> bool {
		let needle = term.to_lowercase();
		[
			Some(self.fields.label.as_str()),
			self.fields.detail.as_deref(),
			self.fields.display.as_deref(),
		]
		.into_iter()
		.flatten()
		.filter_map(|path| self.text(record, path))
		.any(|text| text.to_lowercase().contains(&needle))
	}
}

impl OptionAdapter<Value> for RecordAdapter {
	fn value(&self, record: &Value) -> OptionKey {
		let Some(raw) = lookup(record, &self.fields.value) else {
			return OptionKey::Text(String::new());
		};
		OptionKey::from_scalar(raw.as_str(), raw.as_i64())
			.or_else(|| scalar_text(raw).map(OptionKey::Text))
			.unwrap_or_else(|| OptionKey::Text(raw.to_string()))
	}

	fn label(&self, record: &Value) -> Line<'static> {
		let mut spans = vec![Span::raw(
			self.text(record, &self.fields.label).unwrap_or_default(),
		)];
		if let Some(detail) = self
			.fields
			.detail
			.as_deref()
			.and_then(|path| self.text(record, path))
			.filter(|detail| !detail.is_empty())
		{
			spans.push(Span::styled(
				format!("  {detail}"),
				Style::default().add_modifier(Modifier::DIM),
			));
		}
		Line::from(spans)
	}

	fn display_text(&self, record: &Value) -> String {
		if let Some(display) = self
			.fields
			.display
			.as_deref()
			.and_then(|path| self.text(record, path))
		{
			return display;
		}
		match self.text(record, &self.fields.label) {
			Some(label) if !label.is_empty() => label,
			_ => self.value(record).to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use fetch_select_api::plain_text;
	use serde_json::json;

	use super::*;

	fn adapter() -> RecordAdapter {
		RecordAdapter::new(RecordFields {
			value: "id".into(),
			label: "name.en".into(),
			detail: Some("code".into()),
			display: None,
		})
	}

	#[test]
	fn lookup_walks_objects_and_arrays() {
		let record = json!({"name": {"en": "Acme"}, "tags": ["a", "b"]});
		assert_eq!(lookup(&record, "name.en"), Some(&json!("Acme")));
		assert_eq!(lookup(&record, "tags.1"), Some(&json!("b")));
		assert_eq!(lookup(&record, "name.fr"), None);
	}

	#[test]
	fn keys_keep_their_json_shape() {
		let adapter = adapter();
		assert_eq!(adapter.value(&json!({"id": 7})), OptionKey::Number(7));
		assert_eq!(adapter.value(&json!({"id": "7"})), OptionKey::Text("7".into()));
		assert_eq!(adapter.value(&json!({})), OptionKey::Text(String::new()));
	}

	#[test]
	fn label_includes_dimmed_detail() {
		let record = json!({"id": 1, "name": {"en": "Acme"}, "code": "AC"});
		let label = adapter().label(&record);
		assert_eq!(plain_text(&label), "Acme  AC");
		assert_eq!(label.spans.len(), 2);
	}

	#[test]
	fn display_text_prefers_display_field_then_label_then_key() {
		let mut fields = adapter().fields().clone();
		fields.display = Some("short".into());
		let adapter = RecordAdapter::new(fields);
		assert_eq!(adapter.display_text(&json!({"id": 1, "short": "AC"})), "AC");
		assert_eq!(adapter.display_text(&json!({"id": 1, "name": {"en": "Acme"}})), "Acme");
		assert_eq!(adapter.display_text(&json!({"id": 3})), "3");
	}

	#[test]
	fn matching_is_case_insensitive_across_fields() {
		let adapter = adapter();
		let record = json!({"id": 1, "name": {"en": "Acme"}, "code": "XY-9"});
		assert!(adapter.matches(&record, "acm"));
		assert!(adapter.matches(&record, "xy"));
		assert!(!adapter.matches(&record, "zeta"));
	}
}
