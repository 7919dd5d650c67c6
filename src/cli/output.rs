use anyhow::Result;
use fetch_select::SelectOutcome;
use serde_json::{Value, json};

/// Print the serialized field value, as a form would submit it.
pub(crate) fn print_plain(outcome: &SelectOutcome<Value>) {
	if !outcome.accepted {
		println!("Selection cancelled (query: '{}')", outcome.query);
		return;
	}

	if outcome.value.is_empty() {
		println!("No selection");
	} else {
		println!("{}", outcome.value);
	}
}

/// Format the outcome, including the selected records, as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SelectOutcome<Value>, field: &str) -> Result<String> {
	let payload = json!({
		"accepted": outcome.accepted,
		"query": outcome.query,
		"field": field,
		"value": outcome.value,
		"selection": outcome.selection,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

pub(crate) fn print_json(outcome: &SelectOutcome<Value>, field: &str) -> Result<()> {
	println!("{}", format_outcome_json(outcome, field)?);
	Ok(())
}
