use super::{ResolvedConfig, SourceConfig};

pub(super) fn print_summary(config: &ResolvedConfig) {
	println!("Effective configuration:");
	match &config.source {
		SourceConfig::Endpoint {
			url,
			language,
			timeout,
		} => {
			println!("  Endpoint: {url}");
			println!("  Language: {}", language.as_deref().unwrap_or("(none)"));
			println!("  Timeout: {} ms", timeout.as_millis());
		}
		SourceConfig::File(path) => println!("  File: {}", path.display()),
	}
	println!("  Value field: {}", config.fields.value);
	println!("  Label field: {}", config.fields.label);
	if let Some(detail) = &config.fields.detail {
		println!("  Detail field: {detail}");
	}
	if let Some(display) = &config.fields.display {
		println!("  Display field: {display}");
	}
	println!("  Multiple: {}", bool_to_word(config.select.multiple));
	println!("  Debounce: {} ms", config.select.debounce.as_millis());
	println!("  Page size: {}", config.select.page_size);
	println!("  Clearable: {}", bool_to_word(config.select.clearable));
	println!("  Placeholder: {}", config.select.placeholder);
	println!("  Form field: {}", config.field_name);
	println!("  Required: {}", bool_to_word(config.required));
	if !config.initial.is_empty() {
		println!("  Initial selection: {} record(s)", config.initial.len());
	}
	if let Some(title) = &config.title {
		println!("  Title: {title}");
	}
	println!(
		"  UI theme: {}",
		config.theme.as_deref().unwrap_or("(use the library default)")
	);
	println!("  Anchor: {}", config.anchor.as_str());
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
