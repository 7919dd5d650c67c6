use clap::{CommandFactory, Parser};

use super::options::AnchorArg;
use super::{CliArgs, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn defaults_parse_without_arguments() {
	let parsed = CliArgs::parse_from(["fetch-select"]);
	assert_eq!(parsed.output, OutputFormat::Plain);
	assert!(parsed.config.is_empty());
	assert!(!parsed.multiple);
}

#[test]
fn endpoint_and_file_conflict() {
	let result = CliArgs::try_parse_from([
		"fetch-select",
		"--endpoint",
		"http://localhost/brands",
		"--file",
		"brands.json",
	]);
	assert!(result.is_err());
}

#[test]
fn behaviour_flags_parse() {
	let parsed = CliArgs::parse_from([
		"fetch-select",
		"--file",
		"brands.json",
		"--multiple",
		"--page-size",
		"25",
		"--anchor",
		"bottom",
		"--output",
		"json",
	]);
	assert!(parsed.multiple);
	assert_eq!(parsed.page_size, Some(25));
	assert_eq!(parsed.anchor, Some(AnchorArg::Bottom));
	assert_eq!(parsed.anchor.map(AnchorArg::as_str), Some("bottom"));
	assert_eq!(parsed.output, OutputFormat::Json);
}
