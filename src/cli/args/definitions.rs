use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{AnchorArg, OutputFormat};
use super::styles::{cli_styles, long_version};

#[derive(Parser, Debug)]
#[command(
	name = "fetch-select",
	version,
	long_version = long_version(),
	about = "Searchable, paginated picker over a dashboard endpoint or a JSON file",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `fetch-select` binary.
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "FETCH_SELECT_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'e',
		long,
		value_name = "URL",
		conflicts_with = "file",
		help = "Paginated endpoint answering ?search=&skip=&limit="
	)]
	pub(crate) endpoint: Option<String>,
	#[arg(
		short = 'f',
		long,
		value_name = "PATH",
		help = "JSON file of records to page through instead of an endpoint"
	)]
	pub(crate) file: Option<PathBuf>,
	#[arg(
		long,
		value_name = "LANG",
		help = "Accept-Language sent to the endpoint (default: none)"
	)]
	pub(crate) language: Option<String>,
	#[arg(
		long = "timeout-ms",
		value_name = "MS",
		help = "Request timeout for the endpoint (default: 10000)"
	)]
	pub(crate) timeout_ms: Option<u64>,
	#[arg(
		long = "value-field",
		value_name = "PATH",
		help = "Record field holding the option key (default: id)"
	)]
	pub(crate) value_field: Option<String>,
	#[arg(
		long = "label-field",
		value_name = "PATH",
		help = "Record field shown as the option label (default: name)"
	)]
	pub(crate) label_field: Option<String>,
	#[arg(
		long = "detail-field",
		value_name = "PATH",
		help = "Record field shown dimmed after the label (default: none)"
	)]
	pub(crate) detail_field: Option<String>,
	#[arg(
		long = "display-field",
		value_name = "PATH",
		help = "Record field shown in the input once selected (default: label)"
	)]
	pub(crate) display_field: Option<String>,
	#[arg(short = 'm', long, help = "Allow selecting several options (default: disabled)")]
	pub(crate) multiple: bool,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		help = "Quiet period before a search is sent (default: 300)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		long = "page-size",
		value_name = "N",
		help = "Options requested per page (default: 10)"
	)]
	pub(crate) page_size: Option<usize>,
	#[arg(long, help = "Allow clearing the selection with Ctrl-X (default: disabled)")]
	pub(crate) clearable: bool,
	#[arg(
		long,
		value_name = "TEXT",
		help = "Text shown while nothing is selected (default: Select...)"
	)]
	pub(crate) placeholder: Option<String>,
	#[arg(long, help = "Refuse to submit an empty selection (default: disabled)")]
	pub(crate) required: bool,
	#[arg(
		long,
		value_name = "JSON",
		help = "Records selected at start, as a JSON array (default: none)"
	)]
	pub(crate) initial: Option<String>,
	#[arg(
		long = "field",
		value_name = "NAME",
		help = "Name of the form field receiving the selection (default: value)"
	)]
	pub(crate) field: Option<String>,
	#[arg(
		short = 't',
		long,
		value_name = "TITLE",
		help = "Title shown on the input border (default: none)"
	)]
	pub(crate) title: Option<String>,
	#[arg(
		long,
		value_name = "THEME",
		help = "Select a theme by name (default: default)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long,
		value_enum,
		value_name = "ANCHOR",
		help = "Vertical position of the control (default: top)"
	)]
	pub(crate) anchor: Option<AnchorArg>,
	#[arg(long = "list-themes", help = "List available themes and exit")]
	pub(crate) list_themes: bool,
	#[arg(
		long = "print-config",
		help = "Print the resolved configuration before starting"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'o',
		long,
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
}
