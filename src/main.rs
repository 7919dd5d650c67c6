mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use fetch_select::{logging, ui};
use settings::ResolvedConfig;
use workflow::SelectWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in ui::theme::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	logging::initialize();
	run_select(cli.output, resolved)
}

/// Run the picker and print the outcome in the chosen format.
fn run_select(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
	let field = settings.field_name.clone();
	let workflow = SelectWorkflow::from_config(settings)?;
	let outcome = workflow.run()?;

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome, &field)?,
	}

	Ok(())
}
