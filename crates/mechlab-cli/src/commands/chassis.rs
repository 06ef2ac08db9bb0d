//! Chassis command handler for listing available chassis.

use anyhow::Result;

use mechlab_cli::data::DataPaths;
use mechlab_cli::output::{format_chassis_json, format_chassis_text, OutputFormat};

/// Handle the chassis subcommand.
///
/// Lists chassis from chassis.json, lightest first.
pub fn handle_list_chassis(paths: &DataPaths, format: OutputFormat) -> Result<()> {
    let catalog = paths.load_chassis()?;
    let chassis = catalog.chassis_sorted();
    match format {
        OutputFormat::Json => println!("{}", format_chassis_json(&chassis)?),
        OutputFormat::Text => print!("{}", format_chassis_text(&chassis)),
    }
    Ok(())
}
