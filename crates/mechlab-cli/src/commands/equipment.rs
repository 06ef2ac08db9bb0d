//! Equipment command handler for listing the equipment catalog.

use anyhow::Result;

use mechlab_cli::data::DataPaths;
use mechlab_cli::output::{format_equipment_json, format_equipment_text, OutputFormat};

/// Handle the equipment subcommand.
pub fn handle_list_equipment(paths: &DataPaths, format: OutputFormat) -> Result<()> {
    let catalog = paths.load_equipment()?;
    let items = catalog.items_sorted();
    match format {
        OutputFormat::Json => println!("{}", format_equipment_json(&items)?),
        OutputFormat::Text => print!("{}", format_equipment_text(&items)),
    }
    Ok(())
}
