//! Build command handler: construct a loadout and print it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::debug;

use mechlab_cli::data::DataPaths;
use mechlab_cli::output::{format_loadout_json, format_loadout_text, OutputFormat};
use mechlab_lib::{Construction, LoadoutFactory, LoadoutSettings, StandardLoadoutFactory};

/// Construction mode selected with `--mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuildMode {
    /// Nothing equipped, no armor.
    Empty,
    /// Engine, heat sinks and armor from the loadout settings.
    Default,
    /// The chassis' stock configuration.
    Stock,
    /// A clone of the stock configuration.
    Clone,
}

#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub chassis: String,
    pub mode: BuildMode,
    pub settings: Option<PathBuf>,
}

/// Handle the build subcommand.
pub fn handle_build(paths: &DataPaths, args: &BuildArgs, format: OutputFormat) -> Result<()> {
    let equipment = paths.load_equipment()?;
    let catalog = paths.load_chassis()?;
    let chassis = catalog.require(&args.chassis)?;
    let factory = StandardLoadoutFactory::new(&equipment);

    let settings;
    let source;
    let construction = match args.mode {
        BuildMode::Empty => Construction::Empty,
        BuildMode::Default => {
            settings = LoadoutSettings::resolve(args.settings.as_deref())
                .context("failed to resolve loadout settings")?;
            debug!(?settings, "resolved loadout settings");
            Construction::Default(&settings)
        }
        BuildMode::Stock => Construction::Stock,
        BuildMode::Clone => {
            source = factory.produce(&chassis, Construction::Stock)?;
            Construction::Clone(&source)
        }
    };
    let loadout = factory.produce(&chassis, construction)?;

    let mode = construction.label();
    match format {
        OutputFormat::Json => println!("{}", format_loadout_json(&loadout, mode)?),
        OutputFormat::Text => print!("{}", format_loadout_text(&loadout, mode)),
    }
    Ok(())
}
