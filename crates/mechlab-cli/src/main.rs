use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mechlab_cli::data::DataPaths;
use mechlab_cli::output::OutputFormat;

mod commands;

use commands::build::{BuildArgs, BuildMode};

#[derive(Parser, Debug)]
#[command(author, version, about = "MechLab chassis data and loadout tools")]
struct Cli {
    /// Directory holding equipment.csv and chassis.json.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available chassis.
    Chassis,
    /// List available equipment.
    Equipment,
    /// Build a loadout for a chassis.
    Build {
        /// Chassis name (case-insensitive).
        #[arg(long)]
        chassis: String,
        /// Construction mode.
        #[arg(long, value_enum, default_value_t = BuildMode::Stock)]
        mode: BuildMode,
        /// Settings file for the default build (overrides MECHLAB_SETTINGS).
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let paths = DataPaths::resolve(cli.data_dir.as_deref())?;

    match cli.command {
        Command::Chassis => commands::chassis::handle_list_chassis(&paths, cli.format),
        Command::Equipment => commands::equipment::handle_list_equipment(&paths, cli.format),
        Command::Build {
            chassis,
            mode,
            settings,
        } => commands::build::handle_build(
            &paths,
            &BuildArgs {
                chassis,
                mode,
                settings,
            },
            cli.format,
        ),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
