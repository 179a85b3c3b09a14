// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 defnet contributors

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use defnet::error::DefError;
use defnet::export::{export_components_to_csv, export_dataset_to_json, export_nets_to_csv};
use defnet::DefReader;

/// Parse a DEF file and extract component/net information.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the DEF file
    #[arg(long)]
    def_path: PathBuf,

    /// Path to the output directory
    #[arg(long, default_value = "temp")]
    output_dir: PathBuf,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), DefError> {
    std::fs::create_dir_all(&args.output_dir)?;

    let dataset = DefReader::new().read(&args.def_path)?;

    export_dataset_to_json(&dataset, args.output_dir.join("def_dataset.json"))?;
    export_components_to_csv(&dataset, args.output_dir.join("components.csv"))?;
    export_nets_to_csv(&dataset, args.output_dir.join("nets.csv"))?;

    info!("summary:");
    info!("  components: {}", dataset.instance_to_id.len());
    info!("  nets: {}", dataset.id_to_net.len());
    info!(
        "  database units per micron: {}",
        dataset.header.units.database_units_per_micron
    );
    info!("saved DEF data to {}", args.output_dir.display());
    Ok(())
}
