use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use gridparams::config_loader;
use gridparams::variables::VariableCatalog;

/// Resolve and validate an AMR grid configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the parameter file (params.txt style, or .yaml/.yml)
    #[arg(short, long)]
    params: PathBuf,

    /// YAML file listing evolution and diagnostic variable names
    #[arg(long)]
    variables: Option<PathBuf>,

    /// Write the resolved configuration here (.json for JSON, YAML otherwise)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Parameter file: {:?}", args.params);

    let catalog = match &args.variables {
        Some(path) => config_loader::load_catalog(path)?,
        None => VariableCatalog::default(),
    };

    let config = config_loader::load_configuration(&args.params, &catalog)?;

    if let Some(output) = &args.output {
        config_loader::write_configuration(&config, output)?;
    }

    info!("Grid configuration resolved successfully");
    Ok(())
}
