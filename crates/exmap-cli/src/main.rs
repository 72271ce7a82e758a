//! exmap - expression maps from a sample library folder
//!
//! Subcommands:
//! - `exmap generate <folder>` - Write one map per instrument and variant
//! - `exmap list <folder>` - Show the slot layout without writing anything
//! - `exmap config` - Print the effective configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use exmapconf::ExmapConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod listing;
mod settings;

#[derive(Parser)]
#[command(name = "exmap")]
#[command(about = "Generate expression maps from sample library filenames")]
#[command(version)]
struct Cli {
    /// Config file used instead of ./exmap.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a folder and write expression maps
    Generate {
        /// Folder holding the sample containers
        folder: PathBuf,

        /// Output directory (defaults to [output] dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only build these instruments (token or catalogue name)
        #[arg(short, long = "instrument")]
        instruments: Vec<String>,

        /// Which map variants to write (defaults to [output] variants)
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,

        /// Descend into subfolders
        #[arg(short, long)]
        recursive: bool,
    },

    /// Show each instrument's ordered articulations and triggers
    List {
        /// Folder holding the sample containers
        folder: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Descend into subfolders
        #[arg(short, long)]
        recursive: bool,
    },

    /// Print the effective configuration and where it came from
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Directional,
    Attribute,
    Both,
}

fn init_tracing(log_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, sources) = ExmapConfig::load_with_sources_from(cli.config.as_deref())?;
    init_tracing(&config.logging.log_level, cli.verbose);

    match cli.command {
        Commands::Generate {
            folder,
            output,
            instruments,
            variant,
            recursive,
        } => {
            commands::generate(
                &config,
                commands::GenerateArgs {
                    folder,
                    output,
                    instruments,
                    variant,
                    recursive,
                },
            )?;
        }
        Commands::List {
            folder,
            json,
            recursive,
        } => {
            commands::list(&config, &folder, json, recursive)?;
        }
        Commands::Config => {
            commands::show_config(&config, &sources);
        }
    }

    Ok(())
}
