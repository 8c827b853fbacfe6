//! Command-line interface implementation
//!
//! This module provides the CLI definition and dispatches to submodules
//! for specific command implementations.

mod batch;
mod generate;
mod palettes;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, ForgeConfig};
use crate::output::DirStore;
use crate::pipeline::{AssetKind, AssetPipeline};

pub use batch::{load_manifest, Manifest, ManifestEntry};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Conceptforge - procedural fantasy concept art
#[derive(Parser)]
#[command(name = "forge")]
#[command(about = "Conceptforge - generate fantasy concept art (characters, weapons, environments) as PNG")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to forge.toml (default: discovered from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate character concept art from a style description
    Character {
        /// Free-text style, e.g. "fantasy warrior" or "elf ranger"
        style: String,

        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Generate weapon concept art (sword, axe, bow, staff, dagger)
    Weapon {
        /// Weapon type; unknown types are drawn as a dagger
        weapon_type: String,

        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Generate an environment sketch (forest, mountain, castle, desert, cave)
    Environment {
        /// Environment type; unknown types are drawn as a cave
        environment: String,

        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Generate every asset listed in a TOML manifest, in parallel
    Batch {
        /// Manifest file with [[asset]] entries
        manifest: PathBuf,

        /// Number of worker threads (default: one per CPU)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=256))]
        jobs: Option<u32>,

        /// Output directory (overrides forge.toml)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print asset metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// List and inspect theme palettes
    Palettes {
        #[command(subcommand)]
        action: PaletteAction,
    },
}

/// Flags shared by the single-asset commands
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Seed for reproducible output
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Inference steps recorded in the asset id
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub steps: Option<u32>,

    /// Guidance scale recorded in the asset id
    #[arg(long)]
    pub guidance: Option<f64>,

    /// Output directory (overrides forge.toml)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print asset metadata as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PaletteAction {
    /// List all themes
    List,
    /// Show the colors of one theme
    Show {
        /// Theme name (warrior, wizard, elf, dwarf, rogue)
        theme: String,
    },
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> ExitCode {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Character { style, args } => {
            generate::run_generate(AssetKind::Character, &style, &args, config_path)
        }
        Commands::Weapon { weapon_type, args } => {
            generate::run_generate(AssetKind::Weapon, &weapon_type, &args, config_path)
        }
        Commands::Environment { environment, args } => {
            generate::run_generate(AssetKind::Environment, &environment, &args, config_path)
        }
        Commands::Batch { manifest, jobs, out, json } => {
            batch::run_batch(&manifest, jobs, out, json, config_path)
        }
        Commands::Palettes { action } => palettes::run_palettes(action),
    }
}

/// Load forge.toml, apply overrides, and re-validate.
///
/// Errors are printed; the returned code says which kind of failure it was.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<ForgeConfig, ExitCode> {
    let mut config = match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };

    merge_cli_overrides(&mut config, overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in errors {
            eprintln!("Error: {}", e);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

/// Pipeline writing into the configured output directory.
pub(crate) fn pipeline_for(config: &ForgeConfig) -> AssetPipeline {
    AssetPipeline::new(DirStore::new(&config.output.dir)).with_titles(config.overlay.titles)
}
