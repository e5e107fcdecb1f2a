//! zed-export - ZED model export tool
//!
//! Converts OBJ and glTF/GLB meshes to chunked `.zed` model files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use zed_export::{AxisConvention, ExportOptions, ZED_EXT, export_model, manifest, mesh};

#[derive(Parser)]
#[command(name = "zed-export")]
#[command(about = "ZED model export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a single mesh file as one model
    Export {
        /// Input mesh file (OBJ/glTF/GLB)
        input: PathBuf,

        /// Output .zed file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Coordinate convention of the source
        #[arg(long, value_enum, default_value_t = AxisConvention::AsAuthored)]
        axis: AxisConvention,

        /// Reverse triangle winding
        #[arg(long)]
        flip_winding: bool,

        /// Model name (default: output file stem)
        #[arg(long)]
        name: Option<String>,

        /// Export only these objects (repeatable, default: all)
        #[arg(long = "object")]
        objects: Vec<String>,
    },

    /// Build models from a manifest file
    Build {
        /// Path to zed.toml manifest
        #[arg(default_value = "zed.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to zed.toml manifest
        #[arg(default_value = "zed.toml")]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            axis,
            flip_winding,
            name,
            objects,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension(ZED_EXT));
            tracing::info!("Converting {:?} -> {:?}", input, output);

            let meshes = mesh::load_meshes(&input)?;
            let meshes = mesh::select_meshes(meshes, &objects)
                .with_context(|| format!("No meshes selected from {:?}", input))?;

            let mut options = ExportOptions::new(axis, flip_winding);
            options.name = name;

            export_model(&output, &meshes, &options)
                .with_context(|| format!("Failed to export {:?}", output))?;
            tracing::info!("Done!");
        }

        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building models from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete!");
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}
