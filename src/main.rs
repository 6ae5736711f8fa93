//! mesh-embed - OBJ to C++ static-array converter
//!
//! Converts Wavefront OBJ meshes into .h/.cpp pairs embedding the geometry
//! as literal arrays, for demos that compile their models in.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Use modules from library
use mesh_embed::{embed, manifest, mesh::FlattenPolicy};

#[derive(Parser)]
#[command(name = "mesh-embed")]
#[command(about = "Embed OBJ meshes as C++ static-array source files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a single OBJ file
    Embed {
        /// Input .obj file
        input: PathBuf,

        /// Output directory for the generated .h/.cpp pair
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base name override (default: derived from the input file name)
        #[arg(short, long)]
        name: Option<String>,

        /// Common-types header the generated .cpp includes
        #[arg(long)]
        common_header: Option<String>,

        /// Share vertices with identical position/texCoord/normal references
        #[arg(long)]
        dedup: bool,
    },

    /// Embed every mesh listed in a manifest file
    Build {
        /// Path to meshes.toml manifest
        #[arg(default_value = "meshes.toml")]
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
        /// Path to meshes.toml manifest
        #[arg(default_value = "meshes.toml")]
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
        Commands::Embed {
            input,
            output,
            name,
            common_header,
            dedup,
        } => {
            let mut config = embed::EmbedConfig {
                name_override: name,
                policy: if dedup {
                    FlattenPolicy::Dedup
                } else {
                    FlattenPolicy::Duplicate
                },
                ..embed::EmbedConfig::default()
            };
            if let Some(dir) = output {
                config.output_dir = dir;
            }
            if let Some(header) = common_header {
                config.common_header = header;
            }

            tracing::info!("Converting {:?}", input);
            let (header_path, source_path) = embed::embed_obj(&input, &config)?;
            tracing::info!("Wrote {:?} and {:?}", header_path, source_path);
        }

        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building meshes from {:?}", manifest);
            }
            let config = manifest::EmbedManifest::load(&manifest)?;
            let base_dir = manifest
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            manifest::build_all(&config, base_dir, output.as_deref())?;
            tracing::info!("Build complete!");
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::EmbedManifest::load(&manifest)?;
            let base_dir = manifest
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            config.validate(base_dir)?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}
