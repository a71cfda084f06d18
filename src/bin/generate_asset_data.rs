//! Converts scene files into `.cto.obj` / `.cto.mtl` text assets.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use cubist::convert::{convert_file, ImportOptions};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scene files to convert
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory the converted files are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Fail on non-triangular faces instead of triangulating them
    #[arg(long)]
    no_triangulate: bool,
}

fn run(args: Args) -> Result<()> {
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let options = ImportOptions {
        triangulate: !args.no_triangulate,
    };

    for input in &args.inputs {
        info!("Converting {}", input.display());
        let outputs = convert_file(input, &args.output_dir, options)
            .with_context(|| format!("Failed to convert {}", input.display()))?;

        for output in outputs {
            println!("OUTPUT_FILE={}", output.display());
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
