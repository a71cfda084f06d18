use std::path::PathBuf;

use anyhow::{Context, Result};
use cgmath::Deg;
use clap::Parser;
use log::{error, info};

use cubist::{gfx::OrbitCameraConfig, CubistApp, Model, ViewerConfig};

/// Interactive viewer for the embedded Rubik's cube or any converted model
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Frames per second the render loop is paced to
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Distance of the camera from the model's origin
    #[arg(long, default_value_t = 2.0)]
    radius: f32,

    /// Angular acceleration per millisecond of input
    #[arg(long, default_value_t = 0.0002)]
    sensitivity: f32,

    /// Fraction of angular velocity lost per millisecond
    #[arg(long, default_value_t = 0.002)]
    damping: f32,

    /// Uniform model scale
    #[arg(long, default_value_t = 0.3)]
    scale: f32,

    /// Converted mesh file (`.cto.obj`) to view instead of the cube
    #[arg(long, requires = "mtl")]
    obj: Option<PathBuf>,

    /// Material library (`.cto.mtl`) for `--obj`
    #[arg(long, requires = "obj")]
    mtl: Option<PathBuf>,
}

fn run(args: Args) -> Result<()> {
    let model = match (&args.obj, &args.mtl) {
        (Some(obj), Some(mtl)) => Model::load(obj, mtl)
            .with_context(|| format!("Failed to load {}", obj.display()))?,
        _ => Model::rubiks_cube().context("Failed to decode the embedded cube")?,
    };
    info!(
        "Model ready: {} vertices, {} draw chunk(s)",
        model.mesh().vertex_count(),
        model.mesh().material_chunks().len()
    );

    let config = ViewerConfig {
        target_fps: args.fps,
        camera: OrbitCameraConfig {
            radius: args.radius,
            rotation_sensitivity: args.sensitivity,
            damping_factor: args.damping,
            initial_yaw: Deg(35.0),
            initial_pitch: Deg(-20.0),
        },
        model_scale: args.scale,
        ..Default::default()
    };

    CubistApp::new(model, config)?.run()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
