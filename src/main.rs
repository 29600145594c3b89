use anyhow::Context;
use clap::Parser;
use glimmer::config::Config;
use glimmer::math::O;
use glimmer::render::{render_animation, write_frames, Camera, FRAME_COUNT};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the frame files land in; must already exist.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Optional JSON config; flags override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    fov: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(out) = args.out {
        cfg.out_dir = out;
    }
    if let Some(fov) = args.fov {
        cfg.fov_scale = fov;
    }

    let camera = Camera::new(O, cfg.fov_scale);
    info!(frames = FRAME_COUNT, "rendering animation");
    let start = Instant::now();
    let frames = render_animation(&camera);
    info!("render took {} s", start.elapsed().as_secs_f32());

    write_frames(&cfg.out_dir, &frames)
        .with_context(|| format!("writing frames to {}", cfg.out_dir.display()))?;
    info!(dir = %cfg.out_dir.display(), "animation written");
    Ok(())
}
