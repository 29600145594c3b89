use anyhow::Context;
use clap::Parser;
use glimmer::config::Config;
use glimmer::math::O;
use glimmer::playback::{read_frame, Gradient};
use glimmer::render::{frame_path, render_animation, Camera, FRAME_COUNT, GRID};
use image::{ImageBuffer, Rgb};
use std::fs;
use std::path::PathBuf;

/// Gradient-mapped PNG preview of the animation, upscaled so the 32x32
/// frames are visible on a desktop screen.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read frame files from this directory instead of rendering.
    #[arg(short, long)]
    frames: Option<PathBuf>,

    #[arg(short, long, default_value = "preview")]
    out: PathBuf,

    /// Nearest-neighbor upscale factor.
    #[arg(short, long, default_value_t = 8)]
    scale: u32,

    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    let gradient = Gradient::new(cfg.gradient_from, cfg.gradient_to);

    let frames = match &args.frames {
        Some(dir) => (0..FRAME_COUNT)
            .map(|i| read_frame(&frame_path(dir, i)))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("reading frames from {}", dir.display()))?,
        None => render_animation(&Camera::new(O, cfg.fov_scale)),
    };

    fs::create_dir_all(&args.out)?;
    let side = GRID as u32 * args.scale;
    for (i, frame) in frames.iter().enumerate() {
        let colored = gradient.map_frame(frame);
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(side, side, |x, y| {
            let px = (x / args.scale) as usize;
            let py = (y / args.scale) as usize;
            Rgb(colored[py * GRID + px])
        });
        img.save(args.out.join(format!("frame_{i:03}.png")))?;
    }
    println!("wrote {} previews to {}", frames.len(), args.out.display());
    Ok(())
}
