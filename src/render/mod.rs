use crate::marcher::march;
use crate::math::{add, mul, normalize, v, Ray, V3, O};
use crate::scene;
use crate::sdf::DistanceField;
use crate::shade::shade;
use rayon::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Output grid is a fixed 32x32 display.
pub const GRID: usize = 32;
pub const FRAME_LEN: usize = GRID * GRID;
/// One seamless loop: 60 frames over 2 seconds.
pub const FRAME_COUNT: usize = 60;
pub const LOOP_SECONDS: f64 = 2.0;

/// 1024 brightness bytes, row-major.
pub type Frame = Vec<u8>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
    #[error("frame {index} already written")]
    FrameExists { index: usize },
    #[error("frame file holds {len} bytes, expected {}", FRAME_LEN)]
    BadFrameLen { len: usize },
    #[error("bad config: {0}")]
    Config(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: V3,
    /// Field-of-view scale applied to normalized device coordinates.
    pub fov: f64,
}

impl Camera {
    pub fn new(pos: V3, fov: f64) -> Self {
        Camera { pos, fov }
    }

    /// Eye ray through the center of pixel (x, y); +y is up on screen.
    pub fn ray(&self, x: usize, y: usize) -> Ray {
        let ndc_x = (2. * x as f64 + 1.) / GRID as f64 - 1.;
        let ndc_y = 1. - (2. * y as f64 + 1.) / GRID as f64;
        Ray {
            o: self.pos,
            d: normalize(&v(ndc_x * self.fov, ndc_y * self.fov, 1.)),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(O, crate::config::Config::default().fov_scale)
    }
}

/// Render one frame of an arbitrary field under a two-light rig. Pixels
/// are independent, so they are traced in parallel and collected back in
/// index order; a miss is background black.
pub fn render_field(camera: &Camera, field: &dyn DistanceField, lights: &[V3; 2]) -> Frame {
    (0..FRAME_LEN)
        .into_par_iter()
        .map(|i| (i % GRID, i / GRID))
        .map(|(x, y)| {
            let Ray { o, d } = camera.ray(x, y);
            match march(field, &o, &d) {
                Some(traveled) => {
                    let hit = add(&o, &mul(traveled, &d));
                    shade(field, &hit, &camera.pos, lights)
                }
                None => 0,
            }
        })
        .collect()
}

/// Render the stock scene at animation time `t`.
pub fn render_frame(camera: &Camera, t: f64) -> Frame {
    let field = scene::at(t);
    let lights = scene::lights_at(t);
    render_field(camera, &field, &lights)
}

/// All 60 frames of the loop, in order.
pub fn render_animation(camera: &Camera) -> Vec<Frame> {
    (0..FRAME_COUNT)
        .map(|i| {
            let t = i as f64 / FRAME_COUNT as f64 * LOOP_SECONDS;
            let frame = render_frame(camera, t);
            debug!(frame = i, t, "rendered");
            frame
        })
        .collect()
}

pub fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index:03}.bin"))
}

fn persist(path: &Path, bytes: &[u8]) -> io::Result<()> {
    // create_new keeps two writers from silently clobbering one index.
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(bytes)
}

/// Write one binary file per frame into an existing directory. A missing
/// directory is fatal before anything is written; an individual write
/// failure is retried once, then surfaced.
pub fn write_frames(dir: &Path, frames: &[Frame]) -> Result<(), RenderError> {
    if !dir.is_dir() {
        return Err(RenderError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("output directory {} does not exist", dir.display()),
        )));
    }
    for (index, frame) in frames.iter().enumerate() {
        debug_assert_eq!(frame.len(), FRAME_LEN);
        let path = frame_path(dir, index);
        match persist(&path, frame) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(RenderError::FrameExists { index });
            }
            Err(e) => {
                warn!(frame = index, error = %e, "frame write failed, retrying once");
                fs::write(&path, frame)?;
            }
        }
    }
    Ok(())
}
