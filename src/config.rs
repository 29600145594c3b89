use crate::render::RenderError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tunables that are presentation choices rather than contract: camera
/// field of view, gradient endpoint colors, output location.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fov_scale: f64,
    pub gradient_from: [u8; 3],
    pub gradient_to: [u8; 3],
    pub out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fov_scale: 0.9,
            gradient_from: [0, 0, 0],
            gradient_to: [255, 100, 0],
            out_dir: PathBuf::from("frames"),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_survives_a_json_round_trip() {
        let cfg = Config::default();
        let text = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&text).unwrap();
        assert_eq!(back.fov_scale, cfg.fov_scale);
        assert_eq!(back.gradient_to, cfg.gradient_to);
        assert_eq!(back.out_dir, cfg.out_dir);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let partial: Config = serde_json::from_str(r#"{"fov_scale": 1.2}"#).unwrap();
        assert_eq!(partial.fov_scale, 1.2);
        assert_eq!(partial.gradient_from, Config::default().gradient_from);
    }

    #[test]
    fn load_surfaces_missing_file() {
        assert!(Config::load(Path::new("/nonexistent/glimmer.json")).is_err());
    }
}
