use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::render::warp::WarpConfig;

/// Tunables for one batch run. Every field has a default, so a config file only needs the
/// values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Side of the square output canvas in pixels.
    pub canvas_size: u32,
    /// Cells added to the larger sprite dimension before centering.
    pub expand_margin: usize,
    /// Stars painted on a space background.
    pub star_count: usize,
    /// Seed for the batch's random stream.
    pub seed: u64,
    pub warp: WarpConfig,
    /// Frame time of the laser-show loop.
    pub laser_delay_ms: u32,
    /// Frame time of ripple animations.
    pub ripple_delay_ms: u32,
    /// Length of a single-source ripple animation.
    pub ripple_single_frames: usize,
    /// Also write every warped frame as a PNG.
    pub keep_frames: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            canvas_size: 1024,
            expand_margin: 6,
            star_count: 138,
            seed: 0,
            warp: WarpConfig::default(),
            laser_delay_ms: 500,
            ripple_delay_ms: 100,
            ripple_single_frames: 17,
            keep_frames: false,
        }
    }
}

impl BatchConfig {
    pub fn from_json_str(json: &str) -> LaserCatResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> LaserCatResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> LaserCatResult<()> {
        if self.canvas_size == 0 || self.canvas_size > u32::from(u16::MAX) {
            return Err(LaserCatError::validation(format!(
                "canvas_size must be within 1..=65535, got {}",
                self.canvas_size
            )));
        }
        if self.ripple_single_frames == 0 {
            return Err(LaserCatError::validation("ripple_single_frames must be > 0"));
        }
        if self.laser_delay_ms == 0 || self.ripple_delay_ms == 0 {
            return Err(LaserCatError::validation("frame delays must be > 0"));
        }
        self.warp.validate()
    }
}
