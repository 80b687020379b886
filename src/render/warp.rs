//! Spacetime ripple: a band-resampling warp driven by a slowly advancing sine phase.
//!
//! Each step splits every row of the source into four quartile bands and stretches them so the
//! band edges follow a sine wave, then does the same for every column of the row-warped result.
//! Every step warps the untouched source; only the phase carries from step to step.

use serde::{Deserialize, Serialize};

use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::render::frame::Frame;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    /// Total warp steps per source.
    pub steps: usize,
    /// Keep every n-th step, starting with step 0.
    pub save_every: usize,
    /// Phase added on every wave evaluation.
    pub phase_step: f64,
    /// Angular frequency applied to the wave argument.
    pub frequency: f64,
    /// Scale from row/column index to wave argument.
    pub wave_scale: f64,
    /// Displacement of the three inner band edges, in pixels.
    pub amplitudes: [f64; 3],
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            steps: 150,
            save_every: 3,
            phase_step: 0.002 * 0.03,
            frequency: 0.3,
            wave_scale: 0.2,
            amplitudes: [2.5, 2.0, 1.5],
        }
    }
}

impl WarpConfig {
    pub fn validate(&self) -> LaserCatResult<()> {
        if self.steps == 0 {
            return Err(LaserCatError::validation("warp.steps must be > 0"));
        }
        if self.save_every == 0 {
            return Err(LaserCatError::validation("warp.save_every must be > 0"));
        }
        let finite = [self.phase_step, self.frequency, self.wave_scale]
            .iter()
            .chain(self.amplitudes.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(LaserCatError::validation("warp parameters must be finite"));
        }
        Ok(())
    }

    /// Number of frames a full run keeps.
    pub fn saved_frames(&self) -> usize {
        self.steps.div_ceil(self.save_every.max(1))
    }
}

/// Phase accumulator shared by every band edge of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    phase: f64,
    step: f64,
    frequency: f64,
}

impl Ripple {
    pub fn new(config: &WarpConfig) -> Self {
        Self {
            phase: 0.0,
            step: config.phase_step,
            frequency: config.frequency,
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Advance the phase once and sample the wave at `n`.
    pub fn calc(&mut self, n: f64) -> f64 {
        self.phase += self.step;
        (self.phase + n * self.frequency).sin()
    }

    /// Advance the phase exactly as [`warp_step`] would, without warping.
    pub fn skip_step(&mut self, width: u32, height: u32) {
        let calls = 3 * (u64::from(width) + u64::from(height));
        for _ in 0..calls {
            self.phase += self.step;
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Rows,
    Columns,
}

/// One warp step of `src`: rows first, then columns of the row-warped copy.
pub fn warp_step(src: &Frame, ripple: &mut Ripple, config: &WarpConfig) -> Frame {
    let rows = warp_pass(src, ripple, config, Axis::Rows);
    warp_pass(&rows, ripple, config, Axis::Columns)
}

fn warp_pass(src: &Frame, ripple: &mut Ripple, config: &WarpConfig, axis: Axis) -> Frame {
    let (lines, len) = match axis {
        Axis::Rows => (src.height, src.width),
        Axis::Columns => (src.width, src.height),
    };
    let len_f = f64::from(len);
    let q = [len_f * 0.25, len_f * 0.5, len_f * 0.75];

    let mut out = Frame::new(src.width, src.height);
    for line in 0..lines {
        let n = f64::from(line) * config.wave_scale;
        let mut m = [0.0; 3];
        for (k, slot) in m.iter_mut().enumerate() {
            *slot = q[k] + ripple.calc(n) * config.amplitudes[k];
        }

        let bands = [
            ((0.0, q[0]), (0.0, m[0])),
            ((q[0], q[1]), (m[0] - 0.5, m[1])),
            ((q[1], q[2]), (m[1] - 0.5, m[2])),
            ((q[2], len_f), (m[2] - 0.5, len_f)),
        ];
        for (from, to) in bands {
            resample_band(src, &mut out, axis, line, from, to);
        }
    }
    out
}

/// Stretch the source span `from` of one line onto the destination span `to`, sampling the
/// nearest source pixel for every destination pixel whose center falls inside `to`.
fn resample_band(
    src: &Frame,
    dst: &mut Frame,
    axis: Axis,
    line: u32,
    from: (f64, f64),
    to: (f64, f64),
) {
    let span = to.1 - to.0;
    if span <= 0.0 || from.1 <= from.0 {
        return;
    }
    let len = match axis {
        Axis::Rows => src.width,
        Axis::Columns => src.height,
    };
    let first_src = from.0.floor().max(0.0) as i64;
    let last_src = (from.1.ceil() as i64 - 1).min(i64::from(len) - 1);

    let start = (to.0 - 0.5).ceil().max(0.0) as i64;
    let end = ((to.1 - 0.5).ceil() as i64).min(i64::from(len));
    for pos in start..end {
        let center = pos as f64 + 0.5;
        let t = (center - to.0) / span;
        let s = (from.0 + t * (from.1 - from.0)).floor() as i64;
        let s = s.clamp(first_src, last_src) as u32;
        let pos = pos as u32;

        let (sx, sy, dx, dy) = match axis {
            Axis::Rows => (s, line, pos, line),
            Axis::Columns => (line, s, line, pos),
        };
        dst.blend(dx, dy, src.pixel(sx, sy), 1.0);
    }
}

/// Steps through a warp run, materializing only the saved frames that are asked for.
///
/// Several sources warped in lock step see the same phase sequence, so one accumulator serves
/// them all.
#[derive(Debug)]
pub struct RippleRun<'a> {
    config: &'a WarpConfig,
    ripple: Ripple,
    step: usize,
    saved: usize,
}

impl<'a> RippleRun<'a> {
    pub fn new(config: &'a WarpConfig) -> Self {
        Self {
            config,
            ripple: Ripple::new(config),
            step: 0,
            saved: 0,
        }
    }

    /// Index the next saved frame will get.
    pub fn saved(&self) -> usize {
        self.saved
    }

    /// Advance to the next saved step and warp the sources `want` selects.
    ///
    /// Returns `None` once the run has no saved steps left; otherwise one slot per source, filled
    /// for the selected ones.
    pub fn next_saved(
        &mut self,
        sources: &[Frame],
        want: impl Fn(usize) -> bool,
    ) -> Option<Vec<Option<Frame>>> {
        let (w, h) = sources
            .first()
            .map(|f| (f.width, f.height))
            .unwrap_or((0, 0));

        while self.step < self.config.steps {
            let step = self.step;
            self.step += 1;
            if step % self.config.save_every != 0 {
                self.ripple.skip_step(w, h);
                continue;
            }

            let frames = sources
                .iter()
                .enumerate()
                .map(|(i, src)| {
                    want(i).then(|| {
                        let mut ripple = self.ripple.clone();
                        warp_step(src, &mut ripple, self.config)
                    })
                })
                .collect();
            self.ripple.skip_step(w, h);
            self.saved += 1;
            return Some(frames);
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/warp.rs"]
mod tests;
