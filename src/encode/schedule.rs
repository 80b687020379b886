//! Frame ordering for the two animation kinds and the drivers that feed a sink.

use crate::encode::sink::{AnimationConfig, AnimationSink};
use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::render::frame::Frame;
use crate::render::overlay::BeamFrame;
use crate::render::warp::{RippleRun, WarpConfig};

/// Blink pattern of the laser-show loop.
pub const LASER_LOOP: [BeamFrame; 10] = {
    use BeamFrame::*;
    [First, Rest, First, Rest, Rest, Second, Rest, Second, Rest, Rest]
};

/// Source for position `i` of the interleaved three-source ripple.
pub fn interleaved_source(position: usize) -> usize {
    match position {
        0..=4 | 10..=14 => 1,
        24..=29 | 34..=39 => 2,
        _ => 0,
    }
}

/// How warped sources are ordered into a ripple animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RippleSchedule {
    /// One source; the first `frames` saved steps.
    Single { frames: usize },
    /// Three sources interleaved over every saved step.
    Interleaved,
}

impl RippleSchedule {
    pub fn source_count(self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Interleaved => 3,
        }
    }

    /// Animation length given how many steps a warp run saves.
    pub fn len(self, saved: usize) -> usize {
        match self {
            Self::Single { frames } => frames.min(saved),
            Self::Interleaved => saved,
        }
    }

    pub fn source(self, position: usize) -> usize {
        match self {
            Self::Single { .. } => 0,
            Self::Interleaved => interleaved_source(position),
        }
    }
}

/// Push the laser-show loop built from the rest, first and second beam frames.
pub fn play_laser_loop(
    sink: &mut dyn AnimationSink,
    cfg: AnimationConfig,
    frames: &[Frame; 3],
) -> LaserCatResult<()> {
    sink.begin(cfg)?;
    for (position, beam) in LASER_LOOP.iter().enumerate() {
        let frame = match beam {
            BeamFrame::Rest => &frames[0],
            BeamFrame::First => &frames[1],
            BeamFrame::Second => &frames[2],
        };
        sink.push_frame(position, frame)?;
    }
    sink.end()
}

/// Warp `sources` and push the scheduled frame for every animation position.
///
/// With `keep_all`, every source is warped at every saved step of the run and each result is
/// handed to `on_saved(source, saved_index, frame)`; otherwise only the scheduled source is
/// warped, and the run stops once the animation is complete.
#[tracing::instrument(skip_all, fields(schedule = ?schedule, keep_all = keep_all))]
pub fn play_ripple(
    sink: &mut dyn AnimationSink,
    cfg: AnimationConfig,
    sources: &[Frame],
    warp: &WarpConfig,
    schedule: RippleSchedule,
    keep_all: bool,
    mut on_saved: impl FnMut(usize, usize, &Frame) -> LaserCatResult<()>,
) -> LaserCatResult<()> {
    if sources.len() != schedule.source_count() {
        return Err(LaserCatError::validation(format!(
            "ripple schedule needs {} sources, got {}",
            schedule.source_count(),
            sources.len()
        )));
    }

    let len = schedule.len(warp.saved_frames());
    let mut run = RippleRun::new(warp);
    sink.begin(cfg)?;
    loop {
        let position = run.saved();
        if position >= len && !keep_all {
            break;
        }
        let scheduled = schedule.source(position);
        let Some(frames) = run.next_saved(sources, |s| keep_all || s == scheduled) else {
            break;
        };

        if keep_all {
            for (source, frame) in frames.iter().enumerate() {
                if let Some(frame) = frame {
                    on_saved(source, position, frame)?;
                }
            }
        }
        if position < len {
            let frame = frames[scheduled].as_ref().ok_or_else(|| {
                LaserCatError::invariant(format!("ripple position {position} was not warped"))
            })?;
            sink.push_frame(position, frame)?;
        }
    }
    tracing::debug!(frames = len, "ripple assembled");
    sink.end()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/schedule.rs"]
mod tests;
