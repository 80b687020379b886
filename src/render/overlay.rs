//! Laser-eye markers and beam sweeps.

use crate::foundation::core::Rgb;
use crate::render::grid::PixelGrid;

/// The last outer indices of an expanded grid never seed a beam.
const SEED_MARGIN: usize = 4;

/// Resting eye positions `(x, y)` for each of the eight single-headed designs.
const MARKERS: [[(usize, usize); 2]; 8] = [
    [(3, 5), (7, 5)],
    [(4, 5), (8, 5)],
    [(4, 5), (8, 5)],
    [(3, 11), (7, 11)],
    [(13, 5), (17, 5)],
    [(11, 5), (15, 5)],
    [(8, 5), (12, 5)],
    [(12, 11), (16, 11)],
];

/// Diagonal a beam travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeamDirection {
    DownRight,
    DownLeft,
    UpLeft,
    UpRight,
}

/// Beam direction for `(design, frame)`; frames 1 and 2 sweep to different diagonals.
const SWEEPS: [[BeamDirection; 2]; 8] = {
    use BeamDirection::*;
    [
        [DownRight, DownLeft],
        [UpLeft, DownRight],
        [DownLeft, DownRight],
        [DownRight, UpRight],
        [DownLeft, DownRight],
        [UpRight, DownLeft],
        [DownRight, DownLeft],
        [DownLeft, UpLeft],
    ]
};

/// Which still a frame shows in the laser animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BeamFrame {
    /// Undeflected base image.
    Rest,
    /// First sweep.
    First,
    /// Second sweep.
    Second,
}

impl BeamFrame {
    pub const ALL: [BeamFrame; 3] = [BeamFrame::Rest, BeamFrame::First, BeamFrame::Second];

    pub fn label(self) -> &'static str {
        match self {
            Self::Rest => "frame0",
            Self::First => "frame1",
            Self::Second => "frame2",
        }
    }
}

/// Force the resting eye markers for `design` to laser red.
pub fn paint_markers(grid: &mut PixelGrid, design: u8) {
    for &(x, y) in &MARKERS[usize::from(design % 8)] {
        grid.set(x, y, Some(Rgb::RED));
    }
}

pub fn sweep_direction(design: u8, frame: BeamFrame) -> Option<BeamDirection> {
    let row = &SWEEPS[usize::from(design % 8)];
    match frame {
        BeamFrame::Rest => None,
        BeamFrame::First => Some(row[0]),
        BeamFrame::Second => Some(row[1]),
    }
}

/// Red cells that start a beam, in scan order.
pub fn beam_seeds(grid: &PixelGrid) -> Vec<(usize, usize)> {
    let limit = grid.width().saturating_sub(SEED_MARGIN);
    grid.iter()
        .filter(|&(x, _, c)| x < limit && c == Some(Rgb::RED))
        .map(|(x, y, _)| (x, y))
        .collect()
}

/// Copy of `grid` with every seed extended into a full diagonal ray for `frame`.
pub fn with_beams(grid: &PixelGrid, design: u8, frame: BeamFrame) -> PixelGrid {
    let mut out = grid.clone();
    let Some(direction) = sweep_direction(design, frame) else {
        return out;
    };

    let (w, h) = (out.width(), out.height());
    for (sx, sy) in beam_seeds(grid) {
        match direction {
            BeamDirection::DownRight => {
                for k in 0..w.saturating_sub(sx) {
                    if sy + k < h {
                        out.set(sx + k, sy + k, Some(Rgb::RED));
                    }
                }
            }
            BeamDirection::DownLeft => {
                for k in 0..=sx {
                    if sy + k < h {
                        out.set(sx - k, sy + k, Some(Rgb::RED));
                    }
                }
            }
            BeamDirection::UpLeft => {
                for k in 0..=sy {
                    if k <= sx {
                        out.set(sx - k, sy - k, Some(Rgb::RED));
                    }
                }
            }
            BeamDirection::UpRight => {
                for k in 0..=sy {
                    if sx + k < w {
                        out.set(sx + k, sy - k, Some(Rgb::RED));
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
