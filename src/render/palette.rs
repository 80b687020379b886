//! Dominant-color detection, restriping and rainbow recoloring.

use std::collections::HashMap;

use crate::foundation::core::Rgb;
use crate::genotype::decode::CountingMode;
use crate::render::grid::PixelGrid;

/// Colors at or below this brightness are ignored in muted counting mode.
const MUTED_MIN_BRIGHTNESS: f64 = 50.0;

/// Stops of the rainbow gradient, red to violet.
pub const RAINBOW_STOPS: [Rgb; 6] = [
    Rgb::new(0xe0, 0x3c, 0x31),
    Rgb::new(0xff, 0x7f, 0x41),
    Rgb::new(0xf7, 0xea, 0x48),
    Rgb::new(0x2d, 0xc8, 0x4d),
    Rgb::new(0x14, 0x7b, 0xd1),
    Rgb::new(0x75, 0x3b, 0xbd),
];

/// Number of samples in the precomputed rainbow.
pub const RAINBOW_LEN: usize = 40;

/// Per-color occurrence counts in first-discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorCounts {
    entries: Vec<(Rgb, usize)>,
}

impl ColorCounts {
    pub fn tally(grid: &PixelGrid, mode: CountingMode) -> Self {
        let mut entries: Vec<(Rgb, usize)> = Vec::new();
        let mut slot: HashMap<Rgb, usize> = HashMap::new();
        for (_, _, cell) in grid.iter() {
            let Some(color) = cell else {
                continue;
            };
            if mode == CountingMode::Muted && color.brightness() <= MUTED_MIN_BRIGHTNESS {
                continue;
            }
            match slot.get(&color) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    slot.insert(color, entries.len());
                    entries.push((color, 1));
                }
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(Rgb, usize)] {
        &self.entries
    }

    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|e| e.1).max().unwrap_or(0)
    }

    /// Color with the highest count; among ties the last discovered wins.
    pub fn dominant(&self) -> Option<(Rgb, usize)> {
        let max = self.max_count();
        self.entries.iter().rev().find(|e| e.1 == max).copied()
    }
}

/// Alternating pattern that restriping follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StripePattern {
    /// Every even outer index.
    Outer,
    /// Every even inner index.
    Inner,
    /// Cells where exactly one of the two indices is even.
    Checker,
}

impl StripePattern {
    /// Map a draw in `0..=2` to a pattern; larger values fall back to [`StripePattern::Checker`].
    pub fn from_draw(draw: u32) -> Self {
        match draw {
            0 => Self::Outer,
            1 => Self::Inner,
            _ => Self::Checker,
        }
    }

    pub fn hits(self, x: usize, y: usize) -> bool {
        match self {
            Self::Outer => x % 2 == 0,
            Self::Inner => y % 2 == 0,
            Self::Checker => (x % 2 == 0) != (y % 2 == 0),
        }
    }
}

/// Brightness-adjusted variant of `color` used for stripes.
pub fn stripe_color(color: Rgb) -> Rgb {
    let brightness = color.brightness().floor();
    if brightness < 140.0 {
        color.brighten(10)
    } else if brightness < 220.0 {
        color.brighten(20)
    } else {
        color.darken(20)
    }
}

/// Six-stop gradient sampled into [`RAINBOW_LEN`] colors.
///
/// Each of the five segments contributes an equal share of samples, excluding its start stop and
/// including its end stop.
pub fn rainbow() -> Vec<Rgb> {
    let segments = RAINBOW_STOPS.len() - 1;
    let per_segment = RAINBOW_LEN / segments;
    let mut out = Vec::with_capacity(RAINBOW_LEN);
    for s in 0..segments {
        for step in 1..=per_segment {
            let t = step as f64 / per_segment as f64;
            out.push(RAINBOW_STOPS[s].lerp(RAINBOW_STOPS[s + 1], t));
        }
    }
    out
}

/// Recolor the dominant color of `grid` in place: stripes first, then rainbow when enabled.
///
/// Returns the color that was replaced, if any.
pub fn recolor(
    grid: &mut PixelGrid,
    mode: CountingMode,
    pattern: StripePattern,
    rainbow_on: bool,
) -> Option<Rgb> {
    let (target, _) = ColorCounts::tally(grid, mode).dominant()?;
    let stripe = stripe_color(target);
    let gradient = rainbow();
    let width = grid.width();

    for x in 0..width {
        for y in 0..grid.height() {
            if grid.get(x, y) != Some(target) {
                continue;
            }
            let replacement = if rainbow_on {
                gradient[x * gradient.len() / width]
            } else if pattern.hits(x, y) {
                stripe
            } else {
                continue;
            };
            grid.set(x, y, Some(replacement));
        }
    }
    Some(target)
}

#[cfg(test)]
#[path = "../../tests/unit/render/palette.rs"]
mod tests;
