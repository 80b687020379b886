//! Black sky with glowing stars, drawn under space-background characters.

use kurbo::{Circle, Point, Shape};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::LaserCatResult;
use crate::foundation::random::RandomSource;
use crate::render::blur::blur_frame;
use crate::render::composite::premultiply;
use crate::render::frame::Frame;

/// Star hues; the glow uses the same hue at half alpha.
const STAR_COLORS: [[u8; 3]; 3] = [[255, 255, 255], [255, 253, 195], [191, 246, 255]];
const GLOW_ALPHA: u8 = 128;

/// Stars are nudged this far from the top-left corner.
const STAR_INSET: f64 = 3.0;
const MAX_RADIUS: f64 = 3.0;
const MIN_BLUR: u32 = 3;
const BLUR_SPAN: u32 = 5;

/// One star, resolved from its five unit draws.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub disc: Circle,
    pub hue: usize,
    /// Glow blur extent in pixels, `3..=7`.
    pub blur: u32,
}

impl Star {
    /// Draws, in order: center x, center y, radius, hue, blur.
    pub fn draw(rng: &mut dyn RandomSource, width: u32, height: u32) -> Self {
        let cx = STAR_INSET + rng.unit() * f64::from(width);
        let cy = STAR_INSET + rng.unit() * f64::from(height);
        let r = MAX_RADIUS * rng.unit();
        let hue = ((rng.unit() * STAR_COLORS.len() as f64) as usize).min(STAR_COLORS.len() - 1);
        let blur = MIN_BLUR + ((rng.unit() * f64::from(BLUR_SPAN)) as u32).min(BLUR_SPAN - 1);
        Self {
            disc: Circle::new(Point::new(cx, cy), r),
            hue,
            blur,
        }
    }

    pub fn fill(&self) -> Rgba8Premul {
        premultiply(STAR_COLORS[self.hue], 255)
    }

    pub fn glow(&self) -> Rgba8Premul {
        premultiply(STAR_COLORS[self.hue], GLOW_ALPHA)
    }
}

/// Draw `count` stars for a `width` x `height` sky, five units each.
pub fn draw_stars(rng: &mut dyn RandomSource, width: u32, height: u32, count: usize) -> Vec<Star> {
    (0..count).map(|_| Star::draw(rng, width, height)).collect()
}

/// Black frame with `stars` painted in order.
#[tracing::instrument(skip(stars), fields(count = stars.len()))]
pub fn paint_sky(width: u32, height: u32, stars: &[Star]) -> LaserCatResult<Frame> {
    let mut frame = Frame::filled(width, height, [0, 0, 0, 255]);
    for star in stars {
        paint_star(&mut frame, star)?;
    }
    Ok(frame)
}

fn paint_star(frame: &mut Frame, star: &Star) -> LaserCatResult<()> {
    // Shadow blur of `b` is a Gaussian with sigma b/2.
    let sigma = star.blur as f32 / 2.0;
    let reach = (3.0 * sigma).ceil() as u32;

    let bounds = star.disc.bounding_box().expand();
    let ox = bounds.x0 as i64 - i64::from(reach);
    let oy = bounds.y0 as i64 - i64::from(reach);
    let pw = bounds.width() as u32 + 2 * reach + 1;
    let ph = bounds.height() as u32 + 2 * reach + 1;

    let mut glow = Frame::new(pw, ph);
    fill_disc(&mut glow, &star.disc, star.glow(), ox, oy);
    let glow = blur_frame(&glow, reach, sigma)?;
    frame.draw_patch(&glow, ox, oy);

    fill_disc(frame, &star.disc, star.fill(), 0, 0);
    Ok(())
}

/// Anti-aliased disc; `(ox, oy)` is the frame's origin in canvas space.
fn fill_disc(frame: &mut Frame, disc: &Circle, px: Rgba8Premul, ox: i64, oy: i64) {
    let bounds = disc.bounding_box().expand();
    let x0 = (bounds.x0 as i64 - ox).max(0);
    let y0 = (bounds.y0 as i64 - oy).max(0);
    let x1 = (bounds.x1 as i64 - ox).min(i64::from(frame.width) - 1);
    let y1 = (bounds.y1 as i64 - oy).min(i64::from(frame.height) - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = Point::new((x + ox) as f64 + 0.5, (y + oy) as f64 + 0.5);
            let coverage = (disc.radius - center.distance(disc.center) + 0.5).clamp(0.0, 1.0);
            if coverage > 0.0 {
                frame.blend(x as u32, y as u32, px, coverage as f32);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/starfield.rs"]
mod tests;
