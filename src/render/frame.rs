use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::render::composite::{over, unpremultiply};
use crate::render::grid::PixelGrid;

/// Owned premultiplied RGBA8 raster, row-major.
///
/// Frames are plain values; duplicating a canvas is a `clone`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// Fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn filled(width: u32, height: u32, px: Rgba8Premul) -> Self {
        let mut f = Self::new(width, height);
        for chunk in f.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        f
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel at `(x, y)`; out of bounds reads are transparent.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let o = self.offset(x, y);
        [
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ]
    }

    /// Source-over one pixel; out of bounds writes are dropped.
    pub fn blend(&mut self, x: u32, y: u32, px: Rgba8Premul, opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        let dst = [
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ];
        self.data[o..o + 4].copy_from_slice(&over(dst, px, opacity));
    }

    /// Source-over an axis-aligned block, clipped to the frame.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, px: Rgba8Premul) {
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        for yy in y.min(y1)..y1 {
            for xx in x.min(x1)..x1 {
                self.blend(xx, yy, px, 1.0);
            }
        }
    }

    /// Source-over `patch` with its top-left corner at `(ox, oy)`, clipped.
    pub fn draw_patch(&mut self, patch: &Frame, ox: i64, oy: i64) {
        for py in 0..patch.height {
            let y = oy + i64::from(py);
            if y < 0 || y >= i64::from(self.height) {
                continue;
            }
            for px in 0..patch.width {
                let x = ox + i64::from(px);
                if x < 0 || x >= i64::from(self.width) {
                    continue;
                }
                self.blend(x as u32, y as u32, patch.pixel(px, py), 1.0);
            }
        }
    }

    /// Straight-alpha copy for image encoders.
    pub fn to_rgba_image(&self) -> LaserCatResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        for px in straight.chunks_exact_mut(4) {
            let out = unpremultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| LaserCatError::validation("frame buffer does not match its dimensions"))
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> LaserCatResult<Vec<u8>> {
        use anyhow::Context;

        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}

/// Layout of grid cells on a square canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    /// Side of one cell block in pixels.
    pub block: u32,
    /// Offset applied on both axes to center the grid.
    pub pad: u32,
}

impl BlockLayout {
    pub fn fit(canvas: u32, cells: usize) -> Self {
        let cells = u32::try_from(cells.max(1)).unwrap_or(u32::MAX);
        let block = canvas / cells;
        let pad = canvas.saturating_sub(block * cells) / 2;
        Self { block, pad }
    }
}

/// Paint the grid's cells onto `base` (or a transparent canvas) as integer blocks.
///
/// The grid's outer index maps to the horizontal axis; block size comes from the grid's
/// outer extent.
pub fn rasterize(grid: &PixelGrid, canvas: u32, base: Option<&Frame>) -> Frame {
    let mut frame = base.cloned().unwrap_or_else(|| Frame::new(canvas, canvas));
    let layout = BlockLayout::fit(canvas, grid.width());
    if layout.block == 0 {
        return frame;
    }

    for (x, y, cell) in grid.iter() {
        let Some(color) = cell else {
            continue;
        };
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            continue;
        };
        frame.fill_rect(
            x * layout.block + layout.pad,
            y * layout.block + layout.pad,
            layout.block,
            layout.block,
            color.to_premul(),
        );
    }
    frame
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
