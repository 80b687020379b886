use crate::foundation::core::Rgb;
use crate::foundation::error::{LaserCatError, LaserCatResult};

/// Sprite cell grid; `None` is transparent.
///
/// Cells are addressed `(x, y)` where `x` is the outer index of the sprite data (the horizontal
/// axis once rasterized) and `y` the inner one. Scans visit `x` first, then `y`, matching the
/// order sprite data is authored in.
///
/// The grid is a plain value: clone it before mutating a frame so frames never alias.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(
    try_from = "Vec<Vec<Option<Rgb>>>",
    into = "Vec<Vec<Option<Rgb>>>"
)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<Rgb>>,
}

impl PixelGrid {
    /// Fully transparent grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Build from outer-major nested data; every inner vector must share one length.
    pub fn from_columns(columns: Vec<Vec<Option<Rgb>>>) -> LaserCatResult<Self> {
        let width = columns.len();
        let height = columns.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(LaserCatError::decode("pixel grid must not be empty"));
        }
        if let Some(x) = columns.iter().position(|c| c.len() != height) {
            return Err(LaserCatError::decode(format!(
                "pixel grid column {x} has length {}, expected {height}",
                columns[x].len()
            )));
        }

        Ok(Self {
            width,
            height,
            cells: columns.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Larger of the two dimensions.
    pub fn extent(&self) -> usize {
        self.width.max(self.height)
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Cell at `(x, y)`; out-of-range reads are transparent.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[self.idx(x, y)]
    }

    /// Overwrite a cell; out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, color: Option<Rgb>) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.idx(x, y);
        self.cells[i] = color;
    }

    /// `(x, y, cell)` in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Option<Rgb>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (i / self.height, i % self.height, *c))
    }

    /// Square grid of side `side` with `self` centered; returns the grid and the `(x, y)`
    /// offset the original landed at.
    pub fn expand(&self, side: usize) -> LaserCatResult<(PixelGrid, (usize, usize))> {
        if side < self.extent() {
            return Err(LaserCatError::validation(format!(
                "cannot expand a {}x{} grid into side {side}",
                self.width, self.height
            )));
        }

        let ox = (side - self.width) / 2;
        let oy = (side - self.height) / 2;
        let mut out = PixelGrid::new(side, side);
        for (x, y, c) in self.iter() {
            out.set(x + ox, y + oy, c);
        }
        Ok((out, (ox, oy)))
    }

    /// Sub-grid of `width` x `height` starting at `offset`.
    pub fn crop(
        &self,
        offset: (usize, usize),
        width: usize,
        height: usize,
    ) -> LaserCatResult<PixelGrid> {
        let (ox, oy) = offset;
        if ox + width > self.width || oy + height > self.height {
            return Err(LaserCatError::validation(format!(
                "crop {width}x{height} at ({ox}, {oy}) exceeds {}x{} grid",
                self.width, self.height
            )));
        }

        let mut out = PixelGrid::new(width, height);
        for x in 0..width {
            for y in 0..height {
                out.set(x, y, self.get(x + ox, y + oy));
            }
        }
        Ok(out)
    }
}

impl TryFrom<Vec<Vec<Option<Rgb>>>> for PixelGrid {
    type Error = LaserCatError;

    fn try_from(value: Vec<Vec<Option<Rgb>>>) -> Result<Self, Self::Error> {
        Self::from_columns(value)
    }
}

impl From<PixelGrid> for Vec<Vec<Option<Rgb>>> {
    fn from(grid: PixelGrid) -> Self {
        grid.cells
            .chunks(grid.height.max(1))
            .map(<[Option<Rgb>]>::to_vec)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid.rs"]
mod tests;
