use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::genotype::decode::Genotype;
use crate::render::grid::PixelGrid;

/// Base sprite for one genotype.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParsedSprite {
    /// Numeric identifier carried into metadata.
    pub id: u64,
    /// Unmodified base pixels.
    pub data: PixelGrid,
}

/// Capability: given a genotype, return its base pixel grid and numeric identifier.
pub trait SpriteParser {
    fn parse(&self, genotype: &Genotype) -> LaserCatResult<ParsedSprite>;
}

/// Pre-rendered sprites keyed by lowercase genotype hex.
///
/// JSON form: `{ "00d1e0ff00": { "id": 1, "data": [["#rrggbb", null, ...], ...] } }`. Keys may
/// carry a `0x` prefix.
#[derive(Clone, Debug, Default)]
pub struct SpriteSheet {
    sprites: HashMap<String, ParsedSprite>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, genotype: &Genotype, sprite: ParsedSprite) {
        self.sprites.insert(genotype.hex().to_string(), sprite);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn from_json_str(json: &str) -> LaserCatResult<Self> {
        let raw: HashMap<String, ParsedSprite> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> LaserCatResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open sprite sheet '{}'", path.display()))?;
        let raw: HashMap<String, ParsedSprite> =
            serde_json::from_reader(std::io::BufReader::new(f))?;
        let sheet = Self::from_raw(raw)?;
        tracing::info!(count = sheet.len(), "loaded sprite sheet");
        Ok(sheet)
    }

    fn from_raw(raw: HashMap<String, ParsedSprite>) -> LaserCatResult<Self> {
        let mut sheet = Self::new();
        for (key, sprite) in raw {
            let genotype = Genotype::parse(&key)?;
            sheet.insert(&genotype, sprite);
        }
        Ok(sheet)
    }
}

impl SpriteParser for SpriteSheet {
    fn parse(&self, genotype: &Genotype) -> LaserCatResult<ParsedSprite> {
        self.sprites
            .get(genotype.hex())
            .cloned()
            .ok_or_else(|| LaserCatError::decode(format!("no sprite for genotype {genotype}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/genotype/sprites.rs"]
mod tests;
