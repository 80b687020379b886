//! Where a batch puts its outputs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;

use crate::batch::metadata::Metadata;
use crate::foundation::error::LaserCatResult;
use crate::traits::rarity::RarityReport;

/// Kind of per-record artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Single PNG.
    Still,
    /// Laser-show GIF loop.
    LaserLoop,
    /// Spacetime ripple GIF.
    Ripple,
}

impl ArtifactKind {
    fn dir(self) -> &'static str {
        match self {
            Self::Still => "lasercats",
            Self::LaserLoop => "gifs",
            Self::Ripple => "fx_gifs",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Still => "png",
            Self::LaserLoop | Self::Ripple => "gif",
        }
    }
}

/// Zero-padded artifact stem for a record.
pub fn artifact_stem(ordinal: usize) -> String {
    format!("{ordinal:05}")
}

/// Destination for everything a batch produces. Any failure aborts the batch.
pub trait ArtifactStore {
    /// Encoded image bytes for a record.
    fn write_image(
        &mut self,
        kind: ArtifactKind,
        ordinal: usize,
        bytes: &[u8],
    ) -> LaserCatResult<()>;
    /// One warped frame, kept for inspection.
    fn write_warp_frame(
        &mut self,
        ordinal: usize,
        label: &str,
        index: usize,
        png: &[u8],
    ) -> LaserCatResult<()>;
    fn write_metadata(&mut self, ordinal: usize, metadata: &Metadata) -> LaserCatResult<()>;
    fn write_report(&mut self, report: &RarityReport) -> LaserCatResult<()>;
}

/// Lays artifacts out under a root directory:
///
/// - `lasercats/NNNNN.png`, `gifs/NNNNN.gif`, `fx_gifs/NNNNN.gif`
/// - `fx_frames/NNNNN_<label>_<index>.png`
/// - `metadata/NNNNN` (JSON)
/// - `report.json`
#[derive(Clone, Debug)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn write(&self, dir: Option<&str>, name: &str, bytes: &[u8]) -> LaserCatResult<()> {
        let dir = match dir {
            Some(d) => self.root.join(d),
            None => self.root.clone(),
        };
        std::fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        let path = dir.join(name);
        std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

impl ArtifactStore for FsArtifactStore {
    fn write_image(
        &mut self,
        kind: ArtifactKind,
        ordinal: usize,
        bytes: &[u8],
    ) -> LaserCatResult<()> {
        let name = format!("{}.{}", artifact_stem(ordinal), kind.extension());
        self.write(Some(kind.dir()), &name, bytes)
    }

    fn write_warp_frame(
        &mut self,
        ordinal: usize,
        label: &str,
        index: usize,
        png: &[u8],
    ) -> LaserCatResult<()> {
        let name = format!("{}_{label}_{index}.png", artifact_stem(ordinal));
        self.write(Some("fx_frames"), &name, png)
    }

    fn write_metadata(&mut self, ordinal: usize, metadata: &Metadata) -> LaserCatResult<()> {
        let json = serde_json::to_vec(metadata)?;
        self.write(Some("metadata"), &artifact_stem(ordinal), &json)
    }

    fn write_report(&mut self, report: &RarityReport) -> LaserCatResult<()> {
        let json = serde_json::to_vec_pretty(report)?;
        self.write(None, "report.json", &json)
    }
}

/// Keeps everything in memory, for tests and dry runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryArtifactStore {
    pub images: BTreeMap<(ArtifactKind, usize), Vec<u8>>,
    pub warp_frames: BTreeMap<(usize, String, usize), Vec<u8>>,
    pub metadata: BTreeMap<usize, Metadata>,
    pub report: Option<RarityReport>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self, kind: ArtifactKind, ordinal: usize) -> Option<&[u8]> {
        self.images.get(&(kind, ordinal)).map(Vec::as_slice)
    }

    /// Kinds written for `ordinal`.
    pub fn kinds_of(&self, ordinal: usize) -> Vec<ArtifactKind> {
        self.images
            .keys()
            .filter(|(_, o)| *o == ordinal)
            .map(|(k, _)| *k)
            .collect()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn write_image(
        &mut self,
        kind: ArtifactKind,
        ordinal: usize,
        bytes: &[u8],
    ) -> LaserCatResult<()> {
        self.images.insert((kind, ordinal), bytes.to_vec());
        Ok(())
    }

    fn write_warp_frame(
        &mut self,
        ordinal: usize,
        label: &str,
        index: usize,
        png: &[u8],
    ) -> LaserCatResult<()> {
        self.warp_frames
            .insert((ordinal, label.to_string(), index), png.to_vec());
        Ok(())
    }

    fn write_metadata(&mut self, ordinal: usize, metadata: &Metadata) -> LaserCatResult<()> {
        self.metadata.insert(ordinal, metadata.clone());
        Ok(())
    }

    fn write_report(&mut self, report: &RarityReport) -> LaserCatResult<()> {
        self.report = Some(report.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/artifacts.rs"]
mod tests;
