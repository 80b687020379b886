use std::io::BufRead;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::genotype::decode::Genotype;

/// Minimum number of comma-separated fields in a record row.
pub const MIN_FIELDS: usize = 16;

/// One immutable input row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenotypeRecord {
    pub genotype: Genotype,
    /// Identifier as written in the feed, without `0x`; case is preserved.
    pub tag: String,
    pub palette: String,
    pub pose: String,
    pub facing: String,
    pub face: String,
    pub fur: String,
    pub color: String,
    pub mint: u64,
}

/// The four canonical poses that archetype slots are balanced across.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pose {
    Standing,
    Sleeping,
    Pouncing,
    Stalking,
}

impl Pose {
    pub const ALL: [Pose; 4] = [
        Pose::Standing,
        Pose::Sleeping,
        Pose::Pouncing,
        Pose::Stalking,
    ];

    /// Exact, case-sensitive match on the pose column.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Standing" => Some(Self::Standing),
            "Sleeping" => Some(Self::Sleeping),
            "Pouncing" => Some(Self::Pouncing),
            "Stalking" => Some(Self::Stalking),
            _ => None,
        }
    }

    pub fn slot(self) -> usize {
        self as usize
    }
}

impl GenotypeRecord {
    /// Parse one comma-delimited row.
    pub fn parse_line(line: &str) -> LaserCatResult<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < MIN_FIELDS {
            return Err(LaserCatError::validation(format!(
                "record has {} fields, expected at least {MIN_FIELDS}",
                fields.len()
            )));
        }

        let mint_raw = fields[15].trim();
        let mint = mint_raw.parse::<u64>().map_err(|_| {
            LaserCatError::validation(format!("mint number '{mint_raw}' is not an integer"))
        })?;

        let genotype = Genotype::parse(fields[1])?;
        let id = fields[1].trim();
        let tag = id
            .strip_prefix("0x")
            .or_else(|| id.strip_prefix("0X"))
            .unwrap_or(id)
            .to_string();
        Ok(Self {
            genotype,
            tag,
            palette: fields[2].to_string(),
            pose: fields[4].to_string(),
            facing: fields[5].to_string(),
            face: fields[6].to_string(),
            fur: fields[7].to_string(),
            color: fields[8].to_string(),
            mint,
        })
    }

    pub fn pose_slot(&self) -> Option<Pose> {
        Pose::from_name(&self.pose)
    }
}

/// Parse every non-empty line of a record feed.
pub fn parse_records<R: BufRead>(reader: R) -> LaserCatResult<Vec<GenotypeRecord>> {
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read record line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = GenotypeRecord::parse_line(&line).map_err(|e| match e {
            LaserCatError::Validation(msg) => {
                LaserCatError::validation(format!("line {}: {msg}", idx + 1))
            }
            LaserCatError::Decode(msg) => LaserCatError::decode(format!("line {}: {msg}", idx + 1)),
            other => other,
        })?;
        out.push(record);
    }
    Ok(out)
}

#[tracing::instrument]
pub fn read_records(path: &Path) -> LaserCatResult<Vec<GenotypeRecord>> {
    let f = std::fs::File::open(path)
        .with_context(|| format!("open record feed '{}'", path.display()))?;
    let records = parse_records(std::io::BufReader::new(f))?;
    tracing::info!(count = records.len(), "loaded genotype records");
    Ok(records)
}

#[cfg(test)]
#[path = "../../tests/unit/genotype/record.rs"]
mod tests;
