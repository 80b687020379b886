use std::collections::BTreeMap;

use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::foundation::math::is_prime;
use crate::foundation::random::RandomSource;
use crate::genotype::decode::Genotype;
use crate::traits::archetype::{ArchetypeFlags, ArchetypeMatch};

/// Resolved trait flags for one record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TraitFlags {
    pub two_headed: bool,
    pub distorted: bool,
    pub laser_eyes: bool,
    pub space_background: bool,
    pub rainbow: bool,
    pub laser_show: bool,
}

impl TraitFlags {
    fn from_archetype(two_headed: bool, a: ArchetypeFlags) -> Self {
        Self {
            two_headed,
            distorted: a.distorted,
            laser_eyes: a.laser_eyes,
            space_background: a.space_background,
            rainbow: a.rainbow,
            laser_show: a.laser_show,
        }
    }

    /// Laser show only renders on top of laser eyes.
    pub fn shows_lasers(&self) -> bool {
        self.laser_show && self.laser_eyes
    }

    pub fn vector(&self) -> TraitVector {
        TraitVector([
            self.two_headed,
            self.distorted,
            self.laser_eyes,
            self.space_background,
            self.rainbow,
            self.shows_lasers(),
        ])
    }
}

/// Canonical 6-flag rarity key: two-headed, distorted, laser eyes, space background, rainbow,
/// laser show (with eyes). Displays as a `0`/`1` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraitVector([bool; 6]);

impl TraitVector {
    pub fn flags(&self) -> [bool; 6] {
        self.0
    }

    pub fn two_headed(&self) -> bool {
        self.0[0]
    }

    pub fn parse(s: &str) -> LaserCatResult<Self> {
        let mut out = [false; 6];
        if s.len() != out.len() {
            return Err(LaserCatError::validation(format!(
                "trait vector '{s}' must have 6 flags"
            )));
        }
        for (slot, ch) in out.iter_mut().zip(s.chars()) {
            *slot = match ch {
                '0' => false,
                '1' => true,
                _ => {
                    return Err(LaserCatError::validation(format!(
                        "trait vector '{s}' must only contain 0 and 1"
                    )));
                }
            };
        }
        Ok(Self(out))
    }
}

impl std::fmt::Display for TraitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in &self.0 {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Write-once table of trait vectors keyed by record ordinal.
#[derive(Clone, Debug, Default)]
pub struct TraitTable {
    vectors: BTreeMap<usize, TraitVector>,
}

impl TraitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, ordinal: usize, vector: TraitVector) -> LaserCatResult<()> {
        if self.vectors.contains_key(&ordinal) {
            return Err(LaserCatError::invariant(format!(
                "trait vector for record {ordinal} written twice"
            )));
        }
        self.vectors.insert(ordinal, vector);
        Ok(())
    }

    pub fn get(&self, ordinal: usize) -> Option<TraitVector> {
        self.vectors.get(&ordinal).copied()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vectors in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, TraitVector)> + '_ {
        self.vectors.iter().map(|(&k, &v)| (k, v))
    }
}

/// Decide the trait flags for the record at `ordinal`.
///
/// Valid archetype assignments are taken verbatim. Everything else draws from `rng`:
///
/// - two-headed: rainbow on a 1-in-4 draw, otherwise space background on a 1-in-2 draw;
/// - single-headed: rainbow when `ordinal` is prime and a 1-in-3 draw hits (the draw is only
///   taken for prime ordinals), then laser eyes on a 1-in-16 draw.
pub fn assign_traits(
    genotype: &Genotype,
    ordinal: usize,
    archetype: ArchetypeMatch,
    rng: &mut dyn RandomSource,
) -> TraitFlags {
    let two_headed = genotype.is_two_headed();
    if let ArchetypeMatch::Assigned(flags) = archetype {
        return TraitFlags::from_archetype(two_headed, flags);
    }

    let mut out = TraitFlags {
        two_headed,
        ..TraitFlags::default()
    };
    if two_headed {
        out.rainbow = rng.int_in(0, 3) == 0;
        if !out.rainbow {
            out.space_background = rng.int_in(0, 1) == 0;
        }
    } else {
        out.rainbow = is_prime(ordinal as u64) && rng.int_in(0, 2) == 0;
        out.laser_eyes = rng.int_in(0, 15) == 0;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/traits/assign.rs"]
mod tests;
