use std::collections::{BTreeMap, HashMap};

use crate::batch::metadata::{Metadata, TraitValue};
use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::traits::assign::{TraitTable, TraitVector};

/// Dense rarity tier per distinct trait vector; lower is rarer.
#[derive(Clone, Debug, Default)]
pub struct TierMap {
    /// `(vector, occurrences, tier)` sorted by ascending occurrences.
    entries: Vec<(TraitVector, usize, u32)>,
    by_vector: HashMap<TraitVector, u32>,
}

impl TierMap {
    /// Rank every distinct vector in `table`.
    ///
    /// `expected` is the number of records in the batch; every ordinal in `0..expected` must have
    /// exactly one vector. Vectors are counted in first-seen (ordinal) order, stably sorted by
    /// count, and the tier only advances when the count changes.
    #[tracing::instrument(skip(table), fields(vectors = table.len()))]
    pub fn build(table: &TraitTable, expected: usize) -> LaserCatResult<Self> {
        if let Some(missing) = (0..expected).find(|&i| table.get(i).is_none()) {
            return Err(LaserCatError::invariant(format!(
                "record {missing} has no trait vector"
            )));
        }
        if table.len() != expected {
            return Err(LaserCatError::invariant(format!(
                "trait table holds {} vectors for {expected} records",
                table.len()
            )));
        }

        let mut counts: Vec<(TraitVector, usize)> = Vec::new();
        let mut slot: HashMap<TraitVector, usize> = HashMap::new();
        for (_, v) in table.iter() {
            match slot.get(&v) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    slot.insert(v, counts.len());
                    counts.push((v, 1));
                }
            }
        }
        counts.sort_by_key(|&(_, n)| n);

        let mut entries = Vec::with_capacity(counts.len());
        let mut by_vector = HashMap::with_capacity(counts.len());
        let mut tier = 0u32;
        let mut last = 0usize;
        for (v, n) in counts {
            if n != last {
                tier += 1;
                last = n;
            }
            entries.push((v, n, tier));
            by_vector.insert(v, tier);
        }

        tracing::info!(distinct = entries.len(), tiers = tier, "rarity tiers built");
        Ok(Self { entries, by_vector })
    }

    pub fn tier_of(&self, vector: TraitVector) -> Option<u32> {
        self.by_vector.get(&vector).copied()
    }

    /// Tier for `vector`, failing loudly when it was never ranked.
    pub fn require(&self, vector: TraitVector) -> LaserCatResult<u32> {
        self.tier_of(vector)
            .ok_or_else(|| LaserCatError::invariant(format!("trait vector {vector} has no tier")))
    }

    pub fn entries(&self) -> &[(TraitVector, usize, u32)] {
        &self.entries
    }

    pub fn tier_count(&self) -> u32 {
        self.entries.last().map(|e| e.2).unwrap_or(0)
    }
}

/// Collection-wide frequency report.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RarityReport {
    /// Occurrences of every attribute value except the tier.
    pub values: BTreeMap<String, usize>,
    /// Occurrences of each special-combo signature: present flags in fixed order, then the tier.
    pub combos: BTreeMap<String, usize>,
    /// Records per trait vector, with the tier it earned.
    pub tiers: BTreeMap<String, TierSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TierSummary {
    pub count: usize,
    pub tier: u32,
}

/// Special-combo markers, in signature order.
const COMBO_MARKERS: [(&str, &str); 6] = [
    ("Spacetime Distortion", "ZDistorted"),
    ("Two Headed", "ZTwoHeaded"),
    ("Space Background", "ZSpaceBg"),
    ("Rainbow", "ZRainbow"),
    ("Laser Show", "ZLaserShow"),
    ("Laser Eyes", "ZLaserEyes"),
];

impl RarityReport {
    /// Tally finalized metadata. The last attribute of each entry is taken as its tier.
    pub fn from_metadata(all: &[Metadata], tiers: &TierMap) -> Self {
        let mut report = Self::default();

        for meta in all {
            let Some((tier, rest)) = meta.attributes.split_last() else {
                continue;
            };
            for attr in rest {
                *report.values.entry(attr.value.to_string()).or_insert(0) += 1;
            }

            let has = |wanted: &str| {
                meta.attributes
                    .iter()
                    .any(|a| matches!(&a.value, TraitValue::Text(t) if t == wanted))
            };
            let mut signature: Vec<String> = COMBO_MARKERS
                .iter()
                .filter(|(value, _)| has(value))
                .map(|(_, marker)| (*marker).to_string())
                .collect();
            signature.push(tier.value.to_string());
            *report.combos.entry(signature.join(", ")).or_insert(0) += 1;
        }

        for &(v, count, tier) in tiers.entries() {
            report
                .tiers
                .insert(v.to_string(), TierSummary { count, tier });
        }
        report
    }
}

#[cfg(test)]
#[path = "../../tests/unit/traits/rarity.rs"]
mod tests;
