//! Collection-wide archetype allocation.
//!
//! Archetype codes are 5-bit patterns (distorted, laser eyes, space background, rainbow,
//! laser show) pre-allocated to a bounded number of records per pose, so curated trait
//! combinations exist at controlled rarity. Allocation runs once per batch, before any traits
//! are assigned, and the resulting table is read-only afterwards.

use std::collections::HashMap;

use crate::foundation::random::RandomSource;
use crate::genotype::record::{GenotypeRecord, Pose};

const DISTORTED: u8 = 0b10000;
const LASER_EYES: u8 = 0b01000;
const SPACE_BACKGROUND: u8 = 0b00100;
const RAINBOW: u8 = 0b00010;
const LASER_SHOW: u8 = 0b00001;

/// Golden-ratio taper applied to two-headed slot counts.
const GOLDEN_TAPER: f64 = 0.618;
/// Single-headed slot counts are replicated this many times per pose.
const SINGLE_HEADED_REPLICAS: usize = 3;

/// 5-bit archetype pattern; the leading bit is "distorted".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchetypeCode(u8);

/// Behavior flags read straight from an archetype code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArchetypeFlags {
    pub distorted: bool,
    pub laser_eyes: bool,
    pub space_background: bool,
    pub rainbow: bool,
    pub laser_show: bool,
}

impl ArchetypeCode {
    pub fn new(bits: u8) -> Option<Self> {
        (bits < 32).then_some(Self(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// All four non-leading bits are zero.
    pub fn is_degenerate(self) -> bool {
        self.0 & !DISTORTED == 0
    }

    /// Laser show without laser eyes cannot be rendered.
    pub fn is_valid(self) -> bool {
        !(self.0 & LASER_SHOW != 0 && self.0 & LASER_EYES == 0)
    }

    pub fn flags(self) -> ArchetypeFlags {
        ArchetypeFlags {
            distorted: self.0 & DISTORTED != 0,
            laser_eyes: self.0 & LASER_EYES != 0,
            space_background: self.0 & SPACE_BACKGROUND != 0,
            rainbow: self.0 & RAINBOW != 0,
            laser_show: self.0 & LASER_SHOW != 0,
        }
    }

    /// Codes `11111` down to `00001`, minus degenerate ones.
    pub fn retained() -> Vec<ArchetypeCode> {
        (1u8..32)
            .rev()
            .map(Self)
            .filter(|c| !c.is_degenerate())
            .collect()
    }
}

impl std::fmt::Display for ArchetypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:05b}", self.0)
    }
}

/// Which half of the collection a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pool {
    TwoHeaded,
    SingleHeaded,
}

impl Pool {
    pub fn of(record: &GenotypeRecord) -> Self {
        if record.genotype.is_two_headed() {
            Self::TwoHeaded
        } else {
            Self::SingleHeaded
        }
    }

    /// Per-pose slot counts for the code at `index`, indexed by [`Pose::slot`].
    pub fn pose_slots(self, index: usize) -> [usize; 4] {
        match self {
            Self::TwoHeaded => match index {
                0 => [1, 0, 1, 0],
                1 => [0, 1, 0, 1],
                i => {
                    let n = if i < 8 {
                        if i % 2 == 0 { i } else { (i - 1) * 2 }
                    } else if i % 2 == 0 {
                        (i - 1) * 2
                    } else {
                        i
                    };
                    let n = (n as f64 * GOLDEN_TAPER).floor() as usize;
                    [n; 4]
                }
            },
            Self::SingleHeaded => {
                let i = index;
                let n = if i < 8 {
                    if i % 2 == 0 { i + 1 } else { i * 2 }
                } else if i % 2 == 0 {
                    i * 2
                } else {
                    i + 1
                };
                [n * SINGLE_HEADED_REPLICAS; 4]
            }
        }
    }
}

/// Outcome of looking a record up in the allocation table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchetypeMatch {
    /// Allocated to a renderable code.
    Assigned(ArchetypeFlags),
    /// Allocated to a code that was invalidated after allocation; the slot stays consumed.
    Invalid(ArchetypeCode),
    /// No code had an open slot for the record's pose.
    Unassigned,
}

/// Slot bookkeeping for one code within one pool.
#[derive(Clone, Debug)]
pub struct CodeAllocation {
    pub code: ArchetypeCode,
    pub capacity: [usize; 4],
    pub remaining: [usize; 4],
    /// Record ordinals in assignment order.
    pub records: Vec<usize>,
}

impl CodeAllocation {
    fn new(code: ArchetypeCode, capacity: [usize; 4]) -> Self {
        Self {
            code,
            capacity,
            remaining: capacity,
            records: Vec::new(),
        }
    }

    fn try_take(&mut self, pose: Pose, ordinal: usize) -> bool {
        let slot = &mut self.remaining[pose.slot()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        self.records.push(ordinal);
        true
    }
}

/// Allocation for one pool.
#[derive(Clone, Debug)]
pub struct PoolAllocation {
    pub pool: Pool,
    pub codes: Vec<CodeAllocation>,
    /// Records that belong to the pool, assigned or not.
    pub members: usize,
    by_ordinal: HashMap<usize, usize>,
}

impl PoolAllocation {
    fn new(pool: Pool, codes: &[ArchetypeCode]) -> Self {
        Self {
            pool,
            codes: codes
                .iter()
                .enumerate()
                .map(|(i, &c)| CodeAllocation::new(c, pool.pose_slots(i)))
                .collect(),
            members: 0,
            by_ordinal: HashMap::new(),
        }
    }

    /// Give `ordinal` to the first code with an open slot for `pose`.
    fn place(&mut self, ordinal: usize, pose: Option<Pose>) -> Option<usize> {
        let pose = pose?;
        let idx = self
            .codes
            .iter_mut()
            .position(|c| c.try_take(pose, ordinal))?;
        self.by_ordinal.insert(ordinal, idx);
        Some(idx)
    }

    pub fn assigned(&self) -> usize {
        self.by_ordinal.len()
    }

    pub fn code_of(&self, ordinal: usize) -> Option<ArchetypeCode> {
        self.by_ordinal.get(&ordinal).map(|&i| self.codes[i].code)
    }
}

/// Read-only result of the collection-wide allocation pass.
#[derive(Clone, Debug)]
pub struct ArchetypeTable {
    pub two_headed: PoolAllocation,
    pub single_headed: PoolAllocation,
}

impl ArchetypeTable {
    pub fn pool(&self, pool: Pool) -> &PoolAllocation {
        match pool {
            Pool::TwoHeaded => &self.two_headed,
            Pool::SingleHeaded => &self.single_headed,
        }
    }

    /// Resolve the archetype state for the record at `ordinal`.
    pub fn lookup(&self, pool: Pool, ordinal: usize) -> ArchetypeMatch {
        match self.pool(pool).code_of(ordinal) {
            None => ArchetypeMatch::Unassigned,
            Some(code) if code.is_valid() => ArchetypeMatch::Assigned(code.flags()),
            Some(code) => ArchetypeMatch::Invalid(code),
        }
    }
}

/// Partition `records` (already in processing order, ordinal = position) into pools and fill
/// archetype slots.
///
/// Draws one permutation per pool from `rng`, two-headed first.
#[tracing::instrument(skip(records, rng), fields(records = records.len()))]
pub fn allocate_archetypes(
    records: &[GenotypeRecord],
    rng: &mut dyn RandomSource,
) -> ArchetypeTable {
    let codes = ArchetypeCode::retained();
    let mut two = PoolAllocation::new(Pool::TwoHeaded, &codes);
    let mut single = PoolAllocation::new(Pool::SingleHeaded, &codes);

    let (two_members, single_members): (Vec<usize>, Vec<usize>) =
        (0..records.len()).partition(|&i| Pool::of(&records[i]) == Pool::TwoHeaded);
    two.members = two_members.len();
    single.members = single_members.len();

    for (alloc, members) in [(&mut two, &two_members), (&mut single, &single_members)] {
        for pick in rng.permutation(members.len()) {
            let ordinal = members[pick];
            alloc.place(ordinal, records[ordinal].pose_slot());
        }
    }

    tracing::info!(
        two_headed = two.members,
        two_headed_assigned = two.assigned(),
        single_headed = single.members,
        single_headed_assigned = single.assigned(),
        "archetypes allocated"
    );

    ArchetypeTable {
        two_headed: two,
        single_headed: single,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/traits/archetype.rs"]
mod tests;
