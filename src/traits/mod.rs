pub(crate) mod archetype;
pub(crate) mod assign;
pub(crate) mod rarity;
